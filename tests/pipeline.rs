mod common;

use std::cell::RefCell;

use capline::{
    CaplineResult, Color, FontSize, OverlaySpec, RasterBuffer, ShadowSpec, TextRenderer, over,
    overlay,
};
use common::StubRenderer;

const SOURCE_RGBA: [u8; 4] = [40, 90, 160, 255];

fn source_1000() -> RasterBuffer {
    RasterBuffer::filled(1000, 1000, Color::rgba(40, 90, 160, 255))
}

// Defaults on a 1000x1000 image with "HELLO" under the stub model:
// caption box 800x300, Px128 fits on one line (5 glyphs * 64px = 320 wide,
// 128 tall), so the panel is 840x168 at (80, 812).
#[test]
fn defaults_place_a_centered_bottom_anchored_panel() {
    let spec = OverlaySpec::new("HELLO");
    let out = overlay(&spec, &source_1000(), &StubRenderer).unwrap();
    assert_eq!((out.width(), out.height()), (1000, 1000));

    let panel_px = over(SOURCE_RGBA, spec.panel_color.to_array());
    for (x, y) in [(80, 812), (919, 812), (80, 979), (919, 979)] {
        assert_eq!(out.get(x, y), Some(panel_px), "panel corner ({x},{y})");
    }
    // semi-transparent panel blends, it does not replace
    assert_ne!(panel_px, spec.panel_color.to_array());

    // outside the panel the source is untouched
    for (x, y) in [(0, 0), (79, 812), (920, 812), (500, 811), (500, 980)] {
        assert_eq!(out.get(x, y), Some(SOURCE_RGBA), "outside ({x},{y})");
    }

    // text band: one centered line, recolored to the text color
    let text_px = over(panel_px, [255, 255, 255, 255]);
    assert_eq!(out.get(500, 900), Some(text_px));
}

#[test]
fn overflowing_text_still_completes_and_grows_the_panel() {
    // even Px8 wraps to 40 lines * 8px = 320 > the 300px box ceiling
    let spec = OverlaySpec::new("a".repeat(8000));
    let out = overlay(&spec, &source_1000(), &StubRenderer).unwrap();
    assert_eq!((out.width(), out.height()), (1000, 1000));

    // panel height = 320 + 2*20 = 360, anchored 20px above the bottom
    let panel_px = over(SOURCE_RGBA, spec.panel_color.to_array());
    assert_eq!(out.get(80, 620), Some(panel_px));
    assert_eq!(out.get(919, 979), Some(panel_px));
    assert_eq!(out.get(500, 619), Some(SOURCE_RGBA));
}

#[test]
fn rounded_corners_leave_the_source_visible_at_the_panel_corner() {
    let mut spec = OverlaySpec::new("HELLO");
    spec.corner_radius = 20;
    let out = overlay(&spec, &source_1000(), &StubRenderer).unwrap();
    // panel corner (80, 812) is outside the arc, so the source shows through
    assert_eq!(out.get(80, 812), Some(SOURCE_RGBA));
    // panel interior (left of the text band) still blends
    assert_eq!(
        out.get(100, 850),
        Some(over(SOURCE_RGBA, spec.panel_color.to_array()))
    );
}

#[test]
fn target_aspect_reframes_before_layout() {
    let spec = {
        let mut s = OverlaySpec::new("HELLO");
        s.target_aspect = Some((1000, 1500));
        s
    };
    let src = RasterBuffer::filled(2000, 1000, Color::rgba(10, 20, 30, 255));
    let out = overlay(&spec, &src, &StubRenderer).unwrap();
    assert_eq!((out.width(), out.height()), (1000, 1500));
    // caption box now derives from the reframed size: panel bottom-anchored
    // 20px above y=1500
    let panel_px = over([10, 20, 30, 255], spec.panel_color.to_array());
    assert_eq!(out.get(500, 1479), Some(panel_px));
    assert_eq!(out.get(500, 10), Some([10, 20, 30, 255]));
}

#[test]
fn shadow_darkens_beside_the_panel_before_the_panel_lands() {
    let mut spec = OverlaySpec::new("HELLO");
    spec.shadow = Some(ShadowSpec::default());
    let out = overlay(&spec, &source_1000(), &StubRenderer).unwrap();

    // right of the panel (x >= 920) only the shadow reaches
    let shadow_px = over(SOURCE_RGBA, Color::rgba(0, 0, 0, 110).to_array());
    assert_eq!(out.get(922, 900), Some(shadow_px));
    // past the shadow's 6px offset the source is clean
    assert_eq!(out.get(930, 900), Some(SOURCE_RGBA));
}

#[test]
fn uppercase_transforms_the_text_before_measurement() {
    struct CaseAsserting<'a>(&'a StubRenderer, RefCell<Vec<String>>);

    impl TextRenderer for CaseAsserting<'_> {
        fn rendered_color(&self) -> [u8; 3] {
            self.0.rendered_color()
        }
        fn wrapped_height(&self, size: FontSize, text: &str, w: u32) -> CaplineResult<u32> {
            self.1.borrow_mut().push(text.to_string());
            self.0.wrapped_height(size, text, w)
        }
        fn rasterize(
            &self,
            size: FontSize,
            text: &str,
            dest: &mut RasterBuffer,
            ox: u32,
            oy: u32,
            w: u32,
        ) -> CaplineResult<()> {
            self.1.borrow_mut().push(text.to_string());
            self.0.rasterize(size, text, dest, ox, oy, w)
        }
    }

    let mut spec = OverlaySpec::new("hello");
    spec.uppercase = true;
    let renderer = CaseAsserting(&StubRenderer, RefCell::new(Vec::new()));
    overlay(&spec, &source_1000(), &renderer).unwrap();

    let seen = renderer.1.borrow();
    assert!(!seen.is_empty());
    assert!(seen.iter().all(|t| t == "HELLO"));
}

#[test]
fn empty_source_and_bad_fractions_are_rejected() {
    assert!(overlay(&OverlaySpec::new("x"), &RasterBuffer::new(0, 0), &StubRenderer).is_err());

    let mut spec = OverlaySpec::new("x");
    spec.max_width_fraction = 2.0;
    assert!(overlay(&spec, &source_1000(), &StubRenderer).is_err());
}
