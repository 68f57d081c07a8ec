use std::sync::Arc;

use fontdue::layout::{
    CoordinateSystem, HorizontalAlign, Layout, LayoutSettings, TextStyle, WrapStyle,
};

use crate::{
    error::{CaplineError, CaplineResult},
    font::{FontLibrary, FontSize},
    raster::RasterBuffer,
};

/// The text-rendering collaborator.
///
/// Given a font size, text, and a maximum line width, an implementation can
/// measure the word-wrapped height and rasterize the wrapped, horizontally
/// centered text into a buffer. Glyphs are emitted in a single fixed
/// `rendered_color()`; tinting is the recolor stage's job, not the
/// renderer's.
pub trait TextRenderer {
    /// RGB every glyph pixel is written with. The recolor pass keys on this.
    fn rendered_color(&self) -> [u8; 3];

    /// Pixel height `text` occupies once word-wrapped to `max_line_width`.
    fn wrapped_height(&self, size: FontSize, text: &str, max_line_width: u32)
    -> CaplineResult<u32>;

    /// Rasterize `text` into `dest`, wrapped to `max_line_width` and centered
    /// within it, with the wrap box's top-left at `(origin_x, origin_y)`.
    /// Glyph coverage goes into the alpha channel; RGB is `rendered_color()`.
    fn rasterize(
        &self,
        size: FontSize,
        text: &str,
        dest: &mut RasterBuffer,
        origin_x: u32,
        origin_y: u32,
        max_line_width: u32,
    ) -> CaplineResult<()>;
}

/// fontdue-backed production renderer.
pub struct FontdueRenderer {
    font: Arc<fontdue::Font>,
}

impl FontdueRenderer {
    const RENDERED_RGB: [u8; 3] = [255, 255, 255];

    pub fn new(library: &FontLibrary) -> Self {
        Self {
            font: library.handle(),
        }
    }

    /// Renderer over the process-wide [`FontLibrary`]; errors when no font
    /// has been installed yet.
    pub fn from_global() -> CaplineResult<Self> {
        let library = FontLibrary::get().ok_or_else(|| {
            CaplineError::font_measurement("no font installed (FontLibrary::install first)")
        })?;
        Ok(Self::new(library))
    }

    fn layout(&self, size: FontSize, text: &str, settings: &LayoutSettings) -> Layout {
        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(settings);
        layout.append(&[self.font.as_ref()], &TextStyle::new(text, size.px(), 0));
        layout
    }
}

fn check_measurable(text: &str) -> CaplineResult<()> {
    if text.trim().is_empty() {
        return Err(CaplineError::font_measurement(
            "cannot measure empty caption text",
        ));
    }
    Ok(())
}

impl TextRenderer for FontdueRenderer {
    fn rendered_color(&self) -> [u8; 3] {
        Self::RENDERED_RGB
    }

    fn wrapped_height(
        &self,
        size: FontSize,
        text: &str,
        max_line_width: u32,
    ) -> CaplineResult<u32> {
        check_measurable(text)?;
        let layout = self.layout(
            size,
            text,
            &LayoutSettings {
                max_width: Some(max_line_width as f32),
                wrap_style: WrapStyle::Word,
                ..LayoutSettings::default()
            },
        );
        Ok(layout.height().ceil() as u32)
    }

    fn rasterize(
        &self,
        size: FontSize,
        text: &str,
        dest: &mut RasterBuffer,
        origin_x: u32,
        origin_y: u32,
        max_line_width: u32,
    ) -> CaplineResult<()> {
        check_measurable(text)?;
        let layout = self.layout(
            size,
            text,
            &LayoutSettings {
                x: origin_x as f32,
                y: origin_y as f32,
                max_width: Some(max_line_width as f32),
                horizontal_align: HorizontalAlign::Center,
                wrap_style: WrapStyle::Word,
                ..LayoutSettings::default()
            },
        );

        let [r, g, b] = Self::RENDERED_RGB;
        for glyph in layout.glyphs() {
            let (metrics, coverage) = self.font.rasterize_indexed(glyph.key.glyph_index, glyph.key.px);
            if metrics.width == 0 || metrics.height == 0 {
                continue;
            }
            let gx = glyph.x.round() as i32;
            let gy = glyph.y.round() as i32;
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let cov = coverage[row * metrics.width + col];
                    if cov == 0 {
                        continue;
                    }
                    let px = gx + col as i32;
                    let py = gy + row as i32;
                    if px < 0 || py < 0 {
                        continue;
                    }
                    // overlapping glyph boxes keep the strongest coverage
                    let a = match dest.get(px as u32, py as u32) {
                        Some(existing) => existing[3].max(cov),
                        None => continue,
                    };
                    dest.set(px as u32, py as u32, [r, g, b, a]);
                }
            }
        }
        Ok(())
    }
}
