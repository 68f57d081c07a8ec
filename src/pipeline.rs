use crate::{
    composite::blend_at,
    error::{CaplineError, CaplineResult},
    fit::fit,
    font::FontSize,
    panel::render_panel,
    raster::{Color, RasterBuffer, Rect},
    recolor::render_caption_text,
    reframe::reframe,
    text::TextRenderer,
};

/// Everything one overlay request configures.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct OverlaySpec {
    pub text: String,

    /// Caption box width as a fraction of image width, in (0, 1].
    #[serde(default = "default_max_width_fraction")]
    pub max_width_fraction: f64,

    /// Caption box height ceiling as a fraction of image height, in (0, 1].
    #[serde(default = "default_max_height_fraction")]
    pub max_height_fraction: f64,

    /// Inner margin between panel edge and text, in pixels.
    #[serde(default = "default_padding")]
    pub padding: u32,

    /// 0 = sharp rectangle; > 0 = anti-aliased rounded corners.
    #[serde(default)]
    pub corner_radius: u32,

    #[serde(default = "default_panel_color")]
    pub panel_color: Color,

    #[serde(default = "default_text_color")]
    pub text_color: Color,

    /// Gap between the panel bottom and the image bottom, in pixels.
    #[serde(default = "default_bottom_margin")]
    pub bottom_margin: u32,

    /// When set, the source is cover-scaled and center-cropped to this
    /// aspect before layout.
    #[serde(default)]
    pub target_aspect: Option<(u32, u32)>,

    /// Uppercase the text before measurement and rendering.
    #[serde(default)]
    pub uppercase: bool,

    /// Drop shadow behind the panel.
    #[serde(default)]
    pub shadow: Option<ShadowSpec>,
}

fn default_max_width_fraction() -> f64 {
    0.8
}

fn default_max_height_fraction() -> f64 {
    0.3
}

fn default_padding() -> u32 {
    20
}

fn default_bottom_margin() -> u32 {
    20
}

fn default_panel_color() -> Color {
    Color::rgba(0, 0, 0, 170)
}

fn default_text_color() -> Color {
    Color::WHITE
}

/// Drop shadow configuration: the panel silhouette re-rendered in
/// `color` and composited first at `(offset_x, offset_y)` from the panel.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct ShadowSpec {
    #[serde(default = "default_shadow_offset")]
    pub offset_x: i32,
    #[serde(default = "default_shadow_offset")]
    pub offset_y: i32,
    #[serde(default = "default_shadow_color")]
    pub color: Color,
}

fn default_shadow_offset() -> i32 {
    6
}

fn default_shadow_color() -> Color {
    Color::rgba(0, 0, 0, 110)
}

impl Default for ShadowSpec {
    fn default() -> Self {
        Self {
            offset_x: default_shadow_offset(),
            offset_y: default_shadow_offset(),
            color: default_shadow_color(),
        }
    }
}

impl OverlaySpec {
    /// A spec with the given caption and all defaults.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            max_width_fraction: default_max_width_fraction(),
            max_height_fraction: default_max_height_fraction(),
            padding: default_padding(),
            corner_radius: 0,
            panel_color: default_panel_color(),
            text_color: default_text_color(),
            bottom_margin: default_bottom_margin(),
            target_aspect: None,
            uppercase: false,
            shadow: None,
        }
    }

    pub fn validate(&self) -> CaplineResult<()> {
        for (name, f) in [
            ("max_width_fraction", self.max_width_fraction),
            ("max_height_fraction", self.max_height_fraction),
        ] {
            if !(f > 0.0 && f <= 1.0) {
                return Err(CaplineError::invalid_dimensions(format!(
                    "{name} must be in (0, 1], got {f}"
                )));
            }
        }
        if let Some((w, h)) = self.target_aspect {
            if w == 0 || h == 0 {
                return Err(CaplineError::invalid_dimensions(format!(
                    "target aspect must be positive, got {w}x{h}"
                )));
            }
        }
        Ok(())
    }
}

/// Runs the full overlay transformation and returns the composited image.
///
/// Linear flow: optional reframe, uppercase transform, font fit, panel
/// geometry, shadow + panel + recolored text composites. Each invocation
/// works on owned buffers and shares nothing with concurrent ones.
#[tracing::instrument(skip(spec, source, renderer), fields(text_len = spec.text.len()))]
pub fn overlay(
    spec: &OverlaySpec,
    source: &RasterBuffer,
    renderer: &dyn TextRenderer,
) -> CaplineResult<RasterBuffer> {
    spec.validate()?;
    if source.is_empty() {
        return Err(CaplineError::invalid_dimensions(
            "source image must be non-empty",
        ));
    }

    let mut working = match spec.target_aspect {
        Some((tw, th)) => {
            let reserved = (f64::from(th) * spec.max_height_fraction).round() as u32
                + 2 * spec.padding
                + spec.bottom_margin;
            reframe(source, tw, th, reserved)?
        }
        None => source.clone(),
    };

    let text = if spec.uppercase {
        spec.text.to_uppercase()
    } else {
        spec.text.clone()
    };

    let box_w = (f64::from(working.width()) * spec.max_width_fraction).round() as u32;
    let box_h = (f64::from(working.height()) * spec.max_height_fraction).round() as u32;
    if box_w == 0 || box_h == 0 {
        return Err(CaplineError::invalid_dimensions(format!(
            "caption box degenerates to {box_w}x{box_h} on a {}x{} image",
            working.width(),
            working.height()
        )));
    }

    let fitted = fit(renderer, &FontSize::DESCENDING, &text, box_w, box_h)?;
    tracing::debug!(size = ?fitted.size, wrapped_height = fitted.wrapped_height, "caption fitted");

    let panel = Rect::new(
        (working.width() as i32 - (box_w as i32 + 2 * spec.padding as i32)) / 2,
        working.height() as i32
            - spec.bottom_margin as i32
            - (fitted.wrapped_height as i32 + 2 * spec.padding as i32),
        box_w as i32 + 2 * spec.padding as i32,
        fitted.wrapped_height as i32 + 2 * spec.padding as i32,
    );

    let panel_buf = render_panel(
        panel.width as u32,
        panel.height as u32,
        spec.corner_radius,
        spec.panel_color,
    );

    if let Some(shadow) = &spec.shadow {
        let shadow_buf = render_panel(
            panel.width as u32,
            panel.height as u32,
            spec.corner_radius,
            shadow.color,
        );
        blend_at(
            &mut working,
            &shadow_buf,
            panel.x + shadow.offset_x,
            panel.y + shadow.offset_y,
        );
    }

    blend_at(&mut working, &panel_buf, panel.x, panel.y);

    let caption = render_caption_text(
        renderer,
        fitted.size,
        &text,
        panel.width as u32,
        panel.height as u32,
        spec.padding,
        box_w,
        spec.text_color,
    )?;
    blend_at(&mut working, &caption, panel.x, panel.y);

    Ok(working)
}
