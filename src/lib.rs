//! Caption overlay rendering for raster images.
//!
//! The core takes a decoded RGBA8 buffer and an [`OverlaySpec`], fits the
//! largest caption font that fits the text box, draws a (optionally rounded,
//! semi-transparent) background panel, recolors the rasterized glyphs, and
//! alpha-composites everything, optionally after reframing the source to a
//! target aspect ratio. Decoding and encoding stay at the edges; the text
//! rasterizer is the [`TextRenderer`] seam with a fontdue-backed default.

#![forbid(unsafe_code)]

pub mod composite;
pub mod error;
pub mod fit;
pub mod font;
pub mod panel;
pub mod pipeline;
pub mod raster;
pub mod recolor;
pub mod reframe;
pub mod text;

pub use composite::{blend_at, over};
pub use error::{CaplineError, CaplineResult};
pub use fit::{FitResult, fit};
pub use font::{FontLibrary, FontSize};
pub use panel::render_panel;
pub use pipeline::{OverlaySpec, ShadowSpec, overlay};
pub use raster::{Color, RasterBuffer, Rect};
pub use recolor::render_caption_text;
pub use reframe::reframe;
pub use text::{FontdueRenderer, TextRenderer};
