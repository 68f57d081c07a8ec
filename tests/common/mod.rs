//! Shared deterministic stand-in for the fontdue renderer.
//!
//! Every glyph is `px/2` wide and `px` tall; lines wrap greedily at the
//! character level. Rasterization stamps one solid band per wrapped line,
//! centered in the wrap box, so pipeline tests can predict exact geometry
//! without a real font file.

use capline::{CaplineError, CaplineResult, FontSize, RasterBuffer, TextRenderer};

pub struct StubRenderer;

pub const STUB_RGB: [u8; 3] = [12, 34, 56];

impl StubRenderer {
    pub fn glyph_width(size: FontSize) -> u32 {
        (size.px() / 2.0) as u32
    }

    pub fn line_height(size: FontSize) -> u32 {
        size.px() as u32
    }

    pub fn wrap(size: FontSize, text: &str, max_line_width: u32) -> CaplineResult<(u32, u32)> {
        let chars = text.chars().count() as u32;
        if chars == 0 {
            return Err(CaplineError::font_measurement("empty text"));
        }
        let per_line = (max_line_width / Self::glyph_width(size)).max(1);
        let lines = chars.div_ceil(per_line);
        Ok((lines, per_line))
    }
}

impl TextRenderer for StubRenderer {
    fn rendered_color(&self) -> [u8; 3] {
        STUB_RGB
    }

    fn wrapped_height(
        &self,
        size: FontSize,
        text: &str,
        max_line_width: u32,
    ) -> CaplineResult<u32> {
        let (lines, _) = Self::wrap(size, text, max_line_width)?;
        Ok(lines * Self::line_height(size))
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
        let (lines, per_line) = Self::wrap(size, text, max_line_width)?;
        let chars = text.chars().count() as u32;
        let [r, g, b] = STUB_RGB;

        for line in 0..lines {
            let on_line = per_line.min(chars - line * per_line);
            let band_w = on_line * Self::glyph_width(size);
            let x0 = origin_x + (max_line_width.saturating_sub(band_w)) / 2;
            let y0 = origin_y + line * Self::line_height(size);
            for y in y0..y0 + Self::line_height(size) {
                for x in x0..x0 + band_w {
                    dest.set(x, y, [r, g, b, 255]);
                }
            }
        }
        Ok(())
    }
}
