use crate::{
    error::CaplineResult,
    font::FontSize,
    raster::{Color, RasterBuffer},
    text::TextRenderer,
};

/// Rasterizes caption text into a transparent buffer and recolors the glyphs.
///
/// The renderer draws glyphs in its single native `rendered_color()`;
/// tinting happens afterwards by color-key substitution: every pixel whose
/// RGB exactly matches the rendered color and whose alpha is non-zero gets
/// its RGB overwritten with `target`'s RGB. Alpha is left untouched; it
/// carries the anti-aliasing of the glyph edge. `target.a` is ignored.
///
/// A renderer that anti-aliases in RGB instead of alpha would leave its soft
/// edges un-recolored; that is the documented limit of the color-key
/// contract, not something this pass papers over. [`crate::FontdueRenderer`]
/// writes coverage into alpha only, so with it the substitution is exact.
pub fn render_caption_text(
    renderer: &dyn TextRenderer,
    size: FontSize,
    text: &str,
    box_width: u32,
    box_height: u32,
    padding: u32,
    max_line_width: u32,
    target: Color,
) -> CaplineResult<RasterBuffer> {
    let mut buf = RasterBuffer::new(box_width, box_height);
    renderer.rasterize(size, text, &mut buf, padding, padding, max_line_width)?;

    let key = renderer.rendered_color();
    for y in 0..buf.height() {
        for x in 0..buf.width() {
            let Some(px) = buf.get(x, y) else { continue };
            if px[3] != 0 && [px[0], px[1], px[2]] == key {
                buf.set(x, y, [target.r, target.g, target.b, px[3]]);
            }
        }
    }
    Ok(buf)
}
