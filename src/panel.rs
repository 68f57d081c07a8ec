use crate::raster::{Color, RasterBuffer};

/// Renders a filled rectangle, optionally with anti-aliased rounded corners.
///
/// Pixels outside the rounded silhouette are fully transparent; inside it
/// they carry `color` (including its own alpha). The corner boundary gets a
/// 1-pixel-wide linear falloff band on each side of the arc. The band width
/// is a visual parameter, not a bit-exact contract.
///
/// `corner_radius = 0` degenerates to a plain filled rectangle; zero
/// `width`/`height` yields an empty buffer. The same routine with a dark,
/// low-alpha color drawn at a small offset produces the drop shadow.
pub fn render_panel(width: u32, height: u32, corner_radius: u32, color: Color) -> RasterBuffer {
    let mut buf = RasterBuffer::new(width, height);
    if width == 0 || height == 0 {
        return buf;
    }

    // radii past half the short side would hollow out the middle
    let r = corner_radius.min(width / 2).min(height / 2) as f32;

    for y in 0..height {
        for x in 0..width {
            // distance to the nearest edge along each axis
            let dx = x.min(width - 1 - x) as f32;
            let dy = y.min(height - 1 - y) as f32;

            let alpha = if dx >= r || dy >= r {
                color.a
            } else {
                // inside a corner square: distance from the arc center
                let d = (r - dx).hypot(r - dy);
                if d <= r - 1.0 {
                    color.a
                } else if d >= r + 1.0 {
                    0
                } else {
                    let t = ((r + 1.0 - d) / 2.0).clamp(0.0, 1.0);
                    (f32::from(color.a) * t).round() as u8
                }
            };

            if alpha > 0 {
                buf.set(x, y, [color.r, color.g, color.b, alpha]);
            }
        }
    }
    buf
}
