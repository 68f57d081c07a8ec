use crate::raster::RasterBuffer;

/// Alpha-over blend of one straight-alpha RGBA8 pixel onto another.
///
/// `out = src * srcAlpha + dst * (1 - srcAlpha)` per color channel, with the
/// usual union rule for the alpha channel.
pub fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    for i in 0..3 {
        out[i] = add_sat_u8(
            mul_div255(u16::from(src[i]), sa),
            mul_div255(u16::from(dst[i]), inv),
        );
    }
    out[3] = add_sat_u8(src[3], mul_div255(u16::from(dst[3]), inv));
    out
}

/// Composites `src` onto `dest` with its top-left corner at
/// `(offset_x, offset_y)`.
///
/// Only the intersection of `src`'s rectangle with `dest`'s bounds is
/// touched; pixels falling outside `dest` are skipped, not an error.
/// A fully transparent `src` leaves `dest` byte-for-byte unchanged.
pub fn blend_at(dest: &mut RasterBuffer, src: &RasterBuffer, offset_x: i32, offset_y: i32) {
    let x0 = offset_x.max(0);
    let y0 = offset_y.max(0);
    let x1 = offset_x
        .saturating_add(src.width() as i32)
        .min(dest.width() as i32);
    let y1 = offset_y
        .saturating_add(src.height() as i32)
        .min(dest.height() as i32);

    for dy in y0..y1 {
        for dx in x0..x1 {
            let sx = (dx - offset_x) as u32;
            let sy = (dy - offset_y) as u32;
            let (Some(s), Some(d)) = (src.get(sx, sy), dest.get(dx as u32, dy as u32)) else {
                continue;
            };
            if s[3] == 0 {
                continue;
            }
            dest.set(dx as u32, dy as u32, over(d, s));
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}
