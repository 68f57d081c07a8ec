use crate::{
    error::{CaplineError, CaplineResult},
    raster::RasterBuffer,
};

/// Rescales and center-crops `image` to exactly `target_w x target_h`.
///
/// The scale factor is `max(target_w / w, target_h / h)`: scale-to-cover,
/// so the frame is always filled and excess is cropped, never letterboxed.
/// Resampling is bilinear. The crop is centered; if rounding would push the
/// bottom `reserved_bottom` rows of the crop past the scaled image's bottom
/// edge, the crop origin shifts up just enough (floored at 0) so the band
/// the caption panel occupies always samples real image data.
pub fn reframe(
    image: &RasterBuffer,
    target_w: u32,
    target_h: u32,
    reserved_bottom: u32,
) -> CaplineResult<RasterBuffer> {
    if target_w == 0 || target_h == 0 {
        return Err(CaplineError::invalid_dimensions(format!(
            "reframe target must be positive, got {target_w}x{target_h}"
        )));
    }
    if image.is_empty() {
        return Err(CaplineError::invalid_dimensions(
            "cannot reframe an empty source image",
        ));
    }

    let scale = f64::max(
        f64::from(target_w) / f64::from(image.width()),
        f64::from(target_h) / f64::from(image.height()),
    );
    let scaled_w = ((f64::from(image.width()) * scale).round() as u32).max(1);
    let scaled_h = ((f64::from(image.height()) * scale).round() as u32).max(1);
    tracing::debug!(scale, scaled_w, scaled_h, "cover-scaling source");

    let scaled = resize_bilinear(image, scaled_w, scaled_h);

    let crop_x = scaled_w.saturating_sub(target_w) / 2;
    let mut crop_y = scaled_h.saturating_sub(target_h) / 2;
    // Cover-scaling keeps the scaled image at least as tall as the crop up
    // to rounding; when rounding loses a row, the centered origin would push
    // the reserved caption band past the scaled bottom edge. Pull the crop
    // up just enough, floored at 0.
    if crop_y.saturating_add(target_h) > scaled_h {
        let adjusted = scaled_h.saturating_sub(target_h);
        tracing::debug!(crop_y, adjusted, reserved_bottom, "shifting crop to keep caption band in bounds");
        crop_y = adjusted;
    }

    Ok(crop(&scaled, crop_x, crop_y, target_w, target_h))
}

/// Bilinear resample to `dst_w x dst_h`, interpolating all four channels.
fn resize_bilinear(src: &RasterBuffer, dst_w: u32, dst_h: u32) -> RasterBuffer {
    if src.width() == dst_w && src.height() == dst_h {
        return src.clone();
    }

    let mut dst = RasterBuffer::new(dst_w, dst_h);
    let sx = f64::from(src.width()) / f64::from(dst_w);
    let sy = f64::from(src.height()) / f64::from(dst_h);
    let max_x = src.width() - 1;
    let max_y = src.height() - 1;

    for y in 0..dst_h {
        let fy = ((f64::from(y) + 0.5) * sy - 0.5).max(0.0);
        let y0 = (fy.floor() as u32).min(max_y);
        let y1 = (y0 + 1).min(max_y);
        let wy = fy - f64::from(y0);

        for x in 0..dst_w {
            let fx = ((f64::from(x) + 0.5) * sx - 0.5).max(0.0);
            let x0 = (fx.floor() as u32).min(max_x);
            let x1 = (x0 + 1).min(max_x);
            let wx = fx - f64::from(x0);

            let (Some(p00), Some(p10), Some(p01), Some(p11)) = (
                src.get(x0, y0),
                src.get(x1, y0),
                src.get(x0, y1),
                src.get(x1, y1),
            ) else {
                continue;
            };

            let mut out = [0u8; 4];
            for c in 0..4 {
                let top = f64::from(p00[c]) * (1.0 - wx) + f64::from(p10[c]) * wx;
                let bottom = f64::from(p01[c]) * (1.0 - wx) + f64::from(p11[c]) * wx;
                out[c] = (top * (1.0 - wy) + bottom * wy).round() as u8;
            }
            dst.set(x, y, out);
        }
    }
    dst
}

fn crop(src: &RasterBuffer, x0: u32, y0: u32, w: u32, h: u32) -> RasterBuffer {
    let mut dst = RasterBuffer::new(w, h);
    for y in 0..h {
        for x in 0..w {
            if let Some(px) = src.get(x0 + x, y0 + y) {
                dst.set(x, y, px);
            }
        }
    }
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Color;

    #[test]
    fn identity_resize_is_a_copy() {
        let src = RasterBuffer::filled(4, 3, Color::rgba(7, 8, 9, 255));
        assert_eq!(resize_bilinear(&src, 4, 3), src);
    }

    #[test]
    fn upscale_of_flat_color_stays_flat() {
        let src = RasterBuffer::filled(2, 2, Color::rgba(40, 80, 120, 255));
        let dst = resize_bilinear(&src, 7, 5);
        for y in 0..5 {
            for x in 0..7 {
                assert_eq!(dst.get(x, y), Some([40, 80, 120, 255]));
            }
        }
    }

    #[test]
    fn crop_extracts_the_requested_window() {
        let mut src = RasterBuffer::new(4, 4);
        src.set(2, 3, [1, 2, 3, 4]);
        let out = crop(&src, 2, 3, 2, 1);
        assert_eq!(out.get(0, 0), Some([1, 2, 3, 4]));
        assert_eq!(out.get(1, 0), Some([0, 0, 0, 0]));
    }
}
