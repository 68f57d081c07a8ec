use crate::{
    error::{CaplineError, CaplineResult},
    font::FontSize,
    text::TextRenderer,
};

/// Outcome of a font fit: the chosen size and the height the wrapped text
/// actually occupies at that size. Computed per caption, consumed by panel
/// sizing, never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FitResult {
    pub size: FontSize,
    pub wrapped_height: u32,
}

/// Picks the largest candidate size whose wrapped text height fits.
///
/// Walks `candidates` in the given (largest-first) order and returns the
/// first whose measured height is at most `max_height_px`. When no candidate
/// fits, the smallest is returned with its own measured height: the caption
/// overflows its height bound rather than failing. Overflow-as-policy is
/// deliberate; callers size the panel to `wrapped_height`, so the panel
/// grows instead of clipping the text.
pub fn fit(
    renderer: &dyn TextRenderer,
    candidates: &[FontSize],
    text: &str,
    max_width_px: u32,
    max_height_px: u32,
) -> CaplineResult<FitResult> {
    if candidates.is_empty() {
        return Err(CaplineError::font_measurement(
            "font candidate list is empty",
        ));
    }

    let mut last = None;
    for &size in candidates {
        let wrapped_height = renderer.wrapped_height(size, text, max_width_px)?;
        if wrapped_height <= max_height_px {
            tracing::debug!(?size, wrapped_height, max_height_px, "font fit");
            return Ok(FitResult {
                size,
                wrapped_height,
            });
        }
        last = Some(FitResult {
            size,
            wrapped_height,
        });
    }

    // candidates is non-empty here, so the loop measured at least one
    let smallest = last
        .ok_or_else(|| CaplineError::font_measurement("font candidate list is empty"))?;
    tracing::debug!(
        size = ?smallest.size,
        wrapped_height = smallest.wrapped_height,
        max_height_px,
        "no candidate fits, overflowing at smallest size"
    );
    Ok(smallest)
}
