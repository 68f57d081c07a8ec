use std::sync::{Arc, OnceLock};

use crate::error::{CaplineError, CaplineResult};

/// The discrete caption font sizes the fitter may pick from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum FontSize {
    Px8,
    Px16,
    Px32,
    Px64,
    Px128,
}

impl FontSize {
    /// All supported sizes, largest first, in the order the fitter walks them.
    pub const DESCENDING: [Self; 5] = [Self::Px128, Self::Px64, Self::Px32, Self::Px16, Self::Px8];

    pub const fn px(self) -> f32 {
        match self {
            Self::Px8 => 8.0,
            Self::Px16 => 16.0,
            Self::Px32 => 32.0,
            Self::Px64 => 64.0,
            Self::Px128 => 128.0,
        }
    }
}

static LIBRARY: OnceLock<FontLibrary> = OnceLock::new();

/// Process-wide font handle cache.
///
/// Installed once from raw font bytes, read-only afterwards, never evicted.
/// A single parsed `fontdue::Font` serves every `FontSize` (scalable fonts
/// are size-independent); the `OnceLock` keeps population synchronized to
/// exactly one initialization even under concurrent first use.
#[derive(Debug)]
pub struct FontLibrary {
    font: Arc<fontdue::Font>,
}

impl FontLibrary {
    /// Parse `bytes` and install the result as the process-wide library.
    ///
    /// Later calls return the already-installed library without re-parsing.
    pub fn install(bytes: &[u8]) -> CaplineResult<&'static Self> {
        if let Some(lib) = LIBRARY.get() {
            return Ok(lib);
        }
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| CaplineError::font_measurement(format!("unusable font bytes: {e}")))?;
        Ok(LIBRARY.get_or_init(|| Self {
            font: Arc::new(font),
        }))
    }

    /// The installed library, if any.
    pub fn get() -> Option<&'static Self> {
        LIBRARY.get()
    }

    pub fn handle(&self) -> Arc<fontdue::Font> {
        Arc::clone(&self.font)
    }
}
