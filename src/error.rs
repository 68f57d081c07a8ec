pub type CaplineResult<T> = Result<T, CaplineError>;

#[derive(thiserror::Error, Debug)]
pub enum CaplineError {
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("font measurement error: {0}")]
    FontMeasurement(String),

    #[error("image decode error: {0}")]
    ImageDecode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CaplineError {
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions(msg.into())
    }

    pub fn font_measurement(msg: impl Into<String>) -> Self {
        Self::FontMeasurement(msg.into())
    }

    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }
}
