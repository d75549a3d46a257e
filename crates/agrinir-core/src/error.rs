use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgrinirError {
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: String,
        actual: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

impl AgrinirError {
    /// Build a `ShapeMismatch` from two `dim()`-style shapes.
    pub fn shape_mismatch<E: std::fmt::Debug, A: std::fmt::Debug>(
        context: &'static str,
        expected: E,
        actual: A,
    ) -> Self {
        Self::ShapeMismatch {
            context,
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        }
    }
}

pub type Result<T> = std::result::Result<T, AgrinirError>;

/// Fail with `ShapeMismatch` unless `actual` equals `expected`.
pub fn ensure_same_shape(
    context: &'static str,
    expected: (usize, usize),
    actual: (usize, usize),
) -> Result<()> {
    if expected != actual {
        return Err(AgrinirError::shape_mismatch(context, expected, actual));
    }
    Ok(())
}
