use async_trait::async_trait;
use docsign_core::{messages, AppError};
use thiserror::Error;

/// Errors raised while stamping a document.
#[derive(Debug, Error)]
pub enum StampError {
    /// The input bytes are not a usable document.
    #[error("Failed to load document: {0}")]
    DocumentLoad(String),

    /// The signature font could not be read or parsed.
    #[error("Signature font unavailable: {0}")]
    FontUnavailable(String),

    /// The document loaded but could not be modified or serialized.
    #[error("Failed to write document: {0}")]
    Write(String),

    #[error("Stamping task failed: {0}")]
    Task(String),
}

impl From<StampError> for AppError {
    fn from(err: StampError) -> Self {
        match err {
            StampError::DocumentLoad(reason) => AppError::DocumentLoadFailed(reason),
            StampError::FontUnavailable(reason) => AppError::FontUnavailable(reason),
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// Fill colour of the stamp, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl StampColor {
    pub const BLACK: StampColor = StampColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
}

/// A single line of text drawn at a fixed position, in PDF user-space units.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStamp {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: StampColor,
}

impl TextStamp {
    /// The signature line `חתימה: <name>` at (50, 50), 18pt, black.
    pub fn signature(name: &str) -> Self {
        Self {
            text: format!("{}{}", messages::SIGNATURE_PREFIX, name),
            x: 50.0,
            y: 50.0,
            size: 18.0,
            color: StampColor::BLACK,
        }
    }
}

/// Applies a [`TextStamp`] to a serialized document and returns the new serialization.
#[async_trait]
pub trait DocumentTransformer: Send + Sync {
    async fn apply_stamp(&self, data: Vec<u8>, stamp: &TextStamp) -> Result<Vec<u8>, StampError>;
}
