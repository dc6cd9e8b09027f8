//! Base64 data-URL image uploads.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Accepted image extensions.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Decoded upload ready to be written to the media store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub extension: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("expected a data:image/<type>;base64 URL")]
    NotDataUrl,
    #[error("unsupported image type")]
    UnsupportedType,
    #[error("image payload is not valid base64")]
    InvalidBase64,
    #[error("image payload is empty")]
    Empty,
}

impl ImageUpload {
    /// Parse `data:image/<ext>;base64,<payload>`.
    pub fn from_data_url(value: &str) -> Result<Self, ImageError> {
        let rest = value
            .strip_prefix("data:image/")
            .ok_or(ImageError::NotDataUrl)?;
        let (extension, payload) = rest
            .split_once(";base64,")
            .ok_or(ImageError::NotDataUrl)?;
        let extension = extension.to_ascii_lowercase();
        if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ImageError::UnsupportedType);
        }
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|_| ImageError::InvalidBase64)?;
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        Ok(Self { extension, bytes })
    }
}
