/// Convenience result type used across Mockframe.
pub type MockupResult<T> = Result<T, MockupError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant carries a single descriptive sentence; the HTTP boundary maps
/// kinds to status codes and never exposes anything richer than the message.
#[derive(thiserror::Error, Debug)]
pub enum MockupError {
    /// The uploaded image's dimensions or pixel data cannot be decoded.
    #[error("unreadable image: {0}")]
    UnreadableImage(String),

    /// Caller-supplied model/color combination is not in the catalog.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// The asset provider has no frame bytes for the requested key.
    #[error("frame not found: {0}")]
    FrameNotFound(String),

    /// An upload exceeded the caller-side size policy.
    #[error("upload too large: {0}")]
    UploadTooLarge(String),

    /// Frame image dimensions or pixel data cannot be read by the compositor.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// The computed screen viewport has non-positive width or height.
    #[error("invalid viewport: {0}")]
    InvalidViewport(String),

    /// A device registry failed construction-time validation.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MockupError {
    /// Build a [`MockupError::UnreadableImage`] value.
    pub fn unreadable_image(msg: impl Into<String>) -> Self {
        Self::UnreadableImage(msg.into())
    }

    /// Build a [`MockupError::InvalidSelection`] value.
    pub fn invalid_selection(msg: impl Into<String>) -> Self {
        Self::InvalidSelection(msg.into())
    }

    /// Build a [`MockupError::FrameNotFound`] value.
    pub fn frame_not_found(msg: impl Into<String>) -> Self {
        Self::FrameNotFound(msg.into())
    }

    /// Build a [`MockupError::UploadTooLarge`] value.
    pub fn upload_too_large(msg: impl Into<String>) -> Self {
        Self::UploadTooLarge(msg.into())
    }

    /// Build a [`MockupError::InvalidFrame`] value.
    pub fn invalid_frame(msg: impl Into<String>) -> Self {
        Self::InvalidFrame(msg.into())
    }

    /// Build a [`MockupError::InvalidViewport`] value.
    pub fn invalid_viewport(msg: impl Into<String>) -> Self {
        Self::InvalidViewport(msg.into())
    }

    /// Build a [`MockupError::InvalidCatalog`] value.
    pub fn invalid_catalog(msg: impl Into<String>) -> Self {
        Self::InvalidCatalog(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
