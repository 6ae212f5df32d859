//! External image hosting port.

use async_trait::async_trait;

use crate::domain::ports::macros::define_port_error;

define_port_error! {
    /// Failures surfaced by [`ImageHost`] implementations.
    ImageHostError {
        /// The upstream did not answer within the deadline.
        Timeout => "image host timed out: {message}",
        /// The request never completed.
        Transport => "image host transport failure: {message}",
        /// The upstream answered with an error status.
        Status => "image host rejected the upload: {message}",
        /// The upstream answered 2xx but the body was not understood.
        Decode => "image host response not understood: {message}",
    }
}

/// An image file extracted from a multipart listing submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name from the form part, if supplied.
    pub file_name: Option<String>,
    /// Declared media type of the part.
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// Port for uploading listing images to the external host.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload one image and return its public URL.
    async fn upload(&self, image: &ImageUpload) -> Result<String, ImageHostError>;
}

/// In-memory stand-in used when no image host is configured.
///
/// Returns a deterministic placeholder URL so listing submission still
/// works in demos.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureImageHost;

#[async_trait]
impl ImageHost for FixtureImageHost {
    async fn upload(&self, image: &ImageUpload) -> Result<String, ImageHostError> {
        let name = image.file_name.as_deref().unwrap_or("image");
        Ok(format!("https://images.invalid/fixture/{name}"))
    }
}
