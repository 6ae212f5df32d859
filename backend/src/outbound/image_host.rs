//! Reqwest-backed image host adapter.
//!
//! Owns transport details only: multipart encoding, the `x-api-key` header,
//! timeout and status mapping, and pulling the public URL out of the JSON
//! response.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::domain::ports::{ImageHost, ImageHostError, ImageUpload};

const BODY_PREVIEW_LIMIT: usize = 160;
const DEFAULT_FILE_NAME: &str = "image";

/// Image host adapter that POSTs multipart uploads to one endpoint.
pub struct HttpImageHost {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl HttpImageHost {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, api_key: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> ImageHostError {
    if error.is_timeout() {
        ImageHostError::timeout(error.to_string())
    } else {
        ImageHostError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ImageHostError {
    let preview: String = String::from_utf8_lossy(body)
        .chars()
        .take(BODY_PREVIEW_LIMIT)
        .collect();
    ImageHostError::status(format!("{status}: {preview}"))
}

/// Pull the public URL out of the upload response.
///
/// Accepts `{"data": {"url": ...}}` and the flat `{"url": ...}` shape.
fn extract_url(body: &Value) -> Option<String> {
    body.get("data")
        .and_then(|data| data.get("url"))
        .or_else(|| body.get("url"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

#[async_trait]
impl ImageHost for HttpImageHost {
    async fn upload(&self, image: &ImageUpload) -> Result<String, ImageHostError> {
        let file_name = image
            .file_name
            .clone()
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_owned());
        let part = Part::bytes(image.bytes.clone())
            .file_name(file_name)
            .mime_str(&image.content_type)
            .map_err(|err| ImageHostError::transport(format!("invalid content type: {err}")))?;
        let form = Form::new().part("image", part);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-api-key", self.api_key.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let decoded: Value = serde_json::from_slice(body.as_ref())
            .map_err(|err| ImageHostError::decode(format!("invalid JSON payload: {err}")))?;
        extract_url(&decoded)
            .ok_or_else(|| ImageHostError::decode("response carries no image URL"))
    }
}
