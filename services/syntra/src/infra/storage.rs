//! Hosted object-storage collaborator (evidence image uploads).

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::domain::repository::ObjectStoragePort;
use crate::error::SyntraServiceError;

/// Unsigned-upload client for a Cloudinary-style image endpoint.
///
/// The contract consumed here is minimal: POST a blob + folder hint, get a
/// durable HTTPS URL back. Any upstream failure surfaces as
/// `StorageFailure`, which callers treat as retryable.
#[derive(Clone)]
pub struct HttpObjectStorage {
    pub client: reqwest::Client,
    pub upload_url: String,
    pub upload_preset: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl ObjectStoragePort for HttpObjectStorage {
    async fn upload_image(
        &self,
        bytes: &[u8],
        folder: &str,
    ) -> Result<String, SyntraServiceError> {
        let part = Part::bytes(bytes.to_vec())
            .file_name("evidence")
            .mime_str("application/octet-stream")
            .map_err(|e| SyntraServiceError::Internal(e.into()))?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone())
            .text("folder", folder.to_owned());

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "evidence upload request failed");
                SyntraServiceError::StorageFailure
            })?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "evidence upload rejected upstream");
            return Err(SyntraServiceError::StorageFailure);
        }

        let body: UploadResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "evidence upload returned unparseable body");
            SyntraServiceError::StorageFailure
        })?;
        Ok(body.secure_url)
    }
}
