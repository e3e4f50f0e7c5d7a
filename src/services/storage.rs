//! File Storage Uploads
//!
//! Vehicle photos and documents go to an external object store, not the
//! REST backend. The store accepts `PUT {bucket_url}/{key}` and serves the
//! object at `{public_base}/{key}`.

use crate::domain::settings::StorageSettings;
use crate::error::{Error, Result};
use crate::services::envelope::to_api_error;
use crate::services::transport::{ApiRequest, Method, Transport};
use std::path::Path;
use std::sync::Arc;
use tracing::{Instrument, info, info_span};

/// Where an upload ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub key: String,
    pub url: String,
    pub content_type: String,
    pub size: u64,
}

/// Content type from the file extension
pub fn content_type_for(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Lowercase, `[a-z0-9._-]` only, runs of anything else collapsed to `-`
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file_name);

    let mut out = String::with_capacity(base.len());
    for c in base.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            out.push(c);
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches(|c| c == '-' || c == '.');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `folder/uuid-name`, with a slash-free folder
pub fn object_key(folder: &str, file_name: &str) -> String {
    let folder = folder
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    let name = format!("{}-{}", uuid::Uuid::new_v4().simple(), sanitize_file_name(file_name));
    if folder.is_empty() {
        name
    } else {
        format!("{folder}/{name}")
    }
}

#[derive(Clone)]
pub struct StorageUploader {
    settings: StorageSettings,
    transport: Arc<dyn Transport>,
}

impl StorageUploader {
    pub fn new(settings: StorageSettings, transport: Arc<dyn Transport>) -> Self {
        Self {
            settings,
            transport,
        }
    }

    fn bucket(&self) -> &str {
        self.settings.bucket_url.trim_end_matches('/')
    }

    fn check_size(&self, file_name: &str, size: u64) -> Result<()> {
        if size == 0 {
            return Err(Error::Storage {
                message: format!("{file_name} is empty"),
            });
        }
        if size > self.settings.max_upload_bytes {
            return Err(Error::Storage {
                message: format!(
                    "{file_name} is {size} bytes, limit is {}",
                    self.settings.max_upload_bytes
                ),
            });
        }
        Ok(())
    }

    /// Upload bytes under `folder`, returning the public URL
    pub async fn upload_bytes(
        &self,
        folder: &str,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<UploadedFile> {
        let size = data.len() as u64;
        self.check_size(file_name, size)?;

        let key = object_key(folder, file_name);
        let content_type = content_type_for(file_name);
        let url = format!("{}/{}", self.bucket(), key);
        let span = info_span!("upload", url = %url, size);
        self.put(key, url, content_type, data).instrument(span).await
    }

    async fn put(
        &self,
        key: String,
        url: String,
        content_type: String,
        data: Vec<u8>,
    ) -> Result<UploadedFile> {
        let size = data.len() as u64;
        let request = ApiRequest::new(Method::Put, url.clone())
            .bearer(self.settings.token.clone())
            .bytes(content_type.clone(), data);

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(to_api_error("PUT", &url, Some(response.status), &response.body).into());
        }

        let public = format!(
            "{}/{}",
            self.settings.public_base().trim_end_matches('/'),
            key
        );
        info!("Uploaded {} bytes to {}", size, public);
        Ok(UploadedFile {
            key,
            url: public,
            content_type,
            size,
        })
    }

    /// Read a local file and upload it
    ///
    /// The size limit is checked against the file metadata before reading.
    pub async fn upload_file(&self, folder: &str, path: &Path) -> Result<UploadedFile> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        self.check_size(&file_name, tokio::fs::metadata(path).await?.len())?;
        let data = tokio::fs::read(path).await?;
        self.upload_bytes(folder, &file_name, data).await
    }
}
