//! Durable blob storage
//!
//! `exists` / `delete` / `put`. Production speaks the Azure Blob REST API
//! with a container SAS token.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::error::{AppError, AppResult, ConfigError};

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn exists(&self, name: &str) -> AppResult<bool>;

    async fn delete(&self, name: &str) -> AppResult<()>;

    /// Store `bytes` under `name` and return its access URL
    async fn put(&self, name: &str, bytes: Vec<u8>, overwrite: bool) -> AppResult<String>;
}

pub struct AzureBlobStore {
    client: Client,
    container_url: Url,
    sas_token: String,
}

#[derive(Debug, thiserror::Error)]
#[error("unexpected status {status} for {operation}")]
struct UnexpectedStatus {
    operation: &'static str,
    status: StatusCode,
}

impl AzureBlobStore {
    pub fn new(container_url: &str, sas_token: impl Into<String>) -> Result<Self, ConfigError> {
        let mut container_url = Url::parse(container_url).map_err(|_| ConfigError::InvalidUrl {
            field: "blob_container_url",
            value: container_url.to_string(),
        })?;
        if !container_url.path().ends_with('/') {
            let path = format!("{}/", container_url.path());
            container_url.set_path(&path);
        }

        Ok(Self {
            client: Client::new(),
            container_url,
            sas_token: sas_token.into().trim_start_matches('?').to_string(),
        })
    }

    /// Public URL of the blob, without credentials
    pub fn blob_url(&self, name: &str) -> AppResult<Url> {
        self.container_url.join(name).map_err(|e| AppError::storage(name, e))
    }

    fn signed_url(&self, name: &str) -> AppResult<Url> {
        let mut url = self.blob_url(name)?;
        if !self.sas_token.is_empty() {
            url.set_query(Some(&self.sas_token));
        }
        Ok(url)
    }
}

#[async_trait]
impl BlobStore for AzureBlobStore {
    async fn exists(&self, name: &str) -> AppResult<bool> {
        let response = self
            .client
            .head(self.signed_url(name)?)
            .send()
            .await
            .map_err(|e| AppError::storage(name, e))?;

        match response.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(AppError::storage(
                name,
                UnexpectedStatus {
                    operation: "HEAD",
                    status,
                },
            )),
        }
    }

    async fn delete(&self, name: &str) -> AppResult<()> {
        let response = self
            .client
            .delete(self.signed_url(name)?)
            .send()
            .await
            .map_err(|e| AppError::storage(name, e))?;

        match response.status() {
            s if s.is_success() || s == StatusCode::NOT_FOUND => Ok(()),
            status => Err(AppError::storage(
                name,
                UnexpectedStatus {
                    operation: "DELETE",
                    status,
                },
            )),
        }
    }

    async fn put(&self, name: &str, bytes: Vec<u8>, overwrite: bool) -> AppResult<String> {
        let mut request = self
            .client
            .put(self.signed_url(name)?)
            .header("x-ms-blob-type", "BlockBlob")
            .header("content-type", content_type_for(name))
            .body(bytes);
        if !overwrite {
            request = request.header("if-none-match", "*");
        }

        let response = request.send().await.map_err(|e| AppError::storage(name, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::storage(
                name,
                UnexpectedStatus {
                    operation: "PUT",
                    status,
                },
            ));
        }

        let url = self.blob_url(name)?;
        debug!("uploaded blob {}", url);
        Ok(url.to_string())
    }
}

fn content_type_for(name: &str) -> &'static str {
    if name.ends_with(".pdf") {
        "application/pdf"
    } else {
        "application/octet-stream"
    }
}
