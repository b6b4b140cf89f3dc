use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    header::ACCEPT,
    multipart::{Form, Part},
    Client, Response,
};
use shared::{
    domain::{Document, DocumentId},
    protocol::ServiceErrorBody,
};
use url::Url;

use crate::{config::ServiceConfig, error::ClientError};

/// One local file queued for upload.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Reads a local file, using its final path component as the filename.
    pub async fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read upload file '{}'", path.display()))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(filename, bytes))
    }
}

/// The document service as seen by the controllers. Object-safe so tests can
/// script responses.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn list_all(&self) -> std::result::Result<Vec<Document>, ClientError>;
    async fn search(&self, query: &str) -> std::result::Result<Vec<Document>, ClientError>;
    async fn upload(&self, files: Vec<FileUpload>)
        -> std::result::Result<Vec<Document>, ClientError>;
    async fn download(&self, id: &DocumentId) -> std::result::Result<Vec<u8>, ClientError>;
}

/// reqwest-backed implementation against the HTTP endpoints in
/// `ServiceConfig`. Endpoint URLs are resolved once at construction so the
/// request paths are infallible afterwards.
pub struct HttpDocumentApi {
    http: Client,
    list_url: Url,
    search_url: Url,
    upload_url: Url,
    download_base: Url,
    upload_field: String,
}

impl HttpDocumentApi {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .with_context(|| format!("invalid document service url '{}'", config.base_url))?;
        let join = |path: &str| {
            base.join(path)
                .with_context(|| format!("invalid endpoint path '{path}'"))
        };
        Ok(Self {
            http: Client::new(),
            list_url: join(&config.list_path)?,
            search_url: join(&config.search_path)?,
            upload_url: join(&config.upload_path)?,
            download_base: join(&config.download_path)?,
            upload_field: config.upload_field.clone(),
        })
    }

    /// URL a presentation layer can navigate to in order to download the
    /// document. The id goes in as a path segment, so opaque string ids are
    /// percent-encoded.
    pub fn download_url(&self, id: &DocumentId) -> Url {
        let mut url = self.download_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.to_string());
        }
        url
    }
}

#[async_trait]
impl DocumentApi for HttpDocumentApi {
    async fn list_all(&self) -> std::result::Result<Vec<Document>, ClientError> {
        let response = self
            .http
            .get(self.list_url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        read_document_list(response).await
    }

    async fn search(&self, query: &str) -> std::result::Result<Vec<Document>, ClientError> {
        let response = self
            .http
            .get(self.search_url.clone())
            .query(&[("query", query)])
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        read_document_list(response).await
    }

    async fn upload(
        &self,
        files: Vec<FileUpload>,
    ) -> std::result::Result<Vec<Document>, ClientError> {
        let mut form = Form::new();
        for file in files {
            let mut part = Part::bytes(file.bytes).file_name(file.filename);
            if let Some(content_type) = file.content_type {
                part = part
                    .mime_str(&content_type)
                    .map_err(|_| ClientError::InvalidUpload(content_type))?;
            }
            form = form.part(self.upload_field.clone(), part);
        }

        let response = self
            .http
            .post(self.upload_url.clone())
            .multipart(form)
            .send()
            .await?;
        read_document_list(response).await
    }

    async fn download(&self, id: &DocumentId) -> std::result::Result<Vec<u8>, ClientError> {
        let response = self.http.get(self.download_url(id)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(service_error(status.as_u16(), response).await);
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Classifies a list/search/upload response. Non-2xx becomes `Service` with
/// the body's message when one parses out; a 2xx body that is not a document
/// sequence becomes `MalformedResponse`.
async fn read_document_list(
    response: Response,
) -> std::result::Result<Vec<Document>, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(service_error(status.as_u16(), response).await);
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

async fn service_error(status: u16, response: Response) -> ClientError {
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ServiceErrorBody>(&body)
        .ok()
        .and_then(ServiceErrorBody::into_message)
        .unwrap_or_else(|| format!("document service returned status {status}"));
    ClientError::service(status, message)
}
