use thiserror::Error;

/// Classified failure of one request to the document service. Controllers
/// catch these at their boundary, report them on the event channel, and leave
/// the document store untouched.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed: connection refused, DNS failure, the
    /// connection dropped mid-response, and similar.
    #[error("request to document service failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status. `message` is taken from a
    /// parseable `{"error": …}` / `{"message": …}` body when available,
    /// otherwise a generic text naming the status.
    #[error("document service error (status {status}): {message}")]
    Service { status: u16, message: String },

    /// The service answered 2xx but the body did not parse as a document
    /// sequence.
    #[error("malformed response from document service: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// An upload batch entry carried a content type reqwest refuses to encode
    /// as a multipart part. No request is sent.
    #[error("invalid content type '{0}' for upload part")]
    InvalidUpload(String),
}

impl ClientError {
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        ClientError::Service {
            status,
            message: message.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}
