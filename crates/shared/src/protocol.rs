use serde::{Deserialize, Serialize};

/// Error body returned by the document service on non-2xx responses. Older
/// service revisions used `error`, newer ones `message`; both are accepted
/// and `error` wins when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ServiceErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_key_takes_precedence_over_message() {
        let body: ServiceErrorBody =
            serde_json::from_str(r#"{"error": "disk full", "message": "ignored"}"#).expect("body");
        assert_eq!(body.into_message().as_deref(), Some("disk full"));
    }

    #[test]
    fn message_key_is_accepted_alone() {
        let body: ServiceErrorBody =
            serde_json::from_str(r#"{"message": "bad request"}"#).expect("body");
        assert_eq!(body.into_message().as_deref(), Some("bad request"));
    }

    #[test]
    fn empty_body_yields_no_message() {
        let body: ServiceErrorBody = serde_json::from_str("{}").expect("body");
        assert_eq!(body.into_message(), None);
    }
}
