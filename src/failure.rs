//! Normalization of failed HTTP calls.
//!
//! Whatever transport a client is built on, a failed call boils down to
//! the same few facts: the transport's message plus, when the server
//! actually replied, the status line and a body that may explain what
//! went wrong. [`CallFailure`] captures those facts once, and
//! [`FailedResponse`] is the seam the transport implements to hand
//! them over.

use async_trait::async_trait;

/// Transport-side view of the reply that accompanied a failed call.
///
/// Implemented for [`reqwest::Response`]; test doubles and other HTTP
/// clients implement it the same way. `into_body_text` consumes the
/// response, so the underlying stream is released on every path out,
/// read failure included.
#[async_trait]
pub trait FailedResponse: Send {
    /// Numeric HTTP status of the reply.
    fn status_code(&self) -> u16;

    /// Status text sent with the reply, when the transport knows one.
    fn status_text(&self) -> Option<String>;

    /// Metadata snapshot retained after the body has been consumed.
    fn handle(&self) -> ResponseHandle;

    /// Read the whole body to text, or `None` if it cannot be read.
    async fn into_body_text(self) -> Option<String>;
}

#[async_trait]
impl FailedResponse for reqwest::Response {
    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }

    fn status_text(&self) -> Option<String> {
        self.status().canonical_reason().map(str::to_owned)
    }

    fn handle(&self) -> ResponseHandle {
        ResponseHandle {
            url: Some(self.url().to_string()),
            headers: self
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect(),
        }
    }

    async fn into_body_text(self) -> Option<String> {
        self.text().await.ok()
    }
}

/// Metadata kept from a failed reply once its body has been drained.
#[derive(Debug, Clone, Default)]
pub struct ResponseHandle {
    /// Final URL of the request, after any redirects.
    pub url: Option<String>,
    /// Response headers as name/value text.
    pub headers: Vec<(String, String)>,
}

/// Structured record of one failed REST call.
///
/// `message` is the transport's own description of the failure and stays
/// the externally visible error text (see [`crate::RestError::Call`]);
/// everything else is auxiliary diagnostics captured at adaptation time.
/// The record is built once and never mutated.
#[derive(Debug, Clone, Default)]
pub struct CallFailure {
    /// The transport's failure message, verbatim.
    pub message: String,
    /// HTTP status code, when the server replied.
    pub status_code: Option<u16>,
    /// HTTP status text, when the server replied and the transport knows it.
    pub status_text: Option<String>,
    /// Response body text, when the body held something non-blank.
    pub error_details: Option<String>,
    /// Retained response metadata, when the server replied.
    pub response: Option<ResponseHandle>,
}

impl CallFailure {
    /// Capture a failed call reported by the transport layer.
    ///
    /// With no reply at all (connection-level failure), only `message` is
    /// recorded and every response-derived field stays unset. Otherwise
    /// the status fields are taken from the reply and its body is read to
    /// completion exactly once; non-empty, non-whitespace text becomes
    /// `error_details`. A present-but-empty body is not itself an error.
    pub async fn from_transport<R>(message: impl Into<String>, response: Option<R>) -> Self
    where
        R: FailedResponse,
    {
        let message = message.into();

        let Some(response) = response else {
            return CallFailure {
                message,
                ..CallFailure::default()
            };
        };

        let status_code = response.status_code();
        let status_text = response.status_text();
        let handle = response.handle();
        let error_details = response
            .into_body_text()
            .await
            .filter(|text| !text.trim().is_empty());

        tracing::debug!(
            status = status_code,
            has_details = error_details.is_some(),
            "normalized failed call"
        );

        CallFailure {
            message,
            status_code: Some(status_code),
            status_text,
            error_details,
            response: Some(handle),
        }
    }

    /// Error details parsed as JSON, when the failing service replied
    /// with a JSON document.
    pub fn details_json(&self) -> Option<serde_json::Value> {
        self.error_details
            .as_deref()
            .and_then(|text| serde_json::from_str(text).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RestError;

    struct StubResponse {
        status: u16,
        reason: Option<&'static str>,
        body: Option<&'static str>,
    }

    #[async_trait]
    impl FailedResponse for StubResponse {
        fn status_code(&self) -> u16 {
            self.status
        }

        fn status_text(&self) -> Option<String> {
            self.reason.map(str::to_owned)
        }

        fn handle(&self) -> ResponseHandle {
            ResponseHandle {
                url: Some("http://service.com/things/".to_string()),
                headers: vec![("content-type".to_string(), "text/plain".to_string())],
            }
        }

        async fn into_body_text(self) -> Option<String> {
            self.body.map(str::to_owned)
        }
    }

    fn not_found(body: Option<&'static str>) -> StubResponse {
        StubResponse {
            status: 404,
            reason: Some("Not Found"),
            body,
        }
    }

    #[tokio::test]
    async fn no_reply_keeps_only_the_message() {
        let failure =
            CallFailure::from_transport("connection refused", None::<StubResponse>).await;
        assert_eq!(failure.message, "connection refused");
        assert_eq!(failure.status_code, None);
        assert_eq!(failure.status_text, None);
        assert_eq!(failure.error_details, None);
        assert!(failure.response.is_none());
    }

    #[tokio::test]
    async fn reply_populates_status_fields() {
        let failure =
            CallFailure::from_transport("call failed", Some(not_found(Some("missing")))).await;
        assert_eq!(failure.message, "call failed");
        assert_eq!(failure.status_code, Some(404));
        assert_eq!(failure.status_text.as_deref(), Some("Not Found"));
        assert_eq!(failure.error_details.as_deref(), Some("missing"));

        let handle = failure.response.expect("handle retained");
        assert_eq!(handle.url.as_deref(), Some("http://service.com/things/"));
        assert_eq!(handle.headers.len(), 1);
    }

    #[tokio::test]
    async fn empty_body_leaves_details_unset() {
        let failure = CallFailure::from_transport("call failed", Some(not_found(Some("")))).await;
        assert_eq!(failure.status_code, Some(404));
        assert_eq!(failure.error_details, None);
    }

    #[tokio::test]
    async fn whitespace_body_leaves_details_unset() {
        let failure =
            CallFailure::from_transport("call failed", Some(not_found(Some("   \n\t ")))).await;
        assert_eq!(failure.error_details, None);
    }

    #[tokio::test]
    async fn unreadable_body_leaves_details_unset() {
        let failure = CallFailure::from_transport("call failed", Some(not_found(None))).await;
        assert_eq!(failure.status_code, Some(404));
        assert_eq!(failure.error_details, None);
    }

    #[tokio::test]
    async fn display_is_the_transport_message() {
        let failure =
            CallFailure::from_transport("the call was unsuccessful", Some(not_found(Some("x"))))
                .await;
        let err = RestError::from(failure);
        assert_eq!(err.to_string(), "the call was unsuccessful");
    }

    #[tokio::test]
    async fn details_json_parses_json_bodies() {
        let failure = CallFailure::from_transport(
            "call failed",
            Some(not_found(Some(r#"{"error":"no such thing"}"#))),
        )
        .await;
        let details = failure.details_json().expect("json body");
        assert_eq!(details["error"], "no such thing");
    }

    #[tokio::test]
    async fn details_json_is_none_for_plain_text() {
        let failure =
            CallFailure::from_transport("call failed", Some(not_found(Some("plain text")))).await;
        assert!(failure.details_json().is_none());
    }
}
