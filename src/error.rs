use thiserror::Error;

use crate::failure::CallFailure;

/// A unified error type for this library.
#[derive(Debug, Error)]
pub enum RestError {
    /// An argument broke a builder contract. The message always carries
    /// both the parameter name and the violated rule.
    #[error("invalid argument `{parameter}`: {rule}")]
    InvalidArgument {
        parameter: &'static str,
        rule: &'static str,
    },

    /// A remote call failed. Displays as the transport's own message;
    /// the structured fields ride along as diagnostics.
    #[error("{}", .0.message)]
    Call(CallFailure),

    /// Typed query options could not be serialized.
    #[error("query serialization error: {0}")]
    QuerySerialize(#[from] serde_urlencoded::ser::Error),

    /// HTTP request failed before any reply arrived (network or protocol
    /// issue).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl RestError {
    pub(crate) fn invalid_argument(parameter: &'static str, rule: &'static str) -> Self {
        RestError::InvalidArgument { parameter, rule }
    }
}

impl From<CallFailure> for RestError {
    fn from(failure: CallFailure) -> Self {
        RestError::Call(failure)
    }
}
