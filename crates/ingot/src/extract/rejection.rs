//! Rejection types for the built-in extractors.
//!
//! A rejection is a typed extraction failure. Every rejection converts into
//! a [`Response`] (status plus a plain-text body), which is how the adapter
//! short-circuits a dispatch: the rejection is converted and returned, and
//! the handler never runs. Callers never see raw rejection values.

use http::StatusCode;
use thiserror::Error;

use ingot_core::{BodyError, IntoResponse, Response};

/// Rejection for [`Extension<T>`](crate::extract::Extension) when no value
/// of the requested type is present.
///
/// A missing extension means a layer that was supposed to insert it did not
/// run, so this maps to a server error rather than a client one.
#[derive(Debug, Clone, Error)]
#[error("missing request extension '{type_name}'")]
pub struct ExtensionRejection {
    /// The type that was requested.
    type_name: &'static str,
}

impl ExtensionRejection {
    pub(crate) fn missing<T>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
        }
    }
}

impl IntoResponse for ExtensionRejection {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Rejection for [`Query<T>`](crate::extract::Query) when the query string
/// does not deserialize into `T`.
#[derive(Debug, Error)]
#[error("failed to deserialize query string: {0}")]
pub struct QueryRejection(#[from] serde_html_form::de::Error);

impl IntoResponse for QueryRejection {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/// Rejection for the [`Bytes`](bytes::Bytes) extractor.
#[derive(Debug, Clone, Error)]
#[error("failed to buffer request body: {0}")]
pub struct BytesRejection(#[from] pub(crate) BodyError);

impl IntoResponse for BytesRejection {
    fn into_response(self) -> Response {
        // Keep the body error's status (400 or 413), swap in our message.
        let status = self.0.clone().into_response().status();
        (status, self.to_string()).into_response()
    }
}

/// Rejection for the `String` extractor.
#[derive(Debug, Clone, Error)]
pub enum StringRejection {
    /// The body could not be buffered.
    #[error("failed to buffer request body: {0}")]
    Read(BodyError),

    /// The body is not valid UTF-8.
    #[error("request body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

impl IntoResponse for StringRejection {
    fn into_response(self) -> Response {
        let status = match &self {
            StringRejection::Read(err) => err.clone().into_response().status(),
            StringRejection::InvalidUtf8(_) => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}

/// Rejection for [`Json<T>`](crate::extract::Json).
#[derive(Debug, Error)]
pub enum JsonRejection {
    /// The request did not declare a JSON content type.
    #[error("expected request with 'Content-Type: application/json'")]
    MissingContentType,

    /// The body could not be buffered.
    #[error("failed to buffer request body: {0}")]
    Read(#[from] BodyError),

    /// The body is not valid JSON for the target type.
    #[error("failed to deserialize request body: {0}")]
    Parse(serde_json::Error),
}

impl IntoResponse for JsonRejection {
    fn into_response(self) -> Response {
        let status = match &self {
            JsonRejection::MissingContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            JsonRejection::Read(err) => err.clone().into_response().status(),
            JsonRejection::Parse(_) => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}
