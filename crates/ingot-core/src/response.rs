//! Response conversion protocol.
//!
//! This module defines the [`IntoResponse`] trait that normalizes arbitrary
//! handler return values into a uniform [`Response`]. Conversion is total:
//! it never fails at request time. A return type the protocol does not
//! cover is rejected when the handler is registered, because the handler
//! adapter bounds its return type on `IntoResponse`.
//!
//! # Example
//!
//! ```rust,ignore
//! // All of these are valid handler return types:
//! async fn text() -> &'static str { "hello" }
//! async fn created() -> StatusCode { StatusCode::CREATED }
//! async fn teapot() -> (StatusCode, String) {
//!     (StatusCode::IM_A_TEAPOT, "short and stout".to_string())
//! }
//! async fn fallible() -> Result<String, BodyError> { Ok("ok".to_string()) }
//! ```

use std::borrow::Cow;
use std::convert::Infallible;

use bytes::Bytes;
use http::header::{self, HeaderValue};
use http::StatusCode;

use crate::body::Body;

/// An outgoing response: status, headers, and a [`Body`].
///
/// Produced only via [`IntoResponse`], never constructed ad hoc by
/// extractors.
pub type Response<B = Body> = http::Response<B>;

// ============================================================================
// IntoResponse Trait
// ============================================================================

/// A trait for types that can be converted into a [`Response`].
///
/// Implemented for plain text, raw bytes, status codes, status+value pairs,
/// `Result`/`Option` combinators, and pre-built [`Response`] values (passed
/// through unchanged). Every extractor rejection implements this trait as
/// well, which is how extraction failures become responses without the
/// caller ever seeing a raw rejection.
pub trait IntoResponse {
    /// Convert this value into a response.
    fn into_response(self) -> Response;
}

fn with_content_type(body: Body, content_type: HeaderValue) -> Response {
    let mut res = Response::new(body);
    res.headers_mut().insert(header::CONTENT_TYPE, content_type);
    res
}

const TEXT_PLAIN_UTF_8: &str = "text/plain; charset=utf-8";
const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// Pre-built responses pass through unchanged.
impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

/// Implementation for `()` - an empty 200 response.
impl IntoResponse for () {
    fn into_response(self) -> Response {
        Response::new(Body::empty())
    }
}

impl IntoResponse for Infallible {
    fn into_response(self) -> Response {
        match self {}
    }
}

impl IntoResponse for Body {
    fn into_response(self) -> Response {
        Response::new(self)
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response {
        with_content_type(Body::from(self), HeaderValue::from_static(TEXT_PLAIN_UTF_8))
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response {
        with_content_type(Body::from(self), HeaderValue::from_static(TEXT_PLAIN_UTF_8))
    }
}

impl IntoResponse for Cow<'static, str> {
    fn into_response(self) -> Response {
        match self {
            Cow::Borrowed(text) => text.into_response(),
            Cow::Owned(text) => text.into_response(),
        }
    }
}

impl IntoResponse for Bytes {
    fn into_response(self) -> Response {
        with_content_type(
            Body::from(self),
            HeaderValue::from_static(APPLICATION_OCTET_STREAM),
        )
    }
}

impl IntoResponse for Vec<u8> {
    fn into_response(self) -> Response {
        Bytes::from(self).into_response()
    }
}

impl IntoResponse for &'static [u8] {
    fn into_response(self) -> Response {
        Bytes::from_static(self).into_response()
    }
}

/// Implementation for `StatusCode` - an empty response with that status.
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        let mut res = Response::new(Body::empty());
        *res.status_mut() = self;
        res
    }
}

/// Implementation for `(StatusCode, T)` - converts `T` and overrides the
/// status.
impl<T: IntoResponse> IntoResponse for (StatusCode, T) {
    fn into_response(self) -> Response {
        let (status, value) = self;
        let mut res = value.into_response();
        *res.status_mut() = status;
        res
    }
}

/// Implementation for `Option<T>` - `None` becomes an empty 404.
impl<T: IntoResponse> IntoResponse for Option<T> {
    fn into_response(self) -> Response {
        match self {
            Some(value) => value.into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

/// Implementation for `Result<T, E>` - both sides convert on their own
/// terms.
impl<T: IntoResponse, E: IntoResponse> IntoResponse for Result<T, E> {
    fn into_response(self) -> Response {
        match self {
            Ok(value) => value.into_response(),
            Err(err) => err.into_response(),
        }
    }
}
