//! The request and response payload type.
//!
//! [`Body`] models a payload that can be consumed exactly once. It is either
//! empty, fully buffered in memory, or a stream of byte chunks that is
//! aggregated on demand. Consumption is by-value: once a `Body` has been
//! turned into bytes there is no way to read it again.

use std::fmt;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use futures::stream::BoxStream;
use thiserror::Error;

use crate::response::{IntoResponse, Response};
use http::StatusCode;

/// Errors that can occur while aggregating a [`Body`].
#[derive(Debug, Clone, Error)]
pub enum BodyError {
    /// The underlying byte stream yielded an error.
    #[error("failed to read body: {0}")]
    Stream(String),

    /// The body grew past the configured aggregation limit.
    #[error("body exceeds the {limit} byte limit")]
    LimitExceeded {
        /// The limit that was exceeded, in bytes.
        limit: usize,
    },
}

/// Body failures convert to responses like any other rejection: a broken
/// stream is the client's fault, an oversized payload gets 413.
impl IntoResponse for BodyError {
    fn into_response(self) -> Response {
        let status = match self {
            BodyError::Stream(_) => StatusCode::BAD_REQUEST,
            BodyError::LimitExceeded { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        };
        (status, self.to_string()).into_response()
    }
}

/// A consumable-once payload.
///
/// `Body` is the default payload of [`Request`](crate::Request) and
/// [`Response`](crate::Response). It is created by the transport layer (or
/// by [`From`] conversions in tests and response construction) and consumed
/// by whichever extractor sits in the final argument position.
///
/// # Example
///
/// ```rust,ignore
/// let body = Body::from("hello");
/// let bytes = body.into_bytes().await?;
/// assert_eq!(&bytes[..], b"hello");
/// ```
#[derive(Default)]
pub struct Body(BodyInner);

#[derive(Default)]
enum BodyInner {
    #[default]
    Empty,
    Full(Bytes),
    Stream(BoxStream<'static, Result<Bytes, BodyError>>),
}

impl Body {
    /// Creates an empty body.
    pub fn empty() -> Self {
        Self(BodyInner::Empty)
    }

    /// Creates a body from a stream of byte chunks.
    ///
    /// The stream is not polled until the body is aggregated; errors from
    /// the stream surface as [`BodyError::Stream`].
    pub fn from_stream<S, E>(stream: S) -> Self
    where
        S: futures::Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: fmt::Display,
    {
        let stream = stream.map(|chunk| chunk.map_err(|e| BodyError::Stream(e.to_string())));
        Self(BodyInner::Stream(stream.boxed()))
    }

    /// Returns `true` if the body is known to be empty.
    ///
    /// A streaming body reports `false` even if the stream turns out to
    /// yield nothing.
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            BodyInner::Empty => true,
            BodyInner::Full(bytes) => bytes.is_empty(),
            BodyInner::Stream(_) => false,
        }
    }

    /// Consumes the body and aggregates it into contiguous bytes.
    ///
    /// Suspends at each chunk of a streaming body; buffered bodies return
    /// immediately.
    pub async fn into_bytes(self) -> Result<Bytes, BodyError> {
        self.into_bytes_limited(usize::MAX).await
    }

    /// Like [`into_bytes`](Self::into_bytes), but fails with
    /// [`BodyError::LimitExceeded`] once more than `limit` bytes have been
    /// seen. The stream is not polled past the offending chunk.
    pub async fn into_bytes_limited(self, limit: usize) -> Result<Bytes, BodyError> {
        match self.0 {
            BodyInner::Empty => Ok(Bytes::new()),
            BodyInner::Full(bytes) => {
                if bytes.len() > limit {
                    return Err(BodyError::LimitExceeded { limit });
                }
                Ok(bytes)
            }
            BodyInner::Stream(mut stream) => {
                let mut buf = BytesMut::new();
                while let Some(chunk) = stream.next().await {
                    let chunk = chunk?;
                    if buf.len() + chunk.len() > limit {
                        return Err(BodyError::LimitExceeded { limit });
                    }
                    buf.extend_from_slice(&chunk);
                }
                Ok(buf.freeze())
            }
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            BodyInner::Empty => f.write_str("Body::Empty"),
            BodyInner::Full(bytes) => f.debug_tuple("Body::Full").field(&bytes.len()).finish(),
            BodyInner::Stream(_) => f.write_str("Body::Stream"),
        }
    }
}

impl From<()> for Body {
    fn from(_: ()) -> Self {
        Self::empty()
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self(BodyInner::Full(bytes))
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self(BodyInner::Full(bytes.into()))
    }
}

impl From<&'static [u8]> for Body {
    fn from(bytes: &'static [u8]) -> Self {
        Self(BodyInner::Full(Bytes::from_static(bytes)))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self(BodyInner::Full(text.into()))
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Self(BodyInner::Full(Bytes::from_static(text.as_bytes())))
    }
}
