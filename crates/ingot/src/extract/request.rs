//! Extractors that consume the whole request.
//!
//! Everything here implements [`FromRequest`] directly, so these types are
//! only accepted in the final argument position of a handler.

use std::convert::Infallible;

use async_trait::async_trait;
use bytes::Bytes;

use crate::extract::FromRequest;
use crate::extract::rejection::{BytesRejection, StringRejection};
use ingot_core::{Body, Request};

/// Identity extraction: hands the untouched request to the handler.
#[async_trait]
impl<S: Send + Sync> FromRequest<S> for Request {
    type Rejection = Infallible;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(req)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for Body {
    type Rejection = Infallible;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(req.into_body())
    }
}

/// Buffers the body into contiguous bytes.
#[async_trait]
impl<S: Send + Sync> FromRequest<S> for Bytes {
    type Rejection = BytesRejection;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(req.into_body().into_bytes().await?)
    }
}

/// Buffers the body and validates it as UTF-8.
#[async_trait]
impl<S: Send + Sync> FromRequest<S> for String {
    type Rejection = StringRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|BytesRejection(err)| StringRejection::Read(err))?;
        let text = std::str::from_utf8(&bytes)?;
        Ok(text.to_owned())
    }
}
