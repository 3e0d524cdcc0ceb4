//! Extractors for the individual components of the request parts.
//!
//! These are infallible: they clone the component out of the parts and can
//! appear in any argument position.

use std::convert::Infallible;

use async_trait::async_trait;
use http::{HeaderMap, Method, Uri, Version};

use crate::extract::FromRequestParts;
use ingot_core::RequestParts;

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Method {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut RequestParts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(parts.method.clone())
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Uri {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut RequestParts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(parts.uri.clone())
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Version {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut RequestParts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(parts.version)
    }
}

/// Clones the full, ordered header map.
#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for HeaderMap {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut RequestParts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(parts.headers.clone())
    }
}
