use std::convert::Infallible;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::extract::FromRequestParts;
use crate::extract::rejection::QueryRejection;
use ingot_core::RequestParts;

/// Extractor for the raw, percent-encoded query string.
///
/// `None` when the request target has no query component at all.
#[derive(Debug, Clone, Default)]
pub struct RawQuery(pub Option<String>);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RawQuery {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut RequestParts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(RawQuery(parts.uri.query().map(str::to_owned)))
    }
}

/// Extractor that deserializes the query string into a typed value.
///
/// Deserialization is form-style: repeated keys collect into sequences
/// (`?id=1&id=2` becomes `vec![1, 2]`). A missing query string
/// deserializes as the empty string, so types whose fields are all
/// optional still extract.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(serde::Deserialize)]
/// struct Pagination {
///     page: u32,
///     per_page: Option<u32>,
/// }
///
/// async fn list(Query(pagination): Query<Pagination>) -> String {
///     format!("page {}", pagination.page)
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<T>(pub T);

impl<T> std::ops::Deref for Query<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = QueryRejection;

    async fn from_request_parts(
        parts: &mut RequestParts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        let value = serde_html_form::from_str(query)?;
        Ok(Query(value))
    }
}
