use async_trait::async_trait;

use crate::extract::FromRequestParts;
use crate::extract::rejection::ExtensionRejection;
use ingot_core::RequestParts;

/// Extractor for a value stored in the request extensions.
///
/// Extensions are the sanctioned side channel between extractors: an
/// earlier extractor (or an outer layer) inserts a value, a later one reads
/// it through this type. Extraction clones the stored value.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct RequestId(Uuid);
///
/// async fn show_id(Extension(id): Extension<RequestId>) -> String {
///     id.0.to_string()
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Extension<T>(pub T);

impl<T> std::ops::Deref for Extension<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for Extension<T>
where
    T: Clone + Send + Sync + 'static,
    S: Send + Sync,
{
    type Rejection = ExtensionRejection;

    async fn from_request_parts(
        parts: &mut RequestParts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<T>()
            .cloned()
            .map(Extension)
            .ok_or_else(ExtensionRejection::missing::<T>)
    }
}
