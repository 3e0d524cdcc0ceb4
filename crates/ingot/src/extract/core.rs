use std::convert::Infallible;

use async_trait::async_trait;

use ingot_core::{IntoResponse, Request, RequestParts};

pub(crate) mod private {
    #[derive(Debug, Clone, Copy)]
    pub enum ViaParts {}

    #[derive(Debug, Clone, Copy)]
    pub enum ViaRequest {}
}

/// A trait for types that can be extracted from the request parts.
///
/// This is the capability required of every non-final handler parameter:
/// it may read (and mutate) the method, URI, headers, and extensions, but
/// it never touches the body. Types implementing this trait are also valid
/// in the final position, through a blanket [`FromRequest`] implementation.
///
/// # Error Handling
///
/// Extraction can fail with the implementation's [`Rejection`] type, which
/// must itself convert into a response. A failed extraction short-circuits
/// the dispatch: later extractors and the handler never run.
///
/// [`Rejection`]: FromRequestParts::Rejection
#[async_trait]
pub trait FromRequestParts<S>: Sized {
    /// The rejection returned when extraction fails.
    type Rejection: IntoResponse;

    /// Attempts to extract this type from the request parts.
    async fn from_request_parts(
        parts: &mut RequestParts,
        state: &S,
    ) -> Result<Self, Self::Rejection>;
}

/// A trait for types that are extracted from the whole request, body
/// included.
///
/// Because the body can be consumed at most once, a type whose extraction
/// needs it can only sit in the **final** argument position of a handler.
/// The `M` marker parameter is what enforces this structurally: the adapter
/// demands `FromRequest` only for the last argument, and a body-consuming
/// type used earlier fails to satisfy the `Handler` bound at compile time.
///
/// Implement this trait directly (leaving `M` at its default) for types
/// that need the body; implement [`FromRequestParts`] instead for types
/// that do not, and this trait comes for free in the final position.
#[async_trait]
pub trait FromRequest<S, M = private::ViaRequest>: Sized {
    /// The rejection returned when extraction fails.
    type Rejection: IntoResponse;

    /// Attempts to extract this type from the request.
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection>;
}

/// Every parts extractor is also a whole-request extractor: the body is
/// dropped unread.
#[async_trait]
impl<S, T> FromRequest<S, private::ViaParts> for T
where
    S: Send + Sync,
    T: FromRequestParts<S>,
{
    type Rejection = <Self as FromRequestParts<S>>::Rejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, _) = req.into_parts();
        Self::from_request_parts(&mut parts, state).await
    }
}

// ============================================================================
// Combinator implementations
// ============================================================================

/// Implementation for `Option<T>` - a parameter that may or may not be
/// extractable. Never fails.
#[async_trait]
impl<S, T> FromRequestParts<S> for Option<T>
where
    T: FromRequestParts<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut RequestParts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(T::from_request_parts(parts, state).await.ok())
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for Option<T>
where
    T: FromRequest<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Ok(T::from_request(req, state).await.ok())
    }
}

/// Implementation for `Result<T, T::Rejection>` - hands the rejection to
/// the handler instead of short-circuiting.
#[async_trait]
impl<S, T> FromRequestParts<S> for Result<T, T::Rejection>
where
    T: FromRequestParts<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut RequestParts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(T::from_request_parts(parts, state).await)
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for Result<T, T::Rejection>
where
    T: FromRequest<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Ok(T::from_request(req, state).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use ingot_core::Body;

    fn get_request() -> Request {
        Request::builder().body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_parts_extractor_usable_as_request_extractor() {
        // `Method` only implements `FromRequestParts`; the blanket impl
        // makes it extractable from a whole request.
        let method = Method::from_request(get_request(), &()).await.unwrap();
        assert_eq!(method, Method::GET);
    }

    #[tokio::test]
    async fn test_option_swallows_rejection() {
        use crate::extract::Extension;

        let (mut parts, _) = get_request().into_parts();
        let missing = Option::<Extension<u32>>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_result_hands_rejection_over() {
        use crate::extract::Extension;

        let (mut parts, _) = get_request().into_parts();
        let result = Result::<Extension<u32>, _>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(result.is_err());
    }
}
