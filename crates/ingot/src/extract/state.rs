use std::convert::Infallible;

use async_trait::async_trait;

use crate::extract::FromRequestParts;
use ingot_core::RequestParts;

/// Extractor for the shared application state.
///
/// The state is the value bound at registration time (via
/// [`Handler::with_state`](crate::handler::Handler::with_state) or
/// [`into_handler`](crate::handler::into_handler)) and injected into every
/// dispatch. Extraction clones the handle; it never fails.
///
/// The state is read-mostly by convention. If a handler needs to mutate it,
/// interior synchronization is the state type's own responsibility.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct AppState {
///     greeting: Arc<str>,
/// }
///
/// async fn greet(State(state): State<AppState>) -> String {
///     state.greeting.to_string()
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct State<S>(pub S);

impl<S> std::ops::Deref for State<S> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> std::ops::DerefMut for State<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for State<S>
where
    S: Clone + Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut RequestParts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(State(state.clone()))
    }
}
