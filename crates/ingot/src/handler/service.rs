//! Tower integration for handlers.
//!
//! [`HandlerService`] is a handler with its state bound, exposed as a
//! `tower::Service<Request>`. [`Layered`] wraps a handler in a tower
//! [`Layer`] while remaining a [`Handler`], so cross-cutting concerns stack
//! on the adapter boundary without touching the extraction machinery.

use std::convert::Infallible;
use std::marker::PhantomData;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::BoxFuture;
use tower::{Service, ServiceExt};
use tower_layer::Layer;
use tracing::trace;

use crate::handler::traits::Handler;
use ingot_core::{IntoResponse, Request, Response};

// ============================================================================
// HandlerService
// ============================================================================

/// A [`tower::Service`] that calls a single handler with pre-bound state.
///
/// Holds the handler and state directly; every call clones both, so one
/// service value safely serves concurrent dispatches.
///
/// # Example
///
/// ```rust,ignore
/// let svc = my_handler.with_state(state);
/// let response = svc.oneshot(request).await?;
/// ```
pub struct HandlerService<H, T, S> {
    handler: H,
    state: S,
    _marker: PhantomData<fn(T)>,
}

impl<H, T, S> HandlerService<H, T, S> {
    pub(crate) fn new(handler: H, state: S) -> Self {
        Self {
            handler,
            state,
            _marker: PhantomData,
        }
    }
}

impl<H: Clone, T, S: Clone> Clone for HandlerService<H, T, S> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
            state: self.state.clone(),
            _marker: PhantomData,
        }
    }
}

impl<H, T, S> std::fmt::Debug for HandlerService<H, T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerService").finish_non_exhaustive()
    }
}

impl<H, T, S> Service<Request> for HandlerService<H, T, S>
where
    H: Handler<T, S>,
    S: Clone + Send + Sync + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        trace!(method = %req.method(), path = %req.uri().path(), "dispatching to handler");
        let handler = self.handler.clone();
        let state = self.state.clone();
        async move { Ok(handler.call(req, state).await) }.boxed()
    }
}

// ============================================================================
// Layered
// ============================================================================

/// A handler wrapped in a tower [`Layer`].
///
/// Created by [`Handler::layer`]. The layer is applied around the state-bound
/// [`HandlerService`] when the handler is called, so the layer observes the
/// request before extraction and the response after conversion.
pub struct Layered<L, H, T, S> {
    layer: L,
    handler: H,
    _marker: PhantomData<fn(T, S)>,
}

impl<L, H, T, S> Layered<L, H, T, S> {
    pub(crate) fn new(layer: L, handler: H) -> Self {
        Self {
            layer,
            handler,
            _marker: PhantomData,
        }
    }
}

impl<L: Clone, H: Clone, T, S> Clone for Layered<L, H, T, S> {
    fn clone(&self) -> Self {
        Self {
            layer: self.layer.clone(),
            handler: self.handler.clone(),
            _marker: PhantomData,
        }
    }
}

impl<L, H, T, S> std::fmt::Debug for Layered<L, H, T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layered").finish_non_exhaustive()
    }
}

impl<L, H, T, S> Handler<T, S> for Layered<L, H, T, S>
where
    L: Layer<HandlerService<H, T, S>> + Clone + Send + Sync + 'static,
    H: Handler<T, S>,
    L::Service: Service<Request, Error = Infallible> + Clone + Send + 'static,
    <L::Service as Service<Request>>::Response: IntoResponse,
    <L::Service as Service<Request>>::Future: Send,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    type Future = BoxFuture<'static, Response>;

    fn call(self, req: Request, state: S) -> Self::Future {
        let svc = self.layer.layer(self.handler.with_state(state));
        async move {
            match svc.oneshot(req).await {
                Ok(res) => res.into_response(),
                Err(err) => match err {},
            }
        }
        .boxed()
    }
}
