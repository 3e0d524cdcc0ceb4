//! The [`Handler`] trait and its per-arity implementations.
//!
//! [`Handler`] is implemented via blanket implementations for async
//! functions with 0 to 16 parameters, one implementation per parameter
//! count. Each implementation is self-contained, so adding an arity never
//! changes the behavior of another.

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::debug;

use crate::extract::{FromRequest, FromRequestParts};
use crate::handler::service::{HandlerService, Layered};
use ingot_core::{IntoResponse, Request, Response};

// ============================================================================
// Handler Trait
// ============================================================================

/// The core trait for request handlers in the Ingot framework.
///
/// A handler accepts a request and the shared state and produces a response
/// asynchronously. The trait is object-unsafe by design; store handlers
/// through [`BoxedHandler`] instead.
///
/// # Blanket Implementation
///
/// This trait is automatically implemented for async functions that:
/// - Take 0-16 parameters, where every parameter but the last implements
///   [`FromRequestParts`] and the last implements [`FromRequest`]
/// - Return a type that implements [`IntoResponse`]
///
/// Arguments are extracted in strict left-to-right declaration order. The
/// first rejection short-circuits: later extractors never run, the
/// function never runs, and the rejection is converted into the response.
///
/// # Example
///
/// ```rust,ignore
/// // These are all valid handlers:
/// async fn empty() {}
/// async fn text() -> &'static str { "hello" }
/// async fn inspect(method: Method, headers: HeaderMap) -> String {
///     format!("{method} with {} headers", headers.len())
/// }
/// async fn create(State(db): State<Db>, Json(input): Json<CreateItem>) -> StatusCode {
///     db.insert(input).await;
///     StatusCode::CREATED
/// }
/// ```
pub trait Handler<T, S>: Clone + Send + Sync + Sized + 'static {
    /// The type of future calling this handler returns.
    type Future: Future<Output = Response> + Send + 'static;

    /// Call the handler with the given request and state.
    fn call(self, req: Request, state: S) -> Self::Future;

    /// Wraps the handler in a `tower` layer.
    ///
    /// The layered value is itself a [`Handler`], so layers can be stacked.
    fn layer<L>(self, layer: L) -> Layered<L, Self, T, S> {
        Layered::new(layer, self)
    }

    /// Binds the shared state ahead of time, producing a
    /// [`tower::Service`](tower::Service) that only needs a request.
    fn with_state(self, state: S) -> HandlerService<Self, T, S> {
        HandlerService::new(self, state)
    }
}

// ============================================================================
// BoxedHandler - Type-erased handler stored in collections
// ============================================================================

/// A type-erased handler with its state already bound.
///
/// This is what a route table stores per entry: duplicable, safe for
/// concurrent invocation, created once at registration time.
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync>;

/// Type-erased handler trait for dynamic dispatch.
pub trait ErasedHandler: Send + Sync {
    /// Execute the handler with the given request.
    fn call(&self, req: Request) -> BoxFuture<'static, Response>;
}

/// A handler function paired with its bound state.
///
/// This is used internally to store handlers in collections while
/// maintaining type erasure. Each invocation clones the handler and the
/// state; the stored pair is never consumed or mutated.
pub struct HandlerFn<H, T, S> {
    handler: H,
    state: S,
    _marker: PhantomData<fn(T)>,
}

impl<H, T, S> HandlerFn<H, T, S> {
    /// Creates a new handler function wrapper.
    pub fn new(handler: H, state: S) -> Self {
        Self {
            handler,
            state,
            _marker: PhantomData,
        }
    }
}

impl<H: Clone, T, S: Clone> Clone for HandlerFn<H, T, S> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
            state: self.state.clone(),
            _marker: PhantomData,
        }
    }
}

impl<H, T, S> ErasedHandler for HandlerFn<H, T, S>
where
    H: Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    fn call(&self, req: Request) -> BoxFuture<'static, Response> {
        let handler = self.handler.clone();
        let state = self.state.clone();
        Box::pin(async move {
            let res = handler.call(req, state).await;
            debug!(status = %res.status(), "handler completed");
            res
        })
    }
}

/// Convert a handler function into a boxed handler, binding the state.
pub fn into_handler<H, T, S>(handler: H, state: S) -> BoxedHandler
where
    H: Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    Arc::new(HandlerFn::new(handler, state))
}

// ============================================================================
// Handler implementations for functions
// ============================================================================

// Implementation for functions with no parameters. The request body is
// never touched.
impl<F, Fut, Res, S> Handler<(), S> for F
where
    F: FnOnce() -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Res> + Send + 'static,
    Res: IntoResponse + 'static,
{
    type Future = Pin<Box<dyn Future<Output = Response> + Send>>;

    fn call(self, _req: Request, _state: S) -> Self::Future {
        Box::pin(async move { (self)().await.into_response() })
    }
}

/// Macro to generate Handler implementations for functions with different
/// arities. The final parameter is singled out: it extracts through
/// [`FromRequest`] (body included), every earlier one through
/// [`FromRequestParts`]. The `M` marker is how a parts-only type in the
/// final position resolves to the blanket `FromRequest` implementation.
macro_rules! impl_handler {
    (
        [$($ty:ident),*], $last:ident
    ) => {
        #[allow(non_snake_case, unused_mut)]
        impl<F, Fut, Res, S, M, $($ty,)* $last> Handler<(M, $($ty,)* $last,), S> for F
        where
            F: FnOnce($($ty,)* $last,) -> Fut + Clone + Send + Sync + 'static,
            Fut: Future<Output = Res> + Send + 'static,
            Res: IntoResponse + 'static,
            S: Send + Sync + 'static,
            $( $ty: FromRequestParts<S> + Send + 'static, )*
            $last: FromRequest<S, M> + Send + 'static,
            M: 'static,
        {
            type Future = Pin<Box<dyn Future<Output = Response> + Send>>;

            fn call(self, req: Request, state: S) -> Self::Future {
                Box::pin(async move {
                    let (mut parts, body) = req.into_parts();

                    $(
                        let $ty = match $ty::from_request_parts(&mut parts, &state).await {
                            Ok(value) => value,
                            Err(rejection) => return rejection.into_response(),
                        };
                    )*

                    let req = Request::from_parts(parts, body);

                    let $last = match $last::from_request(req, &state).await {
                        Ok(value) => value,
                        Err(rejection) => return rejection.into_response(),
                    };

                    let res = (self)($($ty,)* $last,).await;
                    res.into_response()
                })
            }
        }
    };
}

// Generate implementations for 1-16 parameters
impl_handler!([], T1);
impl_handler!([T1], T2);
impl_handler!([T1, T2], T3);
impl_handler!([T1, T2, T3], T4);
impl_handler!([T1, T2, T3, T4], T5);
impl_handler!([T1, T2, T3, T4, T5], T6);
impl_handler!([T1, T2, T3, T4, T5, T6], T7);
impl_handler!([T1, T2, T3, T4, T5, T6, T7], T8);
impl_handler!([T1, T2, T3, T4, T5, T6, T7, T8], T9);
impl_handler!([T1, T2, T3, T4, T5, T6, T7, T8, T9], T10);
impl_handler!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10], T11);
impl_handler!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11], T12);
impl_handler!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12], T13);
impl_handler!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13], T14);
impl_handler!(
    [T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14],
    T15
);
impl_handler!(
    [T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14, T15],
    T16
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use http::{Method, StatusCode};

    use crate::extract::State;
    use ingot_core::{Body, RequestParts};

    /// Shared observation point, inserted as a request extension.
    #[derive(Clone, Default)]
    struct Probe {
        turns: Arc<AtomicUsize>,
        body_runs: Arc<AtomicUsize>,
        handler_runs: Arc<AtomicUsize>,
    }

    /// Parts extractor that records the order it ran in.
    struct Turn(usize);

    #[async_trait]
    impl<S: Send + Sync> FromRequestParts<S> for Turn {
        type Rejection = Infallible;

        async fn from_request_parts(
            parts: &mut RequestParts,
            _state: &S,
        ) -> Result<Self, Self::Rejection> {
            let probe = parts.extensions.get::<Probe>().expect("probe extension");
            Ok(Turn(probe.turns.fetch_add(1, Ordering::SeqCst)))
        }
    }

    /// Parts extractor that always rejects.
    struct Deny;

    struct DenyRejection;

    impl IntoResponse for DenyRejection {
        fn into_response(self) -> Response {
            (StatusCode::FORBIDDEN, "denied").into_response()
        }
    }

    #[async_trait]
    impl<S: Send + Sync> FromRequestParts<S> for Deny {
        type Rejection = DenyRejection;

        async fn from_request_parts(
            _parts: &mut RequestParts,
            _state: &S,
        ) -> Result<Self, Self::Rejection> {
            Err(DenyRejection)
        }
    }

    /// Body extractor that counts how often the body is actually consumed.
    struct TrackedBody(String);

    #[async_trait]
    impl<S: Send + Sync> FromRequest<S> for TrackedBody {
        type Rejection = Infallible;

        async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
            let probe = req.extensions().get::<Probe>().expect("probe extension").clone();
            probe.body_runs.fetch_add(1, Ordering::SeqCst);
            let bytes = req.into_body().into_bytes().await.expect("buffered body");
            Ok(TrackedBody(String::from_utf8(bytes.to_vec()).expect("utf-8 body")))
        }
    }

    fn probed_request(probe: &Probe, body: &'static str) -> Request {
        let mut req = Request::builder().body(Body::from(body)).unwrap();
        req.extensions_mut().insert(probe.clone());
        req
    }

    async fn run<H, T>(handler: H, req: Request) -> Response
    where
        H: Handler<T, ()>,
    {
        handler.call(req, ()).await
    }

    async fn body_text(res: Response) -> String {
        let bytes = res.into_body().into_bytes().await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_zero_arity_never_reads_body() {
        async fn constant() -> &'static str {
            "constant"
        }

        let first = run(constant, Request::builder().body(Body::from("alpha")).unwrap()).await;
        let second = run(constant, Request::builder().body(Body::from("omega")).unwrap()).await;

        assert_eq!(first.status(), second.status());
        assert_eq!(body_text(first).await, "constant");
        assert_eq!(body_text(second).await, "constant");
    }

    #[tokio::test]
    async fn test_extraction_is_left_to_right_with_body_last() {
        async fn ordered(a: Turn, b: Turn, body: TrackedBody) -> String {
            format!("{}:{}:{}", a.0, b.0, body.0)
        }

        let probe = Probe::default();
        let res = run(ordered, probed_request(&probe, "payload")).await;

        assert_eq!(body_text(res).await, "0:1:payload");
        assert_eq!(probe.body_runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejection_short_circuits_later_extractors_and_handler() {
        let probe = Probe::default();
        let handler_probe = probe.clone();

        let handler = move |_a: Turn, _b: Deny, _c: TrackedBody| {
            let probe = handler_probe.clone();
            async move {
                probe.handler_runs.fetch_add(1, Ordering::SeqCst);
                "unreachable"
            }
        };

        let res = run(handler, probed_request(&probe, "payload")).await;

        // The response is exactly the rejection, converted.
        let expected = DenyRejection.into_response();
        assert_eq!(res.status(), expected.status());
        assert_eq!(body_text(res).await, "denied");

        // A ran first; the body extractor and the function never did.
        assert_eq!(probe.turns.load(Ordering::SeqCst), 1);
        assert_eq!(probe.body_runs.load(Ordering::SeqCst), 0);
        assert_eq!(probe.handler_runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_replay_is_byte_identical() {
        async fn echo(method: Method, body: String) -> String {
            format!("{method} {body}")
        }

        let make_request = || {
            Request::builder()
                .method(Method::PUT)
                .uri("/echo")
                .body(Body::from("same"))
                .unwrap()
        };

        let first = run(echo, make_request()).await;
        let second = run(echo, make_request()).await;

        assert_eq!(first.status(), second.status());
        assert_eq!(first.headers(), second.headers());
        let first_body = first.into_body().into_bytes().await.unwrap();
        let second_body = second.into_body().into_bytes().await.unwrap();
        assert_eq!(first_body, second_body);
    }

    #[tokio::test]
    async fn test_parts_extractor_is_valid_in_final_position() {
        async fn unary(method: Method) -> String {
            method.to_string()
        }

        async fn binary(_first: Method, second: Method) -> String {
            second.to_string()
        }

        let get = || Request::builder().body(Body::empty()).unwrap();
        assert_eq!(body_text(run(unary, get()).await).await, "GET");
        assert_eq!(body_text(run(binary, get()).await).await, "GET");
    }

    #[tokio::test]
    async fn test_state_reaches_every_position() {
        #[derive(Clone)]
        struct Config {
            greeting: &'static str,
        }

        async fn greet(State(config): State<Config>, body: String) -> String {
            format!("{} {}", config.greeting, body)
        }

        let req = Request::builder().body(Body::from("world")).unwrap();
        let res = greet.call(req, Config { greeting: "hello" }).await;
        assert_eq!(body_text(res).await, "hello world");
    }

    #[tokio::test]
    async fn test_maximum_arity_adapts() {
        #[allow(clippy::too_many_arguments)]
        async fn sixteen(
            m1: Method,
            _m2: Method,
            _m3: Method,
            _m4: Method,
            _m5: Method,
            _m6: Method,
            _m7: Method,
            _m8: Method,
            _m9: Method,
            _m10: Method,
            _m11: Method,
            _m12: Method,
            _m13: Method,
            _m14: Method,
            _m15: Method,
            body: String,
        ) -> String {
            format!("{m1}:{body}")
        }

        let req = Request::builder().body(Body::from("wide")).unwrap();
        let res = run(sixteen, req).await;
        assert_eq!(body_text(res).await, "GET:wide");
    }

    #[tokio::test]
    async fn test_adjacent_arities_do_not_interfere() {
        async fn zero() -> &'static str {
            "0"
        }
        async fn one(_m: Method) -> &'static str {
            "1"
        }
        async fn two(_m: Method, _b: String) -> &'static str {
            "2"
        }

        let get = || Request::builder().body(Body::empty()).unwrap();
        assert_eq!(body_text(run(zero, get()).await).await, "0");
        assert_eq!(body_text(run(one, get()).await).await, "1");
        assert_eq!(body_text(run(two, get()).await).await, "2");
    }

    #[tokio::test]
    async fn test_boxed_handler_is_reusable() {
        #[derive(Clone)]
        struct Counter(Arc<AtomicUsize>);

        async fn count(State(counter): State<Counter>) -> String {
            counter.0.fetch_add(1, Ordering::SeqCst).to_string()
        }

        let counter = Counter(Arc::default());
        let boxed = into_handler(count, counter.clone());

        let get = || Request::builder().body(Body::empty()).unwrap();
        assert_eq!(body_text(boxed.call(get()).await).await, "0");
        assert_eq!(body_text(boxed.call(get()).await).await, "1");
        assert_eq!(counter.0.load(Ordering::SeqCst), 2);
    }
}
