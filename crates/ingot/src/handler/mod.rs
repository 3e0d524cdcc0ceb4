//! Handler system for the Ingot framework.
//!
//! This module contains the function-to-handler adaptation layer:
//!
//! - **Handler** ([`traits`]) – The core [`Handler`] trait, implemented via
//!   blanket implementations for async functions with 0-16 parameters, one
//!   generated implementation per parameter count
//! - **Service** ([`service`]) – The [`HandlerService`] wrapper that exposes
//!   a state-bound handler as a `tower::Service`, and [`Layered`] for
//!   stacking tower layers on the adapter boundary
//!
//! # Architecture
//!
//! Registering a function stores it as an opaque handler; on a matching
//! request the adapter splits the request, runs each parameter's extractor
//! left-to-right, invokes the function, and converts the result:
//!
//! ```text
//! register(f)            ──▶ BoxedHandler
//! Handler::call(req, s)  ──▶ extract T1..Tn-1 from parts
//!                        ──▶ extract Tn from the reassembled request
//!                        ──▶ f(T1, .., Tn).await ──▶ IntoResponse
//! ```
//!
//! The first rejection short-circuits the chain and is itself converted
//! into the response.
//!
//! # Shape errors are compile errors
//!
//! Only the final parameter may consume the body. A body-consuming
//! extractor in any other position fails to satisfy the [`Handler`] bound
//! at registration, never at request time:
//!
//! ```compile_fail
//! use ingot::extract::Json;
//! use ingot::handler::into_handler;
//!
//! #[derive(serde::Deserialize)]
//! struct Payload {
//!     name: String,
//! }
//!
//! // `Json` consumes the body, so it cannot come before another argument.
//! async fn broken(_payload: Json<Payload>, _method: http::Method) -> &'static str {
//!     "unreachable"
//! }
//!
//! let _ = into_handler(broken, ());
//! ```
//!
//! Moving the `Json` parameter to the final position makes the same
//! function adapt successfully.

pub mod service;
pub mod traits;

pub use service::{HandlerService, Layered};
pub use traits::{BoxedHandler, ErasedHandler, Handler, HandlerFn, into_handler};
