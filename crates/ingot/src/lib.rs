//! # Ingot
//!
//! A function-to-handler adaptation layer for request-dispatch frameworks.
//!
//! Ingot lets ordinary async functions of heterogeneous signature (zero or
//! more typed parameters, one return value) be treated uniformly as a
//! single abstract [`Handler`] type, without implementing a dispatch
//! interface by hand. It provides:
//!
//! - A two-tier extraction protocol ([`FromRequestParts`] /
//!   [`FromRequest`]) for pulling typed values out of a request
//! - A total response-conversion protocol ([`IntoResponse`]) for
//!   normalizing return values
//! - Per-arity [`Handler`] implementations for functions with 0-16
//!   parameters, generated by a declarative macro
//! - Tower integration ([`HandlerService`], [`Handler::layer`]) and
//!   type erasure ([`BoxedHandler`]) for storage in route tables
//!
//! The transport, router, and server lifecycle are external collaborators:
//! whatever matches a request hands it, together with the shared state, to
//! [`Handler::call`] and sends back the returned [`Response`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ingot::extract::{Json, Query, State};
//! use ingot::handler::into_handler;
//!
//! #[derive(Clone)]
//! struct AppState {
//!     db: Db,
//! }
//!
//! #[derive(serde::Deserialize)]
//! struct Pagination {
//!     page: u32,
//! }
//!
//! async fn list_items(State(state): State<AppState>, Query(p): Query<Pagination>) -> Json<Vec<Item>> {
//!     Json(state.db.list(p.page).await)
//! }
//!
//! // The router stores the erased handler and calls it per request.
//! let handler = into_handler(list_items, AppState { db });
//! ```

pub mod extract;
pub mod handler;

pub use extract::{Extension, FromRequest, FromRequestParts, Json, Query, RawQuery, State};
pub use handler::{BoxedHandler, ErasedHandler, Handler, HandlerService, Layered, into_handler};

pub use ingot_core::{Body, BodyError, IntoResponse, Request, RequestParts, Response};

// Convenience re-exports of the underlying HTTP vocabulary.
pub use ingot_core::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri, Version, header};
