//! Extraction protocol for the Ingot framework.
//!
//! This module provides the two extraction capabilities that enable Ingot's
//! parameter injection system. Handler functions declare what data they
//! need through their parameter types, and the adapter provides it.
//!
//! # Core Concept
//!
//! The protocol has two levels:
//!
//! - [`FromRequestParts`]: extraction from the request minus its body.
//!   Valid in **any** argument position.
//! - [`FromRequest`]: extraction from the whole request, body included.
//!   Valid **only** in the final argument position, because the body can be
//!   consumed at most once.
//!
//! Every `FromRequestParts` type is automatically a `FromRequest` type
//! through a blanket implementation, so parts extractors work in the final
//! position too. The reverse does not hold: using a body-consuming
//! extractor in a non-final position is a compile error, not a runtime
//! surprise.
//!
//! # Error Handling
//!
//! Each extractor names its own rejection type, convertible into a
//! response. A rejection short-circuits the dispatch; wrapping an extractor
//! in `Option<T>` or `Result<T, T::Rejection>` moves that decision into
//! the handler instead.

pub mod core;
pub mod extension;
pub mod json;
pub mod parts;
pub mod query;
pub mod rejection;
pub mod request;
pub mod state;

pub use self::core::{FromRequest, FromRequestParts};
pub use extension::Extension;
pub use json::Json;
pub use query::{Query, RawQuery};
pub use rejection::{
    BytesRejection, ExtensionRejection, JsonRejection, QueryRejection, StringRejection,
};
pub use state::State;
