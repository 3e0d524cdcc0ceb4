//! # Ingot Core
//!
//! The core types of the Ingot handler framework.
//!
//! This crate provides the data model that the adaptation layer in the
//! `ingot` crate is built on:
//!
//! - **Request model**: [`Request`] and [`RequestParts`], thin aliases over
//!   the `http` crate's types with [`Body`] as the default payload
//! - **Body**: a consumable-once payload ([`Body`]) with asynchronous
//!   aggregation and the associated [`BodyError`]
//! - **Response conversion**: the [`IntoResponse`] protocol that normalizes
//!   handler return values into a uniform [`Response`]
//!
//! ## Request lifecycle
//!
//! A [`Request`] is created by the transport layer, handed to the dispatch
//! call, and split into ([`RequestParts`], [`Body`]) by the adapter. The
//! parts are visible to every extractor; the body may be consumed at most
//! once, and only by the final one.
//!
//! ```text
//! ┌───────────┐     ┌──────────────────────┐     ┌──────────┐
//! │ Transport │────▶│ (RequestParts, Body) │────▶│ Response │
//! └───────────┘     └──────────────────────┘     └──────────┘
//! ```

pub mod body;
pub mod request;
pub mod response;

pub use body::{Body, BodyError};
pub use request::{Request, RequestParts};
pub use response::{IntoResponse, Response};

// Re-exported so downstream crates name header and status types without
// depending on `http` directly.
pub use http::{
    Extensions, HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri, Version, header,
};
