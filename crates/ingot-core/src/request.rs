//! The request model.
//!
//! Ingot does not define its own request struct; it builds on the `http`
//! crate's types with [`Body`] as the default payload. The adapter splits a
//! [`Request`] into ([`RequestParts`], [`Body`]) with
//! [`http::Request::into_parts`] and reassembles it with
//! [`http::Request::from_parts`] before the final extractor runs.

use crate::body::Body;

/// An incoming request: method, target URI, headers, extensions, and a
/// consumable-once [`Body`].
///
/// Owned exclusively by the dispatch call until split.
pub type Request<B = Body> = http::Request<B>;

/// A request minus its body: method, target URI, version, headers, and
/// extension values.
///
/// Extractors in non-final argument positions see only this. The
/// [`Extensions`](http::Extensions) map doubles as the sanctioned side
/// channel between extractors: an earlier extractor may insert a value that
/// a later one reads.
pub type RequestParts = http::request::Parts;
