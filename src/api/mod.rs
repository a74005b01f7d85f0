//! Sans-io access to the feed REST API.
//!
//! This module describes requests and decodes responses; sending them is the
//! host's job. That keeps the crate free of an HTTP stack and makes every
//! request testable as plain data.
//!
//! # Modules
//!
//! - [`request`]: `Session`, `Endpoint`, `ApiClient` and `ApiRequest`
//! - [`response`]: response envelopes, `Page`, and the `decode_*` functions

pub mod request;
pub mod response;

pub use request::{parse_base_url, ApiClient, ApiRequest, Endpoint, Method, Session};
pub use response::{decode_casts_page, decode_conversation, decode_profile, Page};
