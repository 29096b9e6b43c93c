//! # Rest SDK
//!
//! This library provides the string-level plumbing shared by REST API
//! clients: building request targets from a base URL plus path segments
//! and query-string name/value pairs, and normalizing failed HTTP calls
//! into a single structured error shape. The base URL is treated as an
//! opaque prefix string and nothing here touches the network; the
//! caller's HTTP client (e.g. `reqwest`) owns the wire.

pub mod error;
pub mod failure;
pub mod urls;

pub use error::RestError;
pub use failure::{CallFailure, FailedResponse, ResponseHandle};
pub use urls::{append, append_query, append_query_serialized, param};
