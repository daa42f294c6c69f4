//! Issue tracker outbound adapter.
//!
//! Thin HTTP implementation of the `IssueBoardSource` port.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_LINEAR_ENDPOINT, LinearHttpSource};
