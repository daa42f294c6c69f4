//! Payments processor outbound adapter.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_STRIPE_BASE_URL, StripeHttpSource};
