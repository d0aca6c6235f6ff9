//! Outbound HTTP helpers shared by the services.

pub mod retry;

pub use retry::{RetryConfig, UpstreamError, retry_http_call};
