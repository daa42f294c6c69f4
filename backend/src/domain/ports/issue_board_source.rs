//! Driven port for fetching issues from the tracker.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::TrackerIssue;

define_port_error! {
    /// Errors surfaced while calling the issue tracker.
    pub enum IssueBoardSourceError {
        /// No API key was configured.
        NotConfigured => "issue tracker API key is not configured",
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "issue tracker transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "issue tracker timeout: {message}",
        /// The tracker rate-limited the request.
        RateLimited { message: String } =>
            "issue tracker rate limited request: {message}",
        /// The tracker answered with a non-success status or GraphQL errors.
        Rejected { status: u16, message: String } =>
            "issue tracker rejected request ({status}): {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "issue tracker response decode failed: {message}",
    }
}

/// Port for listing the tracked team's non-canceled issues.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueBoardSource: Send + Sync {
    /// Fetch up to 100 non-canceled issues, most recently updated first.
    async fn fetch_issues(&self) -> Result<Vec<TrackerIssue>, IssueBoardSourceError>;
}

/// Stand-in used when no tracker API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredIssueBoardSource;

#[async_trait]
impl IssueBoardSource for UnconfiguredIssueBoardSource {
    async fn fetch_issues(&self) -> Result<Vec<TrackerIssue>, IssueBoardSourceError> {
        Err(IssueBoardSourceError::not_configured())
    }
}
