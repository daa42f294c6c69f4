//! Driven port used by the poller to read and mutate a running dashboard.
//!
//! The poller and the optimistic completion path depend on this trait only, so
//! they can be exercised against mocks without a server.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{
    ActionItem, ActivityEntry, Draft, InboxStatus, IssueBoard, PaymentsSnapshot, ScoreReport,
    Task,
};

define_port_error! {
    /// Errors surfaced while calling the dashboard API.
    pub enum DashboardApiError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "dashboard transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "dashboard timeout: {message}",
        /// The server rate-limited the request.
        RateLimited { message: String } =>
            "dashboard rate limited request: {message}",
        /// The server answered with a client error status.
        Rejected { status: u16, message: String } =>
            "dashboard rejected request ({status}): {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "dashboard response decode failed: {message}",
    }
}

/// Port for the dashboard's REST API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn tasks(&self) -> Result<Vec<Task>, DashboardApiError>;

    async fn drafts(&self) -> Result<Vec<Draft>, DashboardApiError>;

    async fn activity(&self) -> Result<Vec<ActivityEntry>, DashboardApiError>;

    async fn inbox_status(&self) -> Result<InboxStatus, DashboardApiError>;

    async fn action_items(&self) -> Result<Vec<ActionItem>, DashboardApiError>;

    async fn issue_board(&self) -> Result<IssueBoard, DashboardApiError>;

    async fn scores(&self) -> Result<ScoreReport, DashboardApiError>;

    async fn payments(&self) -> Result<PaymentsSnapshot, DashboardApiError>;

    /// `POST /api/action-items/{id}/complete`.
    async fn complete_action_item(&self, id: &str) -> Result<ActionItem, DashboardApiError>;
}
