//! Reqwest-backed implementation of [`DashboardApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;
use serde::de::DeserializeOwned;

use crate::domain::ports::{DashboardApi, DashboardApiError};
use crate::domain::{
    ActionItem, ActivityEntry, Draft, InboxStatus, IssueBoard, PaymentsSnapshot, ScoreReport,
    Task,
};
use crate::outbound::http_failure::{build_client, impl_from_http_failure, send_for_body};

impl_from_http_failure!(DashboardApiError);

/// Client for a running dashboard rooted at `base_url`.
pub struct DashboardHttpClient {
    client: Client,
    base_url: Url,
}

impl DashboardHttpClient {
    /// Build a client for `base_url`, e.g. `http://127.0.0.1:8080/`.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, DashboardApiError> {
        self.base_url.join(path).map_err(|error| {
            DashboardApiError::transport(format!("invalid endpoint {path}: {error}"))
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DashboardApiError> {
        let body = send_for_body(self.client.get(self.endpoint(path)?)).await?;
        decode(&body)
    }

    async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T, DashboardApiError> {
        let body = send_for_body(self.client.post(self.endpoint(path)?)).await?;
        decode(&body)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, DashboardApiError> {
    serde_json::from_slice(body).map_err(|error| {
        DashboardApiError::decode(format!("invalid dashboard JSON payload: {error}"))
    })
}

#[async_trait]
impl DashboardApi for DashboardHttpClient {
    async fn tasks(&self) -> Result<Vec<Task>, DashboardApiError> {
        self.get("api/tasks").await
    }

    async fn drafts(&self) -> Result<Vec<Draft>, DashboardApiError> {
        self.get("api/drafts").await
    }

    async fn activity(&self) -> Result<Vec<ActivityEntry>, DashboardApiError> {
        self.get("api/activity").await
    }

    async fn inbox_status(&self) -> Result<InboxStatus, DashboardApiError> {
        self.get("api/inbox-status").await
    }

    async fn action_items(&self) -> Result<Vec<ActionItem>, DashboardApiError> {
        self.get("api/action-items").await
    }

    async fn issue_board(&self) -> Result<IssueBoard, DashboardApiError> {
        self.get("api/issue-board").await
    }

    async fn scores(&self) -> Result<ScoreReport, DashboardApiError> {
        self.get("api/scores").await
    }

    async fn payments(&self) -> Result<PaymentsSnapshot, DashboardApiError> {
        self.get("api/payments").await
    }

    async fn complete_action_item(&self, id: &str) -> Result<ActionItem, DashboardApiError> {
        self.post(&format!("api/action-items/{id}/complete")).await
    }
}
