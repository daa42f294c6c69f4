//! Reqwest-backed issue tracker adapter.
//!
//! Owns transport only: the GraphQL request, status mapping and decoding into
//! domain issues. Filtering and bucketing stay in the domain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;
use zeroize::Zeroizing;

use super::dto::{GraphqlRequestDto, GraphqlResponseDto, ISSUES_QUERY, VariablesDto};
use crate::domain::TrackerIssue;
use crate::domain::ports::{IssueBoardSource, IssueBoardSourceError};
use crate::outbound::http_failure::{build_client, impl_from_http_failure, send_for_body};

/// Default GraphQL endpoint.
pub const DEFAULT_LINEAR_ENDPOINT: &str = "https://api.linear.app/graphql";

impl_from_http_failure!(IssueBoardSourceError);

/// Issue tracker adapter posting one GraphQL query per refresh.
pub struct LinearHttpSource {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
    team_key: String,
}

impl LinearHttpSource {
    /// Build an adapter for `team_key`.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: Zeroizing<String>,
        team_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint,
            api_key,
            team_key: team_key.into(),
        })
    }
}

#[async_trait]
impl IssueBoardSource for LinearHttpSource {
    async fn fetch_issues(&self) -> Result<Vec<TrackerIssue>, IssueBoardSourceError> {
        let request = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::AUTHORIZATION, self.api_key.as_str())
            .json(&GraphqlRequestDto {
                query: ISSUES_QUERY,
                variables: VariablesDto {
                    team_key: self.team_key.as_str(),
                },
            });
        let body = send_for_body(request).await?;
        parse_issues(&body)
    }
}

fn parse_issues(body: &[u8]) -> Result<Vec<TrackerIssue>, IssueBoardSourceError> {
    let decoded: GraphqlResponseDto = serde_json::from_slice(body).map_err(|error| {
        IssueBoardSourceError::decode(format!("invalid GraphQL payload: {error}"))
    })?;
    match decoded.data {
        Some(data) => Ok(data.into_domain_issues()),
        None => {
            let messages = decoded
                .errors
                .into_iter()
                .map(|error| error.message)
                .collect::<Vec<_>>();
            if messages.is_empty() {
                Err(IssueBoardSourceError::decode("GraphQL payload carried no data"))
            } else {
                Err(IssueBoardSourceError::rejected(200_u16, messages.join("; ")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::http_failure::HttpFailure;
    use rstest::rstest;

    #[rstest]
    fn parses_issue_nodes() {
        let body = r#"{
            "data": { "teams": { "nodes": [ { "issues": { "nodes": [
                {
                    "id": "abc",
                    "identifier": "WNU-12",
                    "title": "Fix login",
                    "priority": 2,
                    "updatedAt": "2026-01-27T10:00:00.000Z",
                    "state": { "name": "In Review", "type": "started" },
                    "assignee": { "name": "Graham", "avatarUrl": null },
                    "labels": { "nodes": [ { "name": "bug" } ] }
                },
                {
                    "id": "def",
                    "identifier": "WNU-13",
                    "title": "Unowned",
                    "priority": 0,
                    "updatedAt": "2026-01-20T10:00:00.000Z",
                    "state": { "name": "Triage", "type": "triage" },
                    "assignee": null,
                    "labels": null
                }
            ] } } ] } }
        }"#;

        let issues = parse_issues(body.as_bytes()).expect("payload decodes");

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].status, "In Review");
        assert_eq!(issues[0].status_type, "started");
        assert_eq!(issues[0].priority, 2);
        assert_eq!(issues[0].labels, vec!["bug".to_owned()]);
        assert_eq!(
            issues[0].assignee.as_ref().map(|assignee| assignee.name.as_str()),
            Some("Graham")
        );
        assert!(issues[1].assignee.is_none());
        assert!(issues[1].labels.is_empty());
    }

    #[rstest]
    fn unknown_team_yields_no_issues() {
        let issues = parse_issues(br#"{"data":{"teams":{"nodes":[]}}}"#).expect("payload decodes");
        assert!(issues.is_empty());
    }

    #[rstest]
    fn graphql_errors_are_rejections() {
        let error = parse_issues(br#"{"data":null,"errors":[{"message":"Authentication required"}]}"#)
            .expect_err("errors surface");
        assert_eq!(
            error,
            IssueBoardSourceError::rejected(200_u16, "Authentication required")
        );
    }

    #[rstest]
    fn malformed_json_is_a_decode_error() {
        let error = parse_issues(b"<html>").expect_err("not JSON");
        assert!(matches!(error, IssueBoardSourceError::Decode { .. }));
    }

    #[rstest]
    fn http_failures_convert_variant_for_variant() {
        let error: IssueBoardSourceError = HttpFailure::RateLimited("slow down".to_owned()).into();
        assert_eq!(error, IssueBoardSourceError::rate_limited("slow down"));
    }
}
