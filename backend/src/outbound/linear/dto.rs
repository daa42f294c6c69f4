//! DTOs for the issue tracker's GraphQL responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{IssueAssignee, TrackerIssue};

pub(super) const ISSUES_QUERY: &str = r#"
query BoardIssues($teamKey: String!) {
  teams(filter: { key: { eq: $teamKey } }) {
    nodes {
      issues(
        first: 100
        orderBy: updatedAt
        filter: { state: { type: { nin: ["canceled"] } } }
      ) {
        nodes {
          id
          identifier
          title
          priority
          updatedAt
          state { name type }
          assignee { name avatarUrl }
          labels { nodes { name } }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Serialize)]
pub(super) struct GraphqlRequestDto<'a> {
    pub(super) query: &'a str,
    pub(super) variables: VariablesDto<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VariablesDto<'a> {
    pub(super) team_key: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphqlResponseDto {
    pub(super) data: Option<DataDto>,
    #[serde(default)]
    pub(super) errors: Vec<GraphqlErrorDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphqlErrorDto {
    pub(super) message: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct DataDto {
    teams: NodesDto<TeamDto>,
}

#[derive(Debug, Deserialize)]
struct NodesDto<T> {
    #[serde(default = "Vec::new")]
    nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct TeamDto {
    issues: NodesDto<IssueDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueDto {
    id: String,
    identifier: String,
    title: String,
    #[serde(default)]
    priority: f64,
    updated_at: DateTime<Utc>,
    state: StateDto,
    assignee: Option<AssigneeDto>,
    labels: Option<NodesDto<LabelDto>>,
}

#[derive(Debug, Deserialize)]
struct StateDto {
    name: String,
    #[serde(rename = "type")]
    state_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssigneeDto {
    name: String,
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LabelDto {
    name: String,
}

impl DataDto {
    /// Issues of the first matching team; an unknown team yields none.
    pub(super) fn into_domain_issues(self) -> Vec<TrackerIssue> {
        self.teams
            .nodes
            .into_iter()
            .next()
            .map(|team| team.issues.nodes)
            .unwrap_or_default()
            .into_iter()
            .map(IssueDto::into_domain)
            .collect()
    }
}

impl IssueDto {
    fn into_domain(self) -> TrackerIssue {
        TrackerIssue {
            id: self.id,
            identifier: self.identifier,
            title: self.title,
            status: self.state.name,
            status_type: self.state.state_type,
            // The API reports priority as a float in 0..=4.
            priority: self.priority.clamp(0.0, f64::from(u8::MAX)) as u8,
            assignee: self.assignee.map(|assignee| IssueAssignee {
                name: assignee.name,
                avatar_url: assignee.avatar_url,
            }),
            labels: self
                .labels
                .map(|labels| labels.nodes.into_iter().map(|label| label.name).collect())
                .unwrap_or_default(),
            updated_at: self.updated_at,
        }
    }
}
