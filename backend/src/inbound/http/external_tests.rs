//! Tests for the upstream feed handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::TimeDelta;
use mockall::Sequence;
use rstest::rstest;
use serde_json::Value;

use crate::domain::TrackerIssue;
use crate::domain::ports::{
    GameTeam, MockIssueBoardSource, MockPaymentsSource, MockScoreFeedSource,
    PaymentsSourceError, ScheduledGame, Scoreboard, SubscriptionRecord,
};
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{TRACKED_TEAM_ID, offline_ports, seeded_state, test_app};
use crate::test_support::fixture_now;

async fn get_json(ports: HttpStatePorts, uri: &str) -> (StatusCode, Option<String>, Value) {
    let (state, _store, _clock) = seeded_state(ports);
    let app = actix_test::init_service(test_app(state)).await;
    let request = actix_test::TestRequest::get().uri(uri).to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let cache_control = response
        .headers()
        .get("cache-control")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    (status, cache_control, actix_test::read_body_json(response).await)
}

fn issue(id: &str, status: &str, status_type: &str) -> TrackerIssue {
    TrackerIssue {
        id: id.to_owned(),
        identifier: format!("WNU-{id}"),
        title: format!("Issue {id}"),
        status: status.to_owned(),
        status_type: status_type.to_owned(),
        priority: 2,
        assignee: None,
        labels: Vec::new(),
        updated_at: fixture_now() - TimeDelta::days(1),
    }
}

fn side(team_id: u64, tricode: &str, score: u32) -> GameTeam {
    GameTeam {
        team_id,
        name: tricode.to_owned(),
        city: tricode.to_owned(),
        tricode: tricode.to_owned(),
        wins: 30,
        losses: 18,
        score,
    }
}

#[rstest]
#[actix_web::test]
async fn issue_board_without_key_is_not_configured() {
    let (status, _, body) = get_json(offline_ports(), "/api/issue-board").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "not_configured");
}

#[rstest]
#[actix_web::test]
async fn issue_board_lists_every_bucket() {
    let mut issues = MockIssueBoardSource::new();
    issues
        .expect_fetch_issues()
        .times(1)
        .returning(|| Ok(vec![issue("1", "In Progress", "started"), issue("2", "Todo", "unstarted")]));
    let ports = HttpStatePorts {
        issues: Arc::new(issues),
        ..offline_ports()
    };

    let (status, _, body) = get_json(ports, "/api/issue-board").await;

    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&str> = body
        .as_object()
        .expect("board is an object")
        .keys()
        .map(String::as_str)
        .collect();
    for bucket in ["In Progress", "Todo", "Backlog", "Triage", "Done"] {
        assert!(keys.contains(&bucket), "missing bucket {bucket}");
    }
    assert_eq!(body["In Progress"][0]["identifier"], "WNU-1");
    assert_eq!(body["Todo"][0]["identifier"], "WNU-2");
}

#[rstest]
#[actix_web::test]
async fn scores_without_any_snapshot_are_upstream_unavailable() {
    let (status, _, body) = get_json(offline_ports(), "/api/scores").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "upstream_unavailable");
}

#[rstest]
#[actix_web::test]
async fn scores_report_live_game_with_shared_cache_header() {
    let mut scores = MockScoreFeedSource::new();
    scores.expect_fetch_scoreboard().times(1).returning(|| {
        Ok(Scoreboard {
            game_date: "2026-01-28".to_owned(),
            games: vec![ScheduledGame {
                game_id: "0022500700".to_owned(),
                status_code: 2,
                status_text: "Q3 4:12".to_owned(),
                period: 3,
                clock: "PT04M12.00S".to_owned(),
                starts_at: None,
                home: side(TRACKED_TEAM_ID, "NYK", 88),
                away: side(1_610_612_738, "BOS", 80),
            }],
        })
    });
    scores.expect_fetch_standings().returning(|| Ok(Vec::new()));
    let ports = HttpStatePorts {
        scores: Arc::new(scores),
        ..offline_ports()
    };

    let (status, cache_control, body) = get_json(ports, "/api/scores").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        cache_control.as_deref(),
        Some("public, s-maxage=60, stale-while-revalidate=300")
    );
    assert_eq!(body["isLive"], true);
    assert_eq!(body["todayGame"]["status"], "live");
    assert_eq!(body["todayGame"]["knicksScore"], 88);
}

#[rstest]
#[actix_web::test]
async fn payments_without_key_is_not_configured() {
    let (status, _, body) = get_json(offline_ports(), "/api/payments").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "not_configured");
}

#[rstest]
#[actix_web::test]
async fn payments_fall_back_to_last_good_snapshot() {
    let mut payments = MockPaymentsSource::new();
    let mut seq = Sequence::new();
    payments
        .expect_fetch_available_balance()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(Some(123_456)));
    payments
        .expect_fetch_subscriptions()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            Ok(vec![SubscriptionRecord {
                id: "sub_1".to_owned(),
                status: "active".to_owned(),
                unit_amount: Some(4_999),
                interval: None,
            }])
        });
    payments
        .expect_fetch_available_balance()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Err(PaymentsSourceError::timeout("slow")));
    let ports = HttpStatePorts {
        payments: Arc::new(payments),
        ..offline_ports()
    };
    let (state, _store, _clock) = seeded_state(ports);
    let app = actix_test::init_service(test_app(state)).await;

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let request = actix_test::TestRequest::get().uri("/api/payments").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        bodies.push(body);
    }

    assert_eq!(bodies[0]["balance"], 1234.56);
    assert_eq!(bodies[0]["stripeMrr"], 49.99);
    assert_eq!(bodies[0]["subscriptions"][0]["interval"], "month");
    assert_eq!(bodies[0], bodies[1]);
}
