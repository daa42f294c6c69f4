//! HTTP inbound adapter exposing the dashboard's REST endpoints.

pub mod action_items;
pub mod activity;
pub mod auth;
pub mod cache_control;
pub mod drafts;
pub mod error;
pub mod external;
pub mod health;
pub mod inbox;
pub mod schemas;
pub mod state;
pub mod sync;
pub mod tasks;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::{ApiResult, json_config};

/// Register every `/api` route and the JSON body policy.
///
/// Health probes are mounted separately because they read [`health::HealthState`]
/// rather than [`state::HttpState`].
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .service(tasks::list_tasks)
            .service(tasks::complete_task)
            .service(tasks::update_task)
            .service(drafts::list_drafts)
            .service(drafts::send_draft)
            .service(drafts::reject_draft)
            .service(activity::list_activity)
            .service(activity::record_activity)
            .service(inbox::get_inbox_status)
            .service(inbox::update_inbox_status)
            .service(action_items::list_action_items)
            .service(action_items::complete_action_item)
            .service(action_items::update_action_item)
            .service(sync::sync_collections)
            .service(external::get_issue_board)
            .service(external::get_scores)
            .service(external::get_payments),
    );
}
