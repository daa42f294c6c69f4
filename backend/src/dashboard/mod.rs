//! Client side of the dashboard: a poller that mirrors the REST API into a
//! local [`ViewState`] and the derived action-item presentation.
//!
//! The poller talks to the server through
//! [`crate::domain::ports::DashboardApi`]; the reqwest implementation lives in
//! [`crate::outbound::dashboard`].

pub mod poller;
pub mod view;

pub use poller::{PollIntervals, Poller};
pub use view::{
    ActionItemFilter, ActionItemSummary, ActionItemView, SortKey, TaskProgress, ViewState,
    sort_action_items, task_progress,
};
