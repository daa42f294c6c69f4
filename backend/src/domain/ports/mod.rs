//! Domain ports defining the edges of the hexagon.
//!
//! Each upstream feed is reached through a driven port with its own typed
//! error, so adapters map transport failures into predictable variants. The
//! poller reaches the dashboard itself through [`DashboardApi`].

mod macros;
pub(crate) use macros::define_port_error;

mod dashboard_api;
mod issue_board_source;
mod payments_source;
mod score_feed_source;

#[cfg(test)]
pub use dashboard_api::MockDashboardApi;
pub use dashboard_api::{DashboardApi, DashboardApiError};
#[cfg(test)]
pub use issue_board_source::MockIssueBoardSource;
pub use issue_board_source::{
    IssueBoardSource, IssueBoardSourceError, UnconfiguredIssueBoardSource,
};
#[cfg(test)]
pub use payments_source::MockPaymentsSource;
pub use payments_source::{
    PaymentsSource, PaymentsSourceError, SubscriptionRecord, UnconfiguredPaymentsSource,
};
#[cfg(test)]
pub use score_feed_source::MockScoreFeedSource;
pub use score_feed_source::{
    GameTeam, ScheduledGame, ScoreFeedSource, ScoreFeedSourceError, Scoreboard, TeamStanding,
};
