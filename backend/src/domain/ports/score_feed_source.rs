//! Driven port for the public scoreboard and standings feeds.
//!
//! The domain owns the shapes below; adapters translate the feed's JSON into
//! them and never leak transport types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::define_port_error;

/// One side of a scheduled game.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameTeam {
    pub team_id: u64,
    /// Nickname, e.g. `Knicks`.
    pub name: String,
    /// City, e.g. `New York`.
    pub city: String,
    /// Three-letter code, e.g. `NYK`.
    pub tricode: String,
    pub wins: u32,
    pub losses: u32,
    pub score: u32,
}

/// A game on today's scoreboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledGame {
    pub game_id: String,
    /// Raw feed status: 1 scheduled, 2 live, 3 final.
    pub status_code: u8,
    /// Feed-supplied status line, e.g. `Q3 4:12`.
    pub status_text: String,
    pub period: u32,
    pub clock: String,
    /// Tip-off instant, when the feed supplies one.
    pub starts_at: Option<DateTime<Utc>>,
    pub home: GameTeam,
    pub away: GameTeam,
}

/// Today's scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scoreboard {
    /// Feed-local calendar date, e.g. `2026-01-28`.
    pub game_date: String,
    pub games: Vec<ScheduledGame>,
}

/// Season standing for one team. Every field but the id is optional because
/// the feed's shape is not stable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TeamStanding {
    pub team_id: u64,
    pub conference_rank: Option<u32>,
    pub conference: Option<String>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub streak: Option<String>,
}

define_port_error! {
    /// Errors surfaced while calling the score feeds.
    pub enum ScoreFeedSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "score feed transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "score feed timeout: {message}",
        /// The feed rate-limited the request.
        RateLimited { message: String } =>
            "score feed rate limited request: {message}",
        /// The feed answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "score feed rejected request ({status}): {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "score feed response decode failed: {message}",
    }
}

/// Port for reading the scoreboard and standings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreFeedSource: Send + Sync {
    /// Fetch today's scoreboard.
    async fn fetch_scoreboard(&self) -> Result<Scoreboard, ScoreFeedSourceError>;

    /// Fetch current season standings.
    async fn fetch_standings(&self) -> Result<Vec<TeamStanding>, ScoreFeedSourceError>;
}
