//! Tracked-team score report built from the public scoreboard feed.

use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ports::{ScheduledGame, ScoreFeedSource, ScoreFeedSourceError, Scoreboard, TeamStanding};
use super::{Error, Freshness, TimeBoxedCache};

/// Score reports are reused for five minutes.
pub const SCORE_FEED_TTL: Duration = Duration::from_secs(5 * 60);

/// Zone kickoff times are rendered in.
pub const KICKOFF_ZONE: Tz = chrono_tz::America::New_York;

const NO_GAME_TEXT: &str = "No game today";
const DEFAULT_CONFERENCE: &str = "East";

/// Game state derived from the feed's numeric status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Scheduled,
    Live,
    Final,
}

impl GameStatus {
    /// Map 1, 2 and 3; any other code is unknown.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Scheduled),
            2 => Some(Self::Live),
            3 => Some(Self::Final),
            _ => None,
        }
    }
}

/// Today's game from the tracked team's point of view.
///
/// Scores keep their historical wire names: `knicksScore` is always the
/// tracked team's score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum TodayGame {
    #[serde(rename_all = "camelCase")]
    Scheduled {
        opponent: String,
        opponent_tricode: String,
        /// Kickoff, e.g. `7:30 PM`, in New York time.
        time: String,
        home: bool,
        game_status_text: String,
    },
    #[serde(rename_all = "camelCase")]
    Live {
        opponent: String,
        opponent_tricode: String,
        home: bool,
        #[serde(rename = "knicksScore")]
        team_score: u32,
        opponent_score: u32,
        period: u32,
        clock: String,
        game_status_text: String,
    },
    #[serde(rename_all = "camelCase")]
    Final {
        opponent: String,
        opponent_tricode: String,
        home: bool,
        #[serde(rename = "knicksScore")]
        team_score: u32,
        opponent_score: u32,
        game_status_text: String,
        won: bool,
    },
    /// The tracked team does not play today.
    NoGame { text: String },
}

/// Placeholder for the next fixture when there is no game today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextGame {
    pub text: String,
}

/// Score report served by `GET /api/scores`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    /// Win-loss record, e.g. `30-18`.
    pub record: String,
    /// Conference rank, e.g. `3rd in East`.
    pub standing: String,
    pub streak: String,
    /// `None` only when the feed reports an unknown status code.
    pub today_game: Option<TodayGame>,
    pub next_game: Option<NextGame>,
    pub is_live: bool,
    pub game_date: String,
}

/// English ordinal: 1st, 2nd, 3rd, 4th, 11th, 21st.
///
/// # Examples
/// ```
/// use command_center::domain::ordinal;
///
/// assert_eq!(ordinal(3), "3rd");
/// assert_eq!(ordinal(12), "12th");
/// ```
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

fn today_game(game: &ScheduledGame, team_id: u64) -> Option<TodayGame> {
    let home = game.home.team_id == team_id;
    let (team, opponent) = if home {
        (&game.home, &game.away)
    } else {
        (&game.away, &game.home)
    };
    let opponent_name = format!("{} {}", opponent.city, opponent.name);
    let opponent_tricode = opponent.tricode.clone();
    let game_status_text = game.status_text.clone();
    let status = GameStatus::from_code(game.status_code)?;
    Some(match status {
        GameStatus::Scheduled => TodayGame::Scheduled {
            opponent: opponent_name,
            opponent_tricode,
            time: game
                .starts_at
                .map(|at| at.with_timezone(&KICKOFF_ZONE).format("%-I:%M %p").to_string())
                .unwrap_or_default(),
            home,
            game_status_text,
        },
        GameStatus::Live => TodayGame::Live {
            opponent: opponent_name,
            opponent_tricode,
            home,
            team_score: team.score,
            opponent_score: opponent.score,
            period: game.period,
            clock: game.clock.clone(),
            game_status_text,
        },
        GameStatus::Final => TodayGame::Final {
            opponent: opponent_name,
            opponent_tricode,
            home,
            team_score: team.score,
            opponent_score: opponent.score,
            game_status_text,
            won: team.score > opponent.score,
        },
    })
}

impl ScoreReport {
    /// Build the report for `team_id` from today's scoreboard.
    pub fn from_scoreboard(scoreboard: &Scoreboard, team_id: u64) -> Self {
        let game = scoreboard
            .games
            .iter()
            .find(|game| game.home.team_id == team_id || game.away.team_id == team_id);
        let Some(game) = game else {
            return Self {
                today_game: Some(TodayGame::NoGame {
                    text: NO_GAME_TEXT.to_owned(),
                }),
                next_game: Some(NextGame {
                    text: NO_GAME_TEXT.to_owned(),
                }),
                game_date: scoreboard.game_date.clone(),
                ..Self::default()
            };
        };
        let team = if game.home.team_id == team_id {
            &game.home
        } else {
            &game.away
        };
        Self {
            record: format!("{}-{}", team.wins, team.losses),
            today_game: today_game(game, team_id),
            is_live: GameStatus::from_code(game.status_code) == Some(GameStatus::Live),
            game_date: scoreboard.game_date.clone(),
            ..Self::default()
        }
    }

    /// Fill rank and streak from standings, and the record when the
    /// scoreboard had none.
    pub fn enrich(&mut self, standings: &[TeamStanding], team_id: u64) {
        let Some(standing) = standings.iter().find(|entry| entry.team_id == team_id) else {
            return;
        };
        if let Some(rank) = standing.conference_rank.filter(|rank| *rank > 0) {
            let conference = standing.conference.as_deref().unwrap_or(DEFAULT_CONFERENCE);
            self.standing = format!("{} in {conference}", ordinal(rank));
        }
        if self.record.is_empty() {
            if let (Some(wins), Some(losses)) = (standing.wins, standing.losses) {
                self.record = format!("{wins}-{losses}");
            }
        }
        if let Some(streak) = standing.streak.as_ref().filter(|streak| !streak.is_empty()) {
            self.streak = streak.clone();
        }
    }
}

fn map_score_feed_error(err: ScoreFeedSourceError) -> Error {
    Error::upstream_unavailable(err.to_string())
}

/// Serves the tracked team's score report through a five-minute cache.
pub struct ScoreFeedService {
    source: Arc<dyn ScoreFeedSource>,
    cache: TimeBoxedCache<ScoreReport>,
    team_id: u64,
}

impl ScoreFeedService {
    pub fn new(source: Arc<dyn ScoreFeedSource>, team_id: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            cache: TimeBoxedCache::new(SCORE_FEED_TTL, clock),
            team_id,
        }
    }

    async fn fetch(&self) -> Result<ScoreReport, ScoreFeedSourceError> {
        let scoreboard = self.source.fetch_scoreboard().await?;
        let mut report = ScoreReport::from_scoreboard(&scoreboard, self.team_id);
        match self.source.fetch_standings().await {
            Ok(standings) => report.enrich(&standings, self.team_id),
            Err(err) => debug!(error = %err, "standings unavailable; skipping enrichment"),
        }
        Ok(report)
    }

    /// Current report, cached.
    ///
    /// # Errors
    /// [`Error::upstream_unavailable`] when the scoreboard fails and nothing
    /// is cached.
    pub async fn report(&self) -> Result<ScoreReport, Error> {
        let cached = self
            .cache
            .get_or_refresh(|| self.fetch())
            .await
            .map_err(|err| {
                warn!(error = %err, "score feed refresh failed");
                map_score_feed_error(err)
            })?;
        if cached.freshness == Freshness::Stale {
            warn!(fetched_at = %cached.fetched_at, "serving stale score report");
        }
        Ok(cached.value)
    }
}

#[cfg(test)]
#[path = "score_feed_tests.rs"]
mod tests;
