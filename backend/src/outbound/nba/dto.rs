//! DTOs for the public scoreboard and standings JSON feeds.
//!
//! The standings feed has shipped under more than one shape, so its DTOs
//! accept both `entries` and `teams`, and a team id either inline or nested.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::ports::{GameTeam, ScheduledGame, Scoreboard, TeamStanding};

#[derive(Debug, Deserialize)]
pub(super) struct ScoreboardEnvelopeDto {
    scoreboard: Option<ScoreboardDto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreboardDto {
    #[serde(default)]
    game_date: String,
    #[serde(default)]
    games: Vec<GameDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameDto {
    game_id: String,
    game_status: u8,
    #[serde(default)]
    game_status_text: String,
    #[serde(default)]
    period: u32,
    #[serde(default)]
    game_clock: String,
    #[serde(rename = "gameTimeUTC")]
    game_time_utc: Option<DateTime<Utc>>,
    home_team: TeamDto,
    away_team: TeamDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamDto {
    team_id: u64,
    #[serde(default)]
    team_name: String,
    #[serde(default)]
    team_city: String,
    #[serde(default)]
    team_tricode: String,
    #[serde(default)]
    wins: u32,
    #[serde(default)]
    losses: u32,
    #[serde(default)]
    score: u32,
}

impl ScoreboardEnvelopeDto {
    pub(super) fn into_domain(self) -> Scoreboard {
        let scoreboard = self.scoreboard.unwrap_or_default();
        Scoreboard {
            game_date: scoreboard.game_date,
            games: scoreboard.games.into_iter().map(GameDto::into_domain).collect(),
        }
    }
}

impl GameDto {
    fn into_domain(self) -> ScheduledGame {
        ScheduledGame {
            game_id: self.game_id,
            status_code: self.game_status,
            status_text: self.game_status_text,
            period: self.period,
            clock: self.game_clock,
            starts_at: self.game_time_utc,
            home: self.home_team.into_domain(),
            away: self.away_team.into_domain(),
        }
    }
}

impl TeamDto {
    fn into_domain(self) -> GameTeam {
        GameTeam {
            team_id: self.team_id,
            name: self.team_name,
            city: self.team_city,
            tricode: self.team_tricode,
            wins: self.wins,
            losses: self.losses,
            score: self.score,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct StandingsEnvelopeDto {
    standings: Option<StandingsDto>,
}

#[derive(Debug, Default, Deserialize)]
struct StandingsDto {
    #[serde(default, alias = "teams")]
    entries: Vec<StandingDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StandingDto {
    team_id: Option<u64>,
    team: Option<TeamRefDto>,
    conference_rank: Option<u32>,
    conference: Option<String>,
    wins: Option<u32>,
    losses: Option<u32>,
    streak: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct TeamRefDto {
    id: Option<u64>,
}

impl StandingsEnvelopeDto {
    /// Entries without a recognisable team id are dropped.
    pub(super) fn into_domain(self) -> Vec<TeamStanding> {
        self.standings
            .unwrap_or_default()
            .entries
            .into_iter()
            .filter_map(StandingDto::into_domain)
            .collect()
    }
}

impl StandingDto {
    fn into_domain(self) -> Option<TeamStanding> {
        let team_id = self
            .team_id
            .or_else(|| self.team.as_ref().and_then(|team| team.id))?;
        let streak = match self.streak {
            Some(Value::String(streak)) => Some(streak),
            Some(Value::Number(streak)) => Some(streak.to_string()),
            _ => None,
        };
        Some(TeamStanding {
            team_id,
            conference_rank: self.conference_rank,
            conference: self.conference,
            wins: self.wins,
            losses: self.losses,
            streak,
        })
    }
}
