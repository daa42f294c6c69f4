//! Reqwest-backed score feed adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;
use serde::de::DeserializeOwned;

use super::dto::{ScoreboardEnvelopeDto, StandingsEnvelopeDto};
use crate::domain::ports::{ScoreFeedSource, ScoreFeedSourceError, Scoreboard, TeamStanding};
use crate::outbound::http_failure::{build_client, impl_from_http_failure, send_for_body};

/// Default scoreboard feed.
pub const DEFAULT_SCOREBOARD_URL: &str =
    "https://cdn.nba.com/static/json/liveData/scoreboard/todaysScoreboard_00.json";
/// Default standings feed.
pub const DEFAULT_STANDINGS_URL: &str =
    "https://cdn.nba.com/static/json/liveData/standings/standings.json";

impl_from_http_failure!(ScoreFeedSourceError);

/// Score feed adapter reading two public JSON documents.
pub struct NbaHttpSource {
    client: Client,
    scoreboard_url: Url,
    standings_url: Url,
}

impl NbaHttpSource {
    /// Build an adapter for the given feeds.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        scoreboard_url: Url,
        standings_url: Url,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            scoreboard_url,
            standings_url,
        })
    }

    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> Result<T, ScoreFeedSourceError> {
        let body = send_for_body(self.client.get(url.clone())).await?;
        decode(&body)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ScoreFeedSourceError> {
    serde_json::from_slice(body).map_err(|error| {
        ScoreFeedSourceError::decode(format!("invalid feed JSON payload: {error}"))
    })
}

#[async_trait]
impl ScoreFeedSource for NbaHttpSource {
    async fn fetch_scoreboard(&self) -> Result<Scoreboard, ScoreFeedSourceError> {
        let envelope: ScoreboardEnvelopeDto = self.get_json(&self.scoreboard_url).await?;
        Ok(envelope.into_domain())
    }

    async fn fetch_standings(&self) -> Result<Vec<TeamStanding>, ScoreFeedSourceError> {
        let envelope: StandingsEnvelopeDto = self.get_json(&self.standings_url).await?;
        Ok(envelope.into_domain())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn decodes_scoreboard_games() {
        let body = r#"{
            "meta": { "version": 1 },
            "scoreboard": {
                "gameDate": "2026-01-28",
                "games": [{
                    "gameId": "0022500700",
                    "gameCode": "20260128/BOSNYK",
                    "gameStatus": 2,
                    "gameStatusText": "Q3 4:12",
                    "period": 3,
                    "gameClock": "PT04M12.00S",
                    "gameTimeUTC": "2026-01-29T00:30:00Z",
                    "gameEt": "2026-01-28T19:30:00Z",
                    "homeTeam": { "teamId": 1610612752, "teamName": "Knicks", "teamCity": "New York",
                                  "teamTricode": "NYK", "wins": 30, "losses": 18, "score": 88, "seed": null },
                    "awayTeam": { "teamId": 1610612738, "teamName": "Celtics", "teamCity": "Boston",
                                  "teamTricode": "BOS", "wins": 33, "losses": 15, "score": 80 }
                }]
            }
        }"#;

        let envelope: ScoreboardEnvelopeDto = decode(body.as_bytes()).expect("payload decodes");
        let scoreboard = envelope.into_domain();

        assert_eq!(scoreboard.game_date, "2026-01-28");
        let game = &scoreboard.games[0];
        assert_eq!(game.status_code, 2);
        assert_eq!(game.home.tricode, "NYK");
        assert_eq!(game.away.score, 80);
        assert!(game.starts_at.is_some());
    }

    #[rstest]
    fn missing_scoreboard_means_no_games() {
        let envelope: ScoreboardEnvelopeDto = decode(b"{}").expect("payload decodes");
        assert!(envelope.into_domain().games.is_empty());
    }

    #[rstest]
    #[case::entries_with_inline_id(
        r#"{"standings":{"entries":[{"teamId":1610612752,"conferenceRank":3,"conference":"East","streak":"W2"}]}}"#
    )]
    #[case::teams_with_nested_id(
        r#"{"standings":{"teams":[{"team":{"id":1610612752},"conferenceRank":3,"conference":"East","streak":"W2"}]}}"#
    )]
    fn decodes_both_standings_shapes(#[case] body: &str) {
        let envelope: StandingsEnvelopeDto = decode(body.as_bytes()).expect("payload decodes");
        let standings = envelope.into_domain();
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].team_id, 1_610_612_752);
        assert_eq!(standings[0].conference_rank, Some(3));
        assert_eq!(standings[0].streak.as_deref(), Some("W2"));
    }

    #[rstest]
    fn numeric_streaks_become_text_and_idless_entries_drop() {
        let body = r#"{"standings":{"entries":[{"teamId":1,"streak":-2},{"conferenceRank":1}]}}"#;
        let envelope: StandingsEnvelopeDto = decode(body.as_bytes()).expect("payload decodes");
        let standings = envelope.into_domain();
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].streak.as_deref(), Some("-2"));
    }

    #[rstest]
    fn invalid_json_is_a_decode_error() {
        let result: Result<ScoreboardEnvelopeDto, _> = decode(b"not json");
        assert!(matches!(result, Err(ScoreFeedSourceError::Decode { .. })));
    }
}
