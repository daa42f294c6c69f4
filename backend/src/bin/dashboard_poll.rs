//! Poll a running dashboard and log a summary until interrupted.
//!
//! ```text
//! dashboard-poll --base-url http://127.0.0.1:8080/ --project "Real Worth" --sort priority
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::{Clock, DefaultClock};
use url::Url;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use command_center::dashboard::{
    ActionItemFilter, ActionItemView, PollIntervals, Poller, SortKey, ViewState, task_progress,
};
use command_center::domain::{ActionSource, DISPLAY_ZONE, TodayGame};
use command_center::outbound::dashboard::DashboardHttpClient;

/// Command-line options for the poller.
#[derive(Debug, Parser)]
#[command(name = "dashboard-poll", about = "Mirror the dashboard API and log summaries")]
struct Cli {
    /// Dashboard base URL.
    #[arg(long, default_value = "http://127.0.0.1:8080/")]
    base_url: Url,
    /// Seconds between collection refreshes.
    #[arg(long, default_value_t = 30)]
    collections_secs: u64,
    /// Seconds between issue board refreshes.
    #[arg(long, default_value_t = 300)]
    issue_board_secs: u64,
    /// Seconds between score refreshes while no game is live.
    #[arg(long, default_value_t = 300)]
    scores_secs: u64,
    /// Seconds between payments refreshes.
    #[arg(long, default_value_t = 300)]
    payments_secs: u64,
    /// Seconds between logged summaries.
    #[arg(long, default_value_t = 30)]
    summary_secs: u64,
    /// Only summarise action items from this source.
    #[arg(long, value_parser = parse_source)]
    source: Option<ActionSource>,
    /// Only summarise action items for this project.
    #[arg(long)]
    project: Option<String>,
    /// Secondary ordering for action items.
    #[arg(long, value_enum, default_value_t = SortKey::DueDate)]
    sort: SortKey,
    /// Tracked team code shown in score summaries.
    #[arg(long, default_value = "NYK")]
    tricode: String,
    /// Per-request timeout in seconds; unset keeps the client default.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn parse_source(raw: &str) -> Result<ActionSource, String> {
    serde_json::from_value(serde_json::Value::String(raw.to_ascii_lowercase()))
        .map_err(|_| format!("unknown source {raw:?}"))
}

impl Cli {
    fn intervals(&self) -> PollIntervals {
        PollIntervals {
            collections: Duration::from_secs(self.collections_secs),
            issue_board: Duration::from_secs(self.issue_board_secs),
            scores: Duration::from_secs(self.scores_secs),
            payments: Duration::from_secs(self.payments_secs),
            ..PollIntervals::default()
        }
    }
}

fn score_line(view: &ViewState, tricode: &str) -> String {
    let Some(report) = view.scores.as_ref() else {
        return format!("{tricode}: no score data");
    };
    let game = match report.today_game.as_ref() {
        Some(TodayGame::Live {
            opponent_tricode,
            team_score,
            opponent_score,
            game_status_text,
            ..
        }) => format!("LIVE {team_score}-{opponent_score} vs {opponent_tricode} ({game_status_text})"),
        Some(TodayGame::Final {
            opponent_tricode,
            team_score,
            opponent_score,
            won,
            ..
        }) => {
            let outcome = if *won { "W" } else { "L" };
            format!("{outcome} {team_score}-{opponent_score} vs {opponent_tricode}")
        }
        Some(TodayGame::Scheduled {
            opponent_tricode,
            time,
            ..
        }) => format!("vs {opponent_tricode} at {time}"),
        Some(TodayGame::NoGame { text }) => text.clone(),
        None => "game status unknown".to_owned(),
    };
    format!("{tricode} {} ({}): {game}", report.record, report.standing)
}

fn log_summary(view: &ViewState, cli: &Cli, filter: &ActionItemFilter, now: DateTime<Utc>) {
    let today = now.with_timezone(&DISPLAY_ZONE).date_naive();
    let items = view.action_items.as_deref().unwrap_or_default();
    let action_view = ActionItemView::build(items, filter, cli.sort, today);
    let summary = &action_view.summary;
    let [finn, gavin] = task_progress(view.tasks.as_deref().unwrap_or_default());
    let next_up = action_view
        .items
        .first()
        .filter(|item| !item.is_done())
        .map(|item| item.title.as_str())
        .unwrap_or("nothing pending");

    info!(
        pending = summary.pending,
        overdue = summary.overdue,
        completion = %format!("{:.0}%", summary.completion_ratio * 100.0),
        finn = %format!("{}/{}", finn.done, finn.total),
        gavin = %format!("{}/{}", gavin.done, gavin.total),
        inbox_pending = view.inbox_status.as_ref().map(|status| status.pending_count),
        inbox_urgent = view.inbox_status.as_ref().map(|status| status.urgent_count),
        next_up,
        scores = %score_line(view, &cli.tricode),
        "dashboard summary"
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    if cli.summary_secs == 0 || cli.collections_secs == 0 {
        return Err(eyre!("--summary-secs and --collections-secs must be positive"));
    }
    let client = DashboardHttpClient::new(
        cli.base_url.clone(),
        cli.timeout_secs.map(Duration::from_secs),
    )
    .wrap_err("failed to build dashboard client")?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let mut poller = Poller::new(Arc::new(client), Arc::clone(&clock));
    let filter = ActionItemFilter {
        source: cli.source,
        project: cli.project.clone(),
    };

    poller.start(cli.intervals());
    let mut ticker = tokio::time::interval(Duration::from_secs(cli.summary_secs));
    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.wrap_err("failed to listen for Ctrl-C")?;
                break;
            }
            _ = ticker.tick() => log_summary(&poller.view(), &cli, &filter, clock.utc()),
        }
    }
    poller.stop();
    Ok(())
}
