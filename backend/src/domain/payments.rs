//! Payments snapshot: balance, recurring revenue and subscriptions.
//!
//! Payments are always fetched live; the cache only supplies the last good
//! snapshot when the processor fails.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ports::{PaymentsSource, PaymentsSourceError, SubscriptionRecord};
use super::{Error, Freshness, TimeBoxedCache};

/// Subscriptions requested per snapshot.
pub const SUBSCRIPTION_LIMIT: u8 = 20;

const ACTIVE: &str = "active";
const DEFAULT_INTERVAL: &str = "month";

/// Minor currency units to major units.
fn major(minor: i64) -> f64 {
    minor as f64 / 100.0
}

/// One subscription in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionSummary {
    pub id: String,
    pub status: String,
    /// Unit price in major units.
    pub amount: f64,
    pub interval: String,
}

/// Payments snapshot served by `GET /api/payments`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsSnapshot {
    /// First available balance in major units.
    pub balance: f64,
    /// Monthly recurring revenue over active subscriptions, two decimals.
    pub stripe_mrr: f64,
    pub active_subscriptions: usize,
    pub total_subscriptions: usize,
    pub subscriptions: Vec<SubscriptionSummary>,
}

impl PaymentsSnapshot {
    /// Summarise a balance and subscription list.
    ///
    /// Only `active` subscriptions count towards MRR. Amounts are summed in
    /// minor units before conversion, so the total is exact to the cent.
    pub fn summarise(available: Option<i64>, subscriptions: Vec<SubscriptionRecord>) -> Self {
        let active: Vec<&SubscriptionRecord> = subscriptions
            .iter()
            .filter(|sub| sub.status == ACTIVE)
            .collect();
        let mrr_minor: i64 = active.iter().filter_map(|sub| sub.unit_amount).sum();
        let summaries = subscriptions
            .iter()
            .map(|sub| SubscriptionSummary {
                id: sub.id.clone(),
                status: sub.status.clone(),
                amount: major(sub.unit_amount.unwrap_or(0)),
                interval: sub
                    .interval
                    .clone()
                    .unwrap_or_else(|| DEFAULT_INTERVAL.to_owned()),
            })
            .collect();
        Self {
            balance: major(available.unwrap_or(0)),
            stripe_mrr: (major(mrr_minor) * 100.0).round() / 100.0,
            active_subscriptions: active.len(),
            total_subscriptions: subscriptions.len(),
            subscriptions: summaries,
        }
    }
}

fn map_payments_error(err: PaymentsSourceError) -> Error {
    match err {
        PaymentsSourceError::NotConfigured => Error::not_configured(err.to_string()),
        other => Error::upstream_unavailable(other.to_string()),
    }
}

/// Serves live payment snapshots, falling back to the last good one.
pub struct PaymentsService {
    source: Arc<dyn PaymentsSource>,
    cache: TimeBoxedCache<PaymentsSnapshot>,
}

impl PaymentsService {
    pub fn new(source: Arc<dyn PaymentsSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            cache: TimeBoxedCache::new(Duration::ZERO, clock),
        }
    }

    async fn fetch(&self) -> Result<PaymentsSnapshot, PaymentsSourceError> {
        let available = self.source.fetch_available_balance().await?;
        let subscriptions = self.source.fetch_subscriptions(SUBSCRIPTION_LIMIT).await?;
        Ok(PaymentsSnapshot::summarise(available, subscriptions))
    }

    /// Current snapshot.
    ///
    /// # Errors
    /// [`Error::not_configured`] without a secret key; otherwise
    /// [`Error::upstream_unavailable`] when the processor fails and no
    /// earlier snapshot exists.
    pub async fn snapshot(&self) -> Result<PaymentsSnapshot, Error> {
        let cached = self
            .cache
            .get_or_refresh(|| self.fetch())
            .await
            .map_err(|err| {
                warn!(error = %err, "payments refresh failed");
                map_payments_error(err)
            })?;
        if cached.freshness == Freshness::Stale {
            warn!(fetched_at = %cached.fetched_at, "serving stale payments snapshot");
        }
        Ok(cached.value)
    }
}
