//! Reqwest-backed payments adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;
use serde::de::DeserializeOwned;
use zeroize::Zeroizing;

use super::dto::{BalanceDto, SubscriptionListDto};
use crate::domain::ports::{PaymentsSource, PaymentsSourceError, SubscriptionRecord};
use crate::outbound::http_failure::{build_client, impl_from_http_failure, send_for_body};

/// Default API base.
pub const DEFAULT_STRIPE_BASE_URL: &str = "https://api.stripe.com/";

impl_from_http_failure!(PaymentsSourceError);

/// Payments adapter authenticating with a secret key.
pub struct StripeHttpSource {
    client: Client,
    base_url: Url,
    secret_key: Zeroizing<String>,
}

impl StripeHttpSource {
    /// Build an adapter rooted at `base_url`.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        secret_key: Zeroizing<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url,
            secret_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, PaymentsSourceError> {
        self.base_url.join(path).map_err(|error| {
            PaymentsSourceError::transport(format!("invalid endpoint {path}: {error}"))
        })
    }

    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, PaymentsSourceError> {
        let request = self
            .client
            .get(url)
            .bearer_auth(self.secret_key.as_str())
            .query(query);
        let body = send_for_body(request).await?;
        decode(&body)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, PaymentsSourceError> {
    serde_json::from_slice(body).map_err(|error| {
        PaymentsSourceError::decode(format!("invalid payments JSON payload: {error}"))
    })
}

#[async_trait]
impl PaymentsSource for StripeHttpSource {
    async fn fetch_available_balance(&self) -> Result<Option<i64>, PaymentsSourceError> {
        let balance: BalanceDto = self.get_json(self.endpoint("v1/balance")?, &[]).await?;
        Ok(balance.first_available())
    }

    async fn fetch_subscriptions(
        &self,
        limit: u8,
    ) -> Result<Vec<SubscriptionRecord>, PaymentsSourceError> {
        let limit = limit.to_string();
        let list: SubscriptionListDto = self
            .get_json(
                self.endpoint("v1/subscriptions")?,
                &[("limit", limit.as_str()), ("status", "all")],
            )
            .await?;
        Ok(list.into_domain())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn balance_takes_first_available_entry() {
        let balance: BalanceDto = decode(
            br#"{"object":"balance","available":[{"amount":4200,"currency":"usd"},{"amount":7,"currency":"eur"}]}"#,
        )
        .expect("payload decodes");
        assert_eq!(balance.first_available(), Some(4_200));
    }

    #[rstest]
    fn empty_balance_has_no_amount() {
        let balance: BalanceDto = decode(br#"{"available":[]}"#).expect("payload decodes");
        assert_eq!(balance.first_available(), None);
    }

    #[rstest]
    fn subscriptions_use_first_line_item() {
        let list: SubscriptionListDto = decode(
            br#"{"object":"list","data":[
                {"id":"sub_1","status":"active","items":{"data":[
                    {"price":{"unit_amount":1999,"recurring":{"interval":"year"}}},
                    {"price":{"unit_amount":5}}
                ]}},
                {"id":"sub_2","status":"canceled","items":{"data":[]}}
            ]}"#,
        )
        .expect("payload decodes");
        let records = list.into_domain();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].unit_amount, Some(1_999));
        assert_eq!(records[0].interval.as_deref(), Some("year"));
        assert_eq!(records[1].unit_amount, None);
        assert_eq!(records[1].status, "canceled");
    }

    #[rstest]
    fn endpoints_join_onto_base() {
        let source = StripeHttpSource::new(
            Url::parse("http://127.0.0.1:12111/").expect("valid URL"),
            Zeroizing::new("sk_test".to_owned()),
            None,
        )
        .expect("client builds");
        let url = source.endpoint("v1/balance").expect("joins");
        assert_eq!(url.as_str(), "http://127.0.0.1:12111/v1/balance");
    }
}
