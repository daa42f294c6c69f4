//! Driven port for the payments processor.

use async_trait::async_trait;

use super::define_port_error;

/// Subscription row as reported by the processor, amounts in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    pub id: String,
    /// Processor status, e.g. `active`, `canceled`, `trialing`.
    pub status: String,
    /// Unit price of the first line item.
    pub unit_amount: Option<i64>,
    /// Billing interval of the first line item.
    pub interval: Option<String>,
}

define_port_error! {
    /// Errors surfaced while calling the payments processor.
    pub enum PaymentsSourceError {
        /// No secret key was configured.
        NotConfigured => "payments secret key is not configured",
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "payments transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "payments timeout: {message}",
        /// The processor rate-limited the request.
        RateLimited { message: String } =>
            "payments rate limited request: {message}",
        /// The processor answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "payments rejected request ({status}): {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "payments response decode failed: {message}",
    }
}

/// Port for reading balance and subscriptions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentsSource: Send + Sync {
    /// First available balance entry in minor units, if any.
    async fn fetch_available_balance(&self) -> Result<Option<i64>, PaymentsSourceError>;

    /// Up to `limit` subscriptions of any status.
    async fn fetch_subscriptions(
        &self,
        limit: u8,
    ) -> Result<Vec<SubscriptionRecord>, PaymentsSourceError>;
}

/// Stand-in used when no secret key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredPaymentsSource;

#[async_trait]
impl PaymentsSource for UnconfiguredPaymentsSource {
    async fn fetch_available_balance(&self) -> Result<Option<i64>, PaymentsSourceError> {
        Err(PaymentsSourceError::not_configured())
    }

    async fn fetch_subscriptions(
        &self,
        _limit: u8,
    ) -> Result<Vec<SubscriptionRecord>, PaymentsSourceError> {
        Err(PaymentsSourceError::not_configured())
    }
}
