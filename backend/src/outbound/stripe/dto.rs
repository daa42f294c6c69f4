//! DTOs for the payments processor's REST responses.

use serde::Deserialize;

use crate::domain::ports::SubscriptionRecord;

#[derive(Debug, Deserialize)]
pub(super) struct BalanceDto {
    #[serde(default)]
    available: Vec<BalanceAmountDto>,
}

#[derive(Debug, Deserialize)]
struct BalanceAmountDto {
    amount: i64,
}

impl BalanceDto {
    pub(super) fn first_available(&self) -> Option<i64> {
        self.available.first().map(|entry| entry.amount)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SubscriptionListDto {
    #[serde(default)]
    data: Vec<SubscriptionDto>,
}

#[derive(Debug, Deserialize)]
struct SubscriptionDto {
    id: String,
    status: String,
    items: Option<ItemListDto>,
}

#[derive(Debug, Deserialize)]
struct ItemListDto {
    #[serde(default)]
    data: Vec<ItemDto>,
}

#[derive(Debug, Deserialize)]
struct ItemDto {
    price: Option<PriceDto>,
}

#[derive(Debug, Deserialize)]
struct PriceDto {
    unit_amount: Option<i64>,
    recurring: Option<RecurringDto>,
}

#[derive(Debug, Deserialize)]
struct RecurringDto {
    interval: Option<String>,
}

impl SubscriptionListDto {
    pub(super) fn into_domain(self) -> Vec<SubscriptionRecord> {
        self.data.into_iter().map(SubscriptionDto::into_domain).collect()
    }
}

impl SubscriptionDto {
    /// Pricing comes from the first line item only.
    fn into_domain(self) -> SubscriptionRecord {
        let price = self
            .items
            .and_then(|items| items.data.into_iter().next())
            .and_then(|item| item.price);
        let (unit_amount, interval) = match price {
            Some(price) => (
                price.unit_amount,
                price.recurring.and_then(|recurring| recurring.interval),
            ),
            None => (None, None),
        };
        SubscriptionRecord {
            id: self.id,
            status: self.status,
            unit_amount,
            interval,
        }
    }
}
