//! # Offer
//!
//! Recurring price plans that subscriptions are created from.

use crate::error::PaymillResult;
use crate::interval::Interval;
use crate::mapping::{epoch_seconds, flexible_int, FieldSpec, FilterKind, Resource};
use crate::query::{Filter, Order};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subscriptions currently attached to an offer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionCount {
    #[serde(with = "flexible_int", skip_serializing_if = "Option::is_none")]
    pub active: Option<i64>,

    #[serde(with = "flexible_int", skip_serializing_if = "Option::is_none")]
    pub inactive: Option<i64>,
}

/// A price plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Offer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(with = "flexible_int", skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,

    #[serde(with = "flexible_int", skip_serializing_if = "Option::is_none")]
    pub trial_period_days: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_count: Option<SubscriptionCount>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

impl Offer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn create_filter() -> Filter<Offer> {
        Filter::new()
    }

    pub fn create_order() -> Order<Offer> {
        Order::new()
    }
}

impl Resource for Offer {
    const NAME: &'static str = "offer";
    const PATH: &'static str = "offers";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("id"),
        FieldSpec::new("name")
            .updateable()
            .filterable(FilterKind::Text),
        FieldSpec::new("amount")
            .updateable()
            .filterable(FilterKind::Amount)
            .sortable(),
        FieldSpec::new("currency").updateable(),
        FieldSpec::new("interval").updateable().sortable(),
        FieldSpec::new("trial_period_days")
            .filterable(FilterKind::Number)
            .sortable(),
        FieldSpec::new("subscription_count"),
        FieldSpec::new("created_at")
            .filterable(FilterKind::Date)
            .sortable(),
        FieldSpec::new("updated_at").filterable(FilterKind::Date),
        FieldSpec::new("app_id"),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Filter<Offer> {
    pub fn by_name(self, name: impl Into<String>) -> Self {
        self.text("name", name)
    }

    pub fn by_trial_period_days(self, days: i64) -> Self {
        self.number("trial_period_days", days)
    }

    pub fn by_amount(self, amount: i64) -> Self {
        self.amount_equal("amount", amount)
    }

    /// Lower bound; combines with `by_amount_less_than`, replaces `by_amount`
    pub fn by_amount_greater_than(self, amount: i64) -> Self {
        self.amount_greater_than("amount", amount)
    }

    /// Upper bound; combines with `by_amount_greater_than`, replaces `by_amount`
    pub fn by_amount_less_than(self, amount: i64) -> Self {
        self.amount_less_than("amount", amount)
    }

    pub fn by_created_at(
        self,
        date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> PaymillResult<Self> {
        self.dates("created_at", date, end_date)
    }

    pub fn by_updated_at(
        self,
        date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> PaymillResult<Self> {
        self.dates("updated_at", date, end_date)
    }
}

impl Order<Offer> {
    pub fn by_interval(self) -> Self {
        self.by("interval")
    }

    pub fn by_amount(self) -> Self {
        self.by("amount")
    }

    pub fn by_trial_period_days(self) -> Self {
        self.by("trial_period_days")
    }
}
