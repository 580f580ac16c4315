//! # Subscription
//!
//! Recurring charges of a payment, either following an offer or with their
//! own amount, currency and interval.

use crate::client::Client;
use crate::error::PaymillResult;
use crate::interval::Interval;
use crate::mapping::{epoch_seconds, flexible_int, FieldSpec, FilterKind, Resource};
use crate::offer::Offer;
use crate::payment::Payment;
use crate::query::{Filter, Order};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
    Expired,
    Failed,
    #[serde(other)]
    Undefined,
}

/// A recurring charge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer: Option<Offer>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub livemode: Option<bool>,

    #[serde(with = "flexible_int", skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    /// One-off amount for the next capture only
    #[serde(with = "flexible_int", skip_serializing_if = "Option::is_none")]
    pub temp_amount: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub trial_start: Option<DateTime<Utc>>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub trial_end: Option<DateTime<Utc>>,

    /// Total lifetime of the subscription
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_of_validity: Option<Interval>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub end_of_period: Option<DateTime<Utc>>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub next_capture_at: Option<DateTime<Utc>>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub canceled_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SubscriptionStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_canceled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

impl Subscription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn create_filter() -> Filter<Subscription> {
        Filter::new()
    }

    pub fn create_order() -> Order<Subscription> {
        Order::new()
    }
}

impl Resource for Subscription {
    const NAME: &'static str = "subscription";
    const PATH: &'static str = "subscriptions";
    // Without `remove` the API only cancels
    const DELETE_PARAMS: &'static [(&'static str, &'static str)] = &[("remove", "true")];
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("id"),
        FieldSpec::new("offer")
            .updateable()
            .filterable(FilterKind::Text)
            .sortable(),
        FieldSpec::new("livemode"),
        FieldSpec::new("amount").updateable(),
        FieldSpec::new("temp_amount"),
        FieldSpec::new("currency").updateable(),
        FieldSpec::new("name").updateable(),
        FieldSpec::new("interval").updateable(),
        FieldSpec::new("trial_start"),
        FieldSpec::new("trial_end"),
        FieldSpec::new("period_of_validity"),
        FieldSpec::new("end_of_period"),
        FieldSpec::new("next_capture_at"),
        FieldSpec::new("canceled_at").sortable(),
        FieldSpec::new("payment").updateable(),
        FieldSpec::new("client"),
        FieldSpec::new("status"),
        FieldSpec::new("is_canceled"),
        FieldSpec::new("is_deleted"),
        FieldSpec::new("created_at")
            .filterable(FilterKind::Date)
            .sortable(),
        FieldSpec::new("updated_at"),
        FieldSpec::new("app_id"),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Filter<Subscription> {
    pub fn by_offer_id(self, offer_id: impl Into<String>) -> Self {
        self.text("offer", offer_id)
    }

    pub fn by_created_at(
        self,
        date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> PaymillResult<Self> {
        self.dates("created_at", date, end_date)
    }
}

impl Order<Subscription> {
    pub fn by_offer(self) -> Self {
        self.by("offer")
    }

    pub fn by_canceled_at(self) -> Self {
        self.by("canceled_at")
    }
}
