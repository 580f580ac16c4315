//! # Preauthorization
//!
//! Reserved amounts on a card that can later be captured as a transaction.

use crate::client::Client;
use crate::error::PaymillResult;
use crate::mapping::{epoch_seconds, flexible_int, FieldSpec, FilterKind, Resource};
use crate::payment::Payment;
use crate::query::{Filter, Order};
use crate::transaction::Transaction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Preauthorization state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreauthorizationStatus {
    Open,
    Pending,
    Closed,
    Failed,
    Deleted,
    Preauth,
    #[serde(other)]
    Undefined,
}

/// A reserved amount
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preauthorization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(with = "flexible_int", skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PreauthorizationStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub livemode: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,

    /// Transaction that carried this preauthorization, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Box<Transaction>>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

impl Preauthorization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn create_filter() -> Filter<Preauthorization> {
        Filter::new()
    }

    pub fn create_order() -> Order<Preauthorization> {
        Order::new()
    }
}

impl Resource for Preauthorization {
    const NAME: &'static str = "preauthorization";
    const PATH: &'static str = "preauthorizations";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("id"),
        FieldSpec::new("amount")
            .filterable(FilterKind::Amount)
            .sortable(),
        FieldSpec::new("currency"),
        FieldSpec::new("description"),
        FieldSpec::new("status"),
        FieldSpec::new("livemode"),
        FieldSpec::new("payment").filterable(FilterKind::Text),
        FieldSpec::new("client").filterable(FilterKind::Text),
        FieldSpec::new("transaction"),
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

impl Filter<Preauthorization> {
    pub fn by_client_id(self, client_id: impl Into<String>) -> Self {
        self.text("client", client_id)
    }

    pub fn by_payment_id(self, payment_id: impl Into<String>) -> Self {
        self.text("payment", payment_id)
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
}

impl Order<Preauthorization> {
    pub fn by_amount(self) -> Self {
        self.by("amount")
    }
}
