//! # Refund
//!
//! Full or partial reversals of a closed transaction.

use crate::client::Client;
use crate::error::PaymillResult;
use crate::mapping::{epoch_seconds, flexible_int, FieldSpec, FilterKind, Resource};
use crate::query::{Filter, Order};
use crate::transaction::Transaction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefundStatus {
    Open,
    Pending,
    Refunded,
    #[serde(other)]
    Undefined,
}

/// A refund of (part of) a transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Refund {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Refunded transaction; lists embed it, the refund call returns it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Box<Transaction>>,

    /// Client of the refunded transaction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,

    #[serde(with = "flexible_int", skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RefundStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub livemode: Option<bool>,

    #[serde(with = "flexible_int", skip_serializing_if = "Option::is_none")]
    pub response_code: Option<i64>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

impl Refund {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn create_filter() -> Filter<Refund> {
        Filter::new()
    }

    pub fn create_order() -> Order<Refund> {
        Order::new()
    }
}

impl Resource for Refund {
    const NAME: &'static str = "refund";
    const PATH: &'static str = "refunds";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("id"),
        FieldSpec::new("transaction")
            .filterable(FilterKind::Text)
            .sortable(),
        FieldSpec::new("client")
            .filterable(FilterKind::Text)
            .sortable(),
        FieldSpec::new("amount")
            .filterable(FilterKind::Amount)
            .sortable(),
        FieldSpec::new("status"),
        FieldSpec::new("description"),
        FieldSpec::new("livemode"),
        FieldSpec::new("response_code"),
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

impl Filter<Refund> {
    /// Refunds of transactions belonging to a client
    pub fn by_client_id(self, client_id: impl Into<String>) -> Self {
        self.text("client", client_id)
    }

    pub fn by_transaction_id(self, transaction_id: impl Into<String>) -> Self {
        self.text("transaction", transaction_id)
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

impl Order<Refund> {
    pub fn by_transaction(self) -> Self {
        self.by("transaction")
    }

    pub fn by_client(self) -> Self {
        self.by("client")
    }

    pub fn by_amount(self) -> Self {
        self.by("amount")
    }
}
