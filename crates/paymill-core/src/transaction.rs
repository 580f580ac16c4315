//! # Transaction
//!
//! Charges against a payment or a preauthorization. A transaction embeds
//! the payment, the client and (when captured from one) the preauthorization
//! it was created from.

use crate::client::Client;
use crate::error::PaymillResult;
use crate::mapping::{epoch_seconds, flexible_int, FieldSpec, FilterKind, Resource};
use crate::payment::Payment;
use crate::preauthorization::Preauthorization;
use crate::query::{Filter, Order};
use crate::refund::Refund;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Open,
    Pending,
    Closed,
    Failed,
    PartialRefunded,
    Refunded,
    Preauth,
    Chargeback,
    #[serde(other)]
    Undefined,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Open => "open",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Closed => "closed",
            TransactionStatus::Failed => "failed",
            TransactionStatus::PartialRefunded => "partial_refunded",
            TransactionStatus::Refunded => "refunded",
            TransactionStatus::Preauth => "preauth",
            TransactionStatus::Chargeback => "chargeback",
            TransactionStatus::Undefined => "undefined",
        }
    }
}

/// Application fee collected on a transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fee {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub fee_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,

    /// Payment id the fee is charged to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<String>,

    #[serde(with = "flexible_int", skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub billed_at: Option<DateTime<Utc>>,
}

/// A charge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Current amount in the smallest currency unit, after refunds
    #[serde(with = "flexible_int", skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    /// Amount at creation time
    #[serde(with = "flexible_int", skip_serializing_if = "Option::is_none")]
    pub origin_amount: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub livemode: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refunds: Option<Vec<Refund>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preauthorization: Option<Box<Preauthorization>>,

    #[serde(with = "flexible_int", skip_serializing_if = "Option::is_none")]
    pub response_code: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fees: Vec<Fee>,

    #[serde(rename = "is_fraud", skip_serializing_if = "Option::is_none")]
    pub fraud: Option<bool>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Response code 20000 means the charge went through
    pub fn is_successful(&self) -> bool {
        self.response_code == Some(20000)
    }

    pub fn create_filter() -> Filter<Transaction> {
        Filter::new()
    }

    pub fn create_order() -> Order<Transaction> {
        Order::new()
    }
}

impl Resource for Transaction {
    const NAME: &'static str = "transaction";
    const PATH: &'static str = "transactions";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("id"),
        FieldSpec::new("amount")
            .filterable(FilterKind::Amount)
            .sortable(),
        FieldSpec::new("origin_amount"),
        FieldSpec::new("currency"),
        FieldSpec::new("status")
            .filterable(FilterKind::Text)
            .sortable(),
        FieldSpec::new("description")
            .updateable()
            .filterable(FilterKind::Text),
        FieldSpec::new("livemode"),
        FieldSpec::new("refunds"),
        FieldSpec::new("payment").filterable(FilterKind::Text),
        FieldSpec::new("client").filterable(FilterKind::Text),
        FieldSpec::new("preauthorization"),
        FieldSpec::new("response_code"),
        FieldSpec::new("short_id"),
        FieldSpec::new("fees"),
        FieldSpec::new("is_fraud"),
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

impl Filter<Transaction> {
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

    pub fn by_description(self, description: impl Into<String>) -> Self {
        self.text("description", description)
    }

    pub fn by_status(self, status: TransactionStatus) -> Self {
        self.text("status", status.as_str())
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

impl Order<Transaction> {
    pub fn by_amount(self) -> Self {
        self.by("amount")
    }

    pub fn by_status(self) -> Self {
        self.by("status")
    }
}
