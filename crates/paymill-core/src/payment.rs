//! # Payment
//!
//! Stored payment instruments (credit cards and direct debit accounts)
//! created from a bridge token.

use crate::error::PaymillResult;
use crate::mapping::{epoch_seconds, flexible_int, FieldSpec, FilterKind, Resource};
use crate::query::{Filter, Order};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment instrument type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Creditcard,
    Debit,
    /// Token not known to this client version
    #[serde(other)]
    Undefined,
}

/// A stored payment instrument
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<PaymentType>,

    /// Owning client id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(with = "flexible_int", skip_serializing_if = "Option::is_none")]
    pub expire_month: Option<i64>,

    #[serde(with = "flexible_int", skip_serializing_if = "Option::is_none")]
    pub expire_year: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_holder: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last4: Option<String>,

    /// Direct debit: bank code / BIC
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Direct debit: account number / IBAN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

impl Payment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn create_filter() -> Filter<Payment> {
        Filter::new()
    }

    pub fn create_order() -> Order<Payment> {
        Order::new()
    }
}

impl Resource for Payment {
    const NAME: &'static str = "payment";
    const PATH: &'static str = "payments";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("id"),
        FieldSpec::new("type"),
        FieldSpec::new("client"),
        FieldSpec::new("card_type").filterable(FilterKind::Text),
        FieldSpec::new("country"),
        FieldSpec::new("expire_month"),
        FieldSpec::new("expire_year"),
        FieldSpec::new("card_holder"),
        FieldSpec::new("last4"),
        FieldSpec::new("code"),
        FieldSpec::new("account"),
        FieldSpec::new("holder"),
        FieldSpec::new("iban"),
        FieldSpec::new("bic"),
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

impl Filter<Payment> {
    /// Card brand, e.g. `"visa"`
    pub fn by_card_type(self, card_type: impl Into<String>) -> Self {
        self.text("card_type", card_type)
    }

    pub fn by_created_at(
        self,
        date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> PaymillResult<Self> {
        self.dates("created_at", date, end_date)
    }
}
