//! # Webhook
//!
//! Registrations that make the API notify a URL or an email address when
//! selected events happen.

use crate::error::PaymillResult;
use crate::mapping::{epoch_seconds, FieldSpec, FilterKind, Resource};
use crate::query::{Filter, Order};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Event a webhook can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    ChargebackExecuted,
    TransactionCreated,
    TransactionSucceeded,
    TransactionFailed,
    ClientUpdated,
    SubscriptionCreated,
    SubscriptionUpdated,
    SubscriptionDeleted,
    SubscriptionSucceeded,
    SubscriptionFailed,
    SubscriptionExpiring,
    SubscriptionDeactivated,
    SubscriptionActivated,
    SubscriptionCanceled,
    RefundCreated,
    RefundSucceeded,
    RefundFailed,
    PayoutTransferred,
    InvoiceAvailable,
    AppMerchantActivated,
    AppMerchantDeactivated,
    AppMerchantRejected,
    AppMerchantLiveRequestsAllowed,
    AppMerchantLiveRequestsNotAllowed,
    AppMerchantAppDisabled,
    PaymentExpired,
    /// Token not known to this client version
    Undefined,
}

impl EventType {
    /// Every known event, excluding `Undefined`
    pub const ALL: [EventType; 26] = [
        EventType::ChargebackExecuted,
        EventType::TransactionCreated,
        EventType::TransactionSucceeded,
        EventType::TransactionFailed,
        EventType::ClientUpdated,
        EventType::SubscriptionCreated,
        EventType::SubscriptionUpdated,
        EventType::SubscriptionDeleted,
        EventType::SubscriptionSucceeded,
        EventType::SubscriptionFailed,
        EventType::SubscriptionExpiring,
        EventType::SubscriptionDeactivated,
        EventType::SubscriptionActivated,
        EventType::SubscriptionCanceled,
        EventType::RefundCreated,
        EventType::RefundSucceeded,
        EventType::RefundFailed,
        EventType::PayoutTransferred,
        EventType::InvoiceAvailable,
        EventType::AppMerchantActivated,
        EventType::AppMerchantDeactivated,
        EventType::AppMerchantRejected,
        EventType::AppMerchantLiveRequestsAllowed,
        EventType::AppMerchantLiveRequestsNotAllowed,
        EventType::AppMerchantAppDisabled,
        EventType::PaymentExpired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::ChargebackExecuted => "chargeback.executed",
            EventType::TransactionCreated => "transaction.created",
            EventType::TransactionSucceeded => "transaction.succeeded",
            EventType::TransactionFailed => "transaction.failed",
            EventType::ClientUpdated => "client.updated",
            EventType::SubscriptionCreated => "subscription.created",
            EventType::SubscriptionUpdated => "subscription.updated",
            EventType::SubscriptionDeleted => "subscription.deleted",
            EventType::SubscriptionSucceeded => "subscription.succeeded",
            EventType::SubscriptionFailed => "subscription.failed",
            EventType::SubscriptionExpiring => "subscription.expiring",
            EventType::SubscriptionDeactivated => "subscription.deactivated",
            EventType::SubscriptionActivated => "subscription.activated",
            EventType::SubscriptionCanceled => "subscription.canceled",
            EventType::RefundCreated => "refund.created",
            EventType::RefundSucceeded => "refund.succeeded",
            EventType::RefundFailed => "refund.failed",
            EventType::PayoutTransferred => "payout.transferred",
            EventType::InvoiceAvailable => "invoice.available",
            EventType::AppMerchantActivated => "app.merchant.activated",
            EventType::AppMerchantDeactivated => "app.merchant.deactivated",
            EventType::AppMerchantRejected => "app.merchant.rejected",
            EventType::AppMerchantLiveRequestsAllowed => "app.merchant.live_requests_allowed",
            EventType::AppMerchantLiveRequestsNotAllowed => {
                "app.merchant.live_requests_not_allowed"
            }
            EventType::AppMerchantAppDisabled => "app.merchant.app.disabled",
            EventType::PaymentExpired => "payment.expired",
            EventType::Undefined => "undefined",
        }
    }

    /// Case-insensitive lookup; unknown tokens map to `Undefined`
    pub fn from_token(token: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|event| event.as_str().eq_ignore_ascii_case(token))
            .unwrap_or(EventType::Undefined)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(EventType::from_token(&token))
    }
}

/// An event notification target
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Webhook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub livemode: Option<bool>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event_types: Vec<EventType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

impl Webhook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn create_filter() -> Filter<Webhook> {
        Filter::new()
    }

    pub fn create_order() -> Order<Webhook> {
        Order::new()
    }
}

impl Resource for Webhook {
    const NAME: &'static str = "webhook";
    const PATH: &'static str = "webhooks";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("id"),
        FieldSpec::new("url")
            .updateable()
            .filterable(FilterKind::Text)
            .sortable(),
        FieldSpec::new("email")
            .updateable()
            .filterable(FilterKind::Text)
            .sortable(),
        FieldSpec::new("livemode"),
        FieldSpec::new("event_types"),
        FieldSpec::new("active"),
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

impl Filter<Webhook> {
    pub fn by_url(self, url: impl Into<String>) -> Self {
        self.text("url", url)
    }

    pub fn by_email(self, email: impl Into<String>) -> Self {
        self.text("email", email)
    }

    pub fn by_created_at(
        self,
        date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> PaymillResult<Self> {
        self.dates("created_at", date, end_date)
    }
}

impl Order<Webhook> {
    pub fn by_url(self) -> Self {
        self.by("url")
    }

    pub fn by_email(self) -> Self {
        self.by("email")
    }
}
