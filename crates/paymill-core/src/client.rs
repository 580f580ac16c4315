//! # Client
//!
//! Customer records that group payments and subscriptions.

use crate::error::PaymillResult;
use crate::mapping::{epoch_seconds, FieldSpec, FilterKind, Resource};
use crate::payment::Payment;
use crate::query::{Filter, Order};
use crate::subscription::Subscription;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A customer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Payments stored for this client; bare ids arrive as id-only payments
    #[serde(
        deserialize_with = "payments_or_ids",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub payment: Vec<Payment>,

    /// Subscriptions of this client, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Vec<Subscription>>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(with = "epoch_seconds", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PaymentRef {
    Id(String),
    Full(Payment),
}

fn payments_or_ids<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Payment>, D::Error> {
    let refs = Option::<Vec<PaymentRef>>::deserialize(d)?.unwrap_or_default();
    Ok(refs
        .into_iter()
        .map(|r| match r {
            PaymentRef::Id(id) => Payment::with_id(id),
            PaymentRef::Full(payment) => payment,
        })
        .collect())
}

impl Client {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn create_filter() -> Filter<Client> {
        Filter::new()
    }

    pub fn create_order() -> Order<Client> {
        Order::new()
    }
}

impl Resource for Client {
    const NAME: &'static str = "client";
    const PATH: &'static str = "clients";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("id"),
        FieldSpec::new("email")
            .updateable()
            .filterable(FilterKind::Text)
            .sortable(),
        FieldSpec::new("description")
            .updateable()
            .filterable(FilterKind::Text),
        FieldSpec::new("payment").filterable(FilterKind::Text),
        FieldSpec::new("subscription"),
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

impl Filter<Client> {
    pub fn by_email(self, email: impl Into<String>) -> Self {
        self.text("email", email)
    }

    pub fn by_description(self, description: impl Into<String>) -> Self {
        self.text("description", description)
    }

    /// Clients owning the given payment id
    pub fn by_payment(self, payment_id: impl Into<String>) -> Self {
        self.text("payment", payment_id)
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

impl Order<Client> {
    pub fn by_email(self) -> Self {
        self.by("email")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::testing::assert_field_table;
    use serde_json::json;

    #[test]
    fn test_parse_client_with_payments() {
        let client: Client = serde_json::from_value(json!({
            "id": "client_88a388d9dd48f86c3136",
            "email": "lovely-client@example.com",
            "description": null,
            "created_at": 1342438695,
            "updated_at": 1342438695,
            "payment": [{
                "id": "pay_6ab3f1b1ce2d5a4b7f44",
                "type": "creditcard",
                "client": "client_88a388d9dd48f86c3136",
                "last4": "1111"
            }],
            "subscription": null,
            "app_id": null
        }))
        .unwrap();

        assert_eq!(client.email.as_deref(), Some("lovely-client@example.com"));
        assert_eq!(client.payment.len(), 1);
        assert_eq!(
            client.payment[0].client.as_deref(),
            Some("client_88a388d9dd48f86c3136")
        );
        assert!(client.subscription.is_none());
    }

    #[test]
    fn test_payment_ids_expand_to_id_only_payments() {
        let client: Client = serde_json::from_value(json!({
            "id": "client_1",
            "payment": ["pay_1", {"id": "pay_2", "last4": "0004"}]
        }))
        .unwrap();

        assert_eq!(client.payment[0], Payment::with_id("pay_1"));
        assert_eq!(client.payment[1].last4.as_deref(), Some("0004"));

        let client: Client = serde_json::from_value(json!({"payment": null})).unwrap();
        assert!(client.payment.is_empty());
    }

    #[test]
    fn test_update_params() {
        let client = Client {
            id: Some("client_1".into()),
            email: Some("new@example.com".into()),
            payment: vec![Payment::with_id("pay_1")],
            ..Client::default()
        };

        let params = client.update_params().unwrap();
        assert_eq!(params.get("email"), Some("new@example.com"));
        assert!(!params.contains_key("description"));
        assert!(!params.contains_key("payment[]"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_order_by_email() {
        assert_eq!(Client::create_order().by_email().desc().token(), "email_desc");
    }

    #[test]
    fn test_field_table_matches_model() {
        assert_field_table::<Client>(json!({
            "id": "client_1",
            "email": "lovely-client@example.com",
            "description": "Lovely Client",
            "payment": ["pay_1"],
            "subscription": [{"id": "sub_1"}],
            "created_at": 1342438695,
            "updated_at": 1342438695,
            "app_id": "app_1"
        }));

        let at = DateTime::from_timestamp(1_342_438_695, 0);
        let filter = Client::create_filter()
            .by_email("a@example.com")
            .by_description("vip")
            .by_payment("pay_1")
            .by_created_at(at, None)
            .unwrap()
            .by_updated_at(at, None)
            .unwrap();
        assert_eq!(filter.len(), 5);
        assert_eq!(Client::create_order().by_email().token(), "email_asc");
    }
}
