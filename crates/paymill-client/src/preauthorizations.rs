//! # Preauthorizations
//!
//! The create call answers with a transaction that embeds the new
//! preauthorization. The service unpacks it and hangs the transaction back
//! onto the preauthorization, so callers get one value holding both.

use crate::request::{require_currency, require_non_empty, require_positive_amount};
use crate::service::ResourceService;
use crate::transport::ApiRequest;
use paymill_core::{
    Params, Payment, PaymillError, PaymillResult, Preauthorization, Resource, Transaction,
};
use tracing::{info, instrument};

pub type PreauthorizationService = ResourceService<Preauthorization>;

impl ResourceService<Preauthorization> {
    #[instrument(skip(self, token, description))]
    pub async fn create_with_token(
        &self,
        token: &str,
        amount: i64,
        currency: &str,
        description: Option<&str>,
    ) -> PaymillResult<Preauthorization> {
        require_non_empty("token", token)?;
        self.reserve(Params::new().with("token", token), amount, currency, description)
            .await
    }

    #[instrument(skip(self, payment, description))]
    pub async fn create_with_payment(
        &self,
        payment: &Payment,
        amount: i64,
        currency: &str,
        description: Option<&str>,
    ) -> PaymillResult<Preauthorization> {
        let payment_id = payment.require_id()?;
        self.reserve(
            Params::new().with("payment", payment_id),
            amount,
            currency,
            description,
        )
        .await
    }

    async fn reserve(
        &self,
        source: Params,
        amount: i64,
        currency: &str,
        description: Option<&str>,
    ) -> PaymillResult<Preauthorization> {
        require_positive_amount(amount)?;
        require_currency(currency)?;

        let mut params = source
            .with("amount", amount.to_string())
            .with("currency", currency);
        params.push_opt("description", description);

        let transaction: Transaction = self
            .execute(ApiRequest::post(Preauthorization::PATH).with_form(params))
            .await?;

        let preauth = attach_transaction(transaction)?;
        info!(
            "Created preauthorization: id={}",
            preauth.id.as_deref().unwrap_or("<none>")
        );
        Ok(preauth)
    }
}

/// Move the embedded preauthorization out of `transaction` and link the
/// transaction to it.
fn attach_transaction(mut transaction: Transaction) -> PaymillResult<Preauthorization> {
    let mut preauth = transaction.preauthorization.take().ok_or_else(|| {
        PaymillError::Serialization(
            "preauthorization response carried no preauthorization".to_string(),
        )
    })?;
    preauth.transaction = Some(Box::new(transaction));
    Ok(*preauth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::RecordingTransport;
    use paymill_core::{PreauthorizationStatus, TransactionStatus};
    use serde_json::json;

    fn preauth_response() -> serde_json::Value {
        json!({"data": {
            "id": "tran_3b8a69ed17e1eca7d4a4",
            "amount": "4200",
            "origin_amount": 4200,
            "status": "preauth",
            "currency": "EUR",
            "description": "Test",
            "livemode": false,
            "refunds": null,
            "response_code": 20000,
            "payment": {"id": "pay_1", "type": "creditcard"},
            "preauthorization": {
                "id": "preauth_31eb90495837447f76b7",
                "amount": "4200",
                "currency": "EUR",
                "status": "closed",
                "livemode": false,
                "payment": {"id": "pay_1", "type": "creditcard"},
                "created_at": 1349950324,
                "updated_at": 1349950324
            },
            "created_at": 1349950324,
            "updated_at": 1349950324
        }, "mode": "test"})
    }

    #[tokio::test]
    async fn test_create_with_token_embeds_transaction() {
        let transport = RecordingTransport::replying(vec![(200, preauth_response())]);
        let service = PreauthorizationService::new(transport.shared());

        let preauth = service
            .create_with_token("098f6bcd4621d373cade4e832627b4f6", 4200, "EUR", Some("Test"))
            .await
            .unwrap();

        assert_eq!(preauth.id.as_deref(), Some("preauth_31eb90495837447f76b7"));
        assert_eq!(preauth.status, Some(PreauthorizationStatus::Closed));

        let transaction = preauth.transaction.as_ref().unwrap();
        assert_eq!(transaction.id.as_deref(), Some("tran_3b8a69ed17e1eca7d4a4"));
        assert_eq!(transaction.status, Some(TransactionStatus::Preauth));
        assert!(transaction.preauthorization.is_none());

        let request = &transport.requests()[0];
        assert_eq!(request.path, "preauthorizations");
        assert_eq!(request.form.get("token"), Some("098f6bcd4621d373cade4e832627b4f6"));
        assert_eq!(request.form.get("amount"), Some("4200"));
        assert_eq!(request.form.get("description"), Some("Test"));
    }

    #[tokio::test]
    async fn test_missing_embedded_preauthorization() {
        let transport = RecordingTransport::replying(vec![(
            200,
            json!({"data": {"id": "tran_1", "status": "failed"}}),
        )]);
        let service = PreauthorizationService::new(transport.shared());

        assert!(matches!(
            service
                .create_with_payment(&Payment::with_id("pay_1"), 4200, "EUR", None)
                .await,
            Err(PaymillError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_amount_rejected_locally() {
        let transport = RecordingTransport::replying(vec![]);
        let service = PreauthorizationService::new(transport.shared());

        assert!(service
            .create_with_token("tok", 0, "EUR", None)
            .await
            .is_err());
        assert!(transport.requests().is_empty());
    }
}
