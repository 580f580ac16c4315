//! # Transactions
//!
//! Charging a token, a stored payment or a preauthorization.

use crate::request::{require_non_empty, TransactionRequest};
use crate::service::ResourceService;
use paymill_core::{Params, Payment, PaymillResult, Preauthorization, Resource, Transaction};
use tracing::{info, instrument};

pub type TransactionService = ResourceService<Transaction>;

impl ResourceService<Transaction> {
    /// Charge a one-time bridge token
    #[instrument(skip(self, token, request), fields(amount = request.amount))]
    pub async fn create_with_token(
        &self,
        token: &str,
        request: TransactionRequest,
    ) -> PaymillResult<Transaction> {
        require_non_empty("token", token)?;
        request.validate()?;

        let params = request.params().with("token", token);
        self.charge(params).await
    }

    /// Charge a stored payment
    #[instrument(skip(self, payment, request), fields(amount = request.amount))]
    pub async fn create_with_payment(
        &self,
        payment: &Payment,
        request: TransactionRequest,
    ) -> PaymillResult<Transaction> {
        let payment_id = payment.require_id()?;
        request.validate()?;

        let params = request.params().with("payment", payment_id);
        self.charge(params).await
    }

    /// Capture a preauthorization
    #[instrument(skip(self, preauthorization, request), fields(amount = request.amount))]
    pub async fn create_with_preauthorization(
        &self,
        preauthorization: &Preauthorization,
        request: TransactionRequest,
    ) -> PaymillResult<Transaction> {
        let preauth_id = preauthorization.require_id()?;
        request.validate()?;

        let params = request.params().with("preauthorization", preauth_id);
        self.charge(params).await
    }

    async fn charge(&self, params: Params) -> PaymillResult<Transaction> {
        let transaction = self.create(params).await?;
        info!(
            "Transaction {} status={:?} response_code={:?}",
            transaction.id.as_deref().unwrap_or("<none>"),
            transaction.status,
            transaction.response_code
        );
        Ok(transaction)
    }
}
