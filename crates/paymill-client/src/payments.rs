//! # Payments
//!
//! Storing card and direct debit data from a bridge token.

use crate::request::require_non_empty;
use crate::service::ResourceService;
use paymill_core::{Client, Params, Payment, PaymillResult, Resource};
use tracing::instrument;

pub type PaymentService = ResourceService<Payment>;

impl ResourceService<Payment> {
    #[instrument(skip(self, token))]
    pub async fn create_with_token(&self, token: &str) -> PaymillResult<Payment> {
        require_non_empty("token", token)?;
        self.create(Params::new().with("token", token)).await
    }

    /// Store the payment under an existing client
    #[instrument(skip(self, token, client))]
    pub async fn create_with_token_and_client(
        &self,
        token: &str,
        client: &Client,
    ) -> PaymillResult<Payment> {
        require_non_empty("token", token)?;
        let client_id = client.require_id()?;

        self.create(
            Params::new()
                .with("token", token)
                .with("client", client_id),
        )
        .await
    }
}
