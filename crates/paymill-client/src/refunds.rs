//! # Refunds

use crate::request::require_positive_amount;
use crate::service::ResourceService;
use crate::transport::ApiRequest;
use paymill_core::{Params, PaymillResult, Refund, Resource, Transaction};
use tracing::{info, instrument};

pub type RefundService = ResourceService<Refund>;

impl ResourceService<Refund> {
    /// Refund `amount` of a transaction, posting to `refunds/<transaction id>`
    #[instrument(skip(self, transaction, description))]
    pub async fn refund_transaction(
        &self,
        transaction: &Transaction,
        amount: i64,
        description: Option<&str>,
    ) -> PaymillResult<Refund> {
        let transaction_id = transaction.require_id()?;
        require_positive_amount(amount)?;

        let path = Self::item_path(transaction_id)?;

        let mut params = Params::new().with("amount", amount.to_string());
        params.push_opt("description", description);

        let refund: Refund = self
            .execute(ApiRequest::post(path).with_form(params))
            .await?;

        info!(
            "Refunded {} of {}: refund id={}",
            amount,
            transaction_id,
            refund.id.as_deref().unwrap_or("<none>")
        );
        Ok(refund)
    }
}
