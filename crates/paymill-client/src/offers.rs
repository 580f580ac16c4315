//! # Offers

use crate::request::{require_currency, require_non_empty, require_positive_amount};
use crate::service::ResourceService;
use crate::transport::ApiRequest;
use paymill_core::{Interval, Offer, Params, PaymillResult, Resource};
use tracing::{info, instrument};

pub type OfferService = ResourceService<Offer>;

impl ResourceService<Offer> {
    #[instrument(skip(self))]
    pub async fn create_offer(
        &self,
        amount: i64,
        currency: &str,
        interval: Interval,
        name: &str,
        trial_period_days: Option<u32>,
    ) -> PaymillResult<Offer> {
        require_positive_amount(amount)?;
        require_currency(currency)?;
        require_non_empty("name", name)?;

        let mut params = Params::new()
            .with("amount", amount.to_string())
            .with("currency", currency)
            .with("interval", interval.to_string())
            .with("name", name);
        params.push_opt("trial_period_days", trial_period_days.map(|d| d.to_string()));

        self.create(params).await
    }

    /// Delete an offer, optionally removing the subscriptions built on it.
    /// Without removal the subscriptions keep running at the offer's terms.
    #[instrument(skip(self, offer))]
    pub async fn delete_with_subscriptions(
        &self,
        offer: &Offer,
        remove_with_subscriptions: bool,
    ) -> PaymillResult<()> {
        let id = offer.require_id()?;

        let path = Self::item_path(id)?;

        let query =
            Params::new().with("remove_with_subscriptions", remove_with_subscriptions.to_string());
        self.round_trip(ApiRequest::delete(path).with_query(query))
            .await?;

        info!("Deleted offer: id={}", id);
        Ok(())
    }
}
