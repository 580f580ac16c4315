//! # Subscriptions
//!
//! `cancel` stops future charges but keeps the subscription visible;
//! the generic `delete` removes it.

use crate::request::SubscriptionRequest;
use crate::service::ResourceService;
use crate::transport::ApiRequest;
use paymill_core::{Params, PaymillResult, Resource, Subscription};
use tracing::{info, instrument};

pub type SubscriptionService = ResourceService<Subscription>;

impl ResourceService<Subscription> {
    #[instrument(skip(self, request), fields(payment = %request.payment_id))]
    pub async fn create_subscription(
        &self,
        request: SubscriptionRequest,
    ) -> PaymillResult<Subscription> {
        request.validate()?;
        self.create(request.params()).await
    }

    /// Cancel without removing; returns the canceled subscription
    #[instrument(skip(self, subscription))]
    pub async fn cancel(&self, subscription: &Subscription) -> PaymillResult<Subscription> {
        let id = subscription.require_id()?;

        let canceled: Subscription = self
            .execute(
                ApiRequest::delete(Self::item_path(id)?)
                    .with_query(Params::new().with("remove", "false")),
            )
            .await?;

        info!("Canceled subscription: id={}", id);
        Ok(canceled)
    }
}
