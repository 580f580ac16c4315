//! # PAYMILL Context
//!
//! Single entry point holding one service per resource over a shared
//! transport.

use crate::clients::ClientService;
use crate::config::PaymillConfig;
use crate::offers::OfferService;
use crate::payments::PaymentService;
use crate::preauthorizations::PreauthorizationService;
use crate::refunds::RefundService;
use crate::service::ResourceService;
use crate::subscriptions::SubscriptionService;
use crate::transactions::TransactionService;
use crate::transport::{HttpTransport, SharedTransport};
use crate::webhooks::WebhookService;
use paymill_core::PaymillResult;
use std::sync::Arc;
use tracing::info;

/// All PAYMILL services behind one API key
#[derive(Debug, Clone)]
pub struct PaymillContext {
    transactions: TransactionService,
    payments: PaymentService,
    clients: ClientService,
    preauthorizations: PreauthorizationService,
    refunds: RefundService,
    offers: OfferService,
    subscriptions: SubscriptionService,
    webhooks: WebhookService,
}

impl PaymillContext {
    /// Build the default `reqwest` transport from `config`
    pub fn new(config: PaymillConfig) -> PaymillResult<Self> {
        info!("PAYMILL context for {}", config.api_base_url);
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Create from environment variables
    pub fn from_env() -> PaymillResult<Self> {
        Self::new(PaymillConfig::from_env()?)
    }

    /// Use a custom transport (another HTTP stack, a test double)
    pub fn with_transport(transport: SharedTransport) -> Self {
        Self {
            transactions: ResourceService::new(transport.clone()),
            payments: ResourceService::new(transport.clone()),
            clients: ResourceService::new(transport.clone()),
            preauthorizations: ResourceService::new(transport.clone()),
            refunds: ResourceService::new(transport.clone()),
            offers: ResourceService::new(transport.clone()),
            subscriptions: ResourceService::new(transport.clone()),
            webhooks: ResourceService::new(transport),
        }
    }

    pub fn transactions(&self) -> &TransactionService {
        &self.transactions
    }

    pub fn payments(&self) -> &PaymentService {
        &self.payments
    }

    pub fn clients(&self) -> &ClientService {
        &self.clients
    }

    pub fn preauthorizations(&self) -> &PreauthorizationService {
        &self.preauthorizations
    }

    pub fn refunds(&self) -> &RefundService {
        &self.refunds
    }

    pub fn offers(&self) -> &OfferService {
        &self.offers
    }

    pub fn subscriptions(&self) -> &SubscriptionService {
        &self.subscriptions
    }

    pub fn webhooks(&self) -> &WebhookService {
        &self.webhooks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::RecordingTransport;
    use paymill_core::PaymillError;
    use serde_json::json;

    #[test]
    fn test_new_with_default_transport() {
        assert!(PaymillContext::new(PaymillConfig::new("key")).is_ok());
    }

    #[test]
    fn test_new_rejects_empty_key_and_zero_timeout() {
        assert!(matches!(
            PaymillContext::new(PaymillConfig::new("")),
            Err(PaymillError::Configuration(_))
        ));
        assert!(matches!(
            PaymillContext::new(PaymillConfig::new("key").with_timeout_secs(0)),
            Err(PaymillError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_services_share_transport() {
        let transport = RecordingTransport::replying(vec![
            (200, json!({"data": [], "data_count": 0})),
            (200, json!({"data": [], "data_count": 0})),
        ]);
        let context = PaymillContext::with_transport(transport.shared());

        context.offers().list_all().await.unwrap();
        context.webhooks().list_all().await.unwrap();

        let paths: Vec<String> = transport.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["offers", "webhooks"]);
    }
}
