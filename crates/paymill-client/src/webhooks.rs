//! # Webhooks

use crate::request::require_non_empty;
use crate::service::ResourceService;
use paymill_core::{EventType, Params, PaymillError, PaymillResult, Webhook};
use tracing::instrument;

pub type WebhookService = ResourceService<Webhook>;

impl ResourceService<Webhook> {
    /// Notify `url` by HTTP POST for each listed event
    #[instrument(skip(self, event_types))]
    pub async fn create_url_webhook(
        &self,
        url: &str,
        event_types: &[EventType],
    ) -> PaymillResult<Webhook> {
        require_non_empty("url", url)?;
        self.create(event_params(event_types)?.with("url", url))
            .await
    }

    /// Notify `email` for each listed event
    #[instrument(skip(self, event_types))]
    pub async fn create_email_webhook(
        &self,
        email: &str,
        event_types: &[EventType],
    ) -> PaymillResult<Webhook> {
        require_non_empty("email", email)?;
        self.create(event_params(event_types)?.with("email", email))
            .await
    }
}

fn event_params(event_types: &[EventType]) -> PaymillResult<Params> {
    if event_types.is_empty() {
        return Err(PaymillError::InvalidArgument(
            "a webhook needs at least one event type".to_string(),
        ));
    }
    if event_types.contains(&EventType::Undefined) {
        return Err(PaymillError::InvalidArgument(
            "cannot subscribe a webhook to an undefined event".to_string(),
        ));
    }

    let mut params = Params::new();
    for event in event_types {
        params.push("event_types[]", event.as_str());
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::RecordingTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_url_webhook() {
        let transport = RecordingTransport::replying(vec![(
            200,
            json!({"data": {
                "id": "hook_1",
                "url": "https://example.com/hooks",
                "event_types": ["transaction.succeeded", "refund.created"],
                "active": true
            }}),
        )]);
        let service = WebhookService::new(transport.shared());

        let webhook = service
            .create_url_webhook(
                "https://example.com/hooks",
                &[EventType::TransactionSucceeded, EventType::RefundCreated],
            )
            .await
            .unwrap();
        assert_eq!(webhook.event_types.len(), 2);

        let form = &transport.requests()[0].form;
        assert_eq!(form.get("url"), Some("https://example.com/hooks"));
        assert_eq!(
            form.get_all("event_types[]"),
            vec!["transaction.succeeded", "refund.created"]
        );
    }

    #[tokio::test]
    async fn test_event_list_checked_locally() {
        let transport = RecordingTransport::replying(vec![]);
        let service = WebhookService::new(transport.shared());

        assert!(service.create_email_webhook("ops@example.com", &[]).await.is_err());
        assert!(service
            .create_email_webhook("ops@example.com", &[EventType::Undefined])
            .await
            .is_err());
        assert!(service
            .create_email_webhook("", &[EventType::ClientUpdated])
            .await
            .is_err());
        assert!(transport.requests().is_empty());
    }
}
