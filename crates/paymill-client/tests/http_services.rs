//! Service calls against a mock PAYMILL server.

use paymill_client::{PaymillConfig, PaymillContext, TransactionRequest};
use paymill_core::{
    Client, Interval, Offer, Pagination, PaymillError, Subscription, Transaction,
    TransactionStatus, Webhook,
};
use serde_json::json;
use wiremock::matchers::{basic_auth, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test_private_key";

async fn context(server: &MockServer) -> PaymillContext {
    let config = PaymillConfig::new(API_KEY).with_api_base_url(format!("{}/v2.1", server.uri()));
    PaymillContext::new(config).unwrap()
}

#[tokio::test]
async fn test_create_transaction_with_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.1/transactions"))
        .and(basic_auth(API_KEY, ""))
        .and(body_string_contains("token=098f6bcd4621d373cade4e832627b4f6"))
        .and(body_string_contains("amount=4200"))
        .and(body_string_contains("currency=EUR"))
        .and(body_string_contains("description=Test+Transaction"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "tran_54645bcb98ba7acfe204",
                "amount": "4200",
                "origin_amount": 4200,
                "status": "closed",
                "description": "Test Transaction",
                "currency": "EUR",
                "response_code": 20000,
                "created_at": 1349946151,
                "payment": {"id": "pay_1", "type": "creditcard"},
                "client": {"id": "client_1", "payment": ["pay_1"]}
            },
            "mode": "test"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let paymill = context(&server).await;
    let transaction = paymill
        .transactions()
        .create_with_token(
            "098f6bcd4621d373cade4e832627b4f6",
            TransactionRequest::new(4200, "EUR").with_description("Test Transaction"),
        )
        .await
        .unwrap();

    assert_eq!(transaction.id.as_deref(), Some("tran_54645bcb98ba7acfe204"));
    assert_eq!(transaction.status, Some(TransactionStatus::Closed));
    assert_eq!(transaction.created_at.unwrap().timestamp(), 1349946151);
}

#[tokio::test]
async fn test_list_sends_filter_order_and_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.1/transactions"))
        .and(query_param("amount", ">4100"))
        .and(query_param("amount", "<4300"))
        .and(query_param("created_at", "1400000000_1400086400"))
        .and(query_param("order", "amount_desc"))
        .and(query_param("count", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "tran_1", "amount": 4200},
                {"id": "tran_2", "amount": "4250"}
            ],
            "data_count": "9",
            "mode": "test"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filter = Transaction::create_filter()
        .by_amount_greater_than(4100)
        .by_amount_less_than(4300)
        .by_created_at(
            chrono::DateTime::from_timestamp(1_400_000_000, 0),
            chrono::DateTime::from_timestamp(1_400_086_400, 0),
        )
        .unwrap();
    let order = Transaction::create_order().by_amount().desc();

    let paymill = context(&server).await;
    let page = paymill
        .transactions()
        .list(
            Some(&filter),
            Some(&order),
            Some(Pagination::default().with_count(2)),
        )
        .await
        .unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[1].amount, Some(4250));
    assert_eq!(page.total_count(), 9);
}

#[tokio::test]
async fn test_update_and_delete_without_id_never_hit_the_server() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let paymill = context(&server).await;
    let client = Client {
        email: Some("lovely-client@example.com".into()),
        ..Client::default()
    };

    assert!(matches!(
        paymill.clients().update(&client).await,
        Err(PaymillError::MissingIdentifier { resource: "client" })
    ));
    assert!(matches!(
        paymill.webhooks().delete(&Webhook::new()).await,
        Err(PaymillError::MissingIdentifier { resource: "webhook" })
    ));
    assert!(matches!(
        paymill.offers().update(&Offer::with_id("")).await,
        Err(PaymillError::MissingIdentifier { .. })
    ));
}

#[tokio::test]
async fn test_path_like_ids_never_reach_another_endpoint() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(0)
        .mount(&server)
        .await;

    let paymill = context(&server).await;

    assert!(matches!(
        paymill.transactions().get("tran_1/../../clients?x=1").await,
        Err(PaymillError::InvalidArgument(_))
    ));
    assert!(matches!(
        paymill
            .subscriptions()
            .delete(&Subscription::with_id("../clients/client_1"))
            .await,
        Err(PaymillError::InvalidArgument(_))
    ));
    assert!(matches!(
        paymill
            .offers()
            .delete_with_subscriptions(&Offer::with_id("offer_1#x"), true)
            .await,
        Err(PaymillError::InvalidArgument(_))
    ));
    assert!(matches!(
        paymill
            .refunds()
            .refund_transaction(&Transaction::with_id("../payments/pay_1"), 100, None)
            .await,
        Err(PaymillError::InvalidArgument(_))
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_offer_sends_updateable_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v2.1/offers/offer_1"))
        .and(body_string_contains("name=Gold"))
        .and(body_string_contains("interval=1+MONTH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "offer_1", "name": "Gold", "interval": "1 MONTH", "amount": 990}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let offer = Offer {
        id: Some("offer_1".into()),
        name: Some("Gold".into()),
        interval: Some(Interval::months(1)),
        trial_period_days: Some(14),
        ..Offer::default()
    };

    let paymill = context(&server).await;
    let updated = paymill.offers().update(&offer).await.unwrap();
    assert_eq!(updated.amount, Some(990));

    let received = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&received[0].body).to_string();
    assert!(!body.contains("trial_period_days"));
}

#[tokio::test]
async fn test_delete_not_found_surfaces_remote_error() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2.1/subscriptions/sub_gone"))
        .and(query_param("remove", "true"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Subscription not found",
            "exception": "subscription_not_found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let paymill = context(&server).await;
    let err = paymill
        .subscriptions()
        .delete(&Subscription::with_id("sub_gone"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.exception(), Some("subscription_not_found"));
    assert!(matches!(err, PaymillError::NotFound { ref message, .. } if message == "Subscription not found"));
}

#[tokio::test]
async fn test_validation_and_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.1/clients"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"messages": {"email": "not a valid email"}},
            "exception": "invalid_email"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2.1/clients/client_1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let paymill = context(&server).await;

    match paymill.clients().create_client(Some("nope"), None).await {
        Err(PaymillError::Validation {
            status,
            message,
            exception,
        }) => {
            assert_eq!(status, 400);
            assert!(message.contains("not a valid email"));
            assert_eq!(exception.as_deref(), Some("invalid_email"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    let err = paymill.clients().get("client_1").await.unwrap_err();
    assert!(err.is_remote());
    assert!(matches!(
        err,
        PaymillError::Remote { status: 503, ref message, .. } if message == "Service Unavailable"
    ));
}

#[tokio::test]
async fn test_refresh_fetches_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.1/webhooks/hook_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "hook_1",
                "email": "ops@example.com",
                "event_types": ["subscription.expiring", "something.new"],
                "created_at": 0
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let paymill = context(&server).await;
    let webhook = paymill
        .webhooks()
        .refresh(&Webhook::with_id("hook_1"))
        .await
        .unwrap();

    assert_eq!(webhook.email.as_deref(), Some("ops@example.com"));
    assert_eq!(webhook.event_types[1], paymill_core::EventType::Undefined);
    assert!(webhook.created_at.is_none());
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let config = PaymillConfig::new(API_KEY)
        .with_api_base_url("http://127.0.0.1:1/v2.1")
        .with_timeout_secs(2);
    let paymill = PaymillContext::new(config).unwrap();

    assert!(matches!(
        paymill.payments().list_all().await,
        Err(PaymillError::Transport(_))
    ));
}
