//! # paymill-client
//!
//! Async HTTP services for the PAYMILL payment API.
//!
//! Every resource gets a `ResourceService<R>` with the generic calls
//! (`create`, `get`, `refresh`, `list`, `update`, `delete`) plus the
//! resource-specific ones:
//!
//! - **Transactions**: `create_with_token`, `create_with_payment`,
//!   `create_with_preauthorization`
//! - **Payments**: `create_with_token`, `create_with_token_and_client`
//! - **Preauthorizations**: `create_with_token`, `create_with_payment`
//! - **Refunds**: `refund_transaction`
//! - **Offers**: `create_offer`, `delete_with_subscriptions`
//! - **Subscriptions**: `create_subscription`, `cancel`
//! - **Webhooks**: `create_url_webhook`, `create_email_webhook`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paymill_client::{PaymillContext, TransactionRequest};
//! use paymill_core::Transaction;
//!
//! // PAYMILL_API_KEY from the environment or .env
//! let paymill = PaymillContext::from_env()?;
//!
//! let payment = paymill.payments().create_with_token(&token).await?;
//! let transaction = paymill
//!     .transactions()
//!     .create_with_payment(&payment, TransactionRequest::new(4200, "EUR"))
//!     .await?;
//!
//! let recent = paymill
//!     .transactions()
//!     .list(
//!         Some(&Transaction::create_filter().by_amount_greater_than(4100)),
//!         Some(&Transaction::create_order().by_created_at().desc()),
//!         None,
//!     )
//!     .await?;
//! ```

pub mod clients;
pub mod config;
pub mod context;
pub mod offers;
pub mod payments;
pub mod preauthorizations;
pub mod refunds;
pub mod request;
pub mod service;
pub mod subscriptions;
pub mod transactions;
pub mod transport;
pub mod webhooks;

// Re-exports for convenience
pub use clients::ClientService;
pub use config::PaymillConfig;
pub use context::PaymillContext;
pub use offers::OfferService;
pub use payments::PaymentService;
pub use preauthorizations::PreauthorizationService;
pub use refunds::RefundService;
pub use request::{SubscriptionPlan, SubscriptionRequest, TransactionRequest};
pub use service::ResourceService;
pub use subscriptions::SubscriptionService;
pub use transactions::TransactionService;
pub use transport::{ApiRequest, ApiResponse, HttpMethod, HttpTransport, SharedTransport, Transport};
pub use webhooks::WebhookService;
