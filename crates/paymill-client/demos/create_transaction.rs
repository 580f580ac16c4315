//! # Create a transaction with a stored payment
//!
//! ```bash
//! export PAYMILL_API_KEY=<private test key>
//! cargo run -p paymill-client --example create_transaction -- <bridge token>
//! ```
//!
//! Without a token argument the PAYMILL test token is used.

use paymill_client::{PaymillContext, TransactionRequest};
use paymill_core::Transaction;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const TEST_TOKEN: &str = "098f6bcd4621d373cade4e832627b4f6";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let token = std::env::args()
        .nth(1)
        .unwrap_or_else(|| TEST_TOKEN.to_string());

    let paymill = PaymillContext::from_env()?;

    let payment = paymill.payments().create_with_token(&token).await?;
    info!(
        "Stored payment {} ({:?} ending {})",
        payment.id.as_deref().unwrap_or("?"),
        payment.card_type,
        payment.last4.as_deref().unwrap_or("????")
    );

    let transaction = paymill
        .transactions()
        .create_with_payment(
            &payment,
            TransactionRequest::new(4200, "EUR").with_description("Test Transaction"),
        )
        .await?;
    info!(
        "Transaction {} is {:?}",
        transaction.id.as_deref().unwrap_or("?"),
        transaction.status
    );

    let latest = paymill
        .transactions()
        .list(
            Some(&Transaction::create_filter().by_payment_id(payment.id.clone().unwrap_or_default())),
            Some(&Transaction::create_order().by_created_at().desc()),
            None,
        )
        .await?;
    info!(
        "{} transaction(s) on this payment",
        latest.total_count()
    );

    Ok(())
}
