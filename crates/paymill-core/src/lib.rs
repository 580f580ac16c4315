//! # paymill-core
//!
//! Models and query builders for the PAYMILL payment API.
//!
//! This crate provides:
//! - Resource models (`Transaction`, `Payment`, `Client`, `Preauthorization`,
//!   `Refund`, `Offer`, `Subscription`, `Webhook`) with their wire names
//! - The `Resource` trait and static `FieldSpec` tables that drive partial
//!   updates, filters and sort orders
//! - `Filter<R>`, `Order<R>` and `Pagination` for list queries
//! - `PaymillError` for typed error handling
//!
//! It performs no I/O; `paymill-client` sends the requests.
//!
//! ## Example
//!
//! ```rust,ignore
//! use paymill_core::{Transaction, TransactionStatus};
//!
//! let filter = Transaction::create_filter()
//!     .by_status(TransactionStatus::Closed)
//!     .by_amount_greater_than(4100)
//!     .by_amount_less_than(4300);
//! let order = Transaction::create_order().by_amount().desc();
//!
//! // amount=>4100&amount=<4300&status=closed&order=amount_desc
//! let mut params = filter.params();
//! params.extend(order.params());
//! ```

pub mod client;
pub mod error;
pub mod interval;
pub mod mapping;
pub mod offer;
pub mod payment;
pub mod preauthorization;
pub mod query;
pub mod refund;
pub mod subscription;
pub mod transaction;
pub mod webhook;

// Re-exports for convenience
pub use client::Client;
pub use error::{PaymillError, PaymillResult};
pub use interval::{Interval, IntervalUnit};
pub use mapping::{Envelope, FieldSpec, FilterKind, Params, PaymillList, Resource};
pub use offer::{Offer, SubscriptionCount};
pub use payment::{Payment, PaymentType};
pub use preauthorization::{Preauthorization, PreauthorizationStatus};
pub use query::{list_params, AmountPredicate, DateRange, Direction, Filter, Order, Pagination, Predicate};
pub use refund::{Refund, RefundStatus};
pub use subscription::{Subscription, SubscriptionStatus};
pub use transaction::{Fee, Transaction, TransactionStatus};
pub use webhook::{EventType, Webhook};
