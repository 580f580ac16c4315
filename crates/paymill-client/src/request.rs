//! # Create Requests
//!
//! Parameter builders for the create calls that take more than a couple of
//! arguments, plus the local argument checks shared by every service.

use chrono::{DateTime, Utc};
use paymill_core::{Interval, Params, PaymillError, PaymillResult};

pub(crate) fn require_non_empty(what: &str, value: &str) -> PaymillResult<()> {
    if value.trim().is_empty() {
        return Err(PaymillError::InvalidArgument(format!(
            "{} must not be empty",
            what
        )));
    }
    Ok(())
}

pub(crate) fn require_positive_amount(amount: i64) -> PaymillResult<()> {
    if amount <= 0 {
        return Err(PaymillError::InvalidArgument(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    Ok(())
}

/// ISO 4217 alphabetic code, e.g. `EUR`
pub(crate) fn require_currency(currency: &str) -> PaymillResult<()> {
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(PaymillError::InvalidArgument(format!(
            "currency must be a three letter ISO code, got {:?}",
            currency
        )));
    }
    Ok(())
}

/// Amount, currency and extras for a new transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub amount: i64,
    pub currency: String,
    pub description: Option<String>,
    pub client_id: Option<String>,
    /// Application fee: amount and the payment it is charged to
    pub fee: Option<(i64, String)>,
}

impl TransactionRequest {
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            description: None,
            client_id: None,
            fee: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_fee(mut self, amount: i64, payment_id: impl Into<String>) -> Self {
        self.fee = Some((amount, payment_id.into()));
        self
    }

    pub(crate) fn validate(&self) -> PaymillResult<()> {
        require_positive_amount(self.amount)?;
        require_currency(&self.currency)?;
        if let Some((fee, payment)) = &self.fee {
            require_positive_amount(*fee)?;
            require_non_empty("fee payment", payment)?;
        }
        Ok(())
    }

    pub(crate) fn params(&self) -> Params {
        let mut params = Params::new()
            .with("amount", self.amount.to_string())
            .with("currency", self.currency.as_str());
        params.push_opt("description", self.description.as_deref());
        params.push_opt("client", self.client_id.as_deref());
        if let Some((amount, payment)) = &self.fee {
            params.push("fee_amount", amount.to_string());
            params.push("fee_payment", payment.as_str());
        }
        params
    }
}

/// How a new subscription is priced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionPlan {
    /// Follow an existing offer
    Offer(String),
    /// Standalone price
    Custom {
        amount: i64,
        currency: String,
        interval: Interval,
    },
}

/// Parameters for a new subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRequest {
    pub payment_id: String,
    pub plan: SubscriptionPlan,
    pub client_id: Option<String>,
    pub name: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub period_of_validity: Option<Interval>,
}

impl SubscriptionRequest {
    /// Charge `payment_id` according to an offer
    pub fn with_offer(payment_id: impl Into<String>, offer_id: impl Into<String>) -> Self {
        Self::with_plan(payment_id.into(), SubscriptionPlan::Offer(offer_id.into()))
    }

    /// Charge `payment_id` a fixed amount every `interval`
    pub fn with_amount(
        payment_id: impl Into<String>,
        amount: i64,
        currency: impl Into<String>,
        interval: Interval,
    ) -> Self {
        Self::with_plan(
            payment_id.into(),
            SubscriptionPlan::Custom {
                amount,
                currency: currency.into(),
                interval,
            },
        )
    }

    fn with_plan(payment_id: String, plan: SubscriptionPlan) -> Self {
        Self {
            payment_id,
            plan,
            client_id: None,
            name: None,
            start_at: None,
            period_of_validity: None,
        }
    }

    pub fn client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// First charge date; defaults to now on the server
    pub fn start_at(mut self, start_at: DateTime<Utc>) -> Self {
        self.start_at = Some(start_at);
        self
    }

    pub fn period_of_validity(mut self, period: Interval) -> Self {
        self.period_of_validity = Some(period);
        self
    }

    pub(crate) fn validate(&self) -> PaymillResult<()> {
        require_non_empty("payment", &self.payment_id)?;
        match &self.plan {
            SubscriptionPlan::Offer(offer) => require_non_empty("offer", offer),
            SubscriptionPlan::Custom {
                amount, currency, ..
            } => {
                require_positive_amount(*amount)?;
                require_currency(currency)
            }
        }
    }

    pub(crate) fn params(&self) -> Params {
        let mut params = Params::new().with("payment", self.payment_id.as_str());
        match &self.plan {
            SubscriptionPlan::Offer(offer) => params.push("offer", offer.as_str()),
            SubscriptionPlan::Custom {
                amount,
                currency,
                interval,
            } => {
                params.push("amount", amount.to_string());
                params.push("currency", currency.as_str());
                params.push("interval", interval.to_string());
            }
        }
        params.push_opt("client", self.client_id.as_deref());
        params.push_opt("name", self.name.as_deref());
        params.push_opt("start_at", self.start_at.map(|t| t.timestamp().to_string()));
        params.push_opt(
            "period_of_validity",
            self.period_of_validity.map(|p| p.to_string()),
        );
        params
    }
}
