//! Payment gateway collaborator.
//!
//! The storefront never processes payments itself. It asks a gateway to
//! tokenize the card and then to confirm a charge for the cart total.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checkout::BillingDetails;
use crate::error::CommerceError;
use crate::ids::{PaymentIntentId, PaymentMethodId};
use crate::money::Money;

/// Status of a payment intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    RequiresPaymentMethod,
    Processing,
    Succeeded,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::RequiresPaymentMethod => "requires_payment_method",
            PaymentStatus::Processing => "processing",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Failed => "failed",
        }
    }
}

/// The gateway's record of one charge attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentIntent {
    pub id: PaymentIntentId,
    /// Amount charged.
    pub amount: Money,
    pub status: PaymentStatus,
    /// When the intent was created.
    pub created: DateTime<Utc>,
    /// Tokenized payment method used.
    pub payment_method: Option<PaymentMethodId>,
}

impl PaymentIntent {
    /// Lowercase ISO currency code, as gateways report it.
    pub fn currency_code(&self) -> String {
        self.amount.currency.code().to_lowercase()
    }

    pub fn is_succeeded(&self) -> bool {
        self.status == PaymentStatus::Succeeded
    }
}

/// A hosted payment service.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Tokenize the customer's card together with their billing details.
    async fn create_payment_method(
        &self,
        billing: &BillingDetails,
    ) -> Result<PaymentMethodId, CommerceError>;

    /// Charge `amount` to a tokenized payment method.
    async fn confirm_payment(
        &self,
        amount: Money,
        method: &PaymentMethodId,
    ) -> Result<PaymentIntent, CommerceError>;
}

/// A gateway that tokenizes locally and synthesizes a successful charge.
///
/// Stands in for the hosted service in demos and tests. It can be told to
/// decline every card.
#[derive(Debug, Clone, Default)]
pub struct SimulatedGateway {
    processing_delay: Duration,
    decline_reason: Option<String>,
}

impl SimulatedGateway {
    /// A gateway that approves immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait this long before confirming a charge.
    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay = delay;
        self
    }

    /// Decline every card with the given reason.
    pub fn declining(mut self, reason: impl Into<String>) -> Self {
        self.decline_reason = Some(reason.into());
        self
    }

    pub fn processing_delay(&self) -> Duration {
        self.processing_delay
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn create_payment_method(
        &self,
        billing: &BillingDetails,
    ) -> Result<PaymentMethodId, CommerceError> {
        if let Some(reason) = &self.decline_reason {
            tracing::warn!(reason = %reason, "simulated gateway declined card");
            return Err(CommerceError::PaymentDeclined(reason.clone()));
        }

        let method = PaymentMethodId::generate();
        tracing::debug!(method = %method, cardholder = %billing.name, "tokenized card");
        Ok(method)
    }

    async fn confirm_payment(
        &self,
        amount: Money,
        method: &PaymentMethodId,
    ) -> Result<PaymentIntent, CommerceError> {
        if !amount.is_positive() {
            return Err(CommerceError::PaymentFailed(format!(
                "cannot charge {}",
                amount
            )));
        }

        if !self.processing_delay.is_zero() {
            tokio::time::sleep(self.processing_delay).await;
        }

        Ok(PaymentIntent {
            id: PaymentIntentId::generate(),
            amount,
            status: PaymentStatus::Succeeded,
            created: Utc::now(),
            payment_method: Some(method.clone()),
        })
    }
}
