//! Checkout: turn a cart into a paid order.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::checkout::{BillingDetails, Order, PaymentGateway, PaymentIntent};
use crate::error::CommerceError;

/// Everything produced by a successful checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutReceipt {
    /// The order for the order-creation collaborator.
    pub order: Order,
    /// The confirmed charge.
    pub payment: PaymentIntent,
    /// The cart to continue with: empty.
    pub cart: Cart,
}

/// Checkout coordinator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checkout;

impl Checkout {
    /// Charge the cart total and build an order.
    ///
    /// Steps: reject an empty cart, validate billing details, tokenize the
    /// card, confirm a charge for `cart.total()`, snapshot the order.
    ///
    /// The cart is only borrowed. On any error the caller still holds the
    /// cart it started with and may resubmit.
    pub async fn place_order<G>(
        cart: &Cart,
        billing: BillingDetails,
        gateway: &G,
    ) -> Result<CheckoutReceipt, CommerceError>
    where
        G: PaymentGateway + ?Sized,
    {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        billing.validate()?;

        let amount = cart.total();
        let method = gateway.create_payment_method(&billing).await?;
        let payment = gateway.confirm_payment(amount, &method).await?;

        if !payment.is_succeeded() {
            tracing::warn!(
                intent = %payment.id,
                status = payment.status.as_str(),
                "payment not confirmed"
            );
            return Err(CommerceError::PaymentFailed(format!(
                "payment {} ended as {}",
                payment.id,
                payment.status.as_str()
            )));
        }

        let order = Order::from_cart(cart, billing, &payment, Utc::now());
        tracing::info!(
            order = %order.id,
            intent = %payment.id,
            amount = %order.amount,
            items = order.item_count(),
            "order placed"
        );

        Ok(CheckoutReceipt {
            order,
            payment,
            cart: cart.clear(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartAction, CartStore};
    use crate::catalog::Product;
    use crate::checkout::{BillingAddress, PaymentStatus, SimulatedGateway};
    use crate::ids::{PaymentIntentId, PaymentMethodId};
    use crate::money::{Currency, Money};
    use async_trait::async_trait;

    fn billing() -> BillingDetails {
        BillingDetails::new(
            "Grace Hopper",
            "grace@example.com",
            BillingAddress {
                line1: "1 Compiler Way".into(),
                city: "Arlington".into(),
                state: "VA".into(),
                postal_code: "22201".into(),
                country: "US".into(),
            },
        )
    }

    fn cart() -> Cart {
        let watch = Product::new("2", "Smart Fitness Watch", Money::new(19999, Currency::USD));
        Cart::new().add_item(&watch, 1)
    }

    /// Gateway that leaves every charge in `processing`.
    struct StuckGateway;

    #[async_trait]
    impl PaymentGateway for StuckGateway {
        async fn create_payment_method(
            &self,
            _billing: &BillingDetails,
        ) -> Result<PaymentMethodId, CommerceError> {
            Ok(PaymentMethodId::new("pm_stuck"))
        }

        async fn confirm_payment(
            &self,
            amount: Money,
            method: &PaymentMethodId,
        ) -> Result<PaymentIntent, CommerceError> {
            Ok(PaymentIntent {
                id: PaymentIntentId::new("pi_stuck0001"),
                amount,
                status: PaymentStatus::Processing,
                created: Utc::now(),
                payment_method: Some(method.clone()),
            })
        }
    }

    #[tokio::test]
    async fn test_place_order() {
        let cart = cart();
        let receipt = Checkout::place_order(&cart, billing(), &SimulatedGateway::new())
            .await
            .unwrap();

        assert_eq!(receipt.order.amount, cart.total());
        assert_eq!(receipt.payment.amount, cart.total());
        assert_eq!(receipt.order.payment_intent_id, receipt.payment.id);
        assert_eq!(receipt.order.items.len(), 1);
        assert!(receipt.cart.is_empty());
        // the input cart is untouched
        assert_eq!(cart.item_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let err = Checkout::place_order(&Cart::new(), billing(), &SimulatedGateway::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CommerceError::EmptyCart));
    }

    #[tokio::test]
    async fn test_invalid_billing_rejected() {
        let err = Checkout::place_order(&cart(), BillingDetails::default(), &SimulatedGateway::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CommerceError::InvalidBillingDetails(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_unconfirmed_payment_is_failure() {
        let err = Checkout::place_order(&cart(), billing(), &StuckGateway)
            .await
            .unwrap_err();
        assert!(matches!(err, CommerceError::PaymentFailed(_)));
    }

    #[tokio::test]
    async fn test_store_checkout_clears_only_on_success() {
        let mut store = CartStore::new();
        store.dispatch(CartAction::AddItem {
            product: Product::new("6", "Charging Pad", Money::new(3999, Currency::USD)),
            quantity: 2,
        });
        let before = store.cart().clone();

        let declined = SimulatedGateway::new().declining("card declined");
        let err = store.checkout(billing(), &declined).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(store.cart(), &before);

        let order = store.checkout(billing(), &SimulatedGateway::new()).await.unwrap();
        assert_eq!(order.amount, before.total());
        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_through_trait_object() {
        let gateway: Box<dyn PaymentGateway> = Box::new(SimulatedGateway::new());
        let receipt = Checkout::place_order(&cart(), billing(), gateway.as_ref())
            .await
            .unwrap();
        assert!(receipt.payment.is_succeeded());
    }
}
