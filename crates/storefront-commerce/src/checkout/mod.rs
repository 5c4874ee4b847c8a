//! Checkout module.
//!
//! Contains billing details, the payment gateway collaborator, orders,
//! and the coordinator that ties them to the cart.

mod billing;
mod flow;
mod order;
mod payment;

pub use billing::{BillingAddress, BillingDetails, DEFAULT_COUNTRY};
pub use flow::{Checkout, CheckoutReceipt};
pub use order::{Order, OrderItem, OrderStatus, ESTIMATED_DELIVERY_DAYS};
pub use payment::{PaymentGateway, PaymentIntent, PaymentStatus, SimulatedGateway};
