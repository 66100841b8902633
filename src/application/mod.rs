//! Application layer orchestrating charge issuance.
//!
//! This module defines the `CheckoutService`, which turns a charge request or a
//! catalog offer into a payment code and hands it to a `ChargeSink`.

pub mod checkout;
