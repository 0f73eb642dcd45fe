//! Application layer containing the checkout orchestration.
//!
//! This module defines the `CheckoutEngine` which drives a shopping
//! session from product selection through payment and change to the
//! final inventory commit, against whatever stores it was given.

pub mod checkout;
