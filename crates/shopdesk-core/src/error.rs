//! Core Errors
//!
//! `ValidationError` covers checks made before a request is ever sent.
//! `TransitionError` reports update commands the current phase cannot accept.

use thiserror::Error;

/// Client-side validation failures, shown inline next to the form
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Paid amount {paid:.2} exceeds the total of {total:.2}")]
    PaidExceedsTotal { paid: f64, total: f64 },

    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Payment amount must be greater than zero")]
    NonPositivePayment,

    #[error("Payment of {amount:.2} exceeds the outstanding balance of {balance:.2}")]
    PaymentExceedsBalance { amount: f64, balance: f64 },

    #[error("Only {available} of {name} in stock (requested {requested})")]
    InsufficientStock {
        name: String,
        requested: u32,
        available: i64,
    },

    #[error("Quantity must be at least 1")]
    ZeroQuantity,

    #[error("Discount of {discount:.2} exceeds the subtotal of {subtotal:.2}")]
    DiscountExceedsSubtotal { discount: f64, subtotal: f64 },

    #[error("Cart is empty")]
    EmptyCart,

    #[error("No customer selected")]
    MissingCustomer,

    #[error("Product #{0} is not in the cart")]
    NotInCart(i64),
}

/// Update commands rejected by the state machine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {command} while {phase}")]
    Rejected {
        command: &'static str,
        phase: &'static str,
    },

    #[error("ignored {event} while {phase}")]
    Ignored {
        event: &'static str,
        phase: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid month {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_user_facing() {
        let err = ValidationError::PaidExceedsTotal {
            paid: 1200.0,
            total: 1100.0,
        };
        assert_eq!(
            err.to_string(),
            "Paid amount 1200.00 exceeds the total of 1100.00"
        );
    }

    #[test]
    fn test_transition_error_display() {
        let err = TransitionError::Rejected {
            command: "restart",
            phase: "idle",
        };
        assert_eq!(err.to_string(), "cannot restart while idle");
    }
}
