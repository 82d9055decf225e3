use thiserror::Error;

/// Input rejected before any store access.
///
/// The display strings are part of the public API and are returned verbatim
/// in 400 response bodies.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email address.")]
    InvalidEmail,
    #[error("Invalid or missing userId.")]
    InvalidUserId,
    #[error("Invalid or missing amount.")]
    InvalidAmount,
    #[error("Invalid or missing currency.")]
    InvalidCurrency,
    #[error("Invalid currency format.")]
    InvalidCurrencyFormat,
}
