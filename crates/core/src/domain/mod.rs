mod error;
mod rates;
mod requests;
mod types;
mod validation;

pub use error::ValidationError;
pub use rates::{latest_rates, rate_history};
pub use requests::{CreatePaymentRequest, CreateUserRequest};
pub use types::{Amount, Payment, PaymentStatus, Rate, User};
pub use validation::{validate_currency, validate_email};
