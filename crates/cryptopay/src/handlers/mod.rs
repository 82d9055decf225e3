//! Request handlers.
//!
//! Every operation is a plain async function taking the storage table and an
//! [`ApiRequest`] and returning an [`ApiResponse`]. They know nothing about
//! the HTTP host; [`routes`] adapts them to axum.

mod error;
pub mod health;
pub mod payments;
pub mod rates;
mod request;
pub mod routes;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

pub use error::ApiError;
pub use request::{ApiRequest, ApiResponse};
