//! Orders
//!
//! Checkout turns a user's cart into an immutable order together with its
//! payment record and order items.

pub mod data;
pub mod errors;
pub mod records;
mod repositories;
pub mod service;
pub mod summary;

pub use errors::OrdersServiceError;
pub use service::*;
