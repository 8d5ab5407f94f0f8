//! Carts

pub mod data;
pub mod errors;
pub(crate) mod manager;
pub mod records;
mod repositories;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
