//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order already exists")]
    AlreadyExists,

    #[error("{resource} not found with {field}: {value}")]
    NotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{0}")]
    BusinessRule(String),

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl OrdersServiceError {
    pub(crate) fn cart_not_found(email: &str) -> Self {
        Self::NotFound {
            resource: "Cart",
            field: "email",
            value: email.to_string(),
        }
    }

    pub(crate) fn address_not_found(address: impl ToString) -> Self {
        Self::NotFound {
            resource: "Address",
            field: "addressId",
            value: address.to_string(),
        }
    }

    pub(crate) fn order_not_found(order: impl ToString) -> Self {
        Self::NotFound {
            resource: "Order",
            field: "orderId",
            value: order.to_string(),
        }
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_messages_name_resource_and_field() {
        assert_eq!(
            OrdersServiceError::cart_not_found("a@b.c").to_string(),
            "Cart not found with email: a@b.c"
        );
        assert_eq!(
            OrdersServiceError::address_not_found(12).to_string(),
            "Address not found with addressId: 12"
        );
    }

    #[test]
    fn business_rule_displays_its_message() {
        let error = OrdersServiceError::BusinessRule("Cart is empty!".to_string());

        assert_eq!(error.to_string(), "Cart is empty!");
    }
}
