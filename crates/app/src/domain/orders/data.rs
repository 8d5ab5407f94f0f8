//! Order Data

use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::domain::{
    addresses::records::AddressId,
    carts::records::CartItemRecord,
    orders::records::PaymentId,
    products::records::ProductId,
};

/// Status every order is created with.
pub const ORDER_ACCEPTED: &str = "Order Accepted !";

/// Minimum length of a payment method, ignoring surrounding whitespace.
pub const MIN_PAYMENT_METHOD_LEN: usize = 4;

/// New Payment Data
///
/// Gateway fields are stored as supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub payment_method: String,
    pub pg_name: String,
    pub pg_payment_id: String,
    pub pg_status: String,
    pub pg_response_message: String,
}

impl NewPayment {
    pub(crate) fn has_valid_method(&self) -> bool {
        self.payment_method.trim().chars().count() >= MIN_PAYMENT_METHOD_LEN
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NewOrder {
    pub(crate) email: String,
    pub(crate) order_date: Date,
    pub(crate) total_amount: Decimal,
    pub(crate) order_status: String,
    pub(crate) address_id: AddressId,
    pub(crate) payment_id: PaymentId,
}

#[derive(Debug, Clone)]
pub(crate) struct NewOrderItem {
    pub(crate) product_id: ProductId,
    pub(crate) quantity: u32,
    pub(crate) discount: Decimal,
    pub(crate) ordered_product_price: Decimal,
}

impl From<&CartItemRecord> for NewOrderItem {
    fn from(item: &CartItemRecord) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            discount: item.discount,
            ordered_product_price: item.product_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(method: &str) -> NewPayment {
        NewPayment {
            payment_method: method.to_string(),
            pg_name: "Stripe".to_string(),
            pg_payment_id: "pi_1".to_string(),
            pg_status: "succeeded".to_string(),
            pg_response_message: "ok".to_string(),
        }
    }

    #[test]
    fn payment_method_needs_four_characters_after_trimming() {
        assert!(payment("card").has_valid_method());
        assert!(payment(" upi!").has_valid_method());
        assert!(!payment("  upi  ").has_valid_method());
        assert!(!payment("").has_valid_method());
    }
}
