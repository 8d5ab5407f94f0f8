//! Order Records

use jiff::{Timestamp, civil::Date};
use rust_decimal::Decimal;

use crate::{
    domain::{addresses::records::AddressId, products::records::ProductId},
    ids::TypedId,
};

/// Order Id
pub type OrderId = TypedId<OrderRecord>;

/// Order Record
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub id: OrderId,
    pub email: String,
    pub order_date: Date,
    pub total_amount: Decimal,
    pub order_status: String,
    pub address_id: AddressId,
    pub payment_id: PaymentId,
    pub created_at: Timestamp,
}

/// Order Item Id
pub type OrderItemId = TypedId<OrderItemRecord>;

/// OrderItem Record
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub discount: Decimal,
    /// Unit price charged, copied from the cart item.
    pub ordered_product_price: Decimal,
}

/// Payment Id
pub type PaymentId = TypedId<PaymentRecord>;

/// Payment Record
#[derive(Debug, Clone)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub payment_method: String,
    pub pg_name: String,
    pub pg_payment_id: String,
    pub pg_status: String,
    pub pg_response_message: String,
    pub created_at: Timestamp,
}
