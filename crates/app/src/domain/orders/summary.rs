//! Order summaries returned to callers after checkout and on lookup.

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{
    addresses::records::AddressId,
    orders::records::{OrderId, OrderItemId, OrderItemRecord, OrderRecord, PaymentId, PaymentRecord},
    products::records::ProductId,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub email: String,
    pub order_items: Vec<OrderItemSummary>,
    pub order_date: Date,
    pub payment: PaymentSummary,
    pub total_amount: Decimal,
    pub order_status: String,
    pub address_id: AddressId,
}

impl OrderSummary {
    /// Assemble a summary from an order, its items (kept in the given order)
    /// and its payment.
    #[must_use]
    pub fn new(order: OrderRecord, items: Vec<OrderItemRecord>, payment: PaymentRecord) -> Self {
        Self {
            order_id: order.id,
            email: order.email,
            order_items: items.into_iter().map(OrderItemSummary::from).collect(),
            order_date: order.order_date,
            payment: PaymentSummary::from(payment),
            total_amount: order.total_amount,
            order_status: order.order_status,
            address_id: order.address_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemSummary {
    pub order_item_id: OrderItemId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub discount: Decimal,
    pub ordered_product_price: Decimal,
}

impl From<OrderItemRecord> for OrderItemSummary {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            order_item_id: item.id,
            product_id: item.product_id,
            quantity: item.quantity,
            discount: item.discount,
            ordered_product_price: item.ordered_product_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub payment_id: PaymentId,
    pub payment_method: String,
    pub pg_name: String,
    pub pg_payment_id: String,
    pub pg_status: String,
    pub pg_response_message: String,
}

impl From<PaymentRecord> for PaymentSummary {
    fn from(payment: PaymentRecord) -> Self {
        Self {
            payment_id: payment.id,
            payment_method: payment.payment_method,
            pg_name: payment.pg_name,
            pg_payment_id: payment.pg_payment_id,
            pg_status: payment.pg_status,
            pg_response_message: payment.pg_response_message,
        }
    }
}
