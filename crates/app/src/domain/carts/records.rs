//! Cart Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    domain::{products::records::ProductId, users::records::UserId},
    ids::TypedId,
};

/// Cart Id
pub type CartId = TypedId<CartRecord>;

/// Cart Record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRecord {
    pub id: CartId,
    pub user_id: UserId,
    /// Email of the owning user.
    pub email: String,
    /// Sum of `product_price * quantity` over `items`.
    pub total_price: Decimal,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item Id
pub type CartItemId = TypedId<CartItemRecord>;

/// CartItem Record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRecord {
    pub id: CartItemId,
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Discount percentage captured when the item was added.
    pub discount: Decimal,
    /// Unit special price captured when the item was added.
    pub product_price: Decimal,
    pub created_at: Timestamp,
}
