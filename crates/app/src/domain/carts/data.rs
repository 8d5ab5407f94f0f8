//! Cart Data

use rust_decimal::Decimal;

use crate::domain::products::records::ProductId;

/// New Cart Item Data
///
/// Price and discount are snapshots of the product at the moment it is added.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub discount: Decimal,
    pub product_price: Decimal,
}
