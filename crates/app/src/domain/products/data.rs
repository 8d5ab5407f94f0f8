//! Products Data

use rust_decimal::Decimal;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Discount percentage in `0..=100`.
    pub discount: Decimal,
    pub quantity: u32,
}

/// Product Update Data
///
/// Replaces every mutable field; the special price is derived again from
/// `price` and `discount`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub discount: Decimal,
    pub quantity: u32,
}
