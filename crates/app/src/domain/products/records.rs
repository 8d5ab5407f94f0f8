//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{domain::categories::records::CategoryId, ids::TypedId};

/// Product Id
pub type ProductId = TypedId<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: Decimal,
    pub discount: Decimal,
    pub special_price: Decimal,
    /// Units available; never negative.
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
