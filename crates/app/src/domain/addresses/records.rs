//! Address Records

use jiff::Timestamp;
use serde::Serialize;

use crate::{domain::users::records::UserId, ids::TypedId};

/// Address Id
pub type AddressId = TypedId<AddressRecord>;

/// Address Record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    pub id: AddressId,
    pub user_id: UserId,
    pub street: String,
    pub building_name: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
