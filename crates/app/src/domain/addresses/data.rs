//! Address Data

/// New Address Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub street: String,
    pub building_name: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
}

/// Address Update Data
///
/// Replaces every field of an existing address.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressUpdate {
    pub street: String,
    pub building_name: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
}
