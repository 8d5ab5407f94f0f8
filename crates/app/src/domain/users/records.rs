//! User Records

use jiff::Timestamp;
use serde::Serialize;

use crate::ids::TypedId;

/// User Id
pub type UserId = TypedId<UserRecord>;

/// User Record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Unique user identifier.
    pub id: UserId,

    /// Unique login name.
    pub username: String,

    /// Unique email address.
    pub email: String,

    /// Creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}
