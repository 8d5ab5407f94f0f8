//! User Data

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// Unique login name.
    pub username: String,

    /// Unique email address; carts and orders are keyed by it.
    pub email: String,
}
