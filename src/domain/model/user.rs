use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the account that owns menus. Required by every read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub const DEFAULT_USER_ROLE: &str = "owner";

/// An account to create, or refresh when the email already exists.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    /// Already hashed; see `infra::auth::hash_password`.
    pub password_hash: String,
    pub role: String,
    pub restaurant_name: Option<String>,
}
