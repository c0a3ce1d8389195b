//! Account data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account ID type
pub type AccountId = i64;

/// Account model
///
/// The durable root entity of the system. `username` and `email` are unique
/// across all accounts; `password_hash` always holds a hash output, never a
/// plaintext password, and is never serialized outward.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Reference to a stored profile picture; file handling lives outside the core
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Account registration request
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Partial account update
///
/// Fields left as `None` are unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_never_serialized() {
        let account = Account {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            avatar: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("password_hash"), "Hash must not leak through serialization");
        assert!(!json.contains("argon2id"), "Hash value must not leak through serialization");
        assert!(json.contains("alice"));
    }
}
