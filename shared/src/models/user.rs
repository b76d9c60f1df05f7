//! User Model

use serde::{Deserialize, Serialize};

/// User role, derived from the email address rather than stored
/// authoritatively on the client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Seller,
    #[default]
    Customer,
}

impl Role {
    /// Derive the role from an email address.
    ///
    /// Shop accounts carry the literal `shop.` prefix; everything else is a
    /// customer. Total over all strings: the empty string resolves to
    /// `Customer`, rejecting empty emails is the caller's concern.
    pub fn derive(email: &str) -> Self {
        if email.starts_with("shop.") {
            Self::Seller
        } else {
            Self::Customer
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seller => "SELLER",
            Self::Customer => "CUSTOMER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}
