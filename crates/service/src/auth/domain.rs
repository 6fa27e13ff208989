use serde::{Deserialize, Serialize};

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Admin account without secrets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: i32,
    pub username: String,
}

/// Stored password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub password_hash: String,
    pub password_algorithm: String,
}

/// Token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub uid: i32,
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Login result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    pub admin: AdminAccount,
    pub token: String,
    pub expires_at: i64,
}
