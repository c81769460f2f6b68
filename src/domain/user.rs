use serde::{Deserialize, Serialize};

use crate::domain::types::UserId;

/// Role of the signed-in user as reported by the API.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Client,
}

impl Role {
    /// Landing route for the role.
    pub fn home(self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Client => "/dashboard",
        }
    }
}

/// Session subject returned by the login endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Display name; older servers send it as `username`.
    #[serde(alias = "username")]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Credentials posted to the login endpoints.
#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    pub phone: String,
    /// Clients sign in with their phone only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Payload for `/api/auth/register-client`.
#[derive(Clone, Debug, Serialize)]
pub struct NewClientAccount {
    pub name: String,
    pub phone: String,
    pub password: String,
}

/// Successful login response.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for every later API call.
    pub token: String,
    pub user: User,
}

/// Successful registration response.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}
