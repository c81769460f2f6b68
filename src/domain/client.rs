use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientEmail, ClientId, ClientName, PhoneNumber, SanitizedText};

/// A store customer as served by the API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Server-assigned identifier.
    pub id: ClientId,
    /// Display name.
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// When the client was registered.
    pub created_at: NaiveDateTime,
    /// Soft-delete flag; archived clients only show on the archived tab.
    #[serde(default)]
    pub archived: bool,
    /// When the client was archived, if they are.
    #[serde(default)]
    pub archived_at: Option<NaiveDateTime>,
    /// Reason given when archiving.
    #[serde(default)]
    pub archived_reason: Option<String>,
}

/// Body of `POST /api/clients`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewClient {
    /// Non-empty display name.
    pub name: ClientName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<ClientEmail>,
    /// Ten digits, separators removed.
    pub phone: PhoneNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<SanitizedText>,
}

/// Body of `PUT /api/clients/{id}`. Same shape as creation.
pub type UpdateClient = NewClient;

/// Body sent along with an archive request.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ArchiveRequest {
    pub reason: SanitizedText,
}
