use serde::Deserialize;

use crate::domain::client::{ArchiveRequest, NewClient};
use crate::domain::types::{ClientEmail, ClientName, PhoneNumber, SanitizedText};
use crate::forms::auth::{PHONE_DIGITS, PHONE_REQUIRED};
use crate::forms::{FieldErrors, non_blank};

/// Form data for creating or editing a client.
#[derive(Debug, Default, Deserialize)]
pub struct ClientForm {
    /// Display name.
    pub name: String,
    /// Optional email address.
    #[serde(default)]
    pub email: String,
    /// Phone as typed; separators are stripped before the digit check.
    pub phone: String,
    /// Optional postal address.
    #[serde(default)]
    pub address: String,
}

impl TryFrom<ClientForm> for NewClient {
    type Error = FieldErrors;

    fn try_from(form: ClientForm) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();

        let name = ClientName::new(form.name.as_str())
            .map_err(|_| errors.add("name", "El nombre es requerido"))
            .ok();

        let email = match non_blank(&form.email) {
            None => None,
            Some(email) => ClientEmail::new(email)
                .map_err(|_| errors.add("email", "Email inválido"))
                .ok(),
        };

        let phone = if form.phone.trim().is_empty() {
            errors.add("phone", PHONE_REQUIRED);
            None
        } else {
            PhoneNumber::new(form.phone.as_str())
                .map_err(|_| errors.add("phone", PHONE_DIGITS))
                .ok()
        };

        let address = SanitizedText::optional(form.address);

        match (name, phone) {
            (Some(name), Some(phone)) if errors.is_empty() => Ok(NewClient {
                name,
                email,
                phone,
                address,
            }),
            _ => Err(errors),
        }
    }
}

/// Reason typed by the operator when archiving a client.
#[derive(Debug, Deserialize)]
pub struct ArchiveClientForm {
    /// Why the client is being archived. Required.
    #[serde(default)]
    pub reason: String,
}

impl TryFrom<ArchiveClientForm> for ArchiveRequest {
    type Error = FieldErrors;

    fn try_from(form: ArchiveClientForm) -> Result<Self, Self::Error> {
        SanitizedText::new(form.reason)
            .map(|reason| ArchiveRequest { reason })
            .map_err(|_| {
                let mut errors = FieldErrors::new();
                errors.add("reason", "La razón es requerida");
                errors
            })
    }
}
