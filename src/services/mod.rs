//! Screen use-cases. Every function is generic over the gateway traits so
//! it can run against [`crate::api::HttpApi`] or a `mockall` double.

use thiserror::Error;

use crate::api::errors::{ApiError, ApiResult};
use crate::domain::types::TypeConstraintError;
use crate::domain::user::User;
use crate::forms::FieldErrors;

pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod debts;
pub mod payments;
pub mod portal;
pub mod reports;
pub mod settings;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Session missing or rejected by the API; the caller must sign in again.
    #[error("unauthorized")]
    Unauthorized,

    /// Signed in, but the role does not allow the action.
    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// The API refused the request; the message is ready for display.
    #[error("{0}")]
    BusinessRule(String),

    #[error("api error: {0}")]
    Api(ApiError),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => ServiceError::Unauthorized,
            ApiError::NotFound => ServiceError::NotFound,
            ApiError::Rejected { message, .. } => {
                ServiceError::BusinessRule(localize_server_message(&message))
            }
            other => ServiceError::Api(other),
        }
    }
}

impl From<FieldErrors> for ServiceError {
    fn from(errors: FieldErrors) -> Self {
        ServiceError::Validation(errors)
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

/// Spanish text for the business-rule messages the API answers in English.
/// Unknown messages pass through unchanged.
const SERVER_MESSAGES: [(&str, &str); 14] = [
    (
        "Cannot delete debt with existing payments",
        "No se puede eliminar una deuda con pagos registrados. Elimine primero los pagos.",
    ),
    (
        "Cannot add payment to a settled debt",
        "No se puede registrar un pago en una deuda liquidada",
    ),
    (
        "Payment amount cannot exceed remaining debt amount",
        "El pago no puede ser mayor al restante de la deuda",
    ),
    (
        "Payment amount must be greater than 0",
        "El monto del pago debe ser mayor a 0",
    ),
    ("Amount must be greater than 0", "El monto debe ser mayor a 0"),
    (
        "Client with this phone number already exists",
        "Ya existe un cliente con este teléfono",
    ),
    (
        "User with this phone number already exists",
        "Ya existe un usuario con este teléfono",
    ),
    ("Phone number already exists", "El teléfono ya está registrado"),
    ("Client not found", "Cliente no encontrado"),
    ("Debt not found", "Deuda no encontrada"),
    ("Payment not found", "Pago no encontrado"),
    ("User not found", "Usuario no encontrado"),
    ("Description is required", "La descripción es requerida"),
    ("Client ID is required", "Debe seleccionar un cliente"),
];

pub fn localize_server_message(message: &str) -> String {
    SERVER_MESSAGES
        .iter()
        .find(|(english, _)| message.starts_with(english))
        .map_or_else(|| message.to_string(), |(_, spanish)| spanish.to_string())
}

/// Message shown when a screen falls back to placeholder data.
pub const LOAD_ERROR: &str = "No se pudieron cargar los datos. Intente de nuevo más tarde.";

/// Admin-only screens reject client sessions.
pub fn ensure_admin(user: &User) -> ServiceResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}

/// Keeps a screen rendering when one payload fails: an expired session still
/// propagates, anything else is logged and replaced by `T::default()`.
pub(crate) fn or_placeholder<T: Default>(
    result: ApiResult<T>,
    what: &str,
    load_error: &mut Option<String>,
) -> ServiceResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(ApiError::Unauthorized) => Err(ServiceError::Unauthorized),
        Err(err) => {
            log::error!("Failed to load {what}: {err}");
            load_error.get_or_insert_with(|| LOAD_ERROR.to_string());
            Ok(T::default())
        }
    }
}
