use serde::Deserialize;
use validator::Validate;

use crate::domain::types::PhoneNumber;
use crate::domain::user::{Credentials, NewClientAccount};
use crate::forms::{FieldErrors, non_blank};

pub const PHONE_REQUIRED: &str = "El teléfono es requerido";
pub const PHONE_DIGITS: &str = "Teléfono debe tener 10 dígitos";

/// Which login endpoint the credentials target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginKind {
    /// Phone and password, `/api/auth/login`.
    Admin,
    /// Phone only, `/api/auth/client-login`.
    Client,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Phone the account was registered with.
    pub phone: String,
    /// Administrator password; left empty by clients.
    #[serde(default)]
    pub password: String,
}

/// Credentials ready to post, tagged with the endpoint to use.
#[derive(Debug, Clone)]
pub struct LoginPayload {
    /// Endpoint the credentials are posted to.
    pub kind: LoginKind,
    /// Body of the login request.
    pub credentials: Credentials,
}

impl TryFrom<LoginForm> for LoginPayload {
    type Error = FieldErrors;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let Some(phone) = non_blank(&form.phone) else {
            errors.add("phone", PHONE_REQUIRED);
            return Err(errors);
        };
        let phone = phone.to_string();

        // An empty password means a client signing in with their phone.
        let payload = if form.password.is_empty() {
            LoginPayload {
                kind: LoginKind::Client,
                credentials: Credentials {
                    phone,
                    password: None,
                },
            }
        } else {
            LoginPayload {
                kind: LoginKind::Admin,
                credentials: Credentials {
                    phone,
                    password: Some(form.password),
                },
            }
        };
        errors.finish(|| payload)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    /// Full name of the new client.
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    pub name: String,
    /// Ten-digit phone used to sign in.
    pub phone: String,
    /// Account password.
    #[validate(length(min = 1, message = "La contraseña es requerida"))]
    pub password: String,
}

impl TryFrom<RegisterForm> for NewClientAccount {
    type Error = FieldErrors;

    fn try_from(form: RegisterForm) -> Result<Self, Self::Error> {
        let mut errors = match form.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => FieldErrors::from(err),
        };
        if form.name.trim().is_empty() {
            errors.add("name", "El nombre es requerido");
        }
        let phone = match PhoneNumber::new(form.phone.as_str()) {
            Ok(phone) => Some(phone),
            Err(_) if form.phone.trim().is_empty() => {
                errors.add("phone", PHONE_REQUIRED);
                None
            }
            Err(_) => {
                errors.add("phone", PHONE_DIGITS);
                None
            }
        };

        match phone {
            Some(phone) if errors.is_empty() => Ok(NewClientAccount {
                name: form.name.trim().to_string(),
                phone: phone.into_inner(),
                password: form.password,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_selects_client_login() {
        let payload = LoginPayload::try_from(LoginForm {
            phone: "5551234567".to_string(),
            password: String::new(),
        })
        .unwrap();
        assert_eq!(payload.kind, LoginKind::Client);
        assert!(payload.credentials.password.is_none());
    }

    #[test]
    fn password_selects_admin_login() {
        let payload = LoginPayload::try_from(LoginForm {
            phone: " 5551234567 ".to_string(),
            password: "secret".to_string(),
        })
        .unwrap();
        assert_eq!(payload.kind, LoginKind::Admin);
        assert_eq!(payload.credentials.phone, "5551234567");
        assert_eq!(payload.credentials.password.as_deref(), Some("secret"));
    }

    #[test]
    fn login_requires_phone() {
        let errors = LoginPayload::try_from(LoginForm {
            phone: "  ".to_string(),
            password: String::new(),
        })
        .unwrap_err();
        assert_eq!(errors.get("phone"), Some(PHONE_REQUIRED));
    }

    #[test]
    fn registration_checks_every_field() {
        let errors = NewClientAccount::try_from(RegisterForm {
            name: String::new(),
            phone: "555123".to_string(),
            password: String::new(),
        })
        .unwrap_err();
        assert!(errors.contains("name"));
        assert_eq!(errors.get("phone"), Some(PHONE_DIGITS));
        assert!(errors.contains("password"));
    }
}
