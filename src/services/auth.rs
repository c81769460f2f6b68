use crate::api::{AuthGateway, DebtReader, ReportReader};
use crate::domain::user::{AuthResponse, NewClientAccount, RegistrationResponse, Role, User};
use crate::forms::auth::{LoginForm, LoginKind, LoginPayload, RegisterForm};
use crate::services::ServiceResult;

/// Validates the login form and signs in against the matching endpoint.
pub async fn login<R>(repo: &R, form: LoginForm) -> ServiceResult<AuthResponse>
where
    R: AuthGateway + ?Sized,
{
    let payload = LoginPayload::try_from(form)?;

    let response = match payload.kind {
        LoginKind::Admin => repo.login(&payload.credentials).await,
        LoginKind::Client => repo.client_login(&payload.credentials).await,
    }
    .map_err(|err| {
        log::error!("Failed to sign in: {err}");
        err
    })?;

    Ok(response)
}

/// Creates a client account from the public registration form.
pub async fn register<R>(repo: &R, form: RegisterForm) -> ServiceResult<RegistrationResponse>
where
    R: AuthGateway + ?Sized,
{
    let account = NewClientAccount::try_from(form)?;

    let response = repo.register_client(&account).await.map_err(|err| {
        log::error!("Failed to register client: {err}");
        err
    })?;

    Ok(response)
}

/// Checks that a stored token is still accepted by the API.
///
/// Admins are probed with the dashboard; clients cannot read it, so their
/// own debt list is used instead.
pub async fn probe_session<R>(repo: &R, user: &User) -> ServiceResult<()>
where
    R: ReportReader + DebtReader + ?Sized,
{
    let result = match user.role {
        Role::Admin => repo.dashboard().await.map(|_| ()),
        Role::Client => repo.list_debts().await.map(|_| ()),
    };

    result.map_err(|err| {
        log::warn!("Stored session rejected: {err}");
        err.into()
    })
}
