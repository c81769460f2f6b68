//! Request-scoped session holder.
//!
//! The API token and the signed-in user live in the signed session cookie
//! under [`TOKEN_KEY`] and [`USER_KEY`]. Nothing is kept server-side, so the
//! session is the only place the authentication state can come from.
use std::future::{Ready, ready};

use actix_session::{Session, SessionExt, SessionInsertError};
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{FromRequest, HttpRequest};

use crate::api::HttpApi;
use crate::domain::user::User;
use crate::dto::settings::Preferences;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const PREFERENCES_KEY: &str = "preferences";

/// Outcome of resolving the session.
///
/// There is no separate loading variant: pages are rendered on the server,
/// so the probe of a stored token happens while `index` and `show_login`
/// await the API, before any response exists. A stored session reads as
/// `Authenticated` until that probe rejects it and [`clear`] runs.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthState {
    Authenticated(User),
    Unauthenticated,
}

/// Persists a successful login.
pub fn store(session: &Session, token: &str, user: &User) -> Result<(), SessionInsertError> {
    session.insert(TOKEN_KEY, token)?;
    session.insert(USER_KEY, user)?;
    session.renew();
    Ok(())
}

/// Drops everything the session holds.
pub fn clear(session: &Session) {
    session.purge();
}

fn credentials(session: &Session) -> Option<(String, User)> {
    let token = session.get::<String>(TOKEN_KEY).ok().flatten()?;
    let user = session.get::<User>(USER_KEY).ok().flatten()?;
    Some((token, user))
}

pub fn token(session: &Session) -> Option<String> {
    session.get::<String>(TOKEN_KEY).ok().flatten()
}

/// Stored preferences, or the defaults when none were saved.
pub fn preferences(session: &Session) -> Preferences {
    session
        .get::<Preferences>(PREFERENCES_KEY)
        .ok()
        .flatten()
        .unwrap_or_default()
}

pub fn store_preferences(
    session: &Session,
    preferences: &Preferences,
) -> Result<(), SessionInsertError> {
    session.insert(PREFERENCES_KEY, preferences)
}

pub fn reset_preferences(session: &Session) {
    session.remove(PREFERENCES_KEY);
}

/// Resolves the stored credentials. A token without a readable user (or the
/// reverse) counts as signed out.
pub fn state(session: &Session) -> AuthState {
    match credentials(session) {
        Some((_, user)) => AuthState::Authenticated(user),
        None => AuthState::Unauthenticated,
    }
}

/// Signed-in user extracted from the session; rejects with 401 otherwise.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

impl CurrentUser {
    /// Gateway acting on behalf of this user.
    pub fn api(&self, api: &HttpApi) -> HttpApi {
        api.with_token(self.token.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = req.get_session();
        let result = match credentials(&session) {
            Some((token, user)) => Ok(CurrentUser { user, token }),
            None => Err(ErrorUnauthorized("Not signed in")),
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use actix_session::SessionMiddleware;
    use actix_session::storage::CookieSessionStore;
    use actix_web::cookie::Key;
    use actix_web::{App, HttpResponse, test, web};

    use super::*;
    use crate::domain::types::UserId;
    use crate::domain::user::Role;

    fn admin() -> User {
        User {
            id: UserId::new(1).unwrap(),
            name: "Admin".to_string(),
            phone: Some("5551234567".to_string()),
            role: Role::Admin,
        }
    }

    #[actix_web::test]
    async fn stored_credentials_resolve_to_authenticated() {
        let app = test::init_service(
            App::new()
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .route(
                    "/store",
                    web::get().to(|session: Session| async move {
                        store(&session, "tok", &admin()).unwrap();
                        HttpResponse::Ok().finish()
                    }),
                )
                .route(
                    "/state",
                    web::get().to(|session: Session| async move {
                        match state(&session) {
                            AuthState::Authenticated(user) => HttpResponse::Ok().body(user.name),
                            AuthState::Unauthenticated => HttpResponse::Unauthorized().finish(),
                        }
                    }),
                )
                .route(
                    "/me",
                    web::get().to(|user: CurrentUser| async move {
                        HttpResponse::Ok().body(user.token)
                    }),
                ),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/state").to_request()).await;
        assert_eq!(resp.status(), 401);
        let resp = test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(resp.status(), 401);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/store").to_request()).await;
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "id")
            .expect("session cookie")
            .into_owned();

        let req = test::TestRequest::get()
            .uri("/state")
            .cookie(cookie.clone())
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "Admin");

        let req = test::TestRequest::get().uri("/me").cookie(cookie).to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "tok");
    }
}
