use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::api::HttpApi;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::middleware::LOGIN_PATH;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::{ServiceError, auth as auth_service};
use crate::session::{self, AuthState};

/// Login page. A stored session is probed first and, if the API still
/// accepts it, the user goes straight to their home screen.
#[get("/login")]
pub async fn show_login(
    session: Session,
    api: web::Data<HttpApi>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let (AuthState::Authenticated(user), Some(token)) =
        (session::state(&session), session::token(&session))
    {
        match auth_service::probe_session(&api.with_token(token), &user).await {
            Ok(()) => return redirect(user.role.home()),
            Err(_) => session::clear(&session),
        }
    }

    let context = base_context(&flash_messages, None, "login");
    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(
    request: HttpRequest,
    session: Session,
    api: web::Data<HttpApi>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let response = match auth_service::login(api.get_ref(), form).await {
        Ok(response) => response,
        Err(ServiceError::Unauthorized | ServiceError::NotFound) => {
            FlashMessage::error("Teléfono o contraseña incorrectos.").send();
            return redirect(LOGIN_PATH);
        }
        Err(err) => return service_error_response(&session, err, LOGIN_PATH),
    };

    if let Err(err) = session::store(&session, &response.token, &response.user) {
        log::error!("Failed to store session: {err}");
        return HttpResponse::InternalServerError().finish();
    }
    if let Err(err) = Identity::login(&request.extensions(), response.user.id.to_string()) {
        log::error!("Failed to attach identity: {err}");
        return HttpResponse::InternalServerError().finish();
    }

    log::info!("User {} signed in as {:?}", response.user.id, response.user.role);
    FlashMessage::success(format!("Bienvenido, {}.", response.user.name)).send();
    redirect(response.user.role.home())
}

#[post("/register")]
pub async fn register(
    session: Session,
    api: web::Data<HttpApi>,
    web::Form(form): web::Form<RegisterForm>,
) -> impl Responder {
    match auth_service::register(api.get_ref(), form).await {
        Ok(_) => {
            FlashMessage::success("Cuenta creada. Ya puede iniciar sesión.").send();
            redirect(LOGIN_PATH)
        }
        Err(err) => service_error_response(&session, err, LOGIN_PATH),
    }
}

#[post("/logout")]
pub async fn logout(session: Session, identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    session::clear(&session);
    redirect(LOGIN_PATH)
}
