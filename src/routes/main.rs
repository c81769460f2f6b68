use actix_session::Session;
use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::api::HttpApi;
use crate::middleware::LOGIN_PATH;
use crate::routes::{
    base_context, push_alert, redirect, render_template, service_error_response,
};
use crate::services::{auth as auth_service, dashboard as dashboard_service};
use crate::session::{self, AuthState, CurrentUser};

/// App shell: probes the stored session and sends the user to their home screen.
#[get("/")]
pub async fn index(session: Session, api: web::Data<HttpApi>) -> impl Responder {
    let (AuthState::Authenticated(user), Some(token)) =
        (session::state(&session), session::token(&session))
    else {
        return redirect(LOGIN_PATH);
    };

    match auth_service::probe_session(&api.with_token(token), &user).await {
        Ok(()) => redirect(user.role.home()),
        Err(_) => {
            session::clear(&session);
            redirect(LOGIN_PATH)
        }
    }
}

#[get("/admin")]
pub async fn admin_dashboard(
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match dashboard_service::load_admin_dashboard(&user.api(&api), &user.user).await {
        Ok(page) => {
            let mut context = base_context(&flash_messages, Some(&user.user), "admin");
            if let Some(message) = &page.load_error {
                push_alert(&mut context, &flash_messages, message);
            }
            context.insert("page", &page);
            render_template(&tera, "admin/dashboard.html", &context)
        }
        Err(err) => service_error_response(&session, err, "/dashboard"),
    }
}
