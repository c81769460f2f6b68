use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::api::HttpApi;
use crate::dto::settings::Preferences;
use crate::forms::settings::PreferencesForm;
use crate::routes::{base_context, redirect, render_template};
use crate::services::settings as settings_service;
use crate::session::{self, CurrentUser};

#[get("/settings")]
pub async fn show_settings(
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let page =
        settings_service::load_settings(&user.user, api.base_url(), session::preferences(&session));

    let mut context = base_context(&flash_messages, Some(&user.user), "settings");
    context.insert("page", &page);
    render_template(&tera, "settings/index.html", &context)
}

#[post("/settings")]
pub async fn save_settings(
    _user: CurrentUser,
    session: Session,
    web::Form(form): web::Form<PreferencesForm>,
) -> impl Responder {
    let preferences = Preferences::from(form);
    if let Err(err) = session::store_preferences(&session, &preferences) {
        log::error!("Failed to store preferences: {err}");
        return HttpResponse::InternalServerError().finish();
    }
    FlashMessage::success("Preferencias guardadas.").send();
    redirect("/settings")
}

#[post("/settings/reset")]
pub async fn reset_settings(_user: CurrentUser, session: Session) -> impl Responder {
    session::reset_preferences(&session);
    FlashMessage::info("Preferencias restablecidas.").send();
    redirect("/settings")
}
