use actix_session::Session;
use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::api::HttpApi;
use crate::domain::types::DebtId;
use crate::middleware::LOGIN_PATH;
use crate::routes::{base_context, push_alert, render_template, service_error_response};
use crate::services::portal as portal_service;
use crate::session::CurrentUser;

#[derive(Deserialize)]
struct PortalQuery {
    debt: Option<i64>,
}

/// Read-only account view of the signed-in client.
#[get("/dashboard")]
pub async fn show_portal(
    user: CurrentUser,
    session: Session,
    query: web::Query<PortalQuery>,
    api: web::Data<HttpApi>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let selected = query.debt.and_then(|id| DebtId::new(id).ok());

    match portal_service::load_portal(&user.api(&api), &user.user, selected).await {
        Ok(page) => {
            let mut context = base_context(&flash_messages, Some(&user.user), "dashboard");
            if let Some(message) = &page.load_error {
                push_alert(&mut context, &flash_messages, message);
            }
            context.insert("page", &page);
            render_template(&tera, "portal/index.html", &context)
        }
        Err(err) => service_error_response(&session, err, LOGIN_PATH),
    }
}
