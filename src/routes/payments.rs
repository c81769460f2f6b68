use actix_session::Session;
use actix_web::{Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::api::HttpApi;
use crate::domain::types::PaymentId;
use crate::routes::{
    base_context, push_alert, redirect, render_template, service_error_response,
};
use crate::services::payments as payments_service;
use crate::session::CurrentUser;

#[get("/payments")]
pub async fn show_payments(
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match payments_service::list_payments(&user.api(&api), &user.user).await {
        Ok(page) => {
            let mut context = base_context(&flash_messages, Some(&user.user), "payments");
            if let Some(message) = &page.load_error {
                push_alert(&mut context, &flash_messages, message);
            }
            context.insert("page", &page);
            render_template(&tera, "payments/index.html", &context)
        }
        Err(err) => service_error_response(&session, err, "/admin"),
    }
}

#[get("/payments/{payment_id}")]
pub async fn show_payment(
    payment_id: web::Path<i64>,
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(payment_id) = PaymentId::new(payment_id.into_inner()) else {
        FlashMessage::error("Pago no encontrado.").send();
        return redirect("/payments");
    };

    match payments_service::get_payment_detail(&user.api(&api), &user.user, payment_id).await {
        Ok(page) => {
            let mut context = base_context(&flash_messages, Some(&user.user), "payments");
            context.insert("page", &page);
            render_template(&tera, "payments/show.html", &context)
        }
        Err(err) => service_error_response(&session, err, "/payments"),
    }
}
