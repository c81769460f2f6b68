use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::api::HttpApi;
use crate::domain::types::DebtId;
use crate::dto::ListTab;
use crate::forms::debt::DebtForm;
use crate::forms::payment::PaymentForm;
use crate::routes::clients::ListQuery;
use crate::routes::{
    base_context, push_alert, redirect, render_template, service_error_response,
};
use crate::services::{debts as debts_service, payments as payments_service};
use crate::session::CurrentUser;

fn debt_url(debt_id: DebtId) -> String {
    format!("/debts/{debt_id}")
}

#[get("/debts")]
pub async fn show_debts(
    user: CurrentUser,
    session: Session,
    query: web::Query<ListQuery>,
    api: web::Data<HttpApi>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let tab = ListTab::from_query(query.tab.as_deref());

    match debts_service::list_debts(&user.api(&api), &user.user, tab).await {
        Ok(page) => {
            let mut context = base_context(&flash_messages, Some(&user.user), "debts");
            if let Some(message) = &page.load_error {
                push_alert(&mut context, &flash_messages, message);
            }
            context.insert("page", &page);
            render_template(&tera, "debts/index.html", &context)
        }
        Err(err) => service_error_response(&session, err, "/admin"),
    }
}

#[post("/debts/add")]
pub async fn add_debt(
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
    web::Form(form): web::Form<DebtForm>,
) -> impl Responder {
    match debts_service::create_debt(&user.api(&api), &user.user, form).await {
        Ok(()) => {
            FlashMessage::success("Deuda registrada.").send();
            redirect("/debts")
        }
        Err(err) => service_error_response(&session, err, "/debts"),
    }
}

#[get("/debts/{debt_id}")]
pub async fn show_debt(
    debt_id: web::Path<i64>,
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(debt_id) = DebtId::new(debt_id.into_inner()) else {
        FlashMessage::error("Deuda no encontrada.").send();
        return redirect("/debts");
    };

    match debts_service::get_debt_detail(&user.api(&api), &user.user, debt_id).await {
        Ok(page) => {
            let mut context = base_context(&flash_messages, Some(&user.user), "debts");
            context.insert("page", &page);
            render_template(&tera, "debts/show.html", &context)
        }
        Err(err) => service_error_response(&session, err, "/debts"),
    }
}

#[post("/debts/{debt_id}/save")]
pub async fn save_debt(
    debt_id: web::Path<i64>,
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
    web::Form(form): web::Form<DebtForm>,
) -> impl Responder {
    let Ok(debt_id) = DebtId::new(debt_id.into_inner()) else {
        return redirect("/debts");
    };

    match debts_service::update_debt(&user.api(&api), &user.user, debt_id, form).await {
        Ok(()) => {
            FlashMessage::success("Deuda actualizada.").send();
            redirect(&debt_url(debt_id))
        }
        Err(err) => service_error_response(&session, err, &debt_url(debt_id)),
    }
}

#[post("/debts/{debt_id}/archive")]
pub async fn archive_debt(
    debt_id: web::Path<i64>,
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
) -> impl Responder {
    let Ok(debt_id) = DebtId::new(debt_id.into_inner()) else {
        return redirect("/debts");
    };

    match debts_service::archive_debt(&user.api(&api), &user.user, debt_id).await {
        Ok(()) => {
            FlashMessage::success("Deuda archivada.").send();
            redirect("/debts")
        }
        Err(err) => service_error_response(&session, err, &debt_url(debt_id)),
    }
}

#[post("/debts/{debt_id}/unarchive")]
pub async fn unarchive_debt(
    debt_id: web::Path<i64>,
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
) -> impl Responder {
    let Ok(debt_id) = DebtId::new(debt_id.into_inner()) else {
        return redirect("/debts?tab=archived");
    };

    match debts_service::unarchive_debt(&user.api(&api), &user.user, debt_id).await {
        Ok(()) => {
            FlashMessage::success("Deuda restaurada.").send();
            redirect("/debts")
        }
        Err(err) => service_error_response(&session, err, "/debts?tab=archived"),
    }
}

#[post("/debts/{debt_id}/delete")]
pub async fn delete_debt(
    debt_id: web::Path<i64>,
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
) -> impl Responder {
    let Ok(debt_id) = DebtId::new(debt_id.into_inner()) else {
        return redirect("/debts");
    };

    match debts_service::delete_debt(&user.api(&api), &user.user, debt_id).await {
        Ok(()) => {
            FlashMessage::success("Deuda eliminada.").send();
            redirect("/debts")
        }
        Err(err) => service_error_response(&session, err, &debt_url(debt_id)),
    }
}

#[post("/debts/{debt_id}/payments")]
pub async fn add_payment(
    debt_id: web::Path<i64>,
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
    web::Form(form): web::Form<PaymentForm>,
) -> impl Responder {
    let Ok(debt_id) = DebtId::new(debt_id.into_inner()) else {
        return redirect("/debts");
    };

    match payments_service::add_payment(&user.api(&api), &user.user, debt_id, form).await {
        Ok(()) => {
            FlashMessage::success("Pago registrado.").send();
            redirect(&debt_url(debt_id))
        }
        Err(err) => service_error_response(&session, err, &debt_url(debt_id)),
    }
}
