use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::api::HttpApi;
use crate::domain::types::ClientId;
use crate::dto::ListTab;
use crate::forms::client::{ArchiveClientForm, ClientForm};
use crate::routes::{
    base_context, push_alert, redirect, render_template, service_error_response,
};
use crate::services::clients as clients_service;
use crate::session::CurrentUser;

#[derive(Deserialize)]
pub struct ListQuery {
    pub tab: Option<String>,
}

fn client_url(client_id: ClientId) -> String {
    format!("/clients/{client_id}")
}

#[get("/clients")]
pub async fn show_clients(
    user: CurrentUser,
    session: Session,
    query: web::Query<ListQuery>,
    api: web::Data<HttpApi>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let tab = ListTab::from_query(query.tab.as_deref());

    match clients_service::list_clients(&user.api(&api), &user.user, tab).await {
        Ok(page) => {
            let mut context = base_context(&flash_messages, Some(&user.user), "clients");
            if let Some(message) = &page.load_error {
                push_alert(&mut context, &flash_messages, message);
            }
            context.insert("page", &page);
            render_template(&tera, "clients/index.html", &context)
        }
        Err(err) => service_error_response(&session, err, "/admin"),
    }
}

#[post("/clients/add")]
pub async fn add_client(
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
    web::Form(form): web::Form<ClientForm>,
) -> impl Responder {
    match clients_service::create_client(&user.api(&api), &user.user, form).await {
        Ok(()) => {
            FlashMessage::success("Cliente agregado.").send();
            redirect("/clients")
        }
        Err(err) => service_error_response(&session, err, "/clients"),
    }
}

#[get("/clients/{client_id}")]
pub async fn show_client(
    client_id: web::Path<i64>,
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(client_id) = ClientId::new(client_id.into_inner()) else {
        FlashMessage::error("Cliente no encontrado.").send();
        return redirect("/clients");
    };

    match clients_service::get_client_detail(&user.api(&api), &user.user, client_id).await {
        Ok(page) => {
            let mut context = base_context(&flash_messages, Some(&user.user), "clients");
            context.insert("page", &page);
            render_template(&tera, "clients/show.html", &context)
        }
        Err(err) => service_error_response(&session, err, "/clients"),
    }
}

#[post("/clients/{client_id}/save")]
pub async fn save_client(
    client_id: web::Path<i64>,
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
    web::Form(form): web::Form<ClientForm>,
) -> impl Responder {
    let Ok(client_id) = ClientId::new(client_id.into_inner()) else {
        return redirect("/clients");
    };

    match clients_service::update_client(&user.api(&api), &user.user, client_id, form).await {
        Ok(()) => {
            FlashMessage::success("Cliente actualizado.").send();
            redirect(&client_url(client_id))
        }
        Err(err) => service_error_response(&session, err, &client_url(client_id)),
    }
}

#[post("/clients/{client_id}/archive")]
pub async fn archive_client(
    client_id: web::Path<i64>,
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
    web::Form(form): web::Form<ArchiveClientForm>,
) -> impl Responder {
    let Ok(client_id) = ClientId::new(client_id.into_inner()) else {
        return redirect("/clients");
    };

    match clients_service::archive_client(&user.api(&api), &user.user, client_id, form).await {
        Ok(()) => {
            FlashMessage::success("Cliente archivado.").send();
            redirect("/clients")
        }
        Err(err) => service_error_response(&session, err, &client_url(client_id)),
    }
}

#[post("/clients/{client_id}/unarchive")]
pub async fn unarchive_client(
    client_id: web::Path<i64>,
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
) -> impl Responder {
    let Ok(client_id) = ClientId::new(client_id.into_inner()) else {
        return redirect("/clients?tab=archived");
    };

    match clients_service::unarchive_client(&user.api(&api), &user.user, client_id).await {
        Ok(()) => {
            FlashMessage::success("Cliente restaurado.").send();
            redirect("/clients")
        }
        Err(err) => service_error_response(&session, err, "/clients?tab=archived"),
    }
}

#[post("/clients/{client_id}/delete")]
pub async fn delete_client(
    client_id: web::Path<i64>,
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
) -> impl Responder {
    let Ok(client_id) = ClientId::new(client_id.into_inner()) else {
        return redirect("/clients");
    };

    match clients_service::delete_client(&user.api(&api), &user.user, client_id).await {
        Ok(()) => {
            FlashMessage::success("Cliente eliminado.").send();
            redirect("/clients")
        }
        Err(err) => service_error_response(&session, err, &client_url(client_id)),
    }
}
