use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::api::HttpApi;
use crate::middleware::RedirectUnauthorized;
use crate::models::config::ServerConfig;
use crate::routes::auth::{login, logout, register, show_login};
use crate::routes::clients::{
    add_client, archive_client, delete_client, save_client, show_client, show_clients,
    unarchive_client,
};
use crate::routes::debts::{
    add_debt, add_payment, archive_debt, delete_debt, save_debt, show_debt, show_debts,
    unarchive_debt,
};
use crate::routes::main::{admin_dashboard, index};
use crate::routes::payments::{show_payment, show_payments};
use crate::routes::portal::show_portal;
use crate::routes::reports::{
    export_csv, show_collection_performance, show_monthly, show_overview, show_payment_methods,
    show_top_clients,
};
use crate::routes::settings::{reset_settings, save_settings, show_settings};

pub mod api;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod reporting;
pub mod routes;
pub mod services;
pub mod session;

/// Loads the templates and registers the formatting filters they use.
pub fn load_templates(templates_dir: &str) -> std::io::Result<Tera> {
    let mut tera = Tera::new(templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;
    routes::register_filters(&mut tera);
    Ok(tera)
}

/// Registers every route. Everything except the login flow sits behind
/// [`RedirectUnauthorized`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(show_login)
        .service(login)
        .service(register)
        .service(
            web::scope("")
                .wrap(RedirectUnauthorized)
                .service(index)
                .service(admin_dashboard)
                .service(show_portal)
                .service(show_clients)
                .service(add_client)
                .service(show_client)
                .service(save_client)
                .service(archive_client)
                .service(unarchive_client)
                .service(delete_client)
                .service(show_debts)
                .service(add_debt)
                .service(show_debt)
                .service(save_debt)
                .service(archive_debt)
                .service(unarchive_debt)
                .service(delete_debt)
                .service(add_payment)
                .service(show_payments)
                .service(show_payment)
                .service(show_overview)
                .service(show_monthly)
                .service(show_top_clients)
                .service(show_collection_performance)
                .service(show_payment_methods)
                .service(export_csv)
                .service(show_settings)
                .service(save_settings)
                .service(reset_settings)
                .service(logout),
        );
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let api = HttpApi::new(&server_config.api_url, server_config.request_timeout())
        .map_err(|e| std::io::Error::other(format!("Failed to build API client: {e}")))?;

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid session secret: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = load_templates(&server_config.templates_dir)?;

    // Browsers drop cookies scoped to a bare `localhost` domain.
    let cookie_domain =
        (server_config.domain != "localhost").then(|| server_config.domain.clone());

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Listening on {}:{} against API {}",
        bind_address.0,
        bind_address.1,
        api.base_url()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(cookie_domain.clone())
                    .build(),
            )
            .wrap(actix_web::middleware::Compress::default())
            .wrap(actix_web::middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(configure)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(api.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
