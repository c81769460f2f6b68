//! HTTP handlers. Each handler resolves the session, calls one service and
//! either renders a template or flashes a message and redirects.
use std::collections::HashMap;
use std::str::FromStr;

use actix_session::Session;
use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use rust_decimal::Decimal;
use tera::{Context, Tera, Value};

use crate::domain::user::User;
use crate::middleware::LOGIN_PATH;
use crate::reporting::{format_currency, format_share, format_variation};
use crate::services::ServiceError;
use crate::session;

pub mod auth;
pub mod clients;
pub mod debts;
pub mod main;
pub mod payments;
pub mod portal;
pub mod reports;
pub mod settings;

pub const SESSION_EXPIRED: &str = "Su sesión expiró. Inicie sesión de nuevo.";
pub const FORBIDDEN: &str = "No tiene permisos para acceder a esta sección.";

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

fn alerts(flash_messages: &IncomingFlashMessages) -> Vec<(String, &'static str)> {
    flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect()
}

/// Context shared by every page: alerts, the signed-in user and the active menu entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&User>,
    current_page: &str,
) -> Context {
    let mut context = Context::new();
    context.insert("alerts", &alerts(flash_messages));
    context.insert("current_user", &user);
    context.insert("current_page", current_page);
    context
}

/// Adds a same-request alert, used when a screen renders placeholder data.
pub fn push_alert(context: &mut Context, flash_messages: &IncomingFlashMessages, message: &str) {
    let mut alerts = alerts(flash_messages);
    alerts.push((message.to_string(), alert_level_to_str(&Level::Error)));
    context.insert("alerts", &alerts);
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Maps a failed service call to a flash message and a redirect. An expired
/// session is cleared and sent back to the login page.
pub fn service_error_response(session: &Session, err: ServiceError, back: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            session::clear(session);
            FlashMessage::warning(SESSION_EXPIRED).send();
            redirect(LOGIN_PATH)
        }
        ServiceError::Forbidden => {
            FlashMessage::error(FORBIDDEN).send();
            redirect("/dashboard")
        }
        ServiceError::NotFound => {
            FlashMessage::error("El registro no existe.").send();
            redirect(back)
        }
        ServiceError::Validation(errors) => {
            for message in errors.messages() {
                FlashMessage::error(message).send();
            }
            redirect(back)
        }
        ServiceError::BusinessRule(message) => {
            FlashMessage::error(message).send();
            redirect(back)
        }
        ServiceError::Api(err) => {
            log::error!("API call failed: {err}");
            FlashMessage::error(format!("Error de comunicación: {}", err.user_message())).send();
            redirect(back)
        }
        ServiceError::TypeConstraint(message) => {
            FlashMessage::error(message).send();
            redirect(back)
        }
    }
}

fn decimal_value(value: &Value) -> tera::Result<Decimal> {
    let parsed = match value {
        Value::Number(number) => Decimal::from_str(&number.to_string())
            .or_else(|_| Decimal::from_scientific(&number.to_string())),
        Value::String(text) => Decimal::from_str(text),
        Value::Null => Ok(Decimal::ZERO),
        other => return Err(tera::Error::msg(format!("not a number: {other}"))),
    };
    parsed.map_err(|err| tera::Error::msg(format!("invalid number {value}: {err}")))
}

/// `{{ amount | currency }}`
fn currency_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(format_currency(decimal_value(value)?)))
}

/// `{{ variation | variation }}`, `-` when there is no baseline.
fn variation_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let variation = match value {
        Value::Null => None,
        other => Some(decimal_value(other)?),
    };
    Ok(Value::String(format_variation(variation)))
}

fn share_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(format_share(decimal_value(value)?)))
}

pub fn register_filters(tera: &mut Tera) {
    tera.register_filter("currency", currency_filter);
    tera.register_filter("variation", variation_filter);
    tera.register_filter("share", share_filter);
}
