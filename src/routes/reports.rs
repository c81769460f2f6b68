use actix_session::Session;
use actix_web::http::header;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::{Local, NaiveDate};
use tera::{Context, Tera};

use crate::api::HttpApi;
use crate::domain::report::ExportKind;
use crate::domain::user::User;
use crate::forms::reports::{
    COLLECTION_WINDOWS, CollectionQuery, MonthlyQuery, OverviewPeriod, OverviewQuery,
    PaymentMethodsQuery, TOP_CLIENT_LIMITS, TopClientsQuery,
};
use crate::reporting::MONTH_NAMES;
use crate::routes::{base_context, push_alert, render_template, service_error_response};
use crate::services::reports as reports_service;
use crate::session::CurrentUser;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn report_context(
    flash_messages: &IncomingFlashMessages,
    user: &User,
    tab: &str,
    load_error: Option<&String>,
) -> Context {
    let mut context = base_context(flash_messages, Some(user), "reports");
    context.insert("report_tab", tab);
    if let Some(message) = load_error {
        push_alert(&mut context, flash_messages, message);
    }
    context
}

#[get("/reports")]
pub async fn show_overview(
    user: CurrentUser,
    session: Session,
    query: web::Query<OverviewQuery>,
    api: web::Data<HttpApi>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let period = query.period();

    match reports_service::load_overview(&user.api(&api), &user.user, period).await {
        Ok(page) => {
            let mut context = report_context(
                &flash_messages,
                &user.user,
                "overview",
                page.load_error.as_ref(),
            );
            let periods: Vec<_> = OverviewPeriod::ALL
                .into_iter()
                .map(|period| (period.key(), period.label()))
                .collect();
            context.insert("periods", &periods);
            context.insert("page", &page);
            render_template(&tera, "reports/overview.html", &context)
        }
        Err(err) => service_error_response(&session, err, "/admin"),
    }
}

#[get("/reports/monthly")]
pub async fn show_monthly(
    user: CurrentUser,
    session: Session,
    query: web::Query<MonthlyQuery>,
    api: web::Data<HttpApi>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (year, month) = query.resolve(today());

    match reports_service::load_monthly(&user.api(&api), &user.user, year, month).await {
        Ok(page) => {
            let mut context = report_context(
                &flash_messages,
                &user.user,
                "monthly",
                page.load_error.as_ref(),
            );
            context.insert("month_names", &MONTH_NAMES);
            context.insert("page", &page);
            render_template(&tera, "reports/monthly.html", &context)
        }
        Err(err) => service_error_response(&session, err, "/reports"),
    }
}

#[get("/reports/top-clients")]
pub async fn show_top_clients(
    user: CurrentUser,
    session: Session,
    query: web::Query<TopClientsQuery>,
    api: web::Data<HttpApi>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match reports_service::load_top_clients(&user.api(&api), &user.user, query.limit()).await {
        Ok(page) => {
            let mut context = report_context(
                &flash_messages,
                &user.user,
                "top_clients",
                page.load_error.as_ref(),
            );
            context.insert("limits", &TOP_CLIENT_LIMITS);
            context.insert("page", &page);
            render_template(&tera, "reports/top_clients.html", &context)
        }
        Err(err) => service_error_response(&session, err, "/reports"),
    }
}

#[get("/reports/collection-performance")]
pub async fn show_collection_performance(
    user: CurrentUser,
    session: Session,
    query: web::Query<CollectionQuery>,
    api: web::Data<HttpApi>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let months = query.months();

    match reports_service::load_collection_performance(&user.api(&api), &user.user, months).await
    {
        Ok(page) => {
            let mut context = report_context(
                &flash_messages,
                &user.user,
                "collection",
                page.load_error.as_ref(),
            );
            context.insert("windows", &COLLECTION_WINDOWS);
            context.insert("page", &page);
            render_template(&tera, "reports/collection.html", &context)
        }
        Err(err) => service_error_response(&session, err, "/reports"),
    }
}

#[get("/reports/payment-methods")]
pub async fn show_payment_methods(
    user: CurrentUser,
    session: Session,
    query: web::Query<PaymentMethodsQuery>,
    api: web::Data<HttpApi>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (start, end) = query.resolve(today());

    match reports_service::load_payment_methods(&user.api(&api), &user.user, start, end).await {
        Ok(page) => {
            let mut context = report_context(
                &flash_messages,
                &user.user,
                "payment_methods",
                page.load_error.as_ref(),
            );
            context.insert("page", &page);
            render_template(&tera, "reports/payment_methods.html", &context)
        }
        Err(err) => service_error_response(&session, err, "/reports"),
    }
}

/// Streams the CSV back as a dated download, e.g. `deudas_2024-05-20.csv`.
#[get("/reports/export/{kind}")]
pub async fn export_csv(
    kind: web::Path<ExportKind>,
    user: CurrentUser,
    session: Session,
    api: web::Data<HttpApi>,
) -> impl Responder {
    let kind = kind.into_inner();

    match reports_service::export_csv(&user.api(&api), &user.user, kind).await {
        Ok(export) => {
            let filename = format!("{}_{}.csv", kind.file_prefix(), today().format("%Y-%m-%d"));
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(export.bytes)
        }
        Err(err) => service_error_response(&session, err, "/reports"),
    }
}
