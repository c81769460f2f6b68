use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use actix_identity::IdentityMiddleware;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, test, web};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::{FlashMessagesFramework, Level};
use serde_json::json;

use fiado_admin::api::HttpApi;
use fiado_admin::routes::alert_level_to_str;

static CLIENT_CREATES: AtomicUsize = AtomicUsize::new(0);

#[::core::prelude::v1::test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

fn bearer(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn admin_login(body: web::Json<serde_json::Value>) -> HttpResponse {
    let token = match body["phone"].as_str() {
        Some("5550000000") => "admin-token",
        Some("5550000001") => "expired-admin-token",
        _ => return HttpResponse::Unauthorized().json(json!({"error": "Invalid credentials"})),
    };
    HttpResponse::Ok().json(json!({
        "token": token,
        "user": {"id": 1, "name": "Admin", "phone": body["phone"], "role": "ADMIN"}
    }))
}

async fn client_login(body: web::Json<serde_json::Value>) -> HttpResponse {
    let token = match body["phone"].as_str() {
        Some("5551234567") => "client-token",
        Some("5559999999") => "expired-token",
        _ => return HttpResponse::NotFound().json(json!({"error": "User not found"})),
    };
    HttpResponse::Ok().json(json!({
        "token": token,
        "user": {"id": 2, "name": "Ana", "phone": body["phone"], "role": "CLIENT"}
    }))
}

async fn dashboard(req: HttpRequest) -> HttpResponse {
    match bearer(&req).as_deref() {
        Some("admin-token") => HttpResponse::Ok().json(json!({
            "summary": {"monthRevenue": 1500.5, "activeClients": 3, "totalClients": 4}
        })),
        Some("client-token") => HttpResponse::Forbidden().finish(),
        _ => HttpResponse::Unauthorized().finish(),
    }
}

async fn list_debts(req: HttpRequest) -> HttpResponse {
    match bearer(&req).as_deref() {
        Some("admin-token" | "client-token") => HttpResponse::Ok().json(json!([
            {"id": 1, "client": {"id": 2, "name": "Ana"}, "totalAmount": 1000,
             "remainingAmount": 400, "description": "Anillo", "status": "ACTIVE"},
            {"id": 2, "client": {"id": 2, "name": "Ana"}, "totalAmount": 700,
             "remainingAmount": 0, "description": "Aretes & collar", "status": "SETTLED"}
        ])),
        _ => HttpResponse::Unauthorized().finish(),
    }
}

async fn create_client() -> HttpResponse {
    CLIENT_CREATES.fetch_add(1, Ordering::SeqCst);
    HttpResponse::Created().finish()
}

fn start_fake_api() -> SocketAddr {
    let server = HttpServer::new(|| {
        App::new()
            .route("/api/auth/login", web::post().to(admin_login))
            .route("/api/auth/client-login", web::post().to(client_login))
            .route("/api/dashboard", web::get().to(dashboard))
            .route("/api/debts", web::get().to(list_debts))
            .route("/api/clients", web::post().to(create_client))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind fake api");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    addr
}

macro_rules! init_app {
    () => {{
        let addr = start_fake_api();
        let api = HttpApi::new(&format!("http://{addr}"), Duration::from_secs(5))
            .expect("http client");
        let tera = fiado_admin::load_templates("templates/**/*").expect("templates");
        let key = Key::generate();
        let message_store = CookieMessageStore::builder(key.clone()).build();
        test::init_service(
            App::new()
                .wrap(FlashMessagesFramework::builder(message_store).build())
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), key)
                        .cookie_secure(false)
                        .build(),
                )
                .configure(fiado_admin::configure)
                .app_data(web::Data::new(tera))
                .app_data(web::Data::new(api)),
        )
        .await
    }};
}

fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == "id")
        .expect("session cookie")
        .into_owned()
}

fn location<B>(resp: &ServiceResponse<B>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn login_request(phone: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/login")
        .set_form([("phone", phone), ("password", password)])
}

#[actix_web::test]
async fn login_page_renders() {
    let app = init_app!();

    let resp = test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn unauthenticated_requests_go_to_login() {
    let app = init_app!();

    for uri in ["/", "/admin", "/clients", "/dashboard", "/settings"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&resp), "/login", "{uri}");
    }
}

#[actix_web::test]
async fn admin_login_stores_session() {
    let app = init_app!();

    let resp = test::call_service(&app, login_request("5550000000", "secret").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin");
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::get().uri("/admin").cookie(cookie.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/admin");
}

#[actix_web::test]
async fn unknown_phone_stays_on_login() {
    let app = init_app!();

    let resp = test::call_service(&app, login_request("5558887777", "").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
    assert!(resp.response().cookies().all(|cookie| cookie.name() != "id"));
}

#[actix_web::test]
async fn client_is_kept_out_of_admin_screens() {
    let app = init_app!();

    let resp = test::call_service(&app, login_request("5551234567", "").to_request()).await;
    assert_eq!(location(&resp), "/dashboard");
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::get().uri("/dashboard").cookie(cookie.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8 body");
    assert!(body.contains("Anillo"));
    assert!(body.contains("Aretes &amp; collar"));
    assert!(body.contains("Liquidada"));
    assert!(body.contains("Deudas activas (1)"));

    for uri in ["/admin", "/clients", "/debts", "/reports"] {
        let req = test::TestRequest::get().uri(uri).cookie(cookie.clone()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&resp), "/dashboard", "{uri}");
    }
}

#[actix_web::test]
async fn expired_token_clears_session() {
    let app = init_app!();

    let resp = test::call_service(&app, login_request("5559999999", "").to_request()).await;
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::get().uri("/").cookie(cookie.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
    let cleared = session_cookie(&resp);
    assert_eq!(cleared.value(), "");
}

#[actix_web::test]
async fn expired_token_on_protected_screen_redirects_to_login() {
    let app = init_app!();

    let resp = test::call_service(&app, login_request("5550000001", "secret").to_request()).await;
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::get().uri("/admin").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}

#[actix_web::test]
async fn invalid_client_form_is_not_submitted() {
    let app = init_app!();

    let resp = test::call_service(&app, login_request("5550000000", "secret").to_request()).await;
    let cookie = session_cookie(&resp);

    let before = CLIENT_CREATES.load(Ordering::SeqCst);
    let req = test::TestRequest::post()
        .uri("/clients/add")
        .cookie(cookie)
        .set_form([("name", "Ana"), ("phone", "555123")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/clients");
    assert_eq!(CLIENT_CREATES.load(Ordering::SeqCst), before);
}
