//! Typed gateway to the remote debt-tracker REST API.
//!
//! Each entity exposes reader and writer traits so services can be tested
//! against `mockall` doubles. [`HttpApi`] is the production implementation:
//! it owns the shared connection pool, prefixes every path with the
//! configured base URL and attaches the session's bearer token.
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::api::errors::{ApiError, ApiResult};
use crate::domain::client::{ArchiveRequest, Client, NewClient, UpdateClient};
use crate::domain::debt::{Debt, NewDebt, UpdateDebt};
use crate::domain::payment::{NewPayment, Payment};
use crate::domain::report::{
    AdvancedKpis, CollectionPerformance, CsvExport, Dashboard, ExportKind, MonthlyReport,
    OverdueDebtsReport, PaymentMethodsAnalysis, PerformanceMetrics, TopClient,
};
use crate::domain::types::{ClientId, DebtId, PaymentId};
use crate::domain::user::{AuthResponse, Credentials, NewClientAccount, RegistrationResponse};

pub mod auth;
pub mod client;
pub mod debt;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod payment;
pub mod report;

#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// `POST /api/auth/login` (admin, phone + password).
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse>;
    /// `POST /api/auth/client-login` (phone only).
    async fn client_login(&self, credentials: &Credentials) -> ApiResult<AuthResponse>;
    async fn register_client(&self, account: &NewClientAccount)
    -> ApiResult<RegistrationResponse>;
}

#[async_trait]
pub trait ClientReader: Send + Sync {
    async fn list_clients(&self) -> ApiResult<Vec<Client>>;
    async fn list_archived_clients(&self) -> ApiResult<Vec<Client>>;
    async fn get_client(&self, id: ClientId) -> ApiResult<Client>;
}

#[async_trait]
pub trait ClientWriter: Send + Sync {
    async fn create_client(&self, new_client: &NewClient) -> ApiResult<()>;
    async fn update_client(&self, id: ClientId, updates: &UpdateClient) -> ApiResult<()>;
    async fn archive_client(&self, id: ClientId, request: &ArchiveRequest) -> ApiResult<()>;
    async fn unarchive_client(&self, id: ClientId) -> ApiResult<()>;
    async fn delete_client(&self, id: ClientId) -> ApiResult<()>;
}

#[async_trait]
pub trait DebtReader: Send + Sync {
    async fn list_debts(&self) -> ApiResult<Vec<Debt>>;
    async fn list_archived_debts(&self) -> ApiResult<Vec<Debt>>;
    async fn get_debt(&self, id: DebtId) -> ApiResult<Debt>;
}

#[async_trait]
pub trait DebtWriter: Send + Sync {
    async fn create_debt(&self, new_debt: &NewDebt) -> ApiResult<()>;
    async fn update_debt(&self, id: DebtId, updates: &UpdateDebt) -> ApiResult<()>;
    async fn archive_debt(&self, id: DebtId) -> ApiResult<()>;
    async fn unarchive_debt(&self, id: DebtId) -> ApiResult<()>;
    async fn delete_debt(&self, id: DebtId) -> ApiResult<()>;
}

#[async_trait]
pub trait PaymentReader: Send + Sync {
    async fn list_payments(&self) -> ApiResult<Vec<Payment>>;
    async fn list_debt_payments(&self, debt_id: DebtId) -> ApiResult<Vec<Payment>>;
    async fn get_payment(&self, id: PaymentId) -> ApiResult<Payment>;
}

#[async_trait]
pub trait PaymentWriter: Send + Sync {
    async fn create_payment(&self, new_payment: &NewPayment) -> ApiResult<()>;
}

#[async_trait]
pub trait ReportReader: Send + Sync {
    async fn dashboard(&self) -> ApiResult<Dashboard>;
    async fn advanced_kpis(&self) -> ApiResult<AdvancedKpis>;
    async fn performance(&self, days: u32) -> ApiResult<PerformanceMetrics>;
    async fn monthly_report(&self, year: i32, month: u32) -> ApiResult<MonthlyReport>;
    async fn top_clients(&self, limit: u32) -> ApiResult<Vec<TopClient>>;
    async fn collection_performance(&self, months: u32) -> ApiResult<CollectionPerformance>;
    async fn payment_methods_analysis(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ApiResult<PaymentMethodsAnalysis>;
    async fn overdue_debts(&self) -> ApiResult<OverdueDebtsReport>;
    async fn export_csv(&self, kind: ExportKind) -> ApiResult<CsvExport>;
}

/// `reqwest`-backed gateway. Cloning is cheap and shares the connection pool.
#[derive(Clone, Debug)]
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::from)?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Copy of the gateway that authenticates as the given session.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("API Request: {method} {url}");
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_raw(&self, builder: RequestBuilder) -> ApiResult<reqwest::Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(status, &body);
        log::warn!("API Error: {status} {err}");
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = self.send_raw(builder).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(ApiError::from)
    }

    async fn send_unit(&self, builder: RequestBuilder) -> ApiResult<()> {
        self.send_raw(builder).await.map(|_| ())
    }
}
