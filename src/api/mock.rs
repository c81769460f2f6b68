//! Mock gateway implementations for isolating services in tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;

use crate::api::errors::ApiResult;
use crate::api::{
    AuthGateway, ClientReader, ClientWriter, DebtReader, DebtWriter, PaymentReader,
    PaymentWriter, ReportReader,
};
use crate::domain::client::{ArchiveRequest, Client, NewClient, UpdateClient};
use crate::domain::debt::{Debt, NewDebt, UpdateDebt};
use crate::domain::payment::{NewPayment, Payment};
use crate::domain::report::{
    AdvancedKpis, CollectionPerformance, CsvExport, Dashboard, ExportKind, MonthlyReport,
    OverdueDebtsReport, PaymentMethodsAnalysis, PerformanceMetrics, TopClient,
};
use crate::domain::types::{ClientId, DebtId, PaymentId};
use crate::domain::user::{AuthResponse, Credentials, NewClientAccount, RegistrationResponse};

mock! {
    pub Api {}

    #[async_trait]
    impl AuthGateway for Api {
        async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse>;
        async fn client_login(&self, credentials: &Credentials) -> ApiResult<AuthResponse>;
        async fn register_client(
            &self,
            account: &NewClientAccount,
        ) -> ApiResult<RegistrationResponse>;
    }

    #[async_trait]
    impl ClientReader for Api {
        async fn list_clients(&self) -> ApiResult<Vec<Client>>;
        async fn list_archived_clients(&self) -> ApiResult<Vec<Client>>;
        async fn get_client(&self, id: ClientId) -> ApiResult<Client>;
    }

    #[async_trait]
    impl ClientWriter for Api {
        async fn create_client(&self, new_client: &NewClient) -> ApiResult<()>;
        async fn update_client(&self, id: ClientId, updates: &UpdateClient) -> ApiResult<()>;
        async fn archive_client(&self, id: ClientId, request: &ArchiveRequest) -> ApiResult<()>;
        async fn unarchive_client(&self, id: ClientId) -> ApiResult<()>;
        async fn delete_client(&self, id: ClientId) -> ApiResult<()>;
    }

    #[async_trait]
    impl DebtReader for Api {
        async fn list_debts(&self) -> ApiResult<Vec<Debt>>;
        async fn list_archived_debts(&self) -> ApiResult<Vec<Debt>>;
        async fn get_debt(&self, id: DebtId) -> ApiResult<Debt>;
    }

    #[async_trait]
    impl DebtWriter for Api {
        async fn create_debt(&self, new_debt: &NewDebt) -> ApiResult<()>;
        async fn update_debt(&self, id: DebtId, updates: &UpdateDebt) -> ApiResult<()>;
        async fn archive_debt(&self, id: DebtId) -> ApiResult<()>;
        async fn unarchive_debt(&self, id: DebtId) -> ApiResult<()>;
        async fn delete_debt(&self, id: DebtId) -> ApiResult<()>;
    }

    #[async_trait]
    impl PaymentReader for Api {
        async fn list_payments(&self) -> ApiResult<Vec<Payment>>;
        async fn list_debt_payments(&self, debt_id: DebtId) -> ApiResult<Vec<Payment>>;
        async fn get_payment(&self, id: PaymentId) -> ApiResult<Payment>;
    }

    #[async_trait]
    impl PaymentWriter for Api {
        async fn create_payment(&self, new_payment: &NewPayment) -> ApiResult<()>;
    }

    #[async_trait]
    impl ReportReader for Api {
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
}
