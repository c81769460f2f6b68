use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;

use crate::api::errors::ApiResult;
use crate::api::{HttpApi, ReportReader};
use crate::domain::report::{
    AdvancedKpis, CollectionPerformance, CsvExport, Dashboard, ExportKind, MonthlyReport,
    OverdueDebtsReport, PaymentMethodsAnalysis, PerformanceMetrics, TopClient,
};

#[async_trait]
impl ReportReader for HttpApi {
    async fn dashboard(&self) -> ApiResult<Dashboard> {
        self.send_json(self.request(Method::GET, "/api/dashboard"))
            .await
    }

    async fn advanced_kpis(&self) -> ApiResult<AdvancedKpis> {
        self.send_json(self.request(Method::GET, "/api/dashboard/advanced-kpis"))
            .await
    }

    async fn performance(&self, days: u32) -> ApiResult<PerformanceMetrics> {
        self.send_json(
            self.request(Method::GET, "/api/dashboard/performance")
                .query(&[("days", days)]),
        )
        .await
    }

    async fn monthly_report(&self, year: i32, month: u32) -> ApiResult<MonthlyReport> {
        self.send_json(self.request(
            Method::GET,
            &format!("/api/reports/monthly/{year}/{month}"),
        ))
        .await
    }

    async fn top_clients(&self, limit: u32) -> ApiResult<Vec<TopClient>> {
        self.send_json(
            self.request(Method::GET, "/api/reports/top-clients")
                .query(&[("limit", limit)]),
        )
        .await
    }

    async fn collection_performance(&self, months: u32) -> ApiResult<CollectionPerformance> {
        self.send_json(
            self.request(Method::GET, "/api/reports/collection-performance")
                .query(&[("months", months)]),
        )
        .await
    }

    /// The API expects ISO date-times, so the range covers both days entirely.
    async fn payment_methods_analysis(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ApiResult<PaymentMethodsAnalysis> {
        let start = format!("{}T00:00:00", start.format("%Y-%m-%d"));
        let end = format!("{}T23:59:59", end.format("%Y-%m-%d"));
        self.send_json(
            self.request(Method::GET, "/api/reports/payment-methods-analysis")
                .query(&[("startDate", start), ("endDate", end)]),
        )
        .await
    }

    async fn overdue_debts(&self) -> ApiResult<OverdueDebtsReport> {
        self.send_json(self.request(Method::GET, "/api/reports/overdue-debts"))
            .await
    }

    async fn export_csv(&self, kind: ExportKind) -> ApiResult<CsvExport> {
        let response = self
            .send_raw(self.request(
                Method::GET,
                &format!("/api/reports/export/{}", kind.path()),
            ))
            .await?;
        let bytes = response.bytes().await?;
        Ok(CsvExport {
            bytes: bytes.to_vec(),
        })
    }
}
