//! Aggregate payloads served by the dashboard and reports endpoints.
//!
//! Every field defaults when absent so a partial or zeroed payload still
//! renders; screens fall back to [`Default`] when a fetch fails.
use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::types::ClientId;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardSummary {
    pub today_revenue: Decimal,
    pub month_revenue: Decimal,
    pub total_outstanding_debt: Decimal,
    pub active_clients: u64,
    pub total_clients: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RecentPayment {
    pub id: i64,
    pub amount: Decimal,
    pub payment_method: String,
    pub payment_date: Option<String>,
    pub client_name: String,
    pub debt_description: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TopDebtor {
    pub client_id: i64,
    pub client_name: String,
    pub outstanding_debt: Decimal,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MonthlyTrend {
    /// `YYYY-MM`.
    pub month: String,
    pub revenue: Decimal,
    pub payment_count: u64,
}

/// `GET /api/dashboard`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Dashboard {
    pub summary: DashboardSummary,
    pub recent_payments: Vec<RecentPayment>,
    pub top_debtors: Vec<TopDebtor>,
    pub payment_method_distribution: BTreeMap<String, u64>,
    pub monthly_trend: Vec<MonthlyTrend>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RevenueKpi {
    pub current_month: Decimal,
    pub last_month: Decimal,
    pub growth: Decimal,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AveragePaymentKpi {
    pub current: Decimal,
    pub last_month: Decimal,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientsKpi {
    pub total: u64,
    pub active: u64,
    pub new_this_month: u64,
}

/// `GET /api/dashboard/advanced-kpis`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AdvancedKpis {
    pub revenue: RevenueKpi,
    pub average_payment: AveragePaymentKpi,
    pub collection_rate: Decimal,
    pub clients: ClientsKpi,
    pub payments_this_month: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyMetric {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub revenue: Decimal,
    pub payment_count: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PerformanceAverages {
    pub daily_revenue: Decimal,
    pub daily_payments: Decimal,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PerformanceTotals {
    pub revenue: Decimal,
    pub payments: u64,
}

/// `GET /api/dashboard/performance?days=N`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub daily_metrics: Vec<DailyMetric>,
    pub best_day: Option<DailyMetric>,
    pub worst_day: Option<DailyMetric>,
    pub averages: PerformanceAverages,
    pub totals: PerformanceTotals,
}

/// `GET /api/reports/monthly/{year}/{month}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MonthlyReport {
    pub month: String,
    pub total_payments: Decimal,
    pub payments_by_method: BTreeMap<String, Decimal>,
    pub total_outstanding_debt: Decimal,
    pub clients_with_active_debts: u64,
    pub total_new_debt: Decimal,
    pub new_debts_count: u64,
    pub settled_debts_count: u64,
    pub total_payments_count: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClientRef {
    pub id: ClientId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// One row of `GET /api/reports/top-clients?limit=N`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopClient {
    pub client: ClientRef,
    #[serde(default)]
    pub outstanding_debt: Decimal,
    #[serde(default)]
    pub total_paid: Decimal,
    #[serde(default)]
    pub payments_count: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MonthlyCollection {
    pub month: String,
    pub amount: Decimal,
}

/// `GET /api/reports/collection-performance?months=N`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectionPerformance {
    pub total_collections: Decimal,
    pub monthly_collections: Vec<MonthlyCollection>,
    pub average_growth_rate: Decimal,
    pub total_payments: u64,
}

/// `GET /api/reports/payment-methods-analysis`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentMethodsAnalysis {
    pub method_usage_count: BTreeMap<String, u64>,
    pub method_usage_amount: BTreeMap<String, Decimal>,
    pub most_popular_method: Option<String>,
    pub highest_volume_method: Option<String>,
    pub total_amount: Decimal,
    pub total_payments: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverdueClientSummary {
    pub client: ClientRef,
    #[serde(default)]
    pub total_overdue: Decimal,
    #[serde(default)]
    pub debts_count: u64,
}

/// `GET /api/reports/overdue-debts`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct OverdueDebtsReport {
    pub total_overdue_amount: Decimal,
    pub total_overdue_debts: u64,
    pub clients_with_overdue: u64,
    pub client_summaries: Vec<OverdueClientSummary>,
}

/// Which CSV export to download.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Debts,
    Payments,
}

impl ExportKind {
    pub fn path(self) -> &'static str {
        match self {
            ExportKind::Debts => "debts",
            ExportKind::Payments => "payments",
        }
    }

    /// Download name prefix, followed by the export date.
    pub fn file_prefix(self) -> &'static str {
        match self {
            ExportKind::Debts => "deudas",
            ExportKind::Payments => "pagos",
        }
    }
}

/// Raw CSV document proxied from the export endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct CsvExport {
    pub bytes: Vec<u8>,
}
