use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::report::{
    AdvancedKpis, CollectionPerformance, Dashboard, MonthlyReport, OverdueDebtsReport,
    PaymentMethodsAnalysis, PerformanceMetrics, TopClient,
};
use crate::dto::ChartBar;
use crate::forms::reports::OverviewPeriod;

#[derive(Clone, Debug, Default, Serialize)]
pub struct ReportsOverviewPage {
    pub period: OverviewPeriod,
    pub dashboard: Dashboard,
    pub kpis: AdvancedKpis,
    pub performance: PerformanceMetrics,
    pub overdue: OverdueDebtsReport,
    pub revenue_variation: Option<Decimal>,
    pub daily_bars: Vec<ChartBar>,
    pub load_error: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct MethodAmount {
    pub method: String,
    pub label: String,
    pub amount: Decimal,
    pub share: Decimal,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct MonthlyReportPage {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub report: MonthlyReport,
    pub methods: Vec<MethodAmount>,
    pub load_error: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct TopClientsPage {
    pub limit: u32,
    pub clients: Vec<TopClient>,
    pub total_outstanding: Decimal,
    pub total_paid: Decimal,
    pub load_error: Option<String>,
}

/// One month of the collection table with its month-over-month change.
#[derive(Clone, Debug, Serialize)]
pub struct CollectionRow {
    pub month: String,
    pub amount: Decimal,
    pub variation: Option<Decimal>,
    pub height: u32,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct CollectionPerformancePage {
    pub months: u32,
    pub report: CollectionPerformance,
    pub rows: Vec<CollectionRow>,
    pub average_per_month: Decimal,
    pub load_error: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct MethodUsage {
    pub method: String,
    pub label: String,
    pub count: u64,
    pub amount: Decimal,
    pub count_share: Decimal,
    pub amount_share: Decimal,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct PaymentMethodsPage {
    pub start_date: String,
    pub end_date: String,
    pub analysis: PaymentMethodsAnalysis,
    pub methods: Vec<MethodUsage>,
    pub average_payment: Decimal,
    pub load_error: Option<String>,
}
