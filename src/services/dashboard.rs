use rust_decimal::Decimal;

use crate::api::ReportReader;
use crate::domain::payment::method_label;
use crate::domain::report::Dashboard;
use crate::domain::user::User;
use crate::dto::ChartBar;
use crate::dto::dashboard::{AdminDashboardPage, MethodShare};
use crate::reporting::{bar_heights, percent_share, percent_variation};
use crate::services::{ServiceResult, ensure_admin, or_placeholder};

pub const CHART_MAX_HEIGHT: u32 = 200;
pub const CHART_MIN_HEIGHT: u32 = 20;

/// Payment-method distribution as shares of all counted payments.
pub fn method_shares(dashboard: &Dashboard) -> Vec<MethodShare> {
    let total: u64 = dashboard.payment_method_distribution.values().sum();
    dashboard
        .payment_method_distribution
        .iter()
        .map(|(method, count)| MethodShare {
            method: method.clone(),
            label: method_label(method),
            count: *count,
            share: percent_share(Decimal::from(*count), Decimal::from(total)),
        })
        .collect()
}

/// Monthly revenue bars, sized against the best month.
pub fn trend_bars(dashboard: &Dashboard) -> Vec<ChartBar> {
    let values: Vec<Decimal> = dashboard
        .monthly_trend
        .iter()
        .map(|month| month.revenue)
        .collect();
    let heights = bar_heights(&values, CHART_MAX_HEIGHT, CHART_MIN_HEIGHT);
    dashboard
        .monthly_trend
        .iter()
        .zip(heights)
        .map(|(month, height)| ChartBar {
            label: month.month.clone(),
            value: month.revenue,
            height,
        })
        .collect()
}

/// Loads the dashboard summary and KPIs concurrently.
pub async fn load_admin_dashboard<R>(repo: &R, user: &User) -> ServiceResult<AdminDashboardPage>
where
    R: ReportReader + ?Sized,
{
    ensure_admin(user)?;

    let (dashboard, kpis) = futures::join!(repo.dashboard(), repo.advanced_kpis());

    let mut load_error = None;
    let dashboard = or_placeholder(dashboard, "dashboard", &mut load_error)?;
    let kpis = or_placeholder(kpis, "advanced KPIs", &mut load_error)?;

    Ok(AdminDashboardPage {
        revenue_variation: percent_variation(kpis.revenue.current_month, kpis.revenue.last_month),
        average_payment_variation: percent_variation(
            kpis.average_payment.current,
            kpis.average_payment.last_month,
        ),
        method_shares: method_shares(&dashboard),
        trend_bars: trend_bars(&dashboard),
        dashboard,
        kpis,
        load_error,
    })
}
