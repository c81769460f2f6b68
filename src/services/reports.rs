//! Report screens. Each screen tolerates a failed payload and renders zeros
//! with a notice, except CSV exports which either download or fail.
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::api::ReportReader;
use crate::domain::payment::method_label;
use crate::domain::report::{CollectionPerformance, CsvExport, ExportKind, PerformanceMetrics};
use crate::domain::user::User;
use crate::dto::ChartBar;
use crate::dto::reports::{
    CollectionPerformancePage, CollectionRow, MethodAmount, MethodUsage, MonthlyReportPage,
    PaymentMethodsPage, ReportsOverviewPage, TopClientsPage,
};
use crate::forms::reports::OverviewPeriod;
use crate::reporting::{
    average_per_period, bar_heights, month_name, percent_share, percent_variation,
    top_client_totals,
};
use crate::services::dashboard::{CHART_MAX_HEIGHT, CHART_MIN_HEIGHT};
use crate::services::{ServiceResult, ensure_admin, or_placeholder};

/// `2024-03` becomes `Marzo 2024`; anything else is shown as received.
pub fn month_label(raw: &str) -> String {
    raw.split_once('-')
        .and_then(|(year, month)| {
            let name = month_name(month.parse().ok()?);
            (!name.is_empty()).then(|| format!("{name} {year}"))
        })
        .unwrap_or_else(|| raw.to_string())
}

pub fn daily_bars(performance: &PerformanceMetrics) -> Vec<ChartBar> {
    let values: Vec<Decimal> = performance
        .daily_metrics
        .iter()
        .map(|day| day.revenue)
        .collect();
    let heights = bar_heights(&values, CHART_MAX_HEIGHT, CHART_MIN_HEIGHT);
    performance
        .daily_metrics
        .iter()
        .zip(heights)
        .map(|(day, height)| ChartBar {
            label: day.date.clone(),
            value: day.revenue,
            height,
        })
        .collect()
}

/// Collection table rows, each compared with the month before it.
pub fn collection_rows(report: &CollectionPerformance) -> Vec<CollectionRow> {
    let values: Vec<Decimal> = report
        .monthly_collections
        .iter()
        .map(|month| month.amount)
        .collect();
    let heights = bar_heights(&values, CHART_MAX_HEIGHT, CHART_MIN_HEIGHT);
    report
        .monthly_collections
        .iter()
        .zip(heights)
        .enumerate()
        .map(|(index, (month, height))| CollectionRow {
            month: month_label(&month.month),
            amount: month.amount,
            variation: index
                .checked_sub(1)
                .and_then(|previous| values.get(previous))
                .and_then(|previous| percent_variation(month.amount, *previous)),
            height,
        })
        .collect()
}

/// Overview tab: summary, KPIs, the period's daily performance and overdue debts.
pub async fn load_overview<R>(
    repo: &R,
    user: &User,
    period: OverviewPeriod,
) -> ServiceResult<ReportsOverviewPage>
where
    R: ReportReader + ?Sized,
{
    ensure_admin(user)?;

    let (dashboard, kpis, performance, overdue) = futures::join!(
        repo.dashboard(),
        repo.advanced_kpis(),
        repo.performance(period.days()),
        repo.overdue_debts()
    );

    let mut load_error = None;
    let dashboard = or_placeholder(dashboard, "dashboard", &mut load_error)?;
    let kpis = or_placeholder(kpis, "advanced KPIs", &mut load_error)?;
    let performance = or_placeholder(performance, "performance metrics", &mut load_error)?;
    let overdue = or_placeholder(overdue, "overdue debts", &mut load_error)?;

    Ok(ReportsOverviewPage {
        period,
        revenue_variation: percent_variation(kpis.revenue.current_month, kpis.revenue.last_month),
        daily_bars: daily_bars(&performance),
        dashboard,
        kpis,
        performance,
        overdue,
        load_error,
    })
}

pub async fn load_monthly<R>(
    repo: &R,
    user: &User,
    year: i32,
    month: u32,
) -> ServiceResult<MonthlyReportPage>
where
    R: ReportReader + ?Sized,
{
    ensure_admin(user)?;

    let mut load_error = None;
    let report = or_placeholder(
        repo.monthly_report(year, month).await,
        "monthly report",
        &mut load_error,
    )?;

    let methods = report
        .payments_by_method
        .iter()
        .map(|(method, amount)| MethodAmount {
            method: method.clone(),
            label: method_label(method),
            amount: *amount,
            share: percent_share(*amount, report.total_payments),
        })
        .collect();

    Ok(MonthlyReportPage {
        year,
        month,
        month_name: month_name(month),
        report,
        methods,
        load_error,
    })
}

pub async fn load_top_clients<R>(repo: &R, user: &User, limit: u32) -> ServiceResult<TopClientsPage>
where
    R: ReportReader + ?Sized,
{
    ensure_admin(user)?;

    let mut load_error = None;
    let clients = or_placeholder(repo.top_clients(limit).await, "top clients", &mut load_error)?;
    let (total_outstanding, total_paid) = top_client_totals(&clients);

    Ok(TopClientsPage {
        limit,
        clients,
        total_outstanding,
        total_paid,
        load_error,
    })
}

pub async fn load_collection_performance<R>(
    repo: &R,
    user: &User,
    months: u32,
) -> ServiceResult<CollectionPerformancePage>
where
    R: ReportReader + ?Sized,
{
    ensure_admin(user)?;

    let mut load_error = None;
    let report = or_placeholder(
        repo.collection_performance(months).await,
        "collection performance",
        &mut load_error,
    )?;

    let rows = collection_rows(&report);
    let average_per_month =
        average_per_period(report.total_collections, report.monthly_collections.len());

    Ok(CollectionPerformancePage {
        months,
        report,
        rows,
        average_per_month,
        load_error,
    })
}

pub async fn load_payment_methods<R>(
    repo: &R,
    user: &User,
    start: NaiveDate,
    end: NaiveDate,
) -> ServiceResult<PaymentMethodsPage>
where
    R: ReportReader + ?Sized,
{
    ensure_admin(user)?;

    let mut load_error = None;
    let analysis = or_placeholder(
        repo.payment_methods_analysis(start, end).await,
        "payment methods analysis",
        &mut load_error,
    )?;

    let total_count = Decimal::from(analysis.total_payments);
    let methods = analysis
        .method_usage_count
        .keys()
        .chain(analysis.method_usage_amount.keys())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .map(|method| {
            let count = analysis
                .method_usage_count
                .get(method)
                .copied()
                .unwrap_or_default();
            let amount = analysis
                .method_usage_amount
                .get(method)
                .copied()
                .unwrap_or_default();
            MethodUsage {
                method: method.clone(),
                label: method_label(method),
                count,
                amount,
                count_share: percent_share(Decimal::from(count), total_count),
                amount_share: percent_share(amount, analysis.total_amount),
            }
        })
        .collect();
    let average_payment = average_per_period(
        analysis.total_amount,
        usize::try_from(analysis.total_payments).unwrap_or(usize::MAX),
    );

    Ok(PaymentMethodsPage {
        start_date: start.format("%Y-%m-%d").to_string(),
        end_date: end.format("%Y-%m-%d").to_string(),
        analysis,
        methods,
        average_payment,
        load_error,
    })
}

/// Proxies a CSV export. Unlike the screens, a failure here is an error.
pub async fn export_csv<R>(repo: &R, user: &User, kind: ExportKind) -> ServiceResult<CsvExport>
where
    R: ReportReader + ?Sized,
{
    ensure_admin(user)?;

    let export = repo.export_csv(kind).await.map_err(|err| {
        log::error!("Failed to export {}: {err}", kind.path());
        err
    })?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::api::errors::ApiError;
    use crate::api::mock::MockApi;
    use crate::domain::report::{
        DailyMetric, MonthlyCollection, MonthlyReport, PaymentMethodsAnalysis,
    };
    use crate::services::ServiceError;
    use crate::services::fixtures::{admin, client_user};

    fn collections(amounts: &[i64]) -> CollectionPerformance {
        CollectionPerformance {
            total_collections: amounts.iter().copied().map(Decimal::from).sum(),
            monthly_collections: amounts
                .iter()
                .enumerate()
                .map(|(index, amount)| MonthlyCollection {
                    month: format!("2024-{:02}", index + 1),
                    amount: Decimal::from(*amount),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn month_labels_are_spanish() {
        assert_eq!(month_label("2024-03"), "Marzo 2024");
        assert_eq!(month_label("2024-13"), "2024-13");
        assert_eq!(month_label("marzo"), "marzo");
    }

    #[test]
    fn first_collection_row_has_no_variation() {
        let rows = collection_rows(&collections(&[0, 100, 150]));
        assert_eq!(rows[0].variation, None);
        assert_eq!(rows[1].variation, None);
        assert_eq!(rows[2].variation, Some(Decimal::from(50)));
        assert_eq!(rows[2].height, CHART_MAX_HEIGHT);
    }

    #[actix_web::test]
    async fn overview_requests_period_days() {
        let mut api = MockApi::new();
        api.expect_dashboard().returning(|| Ok(Default::default()));
        api.expect_advanced_kpis().returning(|| Ok(Default::default()));
        api.expect_performance()
            .withf(|days| *days == 7)
            .times(1)
            .returning(|_| {
                Ok(PerformanceMetrics {
                    daily_metrics: vec![DailyMetric {
                        date: "2024-05-20".to_string(),
                        revenue: Decimal::from(300),
                        payment_count: 2,
                    }],
                    ..Default::default()
                })
            });
        api.expect_overdue_debts()
            .returning(|| Err(ApiError::Transport("timeout".to_string())));

        let page = load_overview(&api, &admin(), OverviewPeriod::Weekly)
            .await
            .unwrap();
        assert_eq!(page.daily_bars.len(), 1);
        assert_eq!(page.overdue.total_overdue_debts, 0);
        assert!(page.load_error.is_some());
    }

    #[actix_web::test]
    async fn monthly_shares_by_method() {
        let mut api = MockApi::new();
        api.expect_monthly_report()
            .withf(|year, month| *year == 2024 && *month == 2)
            .returning(|_, _| {
                Ok(MonthlyReport {
                    total_payments: Decimal::from(400),
                    payments_by_method: BTreeMap::from([
                        ("CASH".to_string(), Decimal::from(300)),
                        ("CARD".to_string(), Decimal::from(100)),
                    ]),
                    ..Default::default()
                })
            });

        let page = load_monthly(&api, &admin(), 2024, 2).await.unwrap();
        assert_eq!(page.month_name, "Febrero");
        let cash = page.methods.iter().find(|m| m.method == "CASH").unwrap();
        assert_eq!(cash.label, "Efectivo");
        assert_eq!(cash.share, Decimal::from(75));
    }

    #[actix_web::test]
    async fn collection_average_over_empty_window_is_zero() {
        let mut api = MockApi::new();
        api.expect_collection_performance()
            .returning(|_| Ok(CollectionPerformance::default()));

        let page = load_collection_performance(&api, &admin(), 6).await.unwrap();
        assert_eq!(page.average_per_month, Decimal::ZERO);
        assert!(page.rows.is_empty());
    }

    #[actix_web::test]
    async fn payment_methods_merge_count_and_amount() {
        let mut api = MockApi::new();
        api.expect_payment_methods_analysis().returning(|_, _| {
            Ok(PaymentMethodsAnalysis {
                method_usage_count: BTreeMap::from([("CASH".to_string(), 3)]),
                method_usage_amount: BTreeMap::from([
                    ("CASH".to_string(), Decimal::from(300)),
                    ("TRANSFER".to_string(), Decimal::from(100)),
                ]),
                total_amount: Decimal::from(400),
                total_payments: 4,
                ..Default::default()
            })
        });

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let page = load_payment_methods(&api, &admin(), start, end).await.unwrap();
        assert_eq!(page.methods.len(), 2);
        assert_eq!(page.average_payment, Decimal::from(100));
        assert_eq!(page.start_date, "2024-01-01");
    }

    #[actix_web::test]
    async fn export_failure_is_an_error() {
        let mut api = MockApi::new();
        api.expect_export_csv()
            .returning(|_| Err(ApiError::Transport("reset".to_string())));

        assert!(matches!(
            export_csv(&api, &admin(), ExportKind::Debts).await,
            Err(ServiceError::Api(_))
        ));
    }

    #[actix_web::test]
    async fn reports_are_admin_only() {
        let mut api = MockApi::new();
        api.expect_top_clients().never();

        assert!(matches!(
            load_top_clients(&api, &client_user(), 10).await,
            Err(ServiceError::Forbidden)
        ));
    }
}
