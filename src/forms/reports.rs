//! Query selectors for the report screens. Unknown values fall back to the
//! screen's default window instead of failing the request.
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

pub const TOP_CLIENT_LIMITS: [u32; 4] = [5, 10, 20, 50];
pub const DEFAULT_TOP_CLIENT_LIMIT: u32 = 10;
pub const COLLECTION_WINDOWS: [u32; 3] = [3, 6, 12];
pub const DEFAULT_COLLECTION_MONTHS: u32 = 6;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OverviewPeriod {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl OverviewPeriod {
    pub const ALL: [OverviewPeriod; 4] = [
        OverviewPeriod::Daily,
        OverviewPeriod::Weekly,
        OverviewPeriod::Monthly,
        OverviewPeriod::Yearly,
    ];

    /// Days of history requested from the performance endpoint.
    pub fn days(self) -> u32 {
        match self {
            OverviewPeriod::Daily => 1,
            OverviewPeriod::Weekly => 7,
            OverviewPeriod::Monthly => 30,
            OverviewPeriod::Yearly => 365,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OverviewPeriod::Daily => "Diario",
            OverviewPeriod::Weekly => "Semanal",
            OverviewPeriod::Monthly => "Mensual",
            OverviewPeriod::Yearly => "Anual",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            OverviewPeriod::Daily => "daily",
            OverviewPeriod::Weekly => "weekly",
            OverviewPeriod::Monthly => "monthly",
            OverviewPeriod::Yearly => "yearly",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OverviewQuery {
    pub period: Option<String>,
}

impl OverviewQuery {
    pub fn period(&self) -> OverviewPeriod {
        self.period
            .as_deref()
            .and_then(|raw| {
                OverviewPeriod::ALL
                    .into_iter()
                    .find(|period| period.key() == raw)
            })
            .unwrap_or_default()
    }
}

/// Parses a numeric query value; blank or malformed input yields `None`.
fn parse_number<T: FromStr>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|value| value.trim().parse().ok())
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthlyQuery {
    /// Four-digit year, kept raw so a malformed value falls back to today.
    pub year: Option<String>,
    /// 1-based month.
    pub month: Option<String>,
}

impl MonthlyQuery {
    /// `(year, month)`; missing or invalid parts default to `today`'s.
    pub fn resolve(&self, today: NaiveDate) -> (i32, u32) {
        let year = parse_number::<i32>(self.year.as_deref())
            .filter(|year| (2000..=2100).contains(year))
            .unwrap_or_else(|| today.year());
        let month = parse_number::<u32>(self.month.as_deref())
            .filter(|month| (1..=12).contains(month))
            .unwrap_or_else(|| today.month());
        (year, month)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TopClientsQuery {
    /// One of [`TOP_CLIENT_LIMITS`].
    pub limit: Option<String>,
}

impl TopClientsQuery {
    pub fn limit(&self) -> u32 {
        parse_number::<u32>(self.limit.as_deref())
            .filter(|limit| TOP_CLIENT_LIMITS.contains(limit))
            .unwrap_or(DEFAULT_TOP_CLIENT_LIMIT)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CollectionQuery {
    /// One of [`COLLECTION_WINDOWS`].
    pub months: Option<String>,
}

impl CollectionQuery {
    pub fn months(&self) -> u32 {
        parse_number::<u32>(self.months.as_deref())
            .filter(|months| COLLECTION_WINDOWS.contains(months))
            .unwrap_or(DEFAULT_COLLECTION_MONTHS)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PaymentMethodsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(|value| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok())
}

impl PaymentMethodsQuery {
    /// Inclusive range, the last three months by default. A reversed range
    /// is swapped.
    pub fn resolve(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let end = parse_date(self.end_date.as_deref()).unwrap_or(today);
        let start = parse_date(self.start_date.as_deref()).unwrap_or_else(|| {
            end.checked_sub_months(Months::new(3)).unwrap_or(end)
        });
        if start > end { (end, start) } else { (start, end) }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::web;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    #[test]
    fn overview_period_maps_to_days() {
        let query = OverviewQuery {
            period: Some("weekly".to_string()),
        };
        assert_eq!(query.period().days(), 7);
        assert_eq!(OverviewQuery::default().period(), OverviewPeriod::Monthly);
        let query = OverviewQuery {
            period: Some("hourly".to_string()),
        };
        assert_eq!(query.period().days(), 30);
    }

    #[test]
    fn monthly_defaults_to_current_month() {
        assert_eq!(MonthlyQuery::default().resolve(today()), (2024, 5));
        let query = MonthlyQuery {
            year: Some("2023".to_string()),
            month: Some("13".to_string()),
        };
        assert_eq!(query.resolve(today()), (2023, 5));
    }

    #[test]
    fn malformed_query_values_fall_back() {
        let query = web::Query::<MonthlyQuery>::from_query("year=abc&month=").unwrap();
        assert_eq!(query.resolve(today()), (2024, 5));

        let query = web::Query::<CollectionQuery>::from_query("months=").unwrap();
        assert_eq!(query.months(), DEFAULT_COLLECTION_MONTHS);

        let query = web::Query::<TopClientsQuery>::from_query("limit=diez").unwrap();
        assert_eq!(query.limit(), DEFAULT_TOP_CLIENT_LIMIT);
    }

    #[test]
    fn discrete_windows_fall_back_to_defaults() {
        let limit = |raw: &str| TopClientsQuery {
            limit: Some(raw.to_string()),
        };
        assert_eq!(limit("20").limit(), 20);
        assert_eq!(limit("7").limit(), 10);
        let months = CollectionQuery {
            months: Some(" 12 ".to_string()),
        };
        assert_eq!(months.months(), 12);
        assert_eq!(CollectionQuery { months: None }.months(), 6);
    }

    #[test]
    fn payment_methods_default_to_last_three_months() {
        let (start, end) = PaymentMethodsQuery::default().resolve(today());
        assert_eq!(end, today());
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 20).unwrap());

        let query = PaymentMethodsQuery {
            start_date: Some("2024-06-01".to_string()),
            end_date: Some("2024-01-01".to_string()),
        };
        let (start, end) = query.resolve(today());
        assert!(start < end);
    }
}
