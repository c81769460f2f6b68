//! Client-side arithmetic behind the dashboard and report screens.
//!
//! All figures are computed with [`Decimal`] so cents never drift, and every
//! ratio has a defined value when its denominator is zero.
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::domain::debt::Debt;
use crate::domain::report::TopClient;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Spanish name of a 1-based month, empty when out of range.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index as usize))
        .copied()
        .unwrap_or("")
}

/// `(current - previous) / previous * 100`; `None` when there is no baseline.
pub fn percent_variation(current: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    (current - previous)
        .checked_div(previous)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
}

/// `part / total * 100`, zero when the total is zero.
pub fn percent_share(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(total)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .unwrap_or_default()
}

pub fn average_per_period(total: Decimal, periods: usize) -> Decimal {
    if periods == 0 {
        return Decimal::ZERO;
    }
    total / Decimal::from(periods)
}

/// Chart bar sizes in pixels: proportional to the largest value, never below `min`.
pub fn bar_heights(values: &[Decimal], max: u32, min: u32) -> Vec<u32> {
    let peak = values.iter().copied().max().unwrap_or_default();
    if peak <= Decimal::ZERO {
        return vec![0; values.len()];
    }
    values
        .iter()
        .map(|value| {
            let scaled = (*value / peak * Decimal::from(max)).round();
            scaled.to_u32().unwrap_or(0).max(min)
        })
        .collect()
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Mexican peso formatting: `$1,234.50`. Keeps at least two decimals and
/// every further digit the value carries.
pub fn format_currency(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let mut value = amount.abs().normalize();
    if value.scale() < 2 {
        value.rescale(2);
    }
    let text = value.to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{sign}${}.{fraction}", group_thousands(integer))
}

fn one_decimal(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(1);
    rounded.rescale(1);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Signed variation such as `+12.5%` or `-3.0%`.
pub fn format_percentage(value: Decimal) -> String {
    let rounded = one_decimal(value);
    if rounded.is_sign_negative() {
        format!("{rounded}%")
    } else {
        format!("+{rounded}%")
    }
}

/// Variation cell; `-` when there is no baseline.
pub fn format_variation(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), format_percentage)
}

/// Unsigned share such as `42.9%`.
pub fn format_share(value: Decimal) -> String {
    format!("{}%", one_decimal(value))
}

/// Sums shown above a list of debts.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq)]
pub struct DebtTotals {
    pub total: Decimal,
    pub paid: Decimal,
    pub remaining: Decimal,
}

pub fn debt_totals(debts: &[Debt]) -> DebtTotals {
    debts.iter().fold(DebtTotals::default(), |acc, debt| DebtTotals {
        total: acc.total + debt.total(),
        paid: acc.paid + debt.paid(),
        remaining: acc.remaining + debt.remaining(),
    })
}

/// `(outstanding, paid)` across a top-clients ranking.
pub fn top_client_totals(clients: &[TopClient]) -> (Decimal, Decimal) {
    clients.iter().fold((Decimal::ZERO, Decimal::ZERO), |acc, row| {
        (acc.0 + row.outstanding_debt, acc.1 + row.total_paid)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn variation_without_baseline_is_none() {
        assert_eq!(percent_variation(dec("100"), Decimal::ZERO), None);
        assert_eq!(format_variation(percent_variation(dec("100"), Decimal::ZERO)), "-");
    }

    #[test]
    fn variation_is_relative_to_previous() {
        assert_eq!(percent_variation(dec("150"), dec("100")), Some(dec("50")));
        assert_eq!(percent_variation(dec("50"), dec("100")), Some(dec("-50")));
        assert_eq!(format_variation(Some(dec("12.345"))), "+12.3%");
        assert_eq!(format_variation(Some(dec("-3"))), "-3.0%");
        assert_eq!(format_percentage(dec("-0.01")), "+0.0%");
    }

    #[test]
    fn share_and_average_handle_zero() {
        assert_eq!(percent_share(dec("10"), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(format_share(percent_share(dec("3"), dec("7"))), "42.9%");
        assert_eq!(average_per_period(dec("600"), 0), Decimal::ZERO);
        assert_eq!(average_per_period(dec("600"), 6), dec("100"));
    }

    #[test]
    fn currency_groups_thousands_and_keeps_cents() {
        assert_eq!(format_currency(dec("1234567.5")), "$1,234,567.50");
        assert_eq!(format_currency(dec("999")), "$999.00");
        assert_eq!(format_currency(dec("1000.05")), "$1,000.05");
        assert_eq!(format_currency(dec("0.125")), "$0.125");
        assert_eq!(format_currency(dec("-2500")), "-$2,500.00");
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn bars_scale_to_peak_with_floor() {
        let values = [dec("100"), dec("50"), dec("1"), Decimal::ZERO];
        assert_eq!(bar_heights(&values, 200, 20), vec![200, 100, 20, 20]);
        assert_eq!(bar_heights(&[Decimal::ZERO, Decimal::ZERO], 200, 20), vec![0, 0]);
        assert!(bar_heights(&[], 200, 20).is_empty());
    }

    #[test]
    fn month_names_are_one_based() {
        assert_eq!(month_name(1), "Enero");
        assert_eq!(month_name(12), "Diciembre");
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
    }
}
