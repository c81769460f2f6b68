//! Page payloads handed from services to templates.

use serde::Serialize;

pub mod clients;
pub mod dashboard;
pub mod debts;
pub mod payments;
pub mod portal;
pub mod reports;
pub mod settings;

/// Active/archived tab of the client and debt lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListTab {
    #[default]
    Active,
    Archived,
}

impl ListTab {
    /// Parses the `tab` query parameter, defaulting to the active list.
    pub fn from_query(tab: Option<&str>) -> Self {
        match tab {
            Some("archived") => ListTab::Archived,
            _ => ListTab::Active,
        }
    }
}

/// One bar of a server-rendered chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub value: rust_decimal::Decimal,
    pub height: u32,
}
