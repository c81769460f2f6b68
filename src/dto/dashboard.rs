use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::report::{AdvancedKpis, Dashboard};
use crate::dto::ChartBar;

/// Share of each payment method in the distribution card.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MethodShare {
    pub method: String,
    pub label: String,
    pub count: u64,
    pub share: Decimal,
}

/// Data required to render the admin dashboard.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AdminDashboardPage {
    pub dashboard: Dashboard,
    pub kpis: AdvancedKpis,
    pub revenue_variation: Option<Decimal>,
    pub average_payment_variation: Option<Decimal>,
    pub method_shares: Vec<MethodShare>,
    pub trend_bars: Vec<ChartBar>,
    /// Set when a payload could not be loaded and zeros are shown instead.
    pub load_error: Option<String>,
}
