use serde::Serialize;

use crate::domain::debt::Debt;
use crate::domain::payment::Payment;
use crate::reporting::DebtTotals;

/// Read-only view a client gets of their own account.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PortalPage {
    pub debts: Vec<Debt>,
    pub active_debts: Vec<Debt>,
    pub totals: DebtTotals,
    pub selected_debt: Option<Debt>,
    pub payments: Vec<Payment>,
    pub load_error: Option<String>,
}
