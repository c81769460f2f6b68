use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::debt::Debt;
use crate::domain::payment::{Payment, PaymentMethod};
use crate::dto::ListTab;
use crate::reporting::DebtTotals;

#[derive(Clone, Debug, Default, Serialize)]
pub struct DebtsPage {
    pub tab: ListTab,
    pub debts: Vec<Debt>,
    /// Active clients offered in the new-debt form.
    pub clients: Vec<Client>,
    pub totals: DebtTotals,
    pub load_error: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PaymentMethodOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl From<PaymentMethod> for PaymentMethodOption {
    fn from(method: PaymentMethod) -> Self {
        Self {
            value: method.as_str(),
            label: method.label(),
        }
    }
}

/// Debt detail with its payment history and the add-payment form.
#[derive(Clone, Debug, Serialize)]
pub struct DebtDetailPage {
    pub debt: Debt,
    pub payments: Vec<Payment>,
    pub clients: Vec<Client>,
    pub payment_methods: Vec<PaymentMethodOption>,
    /// Payments are only offered while something remains to be paid.
    pub accepts_payments: bool,
}
