use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::debt::Debt;
use crate::domain::payment::Payment;

#[derive(Clone, Debug, Default, Serialize)]
pub struct PaymentsPage {
    pub payments: Vec<Payment>,
    pub total: Decimal,
    pub load_error: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PaymentDetailPage {
    pub payment: Payment,
    /// The settled debt, when it could still be loaded.
    pub debt: Option<Debt>,
}
