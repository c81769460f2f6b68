use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::types::{DebtId, PaymentId, PositiveAmount, SanitizedText, TypeConstraintError};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Transfer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Card => "CARD",
            PaymentMethod::Transfer => "TRANSFER",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Efectivo",
            PaymentMethod::Card => "Tarjeta",
            PaymentMethod::Transfer => "Transferencia",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "CASH" => Ok(PaymentMethod::Cash),
            "CARD" => Ok(PaymentMethod::Card),
            "TRANSFER" => Ok(PaymentMethod::Transfer),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown payment method `{other}`"
            ))),
        }
    }
}

/// Display label for a method name as it appears in report maps.
pub fn method_label(raw: &str) -> String {
    raw.parse::<PaymentMethod>()
        .map(|method| method.label().to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Debt reference embedded in payment payloads.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PaymentDebt {
    pub id: DebtId,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    /// Flat reference to the settled debt. See [`Payment::debt_ref`].
    #[serde(default)]
    pub debt_id: Option<DebtId>,
    /// Nested reference used by newer payloads.
    #[serde(default)]
    pub debt: Option<PaymentDebt>,
    pub amount: Decimal,
    #[serde(default)]
    pub payment_date: Option<NaiveDateTime>,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Payment {
    /// The debt this payment settles, whichever way the server referenced it.
    pub fn debt_ref(&self) -> Option<DebtId> {
        self.debt_id.or_else(|| self.debt.as_ref().map(|debt| debt.id))
    }
}

/// Body of `POST /api/payments`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    /// Debt the payment is applied to.
    pub debt_id: DebtId,
    /// Amount paid, never above the debt's remaining balance.
    pub amount: PositiveAmount,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<SanitizedText>,
}
