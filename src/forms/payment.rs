use serde::Deserialize;

use crate::domain::debt::Debt;
use crate::domain::payment::{NewPayment, PaymentMethod};
use crate::domain::types::{PositiveAmount, SanitizedText};
use crate::forms::FieldErrors;
use crate::forms::debt::AMOUNT_NOT_POSITIVE;

pub const EXCEEDS_REMAINING: &str = "El pago no puede ser mayor al restante de la deuda";

#[derive(Debug, Default, Deserialize)]
pub struct PaymentForm {
    /// Amount paid; may not exceed the debt's remaining balance.
    #[serde(default)]
    pub amount: String,
    /// `CASH`, `CARD` or `TRANSFER`.
    #[serde(default)]
    pub payment_method: String,
    /// Optional free-text notes.
    #[serde(default)]
    pub notes: String,
}

impl PaymentForm {
    /// Validates the payment against the debt it settles.
    pub fn into_new_payment(self, debt: &Debt) -> Result<NewPayment, FieldErrors> {
        let mut errors = FieldErrors::new();

        let amount = match PositiveAmount::parse(&self.amount) {
            Err(_) => {
                errors.add("amount", AMOUNT_NOT_POSITIVE);
                None
            }
            Ok(amount) if amount.get() > debt.remaining() => {
                errors.add("amount", EXCEEDS_REMAINING);
                None
            }
            Ok(amount) => Some(amount),
        };

        let payment_method = self
            .payment_method
            .parse::<PaymentMethod>()
            .map_err(|_| errors.add("payment_method", "Método de pago inválido"))
            .ok();

        match (amount, payment_method) {
            (Some(amount), Some(payment_method)) => Ok(NewPayment {
                debt_id: debt.id,
                amount,
                payment_method,
                notes: SanitizedText::optional(self.notes),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::debt::DebtStatus;
    use crate::domain::types::DebtId;

    fn debt(total: i64, remaining: Option<i64>) -> Debt {
        Debt {
            id: DebtId::new(5).unwrap(),
            client: None,
            amount: None,
            total_amount: Some(Decimal::from(total)),
            remaining_amount: remaining.map(Decimal::from),
            description: None,
            due_date: None,
            status: DebtStatus::Active,
            created_at: None,
            archived: false,
        }
    }

    fn form(amount: &str, method: &str) -> PaymentForm {
        PaymentForm {
            amount: amount.to_string(),
            payment_method: method.to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn amount_above_remaining_is_rejected() {
        let errors = form("600", "CASH")
            .into_new_payment(&debt(1000, Some(500)))
            .unwrap_err();
        assert_eq!(errors.get("amount"), Some(EXCEEDS_REMAINING));
    }

    #[test]
    fn remaining_falls_back_to_total() {
        let payment = form("1000", "CARD")
            .into_new_payment(&debt(1000, None))
            .unwrap();
        assert_eq!(payment.amount.get(), Decimal::from(1000));
        assert_eq!(payment.debt_id.get(), 5);
    }

    #[test]
    fn method_must_be_known() {
        let errors = form("100", "CHEQUE")
            .into_new_payment(&debt(1000, Some(500)))
            .unwrap_err();
        assert!(errors.contains("payment_method"));
        assert!(!errors.contains("amount"));
    }

    #[test]
    fn zero_amount_is_rejected() {
        let errors = form("0", "TRANSFER")
            .into_new_payment(&debt(1000, Some(500)))
            .unwrap_err();
        assert_eq!(errors.get("amount"), Some(AMOUNT_NOT_POSITIVE));
    }
}
