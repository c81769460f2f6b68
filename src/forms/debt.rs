use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::debt::NewDebt;
use crate::domain::types::{ClientId, PositiveAmount, SanitizedText};
use crate::forms::{FieldErrors, non_blank};

pub const AMOUNT_NOT_POSITIVE: &str = "El monto debe ser mayor a 0";

/// Form data for creating or editing a debt.
#[derive(Debug, Default, Deserialize)]
pub struct DebtForm {
    /// Identifier of the indebted client, as picked from the select.
    #[serde(default)]
    pub client_id: String,
    /// What was sold on credit.
    #[serde(default)]
    pub description: String,
    /// Amount owed; currency symbols and thousands separators are accepted.
    #[serde(default)]
    pub amount: String,
    /// Due date in `YYYY-MM-DD`.
    #[serde(default)]
    pub due_date: String,
}

impl TryFrom<DebtForm> for NewDebt {
    type Error = FieldErrors;

    fn try_from(form: DebtForm) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();

        let client_id = non_blank(&form.client_id)
            .and_then(|id| id.parse::<i64>().ok())
            .and_then(|id| ClientId::new(id).ok());
        if client_id.is_none() {
            errors.add("client_id", "Debe seleccionar un cliente");
        }

        let description = SanitizedText::new(form.description)
            .map_err(|_| errors.add("description", "La descripción es requerida"))
            .ok();

        let amount = PositiveAmount::parse(&form.amount)
            .map_err(|_| errors.add("amount", AMOUNT_NOT_POSITIVE))
            .ok();

        let due_date = match non_blank(&form.due_date) {
            None => {
                errors.add("due_date", "La fecha límite es requerida");
                None
            }
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| errors.add("due_date", "Fecha inválida"))
                .ok(),
        };

        match (client_id, description, amount, due_date) {
            (Some(client_id), Some(description), Some(amount), Some(due_date)) => Ok(NewDebt {
                client_id,
                amount,
                description,
                due_date,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn form(amount: &str) -> DebtForm {
        DebtForm {
            client_id: "3".to_string(),
            description: "Collar de plata".to_string(),
            amount: amount.to_string(),
            due_date: "2025-01-31".to_string(),
        }
    }

    #[test]
    fn zero_amount_is_rejected() {
        let errors = NewDebt::try_from(form("0")).unwrap_err();
        assert_eq!(errors.get("amount"), Some(AMOUNT_NOT_POSITIVE));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn valid_form_builds_debt() {
        let debt = NewDebt::try_from(form("1,250.75")).unwrap();
        assert_eq!(debt.client_id.get(), 3);
        assert_eq!(debt.amount.get(), Decimal::new(125075, 2));
        assert_eq!(debt.due_date, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }

    #[test]
    fn missing_fields_are_reported() {
        let errors = NewDebt::try_from(DebtForm::default()).unwrap_err();
        for field in ["client_id", "description", "amount", "due_date"] {
            assert!(errors.contains(field), "missing error for {field}");
        }
    }
}
