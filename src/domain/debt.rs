use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, DebtId, PositiveAmount, SanitizedText};

/// Server-computed lifecycle of a debt.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum DebtStatus {
    #[default]
    Pending,
    Active,
    Paid,
    /// Fully paid, as reported by servers that close debts instead of
    /// marking them paid.
    Settled,
    Overdue,
    /// Any status this build does not know yet.
    #[serde(other)]
    Unknown,
}

impl DebtStatus {
    /// Label shown on badges.
    pub fn label(self) -> &'static str {
        match self {
            DebtStatus::Pending => "Pendiente",
            DebtStatus::Active => "Activa",
            DebtStatus::Paid => "Pagada",
            DebtStatus::Settled => "Liquidada",
            DebtStatus::Overdue => "Vencida",
            DebtStatus::Unknown => "Desconocido",
        }
    }

    /// Whether the debt still counts as outstanding.
    pub fn is_open(self) -> bool {
        !matches!(self, DebtStatus::Paid | DebtStatus::Settled)
    }
}

/// Client reference embedded in debt payloads.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DebtClient {
    pub id: ClientId,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A debt as served by the API. Serializes through [`DebtView`] so
/// templates receive the derived amounts.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", into = "DebtView")]
pub struct Debt {
    pub id: DebtId,
    /// Owner of the debt; missing in some client-scoped payloads.
    #[serde(default)]
    pub client: Option<DebtClient>,
    /// Legacy name of the original amount.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Original amount of the sale.
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    /// Balance still owed, maintained by the server as payments land.
    #[serde(default)]
    pub remaining_amount: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: DebtStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub archived: bool,
}

impl Debt {
    /// Original amount of the debt. Older payloads only carry `amount`.
    pub fn total(&self) -> Decimal {
        self.total_amount.or(self.amount).unwrap_or_default()
    }

    /// Balance still owed. Falls back to the total when the server omits it.
    pub fn remaining(&self) -> Decimal {
        self.remaining_amount.unwrap_or_else(|| self.total())
    }

    /// Amount already settled against the debt.
    pub fn paid(&self) -> Decimal {
        (self.total() - self.remaining()).max(Decimal::ZERO)
    }

    pub fn client_name(&self) -> &str {
        self.client.as_ref().map_or("", |client| client.name.as_str())
    }
}

/// Template shape of a [`Debt`], with amounts resolved and the status labelled.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtView {
    pub id: DebtId,
    pub client: Option<DebtClient>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub status: DebtStatus,
    pub status_label: &'static str,
    pub created_at: Option<NaiveDateTime>,
    pub archived: bool,
    pub total: Decimal,
    pub paid: Decimal,
    pub remaining: Decimal,
}

impl From<Debt> for DebtView {
    fn from(debt: Debt) -> Self {
        Self {
            total: debt.total(),
            paid: debt.paid(),
            remaining: debt.remaining(),
            status_label: debt.status.label(),
            id: debt.id,
            client: debt.client,
            description: debt.description,
            due_date: debt.due_date,
            status: debt.status,
            created_at: debt.created_at,
            archived: debt.archived,
        }
    }
}

/// Splits a debt list by the archived flag into `(active, archived)`.
pub fn partition_archived(debts: Vec<Debt>) -> (Vec<Debt>, Vec<Debt>) {
    debts.into_iter().partition(|debt| !debt.archived)
}

/// Body of `POST /api/debts`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewDebt {
    /// Client the sale is charged to.
    pub client_id: ClientId,
    /// Amount owed, strictly positive.
    pub amount: PositiveAmount,
    /// What was sold.
    pub description: SanitizedText,
    /// Date the balance is due.
    pub due_date: NaiveDate,
}

/// Body of `PUT /api/debts/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDebt {
    pub client_id: ClientId,
    pub amount: PositiveAmount,
    /// Mirrors `amount`; the server keys the new total off this field.
    pub total_amount: PositiveAmount,
    pub description: SanitizedText,
    pub due_date: NaiveDate,
}

impl From<NewDebt> for UpdateDebt {
    fn from(debt: NewDebt) -> Self {
        Self {
            client_id: debt.client_id,
            amount: debt.amount,
            total_amount: debt.amount,
            description: debt.description,
            due_date: debt.due_date,
        }
    }
}
