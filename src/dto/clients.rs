use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::debt::Debt;
use crate::dto::ListTab;
use crate::reporting::DebtTotals;

#[derive(Clone, Debug, Default, Serialize)]
pub struct ClientsPage {
    pub tab: ListTab,
    pub clients: Vec<Client>,
    pub load_error: Option<String>,
}

/// Client detail with the debts recorded against them.
#[derive(Clone, Debug, Serialize)]
pub struct ClientDetailPage {
    pub client: Client,
    pub debts: Vec<Debt>,
    pub totals: DebtTotals,
}
