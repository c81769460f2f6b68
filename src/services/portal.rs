use crate::api::{DebtReader, PaymentReader};
use crate::domain::types::DebtId;
use crate::domain::user::User;
use crate::dto::portal::PortalPage;
use crate::reporting::debt_totals;
use crate::services::{ServiceResult, or_placeholder};

/// Builds the client portal. The API scopes `/api/debts` to the signed-in
/// client, so the list is already theirs. Payments are only fetched for a
/// selected debt that belongs to that list.
pub async fn load_portal<R>(
    repo: &R,
    user: &User,
    selected: Option<DebtId>,
) -> ServiceResult<PortalPage>
where
    R: DebtReader + PaymentReader + ?Sized,
{
    let mut load_error = None;
    let debts = or_placeholder(repo.list_debts().await, "client debts", &mut load_error)?;

    let totals = debt_totals(&debts);
    let active_debts = debts
        .iter()
        .filter(|debt| debt.status.is_open())
        .cloned()
        .collect();

    let selected_debt = selected.and_then(|id| debts.iter().find(|debt| debt.id == id).cloned());
    let payments = match &selected_debt {
        Some(debt) => or_placeholder(
            repo.list_debt_payments(debt.id).await,
            "debt payments",
            &mut load_error,
        )?,
        None => {
            if let Some(id) = selected {
                log::warn!("User {} requested debt {id} outside their account", user.id);
            }
            Vec::new()
        }
    };

    Ok(PortalPage {
        debts,
        active_debts,
        totals,
        selected_debt,
        payments,
        load_error,
    })
}
