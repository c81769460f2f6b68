use crate::api::{ClientReader, DebtReader, DebtWriter, PaymentReader};
use crate::domain::debt::{NewDebt, UpdateDebt, partition_archived};
use crate::domain::payment::PaymentMethod;
use crate::domain::types::DebtId;
use crate::domain::user::User;
use crate::dto::ListTab;
use crate::dto::debts::{DebtDetailPage, DebtsPage};
use crate::forms::debt::DebtForm;
use crate::reporting::debt_totals;
use crate::services::{ServiceResult, ensure_admin, or_placeholder};

/// Loads one tab of the debt list together with the clients offered in the
/// new-debt form.
pub async fn list_debts<R>(repo: &R, user: &User, tab: ListTab) -> ServiceResult<DebtsPage>
where
    R: DebtReader + ClientReader + ?Sized,
{
    ensure_admin(user)?;

    let mut load_error = None;
    let (debts, clients) = match tab {
        ListTab::Active => {
            let (debts, clients) = futures::join!(repo.list_debts(), repo.list_clients());
            let debts = or_placeholder(debts, "debts", &mut load_error)?;
            (partition_archived(debts).0, clients)
        }
        ListTab::Archived => {
            let (debts, clients) =
                futures::join!(repo.list_archived_debts(), repo.list_clients());
            let debts = or_placeholder(debts, "archived debts", &mut load_error)?;
            (debts, clients)
        }
    };
    let clients = or_placeholder(clients, "clients", &mut load_error)?
        .into_iter()
        .filter(|client| !client.archived)
        .collect();
    let totals = debt_totals(&debts);

    Ok(DebtsPage {
        tab,
        debts,
        clients,
        totals,
        load_error,
    })
}

/// Debt detail with its payment history.
pub async fn get_debt_detail<R>(
    repo: &R,
    user: &User,
    debt_id: DebtId,
) -> ServiceResult<DebtDetailPage>
where
    R: DebtReader + PaymentReader + ClientReader + ?Sized,
{
    ensure_admin(user)?;

    let (debt, payments, clients) = futures::try_join!(
        repo.get_debt(debt_id),
        repo.list_debt_payments(debt_id),
        repo.list_clients()
    )
    .map_err(|err| {
        log::error!("Failed to load debt {debt_id}: {err}");
        err
    })?;

    let accepts_payments = debt.remaining() > rust_decimal::Decimal::ZERO;

    Ok(DebtDetailPage {
        debt,
        payments,
        clients: clients.into_iter().filter(|client| !client.archived).collect(),
        payment_methods: PaymentMethod::ALL.into_iter().map(Into::into).collect(),
        accepts_payments,
    })
}

pub async fn create_debt<R>(repo: &R, user: &User, form: DebtForm) -> ServiceResult<()>
where
    R: DebtWriter + ?Sized,
{
    ensure_admin(user)?;

    let new_debt = NewDebt::try_from(form)?;

    repo.create_debt(&new_debt).await.map_err(|err| {
        log::error!("Failed to add a debt: {err}");
        err
    })?;

    Ok(())
}

/// Rewrites the debt; the edited amount becomes the new total.
pub async fn update_debt<R>(
    repo: &R,
    user: &User,
    debt_id: DebtId,
    form: DebtForm,
) -> ServiceResult<()>
where
    R: DebtWriter + ?Sized,
{
    ensure_admin(user)?;

    let updates = UpdateDebt::from(NewDebt::try_from(form)?);

    repo.update_debt(debt_id, &updates).await.map_err(|err| {
        log::error!("Failed to update debt {debt_id}: {err}");
        err
    })?;

    Ok(())
}

pub async fn archive_debt<R>(repo: &R, user: &User, debt_id: DebtId) -> ServiceResult<()>
where
    R: DebtWriter + ?Sized,
{
    ensure_admin(user)?;

    repo.archive_debt(debt_id).await.map_err(|err| {
        log::error!("Failed to archive debt {debt_id}: {err}");
        err
    })?;

    Ok(())
}

pub async fn unarchive_debt<R>(repo: &R, user: &User, debt_id: DebtId) -> ServiceResult<()>
where
    R: DebtWriter + ?Sized,
{
    ensure_admin(user)?;

    repo.unarchive_debt(debt_id).await.map_err(|err| {
        log::error!("Failed to unarchive debt {debt_id}: {err}");
        err
    })?;

    Ok(())
}

/// The API refuses to delete debts that already carry payments.
pub async fn delete_debt<R>(repo: &R, user: &User, debt_id: DebtId) -> ServiceResult<()>
where
    R: DebtWriter + ?Sized,
{
    ensure_admin(user)?;

    repo.delete_debt(debt_id).await.map_err(|err| {
        log::error!("Failed to delete debt {debt_id}: {err}");
        err
    })?;

    Ok(())
}
