use rust_decimal::Decimal;

use crate::api::{DebtReader, PaymentReader, PaymentWriter};
use crate::domain::types::{DebtId, PaymentId};
use crate::domain::user::User;
use crate::dto::payments::{PaymentDetailPage, PaymentsPage};
use crate::forms::payment::PaymentForm;
use crate::services::{ServiceResult, ensure_admin, or_placeholder};

/// Payment history with the collected total.
pub async fn list_payments<R>(repo: &R, user: &User) -> ServiceResult<PaymentsPage>
where
    R: PaymentReader + ?Sized,
{
    ensure_admin(user)?;

    let mut load_error = None;
    let payments = or_placeholder(repo.list_payments().await, "payments", &mut load_error)?;
    let total = payments.iter().map(|payment| payment.amount).sum::<Decimal>();

    Ok(PaymentsPage {
        payments,
        total,
        load_error,
    })
}

/// A payment and, when it can still be loaded, the debt it settled.
pub async fn get_payment_detail<R>(
    repo: &R,
    user: &User,
    payment_id: PaymentId,
) -> ServiceResult<PaymentDetailPage>
where
    R: PaymentReader + DebtReader + ?Sized,
{
    ensure_admin(user)?;

    let payment = repo.get_payment(payment_id).await.map_err(|err| {
        log::error!("Failed to load payment {payment_id}: {err}");
        err
    })?;

    let debt = match payment.debt_ref() {
        Some(debt_id) => match repo.get_debt(debt_id).await {
            Ok(debt) => Some(debt),
            Err(err) => {
                log::warn!("Failed to load debt {debt_id} for payment {payment_id}: {err}");
                None
            }
        },
        None => None,
    };

    Ok(PaymentDetailPage { payment, debt })
}

/// Records a payment after checking it against the debt's current balance.
pub async fn add_payment<R>(
    repo: &R,
    user: &User,
    debt_id: DebtId,
    form: PaymentForm,
) -> ServiceResult<()>
where
    R: DebtReader + PaymentWriter + ?Sized,
{
    ensure_admin(user)?;

    let debt = repo.get_debt(debt_id).await.map_err(|err| {
        log::error!("Failed to load debt {debt_id}: {err}");
        err
    })?;

    let new_payment = form.into_new_payment(&debt)?;

    repo.create_payment(&new_payment).await.map_err(|err| {
        log::error!("Failed to add a payment to debt {debt_id}: {err}");
        err
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::errors::ApiError;
    use crate::api::mock::MockApi;
    use crate::domain::payment::{Payment, PaymentMethod};
    use crate::forms::payment::EXCEEDS_REMAINING;
    use crate::services::ServiceError;
    use crate::services::fixtures::{admin, client_user, debt};

    fn payment(id: i64, amount: i64, debt_id: Option<i64>) -> Payment {
        Payment {
            id: PaymentId::new(id).unwrap(),
            debt_id: debt_id.map(|id| DebtId::new(id).unwrap()),
            debt: None,
            amount: Decimal::from(amount),
            payment_date: None,
            payment_method: PaymentMethod::Cash,
            notes: None,
            created_at: None,
        }
    }

    fn form(amount: &str) -> PaymentForm {
        PaymentForm {
            amount: amount.to_string(),
            payment_method: "CASH".to_string(),
            notes: String::new(),
        }
    }

    #[actix_web::test]
    async fn payment_over_remaining_never_reaches_api() {
        let mut api = MockApi::new();
        api.expect_get_debt().returning(|_| Ok(debt(5, 3, 1000, 400)));
        api.expect_create_payment().never();

        match add_payment(&api, &admin(), DebtId::new(5).unwrap(), form("400.01")).await {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors.get("amount"), Some(EXCEEDS_REMAINING))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[actix_web::test]
    async fn exact_remaining_is_accepted() {
        let mut api = MockApi::new();
        api.expect_get_debt().returning(|_| Ok(debt(5, 3, 1000, 400)));
        api.expect_create_payment()
            .withf(|payment| {
                payment.debt_id.get() == 5 && payment.amount.get() == Decimal::from(400)
            })
            .times(1)
            .returning(|_| Ok(()));

        add_payment(&api, &admin(), DebtId::new(5).unwrap(), form("400"))
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn clients_cannot_record_payments() {
        let mut api = MockApi::new();
        api.expect_get_debt().never();
        api.expect_create_payment().never();

        assert!(matches!(
            add_payment(&api, &client_user(), DebtId::new(5).unwrap(), form("10")).await,
            Err(ServiceError::Forbidden)
        ));
    }

    #[actix_web::test]
    async fn list_sums_amounts() {
        let mut api = MockApi::new();
        api.expect_list_payments()
            .returning(|| Ok(vec![payment(1, 250, Some(5)), payment(2, 750, Some(6))]));

        let page = list_payments(&api, &admin()).await.unwrap();
        assert_eq!(page.total, Decimal::from(1000));
        assert!(page.load_error.is_none());
    }

    #[actix_web::test]
    async fn detail_survives_missing_debt() {
        let mut api = MockApi::new();
        api.expect_get_payment()
            .returning(|_| Ok(payment(1, 250, Some(5))));
        api.expect_get_debt().returning(|_| Err(ApiError::NotFound));

        let page = get_payment_detail(&api, &admin(), PaymentId::new(1).unwrap())
            .await
            .unwrap();
        assert!(page.debt.is_none());
    }
}
