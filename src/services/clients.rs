use crate::api::{ClientReader, ClientWriter, DebtReader};
use crate::domain::client::{ArchiveRequest, NewClient, UpdateClient};
use crate::domain::types::ClientId;
use crate::domain::user::User;
use crate::dto::ListTab;
use crate::dto::clients::{ClientDetailPage, ClientsPage};
use crate::forms::client::{ArchiveClientForm, ClientForm};
use crate::reporting::debt_totals;
use crate::services::{ServiceResult, ensure_admin, or_placeholder};

/// Loads the active or archived client list. A failed fetch renders an
/// empty list with an error notice.
pub async fn list_clients<R>(repo: &R, user: &User, tab: ListTab) -> ServiceResult<ClientsPage>
where
    R: ClientReader + ?Sized,
{
    ensure_admin(user)?;

    let mut load_error = None;
    let clients = match tab {
        ListTab::Active => {
            let clients = or_placeholder(repo.list_clients().await, "clients", &mut load_error)?;
            clients.into_iter().filter(|client| !client.archived).collect()
        }
        ListTab::Archived => or_placeholder(
            repo.list_archived_clients().await,
            "archived clients",
            &mut load_error,
        )?,
    };

    Ok(ClientsPage {
        tab,
        clients,
        load_error,
    })
}

/// Fetches a client together with the debts recorded against them.
pub async fn get_client_detail<R>(
    repo: &R,
    user: &User,
    client_id: ClientId,
) -> ServiceResult<ClientDetailPage>
where
    R: ClientReader + DebtReader + ?Sized,
{
    ensure_admin(user)?;

    let (client, debts) = futures::try_join!(repo.get_client(client_id), repo.list_debts())
        .map_err(|err| {
            log::error!("Failed to load client {client_id}: {err}");
            err
        })?;

    let debts: Vec<_> = debts
        .into_iter()
        .filter(|debt| debt.client.as_ref().is_some_and(|c| c.id == client_id))
        .collect();
    let totals = debt_totals(&debts);

    Ok(ClientDetailPage {
        client,
        debts,
        totals,
    })
}

/// Validates the form and creates the client.
pub async fn create_client<R>(repo: &R, user: &User, form: ClientForm) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    ensure_admin(user)?;

    let new_client = NewClient::try_from(form)?;

    repo.create_client(&new_client).await.map_err(|err| {
        log::error!("Failed to add a client: {err}");
        err
    })?;

    Ok(())
}

pub async fn update_client<R>(
    repo: &R,
    user: &User,
    client_id: ClientId,
    form: ClientForm,
) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    ensure_admin(user)?;

    let updates: UpdateClient = NewClient::try_from(form)?;

    repo.update_client(client_id, &updates)
        .await
        .map_err(|err| {
            log::error!("Failed to update client {client_id}: {err}");
            err
        })?;

    Ok(())
}

/// Archives the client with the operator's reason.
pub async fn archive_client<R>(
    repo: &R,
    user: &User,
    client_id: ClientId,
    form: ArchiveClientForm,
) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    ensure_admin(user)?;

    let request = ArchiveRequest::try_from(form)?;

    repo.archive_client(client_id, &request)
        .await
        .map_err(|err| {
            log::error!("Failed to archive client {client_id}: {err}");
            err
        })?;

    Ok(())
}

pub async fn unarchive_client<R>(repo: &R, user: &User, client_id: ClientId) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    ensure_admin(user)?;

    repo.unarchive_client(client_id).await.map_err(|err| {
        log::error!("Failed to unarchive client {client_id}: {err}");
        err
    })?;

    Ok(())
}

/// Submits the deletion; whether the client may go is the API's decision.
pub async fn delete_client<R>(repo: &R, user: &User, client_id: ClientId) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    ensure_admin(user)?;

    repo.delete_client(client_id).await.map_err(|err| {
        log::error!("Failed to delete client {client_id}: {err}");
        err
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::errors::ApiError;
    use crate::api::mock::MockApi;
    use crate::services::ServiceError;
    use crate::services::fixtures::{admin, client, client_user, debt};

    fn client_form(phone: &str) -> ClientForm {
        ClientForm {
            name: "Ana López".to_string(),
            email: String::new(),
            phone: phone.to_string(),
            address: String::new(),
        }
    }

    #[actix_web::test]
    async fn short_phone_never_reaches_api() {
        let mut api = MockApi::new();
        api.expect_create_client().never();

        let result = create_client(&api, &admin(), client_form("555123")).await;
        match result {
            Err(ServiceError::Validation(errors)) => assert!(errors.contains("phone")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[actix_web::test]
    async fn valid_client_is_created() {
        let mut api = MockApi::new();
        api.expect_create_client()
            .withf(|new_client| new_client.phone.as_str() == "5551234567")
            .times(1)
            .returning(|_| Ok(()));

        create_client(&api, &admin(), client_form("555-123-4567"))
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn clients_cannot_manage_clients() {
        let mut api = MockApi::new();
        api.expect_create_client().never();

        assert!(matches!(
            create_client(&api, &client_user(), client_form("5551234567")).await,
            Err(ServiceError::Forbidden)
        ));
    }

    #[actix_web::test]
    async fn archive_without_reason_never_reaches_api() {
        let mut api = MockApi::new();
        api.expect_archive_client().never();

        let id = ClientId::new(4).unwrap();
        let form = ArchiveClientForm {
            reason: " ".to_string(),
        };
        assert!(matches!(
            archive_client(&api, &admin(), id, form).await,
            Err(ServiceError::Validation(_))
        ));
    }

    #[actix_web::test]
    async fn archive_sends_reason() {
        let mut api = MockApi::new();
        api.expect_archive_client()
            .withf(|id, request| id.get() == 4 && request.reason.as_str() == "Cerró su cuenta")
            .times(1)
            .returning(|_, _| Ok(()));

        let form = ArchiveClientForm {
            reason: "Cerró su cuenta".to_string(),
        };
        archive_client(&api, &admin(), ClientId::new(4).unwrap(), form)
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn delete_surfaces_server_rule() {
        let mut api = MockApi::new();
        api.expect_delete_client().times(1).returning(|_| {
            Err(ApiError::Rejected {
                status: 400,
                message: "No se puede archivar el cliente porque tiene deudas activas".to_string(),
            })
        });

        match delete_client(&api, &admin(), ClientId::new(4).unwrap()).await {
            Err(ServiceError::BusinessRule(message)) => {
                assert!(message.contains("deudas activas"))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[actix_web::test]
    async fn active_tab_hides_archived_clients() {
        let mut api = MockApi::new();
        api.expect_list_clients()
            .returning(|| Ok(vec![client(1, false), client(2, true)]));
        api.expect_list_archived_clients().never();

        let page = list_clients(&api, &admin(), ListTab::Active).await.unwrap();
        assert_eq!(page.clients.len(), 1);
        assert_eq!(page.clients[0].id.get(), 1);
    }

    #[actix_web::test]
    async fn failed_list_renders_empty() {
        let mut api = MockApi::new();
        api.expect_list_archived_clients()
            .returning(|| Err(ApiError::Transport("connection refused".to_string())));

        let page = list_clients(&api, &admin(), ListTab::Archived).await.unwrap();
        assert!(page.clients.is_empty());
        assert!(page.load_error.is_some());
    }

    #[actix_web::test]
    async fn detail_keeps_only_the_clients_debts() {
        let mut api = MockApi::new();
        api.expect_get_client().returning(|_| Ok(client(3, false)));
        api.expect_list_debts()
            .returning(|| Ok(vec![debt(1, 3, 1000, 400), debt(2, 5, 800, 800)]));

        let page = get_client_detail(&api, &admin(), ClientId::new(3).unwrap())
            .await
            .unwrap();
        assert_eq!(page.debts.len(), 1);
        assert_eq!(page.totals.paid, rust_decimal::Decimal::from(600));
    }
}
