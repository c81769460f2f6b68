use async_trait::async_trait;
use reqwest::Method;

use crate::api::errors::ApiResult;
use crate::api::{ClientReader, ClientWriter, HttpApi};
use crate::domain::client::{ArchiveRequest, Client, NewClient, UpdateClient};
use crate::domain::types::ClientId;

#[async_trait]
impl ClientReader for HttpApi {
    async fn list_clients(&self) -> ApiResult<Vec<Client>> {
        self.send_json(self.request(Method::GET, "/api/clients"))
            .await
    }

    async fn list_archived_clients(&self) -> ApiResult<Vec<Client>> {
        self.send_json(self.request(Method::GET, "/api/clients/archived"))
            .await
    }

    async fn get_client(&self, id: ClientId) -> ApiResult<Client> {
        self.send_json(self.request(Method::GET, &format!("/api/clients/{id}")))
            .await
    }
}

#[async_trait]
impl ClientWriter for HttpApi {
    async fn create_client(&self, new_client: &NewClient) -> ApiResult<()> {
        self.send_unit(self.request(Method::POST, "/api/clients").json(new_client))
            .await
    }

    async fn update_client(&self, id: ClientId, updates: &UpdateClient) -> ApiResult<()> {
        self.send_unit(
            self.request(Method::PUT, &format!("/api/clients/{id}"))
                .json(updates),
        )
        .await
    }

    /// Archiving is the API's `DELETE`, carrying the operator's reason.
    async fn archive_client(&self, id: ClientId, request: &ArchiveRequest) -> ApiResult<()> {
        self.send_unit(
            self.request(Method::DELETE, &format!("/api/clients/{id}"))
                .json(request),
        )
        .await
    }

    async fn unarchive_client(&self, id: ClientId) -> ApiResult<()> {
        self.send_unit(self.request(Method::PUT, &format!("/api/clients/{id}/unarchive")))
            .await
    }

    async fn delete_client(&self, id: ClientId) -> ApiResult<()> {
        self.send_unit(self.request(Method::DELETE, &format!("/api/clients/{id}")))
            .await
    }
}
