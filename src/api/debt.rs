use async_trait::async_trait;
use reqwest::Method;

use crate::api::errors::ApiResult;
use crate::api::{DebtReader, DebtWriter, HttpApi};
use crate::domain::debt::{Debt, NewDebt, UpdateDebt};
use crate::domain::types::DebtId;

#[async_trait]
impl DebtReader for HttpApi {
    async fn list_debts(&self) -> ApiResult<Vec<Debt>> {
        self.send_json(self.request(Method::GET, "/api/debts")).await
    }

    async fn list_archived_debts(&self) -> ApiResult<Vec<Debt>> {
        self.send_json(self.request(Method::GET, "/api/debts/archived"))
            .await
    }

    async fn get_debt(&self, id: DebtId) -> ApiResult<Debt> {
        self.send_json(self.request(Method::GET, &format!("/api/debts/{id}")))
            .await
    }
}

#[async_trait]
impl DebtWriter for HttpApi {
    async fn create_debt(&self, new_debt: &NewDebt) -> ApiResult<()> {
        self.send_unit(self.request(Method::POST, "/api/debts").json(new_debt))
            .await
    }

    async fn update_debt(&self, id: DebtId, updates: &UpdateDebt) -> ApiResult<()> {
        self.send_unit(
            self.request(Method::PUT, &format!("/api/debts/{id}"))
                .json(updates),
        )
        .await
    }

    async fn archive_debt(&self, id: DebtId) -> ApiResult<()> {
        self.send_unit(self.request(Method::PUT, &format!("/api/debts/{id}/archive")))
            .await
    }

    async fn unarchive_debt(&self, id: DebtId) -> ApiResult<()> {
        self.send_unit(self.request(Method::PUT, &format!("/api/debts/{id}/unarchive")))
            .await
    }

    async fn delete_debt(&self, id: DebtId) -> ApiResult<()> {
        self.send_unit(self.request(Method::DELETE, &format!("/api/debts/{id}")))
            .await
    }
}
