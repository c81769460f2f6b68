use async_trait::async_trait;
use reqwest::Method;

use crate::api::errors::ApiResult;
use crate::api::{HttpApi, PaymentReader, PaymentWriter};
use crate::domain::payment::{NewPayment, Payment};
use crate::domain::types::{DebtId, PaymentId};

#[async_trait]
impl PaymentReader for HttpApi {
    async fn list_payments(&self) -> ApiResult<Vec<Payment>> {
        self.send_json(self.request(Method::GET, "/api/payments"))
            .await
    }

    async fn list_debt_payments(&self, debt_id: DebtId) -> ApiResult<Vec<Payment>> {
        self.send_json(self.request(Method::GET, &format!("/api/payments/debt/{debt_id}")))
            .await
    }

    async fn get_payment(&self, id: PaymentId) -> ApiResult<Payment> {
        self.send_json(self.request(Method::GET, &format!("/api/payments/{id}")))
            .await
    }
}

#[async_trait]
impl PaymentWriter for HttpApi {
    async fn create_payment(&self, new_payment: &NewPayment) -> ApiResult<()> {
        self.send_unit(self.request(Method::POST, "/api/payments").json(new_payment))
            .await
    }
}
