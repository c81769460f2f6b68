use async_trait::async_trait;
use reqwest::Method;

use crate::api::errors::ApiResult;
use crate::api::{AuthGateway, HttpApi};
use crate::domain::user::{AuthResponse, Credentials, NewClientAccount, RegistrationResponse};

#[async_trait]
impl AuthGateway for HttpApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        self.send_json(self.request(Method::POST, "/api/auth/login").json(credentials))
            .await
    }

    async fn client_login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        self.send_json(
            self.request(Method::POST, "/api/auth/client-login")
                .json(credentials),
        )
        .await
    }

    async fn register_client(
        &self,
        account: &NewClientAccount,
    ) -> ApiResult<RegistrationResponse> {
        self.send_json(
            self.request(Method::POST, "/api/auth/register-client")
                .json(account),
        )
        .await
    }
}
