use super::{
    client::ApiClient,
    types::{ApiError, RegisterRequest, Token, UserResponse},
};
use crate::utils::storage;

impl ApiClient {
    /// Exchanges credentials for a bearer token. The backend expects the
    /// OAuth2 password form (`username` carries the email address). On
    /// success the token is persisted so a reload can rehydrate the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Token, ApiError> {
        let base_url = self.resolved_base_url().await;
        let form = [("username", email), ("password", password)];
        let response = self
            .send(|| {
                self.http_client()
                    .post(format!("{}/auth/login", base_url))
                    .form(&form)
            })
            .await?;

        let token: Token = self.expect_json(response).await?;
        storage::store_token(&token.access_token);
        Ok(token)
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|| {
                self.http_client()
                    .post(format!("{}/auth/register", base_url))
                    .json(&request)
            })
            .await?;
        self.expect_json(response).await
    }

    /// Resolves the current user from the stored token.
    pub async fn get_me(&self) -> Result<UserResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|| self.with_auth(self.http_client().get(format!("{}/auth/me", base_url))))
            .await?;
        self.expect_json(response).await
    }
}
