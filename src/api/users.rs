use super::{
    client::ApiClient,
    types::{ApiError, UserResponse, UserRole, UserUpdate},
};

impl ApiClient {
    /// Directory listing; the server scopes it by role (managers see their
    /// team plus peers, hr sees everyone but admins, admin sees all).
    pub async fn get_users(&self, role: Option<UserRole>) -> Result<Vec<UserResponse>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let role_param = role.map(|r| {
            serde_json::to_value(r)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default()
        });
        let response = self
            .send(|| {
                let mut request = self.http_client().get(format!("{}/users/", base_url));
                if let Some(role) = &role_param {
                    request = request.query(&[("role", role)]);
                }
                self.with_auth(request)
            })
            .await?;
        self.expect_json(response).await
    }

    pub async fn get_my_team(&self) -> Result<Vec<UserResponse>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|| self.with_auth(self.http_client().get(format!("{}/users/team", base_url))))
            .await?;
        self.expect_json(response).await
    }

    /// Self-edit: name/phone/email only. Role and manager changes go through
    /// the admin endpoint server-side and are not exposed here.
    pub async fn update_profile(
        &self,
        user_id: i64,
        update: &UserUpdate,
    ) -> Result<UserResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|| {
                self.with_auth(
                    self.http_client()
                        .put(format!("{}/users/{}", base_url, user_id))
                        .json(update),
                )
            })
            .await?;
        self.expect_json(response).await
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|| {
                self.with_auth(
                    self.http_client()
                        .delete(format!("{}/users/{}", base_url, user_id)),
                )
            })
            .await?;
        self.expect_ok(response).await
    }
}
