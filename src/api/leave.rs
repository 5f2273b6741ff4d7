use super::{
    client::ApiClient,
    types::{
        ApiError, CreateLeaveRequest, LeaveBalanceResponse, LeaveRequestResponse, LeaveStatus,
        RejectRequest, TodayLeaveResponse,
    },
};

fn history_params(
    status: Option<LeaveStatus>,
    user_id: Option<i64>,
    limit: Option<u32>,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(status) = status {
        params.push(("status", status.as_str().to_string()));
    }
    if let Some(user_id) = user_id {
        params.push(("user_id", user_id.to_string()));
    }
    if let Some(limit) = limit {
        params.push(("limit", limit.to_string()));
    }
    params
}

impl ApiClient {
    /// Pending requests, scoped by the server to the actor's role: managers
    /// see their team, hr/admin see everyone. The client renders exactly
    /// what is returned.
    pub async fn get_pending_requests(&self) -> Result<Vec<LeaveRequestResponse>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|| self.with_auth(self.http_client().get(format!("{}/leave/pending", base_url))))
            .await?;
        self.expect_json(response).await
    }

    pub async fn get_leave_history(
        &self,
        status: Option<LeaveStatus>,
        user_id: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<LeaveRequestResponse>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let params = history_params(status, user_id, limit);
        let response = self
            .send(|| {
                let mut request = self.http_client().get(format!("{}/leave/history", base_url));
                if !params.is_empty() {
                    request = request.query(&params);
                }
                self.with_auth(request)
            })
            .await?;
        self.expect_json(response).await
    }

    pub async fn get_leave_request(&self, id: i64) -> Result<LeaveRequestResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|| {
                self.with_auth(self.http_client().get(format!("{}/leave/{}", base_url, id)))
            })
            .await?;
        self.expect_json(response).await
    }

    pub async fn create_leave_request(
        &self,
        request: &CreateLeaveRequest,
    ) -> Result<LeaveRequestResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|| {
                self.with_auth(
                    self.http_client()
                        .post(format!("{}/leave/requests", base_url))
                        .json(request),
                )
            })
            .await?;
        self.expect_json(response).await
    }

    pub async fn approve_leave(&self, id: i64) -> Result<LeaveRequestResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|| {
                self.with_auth(
                    self.http_client()
                        .post(format!("{}/leave/approve/{}", base_url, id)),
                )
            })
            .await?;
        self.expect_json(response).await
    }

    pub async fn reject_leave(
        &self,
        id: i64,
        reason: &str,
    ) -> Result<LeaveRequestResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let body = RejectRequest {
            reason: reason.to_string(),
        };
        let response = self
            .send(|| {
                self.with_auth(
                    self.http_client()
                        .post(format!("{}/leave/reject/{}", base_url, id))
                        .json(&body),
                )
            })
            .await?;
        self.expect_json(response).await
    }

    pub async fn cancel_leave(&self, id: i64) -> Result<LeaveRequestResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|| {
                self.with_auth(
                    self.http_client()
                        .post(format!("{}/leave/cancel/{}", base_url, id)),
                )
            })
            .await?;
        self.expect_json(response).await
    }

    pub async fn get_my_balance(&self) -> Result<LeaveBalanceResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|| self.with_auth(self.http_client().get(format!("{}/leave/balance", base_url))))
            .await?;
        self.expect_json(response).await
    }

    pub async fn get_user_balance(&self, user_id: i64) -> Result<LeaveBalanceResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|| {
                self.with_auth(
                    self.http_client()
                        .get(format!("{}/leave/balance/{}", base_url, user_id)),
                )
            })
            .await?;
        self.expect_json(response).await
    }

    pub async fn get_today_leaves(&self) -> Result<TodayLeaveResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|| self.with_auth(self.http_client().get(format!("{}/leave/today", base_url))))
            .await?;
        self.expect_json(response).await
    }
}
