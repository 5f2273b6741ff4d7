use super::{
    client::ApiClient,
    types::{ApiError, CreateHolidayRequest, HolidayResponse},
};

impl ApiClient {
    pub async fn get_holidays(&self, year: Option<i32>) -> Result<Vec<HolidayResponse>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|| {
                let mut request = self.http_client().get(format!("{}/holidays/", base_url));
                if let Some(year) = year {
                    request = request.query(&[("year", year.to_string())]);
                }
                self.with_auth(request)
            })
            .await?;
        self.expect_json(response).await
    }

    /// HR/admin only; the server rejects duplicates for the same date.
    pub async fn create_holiday(
        &self,
        request: &CreateHolidayRequest,
    ) -> Result<HolidayResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|| {
                self.with_auth(
                    self.http_client()
                        .post(format!("{}/holidays/", base_url))
                        .json(request),
                )
            })
            .await?;
        self.expect_json(response).await
    }

    pub async fn delete_holiday(&self, id: i64) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|| {
                self.with_auth(
                    self.http_client()
                        .delete(format!("{}/holidays/{}", base_url, id)),
                )
            })
            .await?;
        self.expect_ok(response).await
    }
}
