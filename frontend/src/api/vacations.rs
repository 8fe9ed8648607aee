use super::{
    client::ApiClient,
    types::{
        ApiError, CreateVacationRequest, UpdateVacationRequest, UsageResponse, VacationListQuery,
        VacationRecord, VacationStats,
    },
};

fn vacation_list_params(query: &VacationListQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(status) = &query.status {
        params.push(("status", status.to_ascii_uppercase()));
    }
    if let Some(user_id) = query.user_id {
        params.push(("user_id", user_id.to_string()));
    }
    if let Some(year) = query.year {
        params.push(("year", year.to_string()));
    }
    params
}

fn status_update_params(status: &str, admin_response: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = vec![("status", status.to_ascii_uppercase())];
    if let Some(response) = admin_response.map(str::trim).filter(|r| !r.is_empty()) {
        params.push(("admin_response", response.to_string()));
    }
    params
}

fn usage_params(
    user_id: Option<i64>,
    year: Option<i32>,
    absence_type: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(user_id) = user_id {
        params.push(("user_id", user_id.to_string()));
    }
    if let Some(year) = year {
        params.push(("year", year.to_string()));
    }
    if let Some(kind) = absence_type {
        params.push(("absence_type", kind.to_string()));
    }
    params
}

impl ApiClient {
    pub async fn list_vacations(
        &self,
        query: &VacationListQuery,
    ) -> Result<Vec<VacationRecord>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let params = vacation_list_params(query);
        let mut request = self.http_client().get(format!("{}/vacations/", base_url));
        if !params.is_empty() {
            request = request.query(&params);
        }
        let response = self.send(request).await?;
        self.map_json_response(response).await
    }

    pub async fn create_vacation(
        &self,
        payload: &CreateVacationRequest,
    ) -> Result<VacationRecord, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .post(format!("{}/vacations/", base_url))
                    .json(payload),
            )
            .await?;
        self.map_json_response(response).await
    }

    pub async fn update_vacation(
        &self,
        id: i64,
        payload: &UpdateVacationRequest,
    ) -> Result<VacationRecord, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .put(format!("{}/vacations/{}", base_url, id))
                    .json(payload),
            )
            .await?;
        self.map_json_response(response).await
    }

    pub async fn delete_vacation(&self, id: i64) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .delete(format!("{}/vacations/{}", base_url, id)),
            )
            .await?;
        self.map_empty_response(response).await
    }

    pub async fn update_vacation_status(
        &self,
        id: i64,
        status: &str,
        admin_response: Option<&str>,
    ) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let params = status_update_params(status, admin_response);
        let response = self
            .send(
                self.http_client()
                    .put(format!("{}/vacations/{}/status", base_url, id))
                    .query(&params),
            )
            .await?;
        self.map_empty_response(response).await
    }

    pub async fn get_vacation_usage(
        &self,
        user_id: Option<i64>,
        year: Option<i32>,
        absence_type: Option<&str>,
    ) -> Result<UsageResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let params = usage_params(user_id, year, absence_type);
        let mut request = self
            .http_client()
            .get(format!("{}/vacations/usage", base_url));
        if !params.is_empty() {
            request = request.query(&params);
        }
        let response = self.send(request).await?;
        self.map_json_response(response).await
    }

    pub async fn get_vacation_stats(&self, year: Option<i32>) -> Result<VacationStats, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut request = self
            .http_client()
            .get(format!("{}/vacations/stats", base_url));
        if let Some(year) = year {
            request = request.query(&[("year", year.to_string())]);
        }
        let response = self.send(request).await?;
        self.map_json_response(response).await
    }
}
