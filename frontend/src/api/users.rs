use super::{
    client::ApiClient,
    types::{ApiError, UserSummary},
};

impl ApiClient {
    pub async fn search_users(&self, term: &str) -> Result<Vec<UserSummary>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .get(format!("{}/users/", base_url))
                    .query(&[("search", term.trim())]),
            )
            .await?;
        self.map_json_response(response).await
    }
}
