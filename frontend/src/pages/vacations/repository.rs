use crate::api::{
    ApiClient, ApiError, CreateVacationRequest, UserSummary, VacationListQuery,
};
use std::rc::Rc;

use super::types::{into_requests, AbsenceRequest, RequestStatus};

#[derive(Clone)]
pub struct VacationsRepository {
    client: Rc<ApiClient>,
}

impl VacationsRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub fn client(&self) -> ApiClient {
        (*self.client).clone()
    }

    /// `user_id = None` lists every employee's requests (admin scope).
    pub async fn list(
        &self,
        user_id: Option<i64>,
        year: Option<i32>,
    ) -> Result<Vec<AbsenceRequest>, ApiError> {
        let records = self
            .client
            .list_vacations(&VacationListQuery {
                status: None,
                user_id,
                year,
            })
            .await?;
        Ok(into_requests(records))
    }

    pub async fn create(&self, payload: CreateVacationRequest) -> Result<AbsenceRequest, ApiError> {
        let record = self.client.create_vacation(&payload).await?;
        AbsenceRequest::try_from(record)
    }

    pub async fn set_status(
        &self,
        id: i64,
        status: RequestStatus,
        admin_response: Option<&str>,
    ) -> Result<(), ApiError> {
        self.client
            .update_vacation_status(id, status.as_str(), admin_response)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete_vacation(id).await
    }

    pub async fn search_users(&self, term: &str) -> Result<Vec<UserSummary>, ApiError> {
        self.client.search_users(term).await
    }
}
