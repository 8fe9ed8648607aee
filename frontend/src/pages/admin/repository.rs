use crate::api::{ApiClient, ApiError, VacationListQuery, VacationStats};
use crate::pages::vacations::types::{into_requests, AbsenceRequest, RequestStatus};
use std::rc::Rc;

#[derive(Clone)]
pub struct AdminRepository {
    client: Rc<ApiClient>,
}

impl AdminRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub fn client(&self) -> ApiClient {
        (*self.client).clone()
    }

    /// Pending requests of every employee.
    pub async fn list_pending(&self) -> Result<Vec<AbsenceRequest>, ApiError> {
        let records = self
            .client
            .list_vacations(&VacationListQuery {
                status: Some(RequestStatus::Pending.as_str().to_string()),
                user_id: None,
                year: None,
            })
            .await?;
        Ok(into_requests(records))
    }

    pub async fn stats(&self, year: i32) -> Result<VacationStats, ApiError> {
        self.client.get_vacation_stats(Some(year)).await
    }

    pub async fn review(
        &self,
        id: i64,
        status: RequestStatus,
        admin_response: Option<&str>,
    ) -> Result<(), ApiError> {
        self.client
            .update_vacation_status(id, status.as_str(), admin_response)
            .await
    }
}
