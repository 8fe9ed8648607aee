use reqwest::{header::HeaderMap, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    api::{session::Session, types::ApiError},
    config,
};

pub const COMPANY_HEADER: &str = "X-Company";

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    session: Option<Session>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            session: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            session: None,
        }
    }

    /// Pins the credentials instead of reading them from local storage on
    /// every request.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    fn current_session(&self) -> Session {
        self.session.clone().unwrap_or_else(Session::load)
    }

    fn auth_headers(&self) -> Result<HeaderMap, ApiError> {
        let session = self.current_session();
        let token = session.access_token.clone().ok_or_else(ApiError::unauthorized)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", token)
                .parse()
                .map_err(|_| ApiError::unknown("Invalid token format"))?,
        );
        if let Some(company) = session.company() {
            headers.insert(
                COMPANY_HEADER,
                company
                    .parse()
                    .map_err(|_| ApiError::unknown("Invalid company header"))?,
            );
        }
        Ok(headers)
    }

    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let headers = self.auth_headers()?;
        let request = builder
            .headers(headers)
            .build()
            .map_err(|e| ApiError::request_failed(format!("Invalid request: {}", e)))?;
        log::debug!("{} {}", request.method(), request.url());

        #[cfg(all(test, not(target_arch = "wasm32")))]
        if let Some(responder) = mock_support::find_mock(request.url().as_str()) {
            return responder
                .respond(&request)
                .map(mock_support::MockResponse::into_response);
        }

        self.client
            .execute(request)
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))
    }

    pub(crate) fn handle_unauthorized_status(status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            log::warn!("Session rejected by the server; clearing stored credentials");
            Session::clear_stored();
        }
    }

    pub(crate) async fn map_json_response<T>(&self, response: Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub(crate) async fn map_empty_response(&self, response: Response) -> Result<(), ApiError> {
        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    async fn error_from_response(response: Response) -> ApiError {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return ApiError::unauthorized();
        }
        let payload = response.json::<Value>().await.ok();
        ApiError::from_response(status.as_u16(), payload)
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
pub use mock_support::{register_mock, MockResponse, TestResponder};
