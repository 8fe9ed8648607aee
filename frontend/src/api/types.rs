use chrono::NaiveDate;
use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: Option<String>,
}

impl UserResponse {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }

    pub fn display_name(&self) -> String {
        if self.full_name.trim().is_empty() {
            self.username.clone()
        } else {
            self.full_name.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSummary {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: String,
}

impl UserSummary {
    pub fn display_name(&self) -> String {
        if self.full_name.trim().is_empty() {
            self.username.clone()
        } else {
            self.full_name.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddedUser {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Absence request as the server sends it. Dates arrive as ISO strings and
/// the status is uppercase; conversion into the local model happens in
/// `pages::vacations::types`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VacationRecord {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub user: Option<EmbeddedUser>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub absence_type: Option<String>,
    pub status: String,
    #[serde(default)]
    pub requested_at: Option<String>,
    #[serde(default)]
    pub reviewed_by: Option<i64>,
    #[serde(default)]
    pub reviewed_at: Option<String>,
    #[serde(default)]
    pub admin_response: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateVacationRequest {
    #[serde(with = "ymd")]
    pub start_date: NaiveDate,
    #[serde(with = "ymd")]
    pub end_date: NaiveDate,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absence_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateVacationRequest {
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_ymd", default)]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_ymd", default)]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absence_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VacationListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct UsageResponse {
    #[serde(default)]
    pub approved_days_used: u32,
    #[serde(default)]
    pub pending_days_requested: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VacationStats {
    #[serde(default)]
    pub total_requests: u32,
    #[serde(default)]
    pub pending: u32,
    #[serde(default)]
    pub approved: u32,
    #[serde(default)]
    pub rejected: u32,
    #[serde(default)]
    pub total_days_approved: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

pub const GENERIC_ERROR_MESSAGE: &str = "処理に失敗しました。時間をおいて再度お試しください。";

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            details: None,
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            details: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
            details: None,
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            error: "セッションの有効期限が切れました。再度ログインしてください。".to_string(),
            code: "UNAUTHORIZED".to_string(),
            details: None,
        }
    }

    /// Builds an error from a non-success response body. The server reports
    /// failures as `{"detail": "..."}`, as a list of `{"msg": ...}` entries for
    /// validation failures, or occasionally as `{"error": "..."}`.
    pub fn from_response(status: u16, payload: Option<Value>) -> Self {
        let code = format!("HTTP_{}", status);
        let Some(payload) = payload else {
            return Self {
                error: GENERIC_ERROR_MESSAGE.to_string(),
                code,
                details: None,
            };
        };
        let message = match payload.get("detail") {
            Some(Value::String(detail)) if !detail.trim().is_empty() => Some(detail.clone()),
            Some(Value::Array(items)) => {
                let messages: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|v| v.as_str()))
                    .map(str::to_string)
                    .collect();
                if messages.is_empty() {
                    None
                } else {
                    Some(messages.join(" / "))
                }
            }
            _ => payload
                .get("error")
                .and_then(|v| v.as_str())
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
        };
        let code = payload
            .get("code")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or(code);
        Self {
            error: message.unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
            code,
            details: Some(payload),
        }
    }

    pub fn is_validation(&self) -> bool {
        self.code == "VALIDATION_ERROR"
    }
}

mod ymd {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&crate::utils::dates::to_local_ymd(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        crate::utils::dates::parse_local_ymd(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
    }
}

mod opt_ymd {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&crate::utils::dates::to_local_ymd(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            Some(raw) => crate::utils::dates::parse_local_ymd(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw))),
            None => Ok(None),
        }
    }
}
