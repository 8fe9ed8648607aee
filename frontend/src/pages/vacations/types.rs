use crate::api::{ApiError, VacationRecord};
use crate::utils::dates::{days_between_inclusive, parse_local_ymd};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsenceType {
    #[default]
    Vacation,
    Personal,
    Moving,
}

impl AbsenceType {
    pub const ALL: [AbsenceType; 3] = [Self::Vacation, Self::Personal, Self::Moving];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vacation => "vacation",
            Self::Personal => "personal",
            Self::Moving => "moving",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "vacation" => Some(Self::Vacation),
            "personal" => Some(Self::Personal),
            "moving" => Some(Self::Moving),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Vacation => "休暇",
            Self::Personal => "私用",
            Self::Moving => "引越し",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Accepts the server's uppercase form as well as the local lowercase one.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "承認待ち",
            Self::Approved => "承認済み",
            Self::Rejected => "却下",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsenceRequest {
    pub id: i64,
    pub user_id: i64,
    pub employee_name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub reason: String,
    pub absence_type: AbsenceType,
    pub status: RequestStatus,
    pub requested_at: Option<NaiveDateTime>,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<NaiveDateTime>,
    pub admin_response: Option<String>,
}

impl AbsenceRequest {
    pub fn duration_days(&self) -> i64 {
        days_between_inclusive(self.start, self.end)
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    pub fn period_label(&self) -> String {
        if self.start == self.end {
            self.start.format("%Y-%m-%d").to_string()
        } else {
            format!(
                "{} 〜 {}",
                self.start.format("%Y-%m-%d"),
                self.end.format("%Y-%m-%d")
            )
        }
    }
}

impl TryFrom<VacationRecord> for AbsenceRequest {
    type Error = ApiError;

    fn try_from(record: VacationRecord) -> Result<Self, Self::Error> {
        let start = parse_local_ymd(&record.start_date).ok_or_else(|| {
            ApiError::unknown(format!("Invalid start_date: {}", record.start_date))
        })?;
        let end = parse_local_ymd(&record.end_date)
            .ok_or_else(|| ApiError::unknown(format!("Invalid end_date: {}", record.end_date)))?;
        if start > end {
            return Err(ApiError::unknown(format!(
                "Request {} ends before it starts",
                record.id
            )));
        }
        let status = RequestStatus::parse(&record.status)
            .ok_or_else(|| ApiError::unknown(format!("Unknown status: {}", record.status)))?;
        let absence_type = record
            .absence_type
            .as_deref()
            .and_then(AbsenceType::parse)
            .unwrap_or_default();
        let employee_name = record
            .employee_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| {
                record.user.as_ref().and_then(|user| {
                    user.full_name
                        .clone()
                        .filter(|name| !name.trim().is_empty())
                        .or_else(|| user.username.clone())
                })
            })
            .unwrap_or_else(|| format!("#{}", record.user_id));

        Ok(Self {
            id: record.id,
            user_id: record.user_id,
            employee_name,
            start,
            end,
            reason: record.reason.unwrap_or_default(),
            absence_type,
            status,
            requested_at: record.requested_at.as_deref().and_then(parse_timestamp),
            reviewed_by: record.reviewed_by,
            reviewed_at: record.reviewed_at.as_deref().and_then(parse_timestamp),
            admin_response: record.admin_response.filter(|r| !r.trim().is_empty()),
        })
    }
}

/// Converts a fetched page, dropping records that cannot be represented.
pub fn into_requests(records: Vec<VacationRecord>) -> Vec<AbsenceRequest> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.id;
            AbsenceRequest::try_from(record)
                .map_err(|err| log::warn!("Skipping vacation {}: {}", id, err))
                .ok()
        })
        .collect()
}

/// Server timestamps come with or without an offset; both end up in local time.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

pub fn format_timestamp(value: Option<NaiveDateTime>) -> String {
    value
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::All,
        }
    }

    pub fn matches(&self, status: RequestStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => status == RequestStatus::Pending,
            Self::Approved => status == RequestStatus::Approved,
            Self::Rejected => status == RequestStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    Mine,
    All,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mine => "mine",
            Self::All => "all",
        }
    }

    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Mine
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Calendar,
    Users,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Calendar => "calendar",
            Self::Users => "users",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "calendar" => Self::Calendar,
            "users" => Self::Users,
            _ => Self::Table,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Table => "一覧",
            Self::Calendar => "カレンダー",
            Self::Users => "社員検索",
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn request(id: i64, start: &str, end: &str, status: RequestStatus) -> AbsenceRequest {
        AbsenceRequest {
            id,
            user_id: 1,
            employee_name: format!("Employee {}", id),
            start: parse_local_ymd(start).unwrap(),
            end: parse_local_ymd(end).unwrap(),
            reason: "family trip".into(),
            absence_type: AbsenceType::Vacation,
            status,
            requested_at: None,
            reviewed_by: None,
            reviewed_at: None,
            admin_response: None,
        }
    }
}
