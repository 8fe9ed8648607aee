use crate::utils::dates::next_day;
use chrono::{Datelike, Duration, NaiveDate};

use super::types::{AbsenceRequest, AbsenceType, RequestStatus};

/// A request as the month grid draws it. `end_exclusive` is the day after the
/// last day off.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub request_id: i64,
    pub title: String,
    pub start: NaiveDate,
    pub end_exclusive: NaiveDate,
    pub status: RequestStatus,
    pub absence_type: AbsenceType,
}

pub fn is_on_calendar(request: &AbsenceRequest) -> bool {
    matches!(
        request.status,
        RequestStatus::Pending | RequestStatus::Approved
    )
}

pub fn calendar_events(requests: &[AbsenceRequest]) -> Vec<CalendarEvent> {
    requests
        .iter()
        .filter(|request| is_on_calendar(request))
        .map(|request| CalendarEvent {
            request_id: request.id,
            title: request.employee_name.clone(),
            start: request.start,
            end_exclusive: next_day(request.end),
            status: request.status,
            absence_type: request.absence_type,
        })
        .collect()
}

/// Requests whose inclusive range covers `day`. Rejected requests never show.
pub fn requests_on_day(requests: &[AbsenceRequest], day: NaiveDate) -> Vec<AbsenceRequest> {
    requests
        .iter()
        .filter(|request| is_on_calendar(request) && request.start <= day && day <= request.end)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub markers: Vec<CalendarEvent>,
}

impl CalendarEvent {
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end_exclusive
    }
}

/// Monday-first weeks covering the whole of `year`-`month`.
pub fn month_grid(
    year: i32,
    month: u32,
    today: NaiveDate,
    requests: &[AbsenceRequest],
) -> Vec<Vec<DayCell>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let last = last_day_of_month(first);
    let grid_start = first - Duration::days(i64::from(first.weekday().num_days_from_monday()));
    let grid_end = last + Duration::days(6 - i64::from(last.weekday().num_days_from_monday()));
    let events = calendar_events(requests);

    let cells: Vec<DayCell> = grid_start
        .iter_days()
        .take_while(|day| *day <= grid_end)
        .map(|date| DayCell {
            date,
            in_month: date.month() == month,
            is_today: date == today,
            markers: events
                .iter()
                .filter(|event| event.covers(date))
                .cloned()
                .collect(),
        })
        .collect();
    cells.chunks(7).map(|week| week.to_vec()).collect()
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let (year, month) = shift_month(first.year(), first.month(), 1);
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

pub fn month_title(year: i32, month: u32) -> String {
    format!("{}年{}月", year, month)
}

pub const WEEKDAY_LABELS: [&str; 7] = ["月", "火", "水", "木", "金", "土", "日"];
