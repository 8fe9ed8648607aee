use crate::api::{ApiError, CreateVacationRequest};
use crate::utils::dates::{days_between_inclusive, parse_local_ymd, ranges_overlap};
use chrono::NaiveDate;
use leptos::*;

use super::types::{AbsenceRequest, AbsenceType, RequestStatus};

/// Which optional checks a form applies on top of the common gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionRules {
    pub personal_cap_warning: bool,
    pub overlap_check: bool,
}

impl SubmissionRules {
    pub const DESKTOP: Self = Self {
        personal_cap_warning: true,
        overlap_check: false,
    };
    pub const MOBILE: Self = Self {
        personal_cap_warning: false,
        overlap_check: true,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionInput {
    pub start: String,
    pub end: String,
    pub reason: String,
    pub absence_type: AbsenceType,
}

impl SubmissionInput {
    fn is_blank(&self) -> bool {
        self.start.trim().is_empty() && self.end.trim().is_empty() && self.reason.trim().is_empty()
    }
}

pub struct SubmissionContext<'a> {
    pub today: NaiveDate,
    pub user_id: Option<i64>,
    pub existing: &'a [AbsenceRequest],
    /// Approved personal days already used in the request's year, when known.
    pub approved_personal_days: Option<u32>,
    pub personal_day_limit: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub payload: CreateVacationRequest,
    pub warning: Option<String>,
}

pub fn validate_submission(
    input: &SubmissionInput,
    ctx: &SubmissionContext<'_>,
    rules: SubmissionRules,
) -> Result<ValidatedSubmission, ApiError> {
    let reason = input.reason.trim();
    if input.start.trim().is_empty() || input.end.trim().is_empty() || reason.is_empty() {
        return Err(ApiError::validation(
            "開始日・終了日・理由をすべて入力してください。",
        ));
    }
    let start = parse_local_ymd(&input.start)
        .ok_or_else(|| ApiError::validation("開始日を YYYY-MM-DD 形式で入力してください。"))?;
    let end = parse_local_ymd(&input.end)
        .ok_or_else(|| ApiError::validation("終了日を YYYY-MM-DD 形式で入力してください。"))?;
    if start > end {
        return Err(ApiError::validation(
            "終了日は開始日以降の日付を指定してください。",
        ));
    }
    if start < ctx.today {
        return Err(ApiError::validation("過去の日付から始まる申請はできません。"));
    }
    if rules.overlap_check {
        if let Some(conflict) = find_overlap(ctx.existing, ctx.user_id, start, end) {
            return Err(ApiError::validation(format!(
                "既存の申請 ({}) と期間が重複しています。",
                conflict.period_label()
            )));
        }
    }
    let warning = if rules.personal_cap_warning && input.absence_type == AbsenceType::Personal {
        ctx.approved_personal_days.and_then(|used| {
            personal_cap_warning(used, days_between_inclusive(start, end), ctx.personal_day_limit)
        })
    } else {
        None
    };

    Ok(ValidatedSubmission {
        payload: CreateVacationRequest {
            start_date: start,
            end_date: end,
            reason: reason.to_string(),
            absence_type: Some(input.absence_type.as_str().to_string()),
        },
        warning,
    })
}

/// Soft warning once approved personal days plus this request reach the limit.
pub fn personal_cap_warning(approved_days: u32, requested_days: i64, limit: u32) -> Option<String> {
    let total = i64::from(approved_days) + requested_days;
    (total >= i64::from(limit)).then(|| {
        format!(
            "この申請で今年の私用休暇は {} 日となり、上限 {} 日に達します。",
            total, limit
        )
    })
}

/// Approved personal days `user_id` already has in `year`, from the local list.
pub fn approved_personal_days(existing: &[AbsenceRequest], user_id: Option<i64>, year: i32) -> u32 {
    existing
        .iter()
        .filter(|request| {
            request.status == RequestStatus::Approved
                && request.absence_type == AbsenceType::Personal
                && request.year() == year
                && user_id.map_or(true, |id| request.user_id == id)
        })
        .map(|request| request.duration_days().max(0) as u32)
        .sum()
}

/// First non-rejected request of `user_id` intersecting `[start, end]`.
pub fn find_overlap(
    existing: &[AbsenceRequest],
    user_id: Option<i64>,
    start: NaiveDate,
    end: NaiveDate,
) -> Option<&AbsenceRequest> {
    existing.iter().find(|request| {
        request.status != RequestStatus::Rejected
            && user_id.map_or(true, |id| request.user_id == id)
            && ranges_overlap(request.start, request.end, start, end)
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Empty,
    Valid,
    Submitting,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Edited { valid: bool },
    Submit,
    Resolved(Result<(), String>),
    Reset,
}

impl FormPhase {
    pub fn next(self, event: FormEvent) -> FormPhase {
        match (self, event) {
            (_, FormEvent::Reset) => FormPhase::Empty,
            (FormPhase::Submitting, FormEvent::Resolved(Ok(()))) => FormPhase::Succeeded,
            (FormPhase::Submitting, FormEvent::Resolved(Err(message))) => {
                FormPhase::Failed(message)
            }
            (FormPhase::Submitting, _) => FormPhase::Submitting,
            (FormPhase::Valid, FormEvent::Submit) => FormPhase::Submitting,
            (_, FormEvent::Edited { valid: true }) => FormPhase::Valid,
            (_, FormEvent::Edited { valid: false }) => FormPhase::Empty,
            (phase, _) => phase,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, FormPhase::Submitting)
    }
}

#[derive(Clone, Copy)]
pub struct SubmissionFormState {
    start: RwSignal<String>,
    end: RwSignal<String>,
    reason: RwSignal<String>,
    absence_type: RwSignal<AbsenceType>,
    single_day: RwSignal<bool>,
    phase: RwSignal<FormPhase>,
}

impl Default for SubmissionFormState {
    fn default() -> Self {
        Self {
            start: create_rw_signal(String::new()),
            end: create_rw_signal(String::new()),
            reason: create_rw_signal(String::new()),
            absence_type: create_rw_signal(AbsenceType::default()),
            single_day: create_rw_signal(false),
            phase: create_rw_signal(FormPhase::default()),
        }
    }
}

impl SubmissionFormState {
    pub fn start_signal(&self) -> RwSignal<String> {
        self.start
    }

    pub fn end_signal(&self) -> RwSignal<String> {
        self.end
    }

    pub fn reason_signal(&self) -> RwSignal<String> {
        self.reason
    }

    pub fn absence_type_signal(&self) -> RwSignal<AbsenceType> {
        self.absence_type
    }

    pub fn single_day_signal(&self) -> RwSignal<bool> {
        self.single_day
    }

    pub fn phase(&self) -> RwSignal<FormPhase> {
        self.phase
    }

    pub fn set_start(&self, value: String) {
        if self.single_day.get_untracked() {
            self.end.set(value.clone());
        }
        self.start.set(value);
    }

    pub fn set_single_day(&self, single: bool) {
        self.single_day.set(single);
        if single {
            self.end.set(self.start.get_untracked());
        }
    }

    pub fn input(&self) -> SubmissionInput {
        let start = self.start.get();
        let end = if self.single_day.get() {
            start.clone()
        } else {
            self.end.get()
        };
        SubmissionInput {
            start,
            end,
            reason: self.reason.get(),
            absence_type: self.absence_type.get(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.input().is_blank()
    }

    pub fn transition(&self, event: FormEvent) {
        self.phase.update(|phase| {
            *phase = std::mem::take(phase).next(event);
        });
    }

    pub fn reset(&self) {
        self.start.set(String::new());
        self.end.set(String::new());
        self.reason.set(String::new());
        self.absence_type.set(AbsenceType::default());
        self.single_day.set(false);
        self.transition(FormEvent::Reset);
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn single_day_mode_mirrors_start_into_end() {
        with_runtime(|| {
            let state = SubmissionFormState::default();
            state.set_start("2024-08-01".into());
            state.end_signal().set("2024-08-05".into());
            state.set_single_day(true);
            assert_eq!(state.end_signal().get(), "2024-08-01");

            state.set_start("2024-08-09".into());
            let input = state.input();
            assert_eq!(input.start, "2024-08-09");
            assert_eq!(input.end, "2024-08-09");
        });
    }

    #[test]
    fn reset_clears_fields_and_phase() {
        with_runtime(|| {
            let state = SubmissionFormState::default();
            state.set_start("2024-08-01".into());
            state.reason_signal().set("trip".into());
            state.transition(FormEvent::Edited { valid: true });
            state.transition(FormEvent::Submit);
            assert!(state.phase().get().is_submitting());

            state.reset();
            assert!(state.is_blank());
            assert_eq!(state.phase().get(), FormPhase::Empty);
        });
    }
}
