use crate::api::{ApiClient, ApiError, CreateVacationRequest};
use crate::config;
use crate::pages::vacations::{
    form::{
        approved_personal_days, validate_submission, FormEvent, SubmissionContext,
        SubmissionFormState, SubmissionRules, ValidatedSubmission,
    },
    lookup::UserLookup,
    repository::VacationsRepository,
    types::{AbsenceRequest, RequestStatus, Scope},
    utils::{
        apply_status_change, clamp_page, filter_requests, merge_created, page_count, paginate,
        remove_request, requests_equivalent, RequestFilterState,
    },
};
use crate::state::{
    auth::{use_auth, AuthState},
    toast::{use_toasts, ToastState},
    usage::{use_usage_store, UsageStore},
};
use crate::utils::dates::{parse_local_ymd, today_local};
use crate::utils::query::replace_search;
use crate::utils::stale::LatestOnly;
use chrono::{Datelike, NaiveDate};
use leptos::*;

/// Approve or reject, with the optional reviewer comment.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewCommand {
    pub id: i64,
    pub user_id: i64,
    pub year: i32,
    pub status: RequestStatus,
    pub comment: Option<String>,
}

impl ReviewCommand {
    pub fn new(request: &AbsenceRequest, status: RequestStatus, comment: Option<String>) -> Self {
        Self {
            id: request.id,
            user_id: request.user_id,
            year: request.year(),
            status,
            comment: comment.filter(|c| !c.trim().is_empty()),
        }
    }
}

type ListKey = (u32, Option<i64>);

#[derive(Clone, Copy)]
pub struct VacationsViewModel {
    pub rules: SubmissionRules,
    pub page_size: usize,
    pub auth: ReadSignal<AuthState>,
    pub filter: RequestFilterState,
    pub requests: RwSignal<Vec<AbsenceRequest>>,
    pub requests_resource: Resource<ListKey, Result<Vec<AbsenceRequest>, ApiError>>,
    pub form: SubmissionFormState,
    pub form_open: RwSignal<bool>,
    pub selected: RwSignal<Option<AbsenceRequest>>,
    pub selected_day: RwSignal<Option<NaiveDate>>,
    pub calendar_month: RwSignal<(i32, u32)>,
    pub pending_delete: RwSignal<Option<AbsenceRequest>>,
    pub create_request_action: Action<CreateVacationRequest, Result<AbsenceRequest, ApiError>>,
    pub review_action: Action<ReviewCommand, Result<ReviewCommand, ApiError>>,
    pub delete_action: Action<i64, Result<i64, ApiError>>,
    pub usage: UsageStore,
    pub toasts: ToastState,
    pub lookup: UserLookup,
    validation: Memo<Result<ValidatedSubmission, ApiError>>,
    submit_attempted: RwSignal<bool>,
    repository: StoredValue<VacationsRepository>,
    reload: RwSignal<u32>,
}

/// User filter for the list request: `None` means every employee.
fn list_user_filter(auth: &AuthState, scope: Scope) -> Option<i64> {
    if auth.is_admin() && scope == Scope::All {
        None
    } else {
        auth.user_id()
    }
}

pub(crate) fn apply_silent_refresh(
    requests: RwSignal<Vec<AbsenceRequest>>,
    fetched: Result<Vec<AbsenceRequest>, ApiError>,
) -> bool {
    match fetched {
        Ok(list) => {
            let unchanged = requests.with_untracked(|current| requests_equivalent(current, &list));
            if !unchanged {
                requests.set(list);
            }
            !unchanged
        }
        Err(err) => {
            log::warn!("background refresh failed: {}", err);
            false
        }
    }
}

pub(crate) fn apply_create_result(
    result: Option<Result<AbsenceRequest, ApiError>>,
    requests: RwSignal<Vec<AbsenceRequest>>,
    form: SubmissionFormState,
    form_open: RwSignal<bool>,
    toasts: ToastState,
) {
    match result {
        Some(Ok(created)) => {
            requests.update(|list| merge_created(list, created));
            form.transition(FormEvent::Resolved(Ok(())));
            form_open.set(false);
            form.reset();
            toasts.success("休暇申請を送信しました。");
        }
        Some(Err(err)) => {
            form.transition(FormEvent::Resolved(Err(err.error.clone())));
            toasts.error(err.error);
        }
        None => {}
    }
}

pub(crate) fn apply_review_result(
    result: Option<Result<ReviewCommand, ApiError>>,
    requests: RwSignal<Vec<AbsenceRequest>>,
    selected: RwSignal<Option<AbsenceRequest>>,
    usage: UsageStore,
    toasts: ToastState,
) {
    match result {
        Some(Ok(command)) => {
            let now = chrono::Local::now().naive_local();
            let mut updated = None;
            requests.update(|list| {
                updated =
                    apply_status_change(list, command.id, command.status, command.comment.clone(), now);
            });
            if let Some(updated) = updated {
                if selected.with_untracked(|current| current.as_ref().map(|r| r.id)) == Some(updated.id)
                {
                    selected.set(Some(updated));
                }
            }
            usage.invalidate(command.user_id, command.year);
            toasts.success(match command.status {
                RequestStatus::Approved => "申請を承認しました。",
                RequestStatus::Rejected => "申請を却下しました。",
                RequestStatus::Pending => "申請を更新しました。",
            });
        }
        Some(Err(err)) => {
            toasts.error(err.error);
        }
        None => {}
    }
}

pub(crate) fn apply_delete_result(
    result: Option<Result<i64, ApiError>>,
    requests: RwSignal<Vec<AbsenceRequest>>,
    selected: RwSignal<Option<AbsenceRequest>>,
    toasts: ToastState,
) {
    match result {
        Some(Ok(id)) => {
            requests.update(|list| {
                remove_request(list, id);
            });
            if selected.with_untracked(|current| current.as_ref().map(|r| r.id)) == Some(id) {
                selected.set(None);
            }
            toasts.success("申請を削除しました。");
        }
        Some(Err(err)) => {
            toasts.error(err.error);
        }
        None => {}
    }
}

impl VacationsViewModel {
    pub fn new(rules: SubmissionRules) -> Self {
        let app_config = config::current();
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(VacationsRepository::new(api));
        let (auth, _) = use_auth();
        let usage = use_usage_store();
        let toasts = use_toasts();

        let filter = RequestFilterState::default();
        let requests = create_rw_signal(Vec::<AbsenceRequest>::new());
        let form = SubmissionFormState::default();
        let form_open = create_rw_signal(false);
        let selected = create_rw_signal(None::<AbsenceRequest>);
        let selected_day = create_rw_signal(None::<NaiveDate>);
        let today = today_local();
        let calendar_month = create_rw_signal((today.year(), today.month()));
        let pending_delete = create_rw_signal(None::<AbsenceRequest>);
        let reload = create_rw_signal(0u32);
        let lookup = UserLookup::new();

        let requests_resource = create_resource(
            move || (reload.get(), auth.with(|state| list_user_filter(state, filter.scope()))),
            move |(_, user_id)| {
                let repo = repository.get_value();
                async move { repo.list(user_id, None).await }
            },
        );

        let refresh_guard = store_value(LatestOnly::new());
        create_effect(move |_| {
            if let Some(Ok(list)) = requests_resource.get() {
                // A poll started before this load would carry the previous scope.
                refresh_guard.with_value(LatestOnly::cancel);
                requests.set(list);
            }
        });

        create_effect(move |_| {
            replace_search(&filter.to_query());
        });

        let personal_day_limit = app_config.personal_day_limit;
        let validation = create_memo(move |_| {
            let input = form.input();
            let user_id = auth.with(AuthState::user_id);
            let year = parse_local_ymd(&input.start)
                .map(|date| date.year())
                .unwrap_or_else(|| today.year());
            requests.with(|list| {
                validate_submission(
                    &input,
                    &SubmissionContext {
                        today: today_local(),
                        user_id,
                        existing: list,
                        approved_personal_days: Some(approved_personal_days(list, user_id, year)),
                        personal_day_limit,
                    },
                    rules,
                )
            })
        });

        create_effect(move |_| {
            let valid = validation.with(Result::is_ok);
            form.transition(FormEvent::Edited { valid });
        });

        let create_request_action = create_action(move |payload: &CreateVacationRequest| {
            let repo = repository.get_value();
            let payload = payload.clone();
            async move { repo.create(payload).await }
        });
        let review_action = create_action(move |command: &ReviewCommand| {
            let repo = repository.get_value();
            let command = command.clone();
            async move {
                repo.set_status(command.id, command.status, command.comment.as_deref())
                    .await
                    .map(|_| command)
            }
        });
        let delete_action = create_action(move |id: &i64| {
            let repo = repository.get_value();
            let id = *id;
            async move { repo.delete(id).await.map(|_| id) }
        });

        create_effect(move |_| {
            apply_create_result(create_request_action.value().get(), requests, form, form_open, toasts);
        });
        create_effect(move |_| {
            apply_review_result(review_action.value().get(), requests, selected, usage, toasts);
        });
        create_effect(move |_| {
            apply_delete_result(delete_action.value().get(), requests, selected, toasts);
        });

        create_effect(move |_| {
            if let Some(request) = selected.get() {
                usage.ensure(repository.get_value().client(), request.user_id, request.year());
            }
        });

        #[cfg(target_arch = "wasm32")]
        {
            let poll_ms = app_config.poll_interval_secs.saturating_mul(1000);
            let _interval = store_value(gloo_timers::callback::Interval::new(poll_ms, move || {
                let repo = repository.get_value();
                let user_id = auth.with_untracked(|state| {
                    list_user_filter(state, filter.scope_untracked())
                });
                let ticket = refresh_guard.with_value(LatestOnly::issue);
                spawn_local(async move {
                    let fetched = repo.list(user_id, None).await;
                    if refresh_guard.with_value(|guard| guard.is_current(ticket)) {
                        apply_silent_refresh(requests, fetched);
                    }
                });
            }));
        }

        Self {
            rules,
            page_size: app_config.page_size,
            auth,
            filter,
            requests,
            requests_resource,
            form,
            form_open,
            selected,
            selected_day,
            calendar_month,
            pending_delete,
            create_request_action,
            review_action,
            delete_action,
            usage,
            toasts,
            lookup,
            validation,
            submit_attempted: create_rw_signal(false),
            repository,
            reload,
        }
    }

    pub fn repository(&self) -> VacationsRepository {
        self.repository.get_value()
    }

    pub fn is_admin(&self) -> Signal<bool> {
        let auth = self.auth;
        Signal::derive(move || auth.with(AuthState::is_admin))
    }

    pub fn loading(&self) -> Signal<bool> {
        self.requests_resource.loading()
    }

    pub fn load_error(&self) -> Signal<Option<ApiError>> {
        let resource = self.requests_resource;
        Signal::derive(move || resource.get().and_then(|result| result.err()))
    }

    pub fn filtered(&self) -> Signal<Vec<AbsenceRequest>> {
        let requests = self.requests;
        let filter = self.filter;
        Signal::derive(move || {
            let status = filter.status();
            let search = filter.search();
            requests.with(|list| filter_requests(list, status, &search))
        })
    }

    pub fn total_pages(&self) -> Signal<usize> {
        let filtered = self.filtered();
        let page_size = self.page_size;
        Signal::derive(move || filtered.with(|list| page_count(list.len(), page_size)))
    }

    pub fn current_page(&self) -> Signal<usize> {
        let filtered = self.filtered();
        let filter = self.filter;
        let page_size = self.page_size;
        Signal::derive(move || {
            let page = filter.page();
            filtered.with(|list| clamp_page(page, list.len(), page_size))
        })
    }

    pub fn page_items(&self) -> Signal<Vec<AbsenceRequest>> {
        let filtered = self.filtered();
        let filter = self.filter;
        let page_size = self.page_size;
        Signal::derive(move || {
            let page = filter.page();
            filtered.with(|list| paginate(list, page, page_size))
        })
    }

    pub fn form_warning(&self) -> Signal<Option<String>> {
        let validation = self.validation;
        Signal::derive(move || {
            validation.with(|result| result.as_ref().ok().and_then(|v| v.warning.clone()))
        })
    }

    pub fn form_error(&self) -> Signal<Option<String>> {
        let validation = self.validation;
        let form = self.form;
        let submit_attempted = self.submit_attempted;
        // An untouched form stays quiet until the user tries to submit it.
        Signal::derive(move || {
            if form.is_blank() && !submit_attempted.get() {
                return None;
            }
            validation.with(|result| result.as_ref().err().map(|err| err.error.clone()))
        })
    }

    pub fn can_delete(&self, request: &AbsenceRequest) -> bool {
        self.auth.with(|state| {
            state.is_admin() || (state.user_id() == Some(request.user_id) && request.is_pending())
        })
    }

    pub fn open_form(&self) {
        self.submit_attempted.set(false);
        self.form.reset();
        self.form_open.set(true);
    }

    pub fn close_form(&self) {
        self.submit_attempted.set(false);
        self.form_open.set(false);
        self.form.reset();
    }

    /// Validates locally and dispatches the create call. Invalid input never
    /// reaches the network.
    pub fn submit(&self) -> Result<(), ApiError> {
        self.submit_attempted.set(true);
        let validated = self.validation.get_untracked()?;
        self.form.transition(FormEvent::Edited { valid: true });
        self.form.transition(FormEvent::Submit);
        self.create_request_action.dispatch(validated.payload);
        Ok(())
    }

    pub fn approve(&self, request: &AbsenceRequest, comment: Option<String>) {
        self.review_action
            .dispatch(ReviewCommand::new(request, RequestStatus::Approved, comment));
    }

    pub fn reject(&self, request: &AbsenceRequest, comment: Option<String>) {
        self.review_action
            .dispatch(ReviewCommand::new(request, RequestStatus::Rejected, comment));
    }

    pub fn request_delete(&self, request: AbsenceRequest) {
        self.pending_delete.set(Some(request));
    }

    pub fn confirm_delete(&self) {
        if let Some(request) = self.pending_delete.get_untracked() {
            self.delete_action.dispatch(request.id);
        }
        self.pending_delete.set(None);
    }

    pub fn reload(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }
}

pub fn use_vacations_view_model(rules: SubmissionRules) -> VacationsViewModel {
    match use_context::<VacationsViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = VacationsViewModel::new(rules);
            provide_context(vm);
            vm
        }
    }
}
