use super::{repository::AdminRepository, utils::sort_pending};
use crate::api::{ApiClient, ApiError, VacationStats};
use crate::pages::vacations::{
    types::{AbsenceRequest, RequestStatus},
    utils::remove_request,
    view_model::ReviewCommand,
};
use crate::state::{
    toast::{use_toasts, ToastState},
    usage::{use_usage_store, UsageStore},
};
use crate::utils::dates::today_local;
use chrono::Datelike;
use leptos::*;
use std::collections::HashMap;

#[derive(Clone, Copy)]
pub struct AdminViewModel {
    pub year: RwSignal<i32>,
    pub pending: RwSignal<Vec<AbsenceRequest>>,
    pub pending_resource: Resource<u32, Result<Vec<AbsenceRequest>, ApiError>>,
    pub stats_resource: Resource<(i32, u32), Result<VacationStats, ApiError>>,
    pub comments: RwSignal<HashMap<i64, String>>,
    pub review_action: Action<ReviewCommand, Result<ReviewCommand, ApiError>>,
    pub usage: UsageStore,
    pub toasts: ToastState,
    repository: StoredValue<AdminRepository>,
    reload: RwSignal<u32>,
}

/// Drops a reviewed request from the queue, refreshes its owner's usage and
/// the yearly stats.
pub(crate) fn apply_admin_review_result(
    result: Option<Result<ReviewCommand, ApiError>>,
    pending: RwSignal<Vec<AbsenceRequest>>,
    comments: RwSignal<HashMap<i64, String>>,
    usage: UsageStore,
    toasts: ToastState,
    reload: RwSignal<u32>,
) {
    match result {
        Some(Ok(command)) => {
            pending.update(|list| {
                remove_request(list, command.id);
            });
            comments.update(|map| {
                map.remove(&command.id);
            });
            usage.invalidate(command.user_id, command.year);
            reload.update(|value| *value = value.wrapping_add(1));
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

impl AdminViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(AdminRepository::new(api));
        let usage = use_usage_store();
        let toasts = use_toasts();
        let year = create_rw_signal(today_local().year());
        let pending = create_rw_signal(Vec::<AbsenceRequest>::new());
        let comments = create_rw_signal(HashMap::<i64, String>::new());
        let reload = create_rw_signal(0u32);

        let pending_resource = create_resource(
            move || reload.get(),
            move |_| {
                let repo = repository.get_value();
                async move { repo.list_pending().await }
            },
        );
        let stats_resource = create_resource(
            move || (year.get(), reload.get()),
            move |(year, _)| {
                let repo = repository.get_value();
                async move { repo.stats(year).await }
            },
        );

        create_effect(move |_| {
            if let Some(Ok(mut list)) = pending_resource.get() {
                sort_pending(&mut list);
                let api = repository.get_value().client();
                for request in &list {
                    usage.ensure(api.clone(), request.user_id, request.year());
                }
                pending.set(list);
            }
        });

        let review_action = create_action(move |command: &ReviewCommand| {
            let repo = repository.get_value();
            let command = command.clone();
            async move {
                repo.review(command.id, command.status, command.comment.as_deref())
                    .await
                    .map(|_| command)
            }
        });
        create_effect(move |_| {
            apply_admin_review_result(
                review_action.value().get(),
                pending,
                comments,
                usage,
                toasts,
                reload,
            );
        });

        Self {
            year,
            pending,
            pending_resource,
            stats_resource,
            comments,
            review_action,
            usage,
            toasts,
            repository,
            reload,
        }
    }

    pub fn loading(&self) -> Signal<bool> {
        self.pending_resource.loading()
    }

    pub fn load_error(&self) -> Signal<Option<ApiError>> {
        let resource = self.pending_resource;
        Signal::derive(move || resource.get().and_then(|result| result.err()))
    }

    pub fn stats(&self) -> Signal<Option<VacationStats>> {
        let resource = self.stats_resource;
        Signal::derive(move || resource.get().and_then(|result| result.ok()))
    }

    pub fn comment(&self, id: i64) -> String {
        self.comments
            .with(|map| map.get(&id).cloned().unwrap_or_default())
    }

    pub fn set_comment(&self, id: i64, text: String) {
        self.comments.update(|map| {
            map.insert(id, text);
        });
    }

    pub fn review(&self, request: &AbsenceRequest, status: RequestStatus) {
        let comment = self.comments.with_untracked(|map| map.get(&request.id).cloned());
        self.review_action
            .dispatch(ReviewCommand::new(request, status, comment));
    }

    pub fn reload(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }

    pub fn repository(&self) -> AdminRepository {
        self.repository.get_value()
    }
}

impl Default for AdminViewModel {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_admin_view_model() -> AdminViewModel {
    match use_context::<AdminViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = AdminViewModel::new();
            provide_context(vm);
            vm
        }
    }
}
