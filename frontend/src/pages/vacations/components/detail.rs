use crate::pages::vacations::{
    components::status_badge::StatusBadge,
    types::{format_timestamp, AbsenceRequest},
};
use crate::state::usage::UsageStore;
use leptos::*;

pub fn usage_summary(approved: u32, pending: u32) -> String {
    format!("承認済み {}日 / 申請中 {}日", approved, pending)
}

/// Usage line for the request owner's year. Shows a placeholder until the
/// cache has an entry.
#[component]
pub fn UsageLine(usage: UsageStore, user_id: i64, year: i32) -> impl IntoView {
    view! {
        <p class="usage-line text-sm text-fg-muted">
            {move || match usage.usage(user_id, year) {
                Some(summary) => format!(
                    "{}年の取得状況: {}",
                    year,
                    usage_summary(summary.approved_days_used, summary.pending_days_requested),
                ),
                None => "取得状況を読み込み中...".to_string(),
            }}
        </p>
    }
}

#[component]
pub fn RequestDetailPanel(
    selected: RwSignal<Option<AbsenceRequest>>,
    usage: UsageStore,
    #[prop(into)] is_admin: MaybeSignal<bool>,
    on_approve: Callback<(AbsenceRequest, Option<String>)>,
    on_reject: Callback<(AbsenceRequest, Option<String>)>,
) -> impl IntoView {
    let is_admin = Signal::derive(move || is_admin.get());
    let comment = create_rw_signal(String::new());
    let comment_value = move || {
        let text = comment.get_untracked();
        comment.set(String::new());
        Some(text)
    };

    view! {
        {move || {
            selected
                .get()
                .map(|request| {
                    let stored = store_value(request.clone());
                    let pending = request.is_pending();
                    view! {
                        <aside class="bg-surface-elevated shadow rounded-lg p-4 space-y-3" aria-label="申請の詳細">
                            <div class="flex items-start justify-between">
                                <div>
                                    <p class="text-sm text-fg-muted">{"申請の詳細"}</p>
                                    <p class="text-lg font-semibold text-fg">{request.employee_name.clone()}</p>
                                </div>
                                <button
                                    aria-label="閉じる"
                                    class="text-fg-muted hover:text-fg"
                                    on:click=move |_| selected.set(None)
                                >
                                    {"✕"}
                                </button>
                            </div>
                            <dl class="grid grid-cols-3 gap-2 text-sm">
                                <dt class="text-fg-muted">{"期間"}</dt>
                                <dd class="col-span-2">
                                    {format!("{} ({}日)", request.period_label(), request.duration_days())}
                                </dd>
                                <dt class="text-fg-muted">{"種別"}</dt>
                                <dd class="col-span-2">{request.absence_type.label()}</dd>
                                <dt class="text-fg-muted">{"理由"}</dt>
                                <dd class="col-span-2 whitespace-pre-wrap">{request.reason.clone()}</dd>
                                <dt class="text-fg-muted">{"ステータス"}</dt>
                                <dd class="col-span-2"><StatusBadge status=request.status /></dd>
                                <dt class="text-fg-muted">{"申請日時"}</dt>
                                <dd class="col-span-2">{format_timestamp(request.requested_at)}</dd>
                                <dt class="text-fg-muted">{"審査日時"}</dt>
                                <dd class="col-span-2">{format_timestamp(request.reviewed_at)}</dd>
                                <dt class="text-fg-muted">{"管理者コメント"}</dt>
                                <dd class="col-span-2">
                                    {request.admin_response.clone().unwrap_or_else(|| "-".into())}
                                </dd>
                            </dl>
                            <UsageLine usage=usage user_id=request.user_id year=request.year() />
                            <Show when=move || pending && is_admin.get()>
                                <div class="space-y-2">
                                    <textarea
                                        rows="2"
                                        class="w-full border rounded px-2 py-1 text-sm"
                                        placeholder="コメント (任意)"
                                        prop:value=move || comment.get()
                                        on:input=move |ev| comment.set(event_target_value(&ev))
                                    ></textarea>
                                    <div class="flex gap-2 justify-end">
                                        <button
                                            data-action="reject"
                                            class="rounded-md px-3 py-1 text-sm bg-action-danger-bg text-action-danger-text"
                                            on:click=move |_| on_reject.call((stored.get_value(), comment_value()))
                                        >
                                            {"却下"}
                                        </button>
                                        <button
                                            data-action="approve"
                                            class="rounded-md px-3 py-1 text-sm bg-action-primary-bg text-action-primary-text"
                                            on:click=move |_| on_approve.call((stored.get_value(), comment_value()))
                                        >
                                            {"承認"}
                                        </button>
                                    </div>
                                </div>
                            </Show>
                        </aside>
                    }
                })
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::usage_summary;

    #[test]
    fn usage_summary_formats_both_counts() {
        assert_eq!(usage_summary(3, 2), "承認済み 3日 / 申請中 2日");
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::UsageResponse;
    use crate::pages::vacations::types::{fixtures::request, RequestStatus};
    use crate::test_support::ssr::render_to_string;

    fn render(seed: bool, is_admin: bool) -> String {
        render_to_string(move || {
            let usage = UsageStore::new();
            if seed {
                usage.seed(
                    1,
                    2030,
                    UsageResponse {
                        approved_days_used: 4,
                        pending_days_requested: 2,
                    },
                );
            }
            let selected = create_rw_signal(Some(request(
                9,
                "2030-05-01",
                "2030-05-03",
                RequestStatus::Pending,
            )));
            view! {
                <RequestDetailPanel
                    selected=selected
                    usage=usage
                    is_admin=is_admin
                    on_approve=Callback::new(|_| {})
                    on_reject=Callback::new(|_| {})
                />
            }
        })
    }

    #[test]
    fn detail_shows_cached_usage_and_review_actions() {
        let html = render(true, true);
        assert!(html.contains("Employee 9"));
        assert!(html.contains("2030年の取得状況"));
        assert!(html.contains("承認済み 4日"));
        assert!(html.contains("申請中 2日"));
        assert!(html.contains("data-action=\"approve\""));
    }

    #[test]
    fn detail_shows_placeholder_until_usage_arrives() {
        let html = render(false, false);
        assert!(html.contains("取得状況を読み込み中..."));
        assert!(!html.contains("data-action=\"approve\""));
    }
}
