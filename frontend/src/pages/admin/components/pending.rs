use crate::{
    api::ApiError,
    components::{empty_state::EmptyState, error::InlineErrorMessage, layout::LoadingSpinner},
    pages::vacations::{
        components::{detail::UsageLine, status_badge::absence_type_class},
        types::{format_timestamp, AbsenceRequest, RequestStatus},
    },
    state::usage::UsageStore,
};
use leptos::*;

/// One queue entry with the requester's yearly usage and a comment box.
#[component]
fn PendingRequestItem(
    request: AbsenceRequest,
    usage: UsageStore,
    comment: Signal<String>,
    on_comment: Callback<(i64, String)>,
    on_review: Callback<(AbsenceRequest, RequestStatus)>,
    busy: Signal<bool>,
) -> impl IntoView {
    let id = request.id;
    let approve_target = request.clone();
    let reject_target = request.clone();
    view! {
        <li class=format!(
            "pending-request rounded-lg bg-surface-elevated p-4 shadow-sm {}",
            absence_type_class(request.absence_type),
        )>
            <div class="flex items-start justify-between gap-4">
                <div>
                    <p class="font-medium text-fg">{request.employee_name.clone()}</p>
                    <p class="text-sm text-fg-muted">
                        {format!(
                            "{} ({}・{}日)",
                            request.period_label(),
                            request.absence_type.label(),
                            request.duration_days(),
                        )}
                    </p>
                    <p class="text-xs text-fg-muted">
                        {format!("申請日時: {}", format_timestamp(request.requested_at))}
                    </p>
                </div>
            </div>
            <p class="mt-2 text-sm text-fg whitespace-pre-wrap">{request.reason.clone()}</p>
            <UsageLine usage=usage user_id=request.user_id year=request.year() />
            <textarea
                class="mt-2 w-full rounded border border-border px-2 py-1 text-sm"
                name="admin_response"
                placeholder="コメント (任意)"
                prop:value=move || comment.get()
                on:input=move |ev| on_comment.call((id, event_target_value(&ev)))
            ></textarea>
            <div class="mt-2 flex gap-2">
                <button
                    class="rounded bg-action-primary-bg px-3 py-1 text-sm text-action-primary-text disabled:opacity-50"
                    data-action="approve"
                    disabled=move || busy.get()
                    on:click=move |_| on_review.call((approve_target.clone(), RequestStatus::Approved))
                >
                    {"承認"}
                </button>
                <button
                    class="rounded bg-action-danger-bg px-3 py-1 text-sm text-action-danger-text disabled:opacity-50"
                    data-action="reject"
                    disabled=move || busy.get()
                    on:click=move |_| on_review.call((reject_target.clone(), RequestStatus::Rejected))
                >
                    {"却下"}
                </button>
            </div>
        </li>
    }
}

#[component]
pub fn PendingRequestsSection(
    pending: Signal<Vec<AbsenceRequest>>,
    loading: Signal<bool>,
    error: Signal<Option<ApiError>>,
    usage: UsageStore,
    comments: Callback<i64, String>,
    on_comment: Callback<(i64, String)>,
    on_review: Callback<(AbsenceRequest, RequestStatus)>,
    busy: Signal<bool>,
) -> impl IntoView {
    view! {
        <section class="space-y-3">
            <h2 class="text-lg font-semibold text-fg">
                {move || format!("承認待ちの申請 ({}件)", pending.with(|list| list.len()))}
            </h2>
            <InlineErrorMessage error=error />
            <Show when=move || loading.get() && pending.with(|list| list.is_empty())>
                <LoadingSpinner />
            </Show>
            <Show
                when=move || !pending.with(|list| list.is_empty())
                fallback=move || {
                    view! { <EmptyState title="承認待ちの申請はありません" /> }
                }
            >
                <ul class="space-y-3">
                    <For
                        each=move || pending.get()
                        key=|request| request.id
                        children=move |request| {
                            let id = request.id;
                            let comment = Signal::derive(move || comments.call(id));
                            view! {
                                <PendingRequestItem
                                    request=request
                                    usage=usage
                                    comment=comment
                                    on_comment=on_comment
                                    on_review=on_review
                                    busy=busy
                                />
                            }
                        }
                    />
                </ul>
            </Show>
        </section>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::UsageResponse;
    use crate::pages::vacations::types::fixtures::request;
    use crate::test_support::ssr::render_to_string;

    fn render(list: Vec<AbsenceRequest>, seeded: bool) -> String {
        render_to_string(move || {
            let usage = UsageStore::new();
            if seeded {
                usage.seed(
                    1,
                    2030,
                    UsageResponse {
                        approved_days_used: 3,
                        pending_days_requested: 2,
                    },
                );
            }
            let pending = create_rw_signal(list);
            view! {
                <PendingRequestsSection
                    pending=pending.into()
                    loading=Signal::derive(|| false)
                    error=Signal::derive(|| None)
                    usage=usage
                    comments=Callback::new(|_| String::new())
                    on_comment=Callback::new(|_| {})
                    on_review=Callback::new(|_| {})
                    busy=Signal::derive(|| false)
                />
            }
        })
    }

    #[test]
    fn pending_section_shows_usage_and_actions() {
        let html = render(
            vec![request(1, "2030-03-01", "2030-03-02", RequestStatus::Pending)],
            true,
        );
        assert!(html.contains("承認待ちの申請 (1件)"));
        assert!(html.contains("2030年の取得状況"));
        assert!(html.contains("data-action=\"approve\""));
        assert!(html.contains("data-action=\"reject\""));
    }

    #[test]
    fn pending_section_shows_usage_placeholder_until_loaded() {
        let html = render(
            vec![request(1, "2030-03-01", "2030-03-02", RequestStatus::Pending)],
            false,
        );
        assert!(html.contains("取得状況を読み込み中..."));
    }

    #[test]
    fn empty_queue_renders_empty_state() {
        let html = render(Vec::new(), false);
        assert!(html.contains("承認待ちの申請はありません"));
    }
}
