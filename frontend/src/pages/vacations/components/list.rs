use crate::api::ApiError;
use crate::components::{
    empty_state::EmptyState,
    layout::{ErrorMessage, LoadingSpinner},
};
use crate::pages::vacations::{
    components::status_badge::StatusBadge,
    types::{format_timestamp, AbsenceRequest},
};
use leptos::*;

const HEADER_CELL: &str =
    "px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider";
const BODY_CELL: &str = "px-6 py-4 whitespace-nowrap text-sm text-fg";

#[component]
pub fn VacationsTable(
    requests: Signal<Vec<AbsenceRequest>>,
    loading: Signal<bool>,
    error: Signal<Option<ApiError>>,
    #[prop(into)] is_admin: MaybeSignal<bool>,
    can_delete: Callback<AbsenceRequest, bool>,
    on_select: Callback<AbsenceRequest>,
    on_approve: Callback<AbsenceRequest>,
    on_reject: Callback<AbsenceRequest>,
    on_delete: Callback<AbsenceRequest>,
) -> impl IntoView {
    let is_admin = Signal::derive(move || is_admin.get());
    view! {
        <div class="bg-surface-elevated shadow rounded-lg">
            <Show when=move || error.get().is_some()>
                <div class="px-6 py-4">
                    <ErrorMessage message={error.get().map(|e| e.error).unwrap_or_default()} />
                </div>
            </Show>
            <Show when=move || loading.get() && requests.with(Vec::is_empty)>
                <LoadingSpinner />
            </Show>
            <Show when=move || !loading.get() && requests.with(Vec::is_empty) && error.get().is_none()>
                <div class="p-6">
                    <EmptyState
                        title="表示できる申請がありません"
                        description="条件を変えるか、新しい申請を作成してください。"
                    />
                </div>
            </Show>
            <Show when=move || !requests.with(Vec::is_empty)>
                <div class="overflow-x-auto">
                    <table class="min-w-full divide-y divide-border">
                        <thead class="bg-surface-muted">
                            <tr>
                                <th class=HEADER_CELL>{"社員"}</th>
                                <th class=HEADER_CELL>{"期間"}</th>
                                <th class=HEADER_CELL>{"日数"}</th>
                                <th class=HEADER_CELL>{"種別"}</th>
                                <th class=HEADER_CELL>{"理由"}</th>
                                <th class=HEADER_CELL>{"ステータス"}</th>
                                <th class=HEADER_CELL>{"申請日時"}</th>
                                <th class=HEADER_CELL>{"操作"}</th>
                            </tr>
                        </thead>
                        <tbody class="bg-surface-elevated divide-y divide-border">
                            <For
                                each=move || requests.get()
                                key=|request| (request.id, request.status)
                                children=move |request: AbsenceRequest| {
                                    let stored = store_value(request.clone());
                                    let pending = request.is_pending();
                                    let deletable = can_delete.call(request.clone());
                                    view! {
                                        <tr
                                            class="hover:bg-surface-muted cursor-pointer"
                                            on:click=move |_| on_select.call(stored.get_value())
                                        >
                                            <td class=BODY_CELL>{request.employee_name.clone()}</td>
                                            <td class=BODY_CELL>{request.period_label()}</td>
                                            <td class=BODY_CELL>{format!("{}日", request.duration_days())}</td>
                                            <td class=BODY_CELL>{request.absence_type.label()}</td>
                                            <td class="px-6 py-4 text-sm text-fg max-w-xs truncate">
                                                {request.reason.clone()}
                                            </td>
                                            <td class=BODY_CELL><StatusBadge status=request.status /></td>
                                            <td class=BODY_CELL>{format_timestamp(request.requested_at)}</td>
                                            <td class=BODY_CELL>
                                                <div class="flex gap-2">
                                                    <Show when=move || pending && is_admin.get()>
                                                        <button
                                                            data-action="approve"
                                                            class="text-status-success-text hover:underline"
                                                            on:click=move |ev| {
                                                                ev.stop_propagation();
                                                                on_approve.call(stored.get_value());
                                                            }
                                                        >
                                                            {"承認"}
                                                        </button>
                                                        <button
                                                            data-action="reject"
                                                            class="text-status-error-text hover:underline"
                                                            on:click=move |ev| {
                                                                ev.stop_propagation();
                                                                on_reject.call(stored.get_value());
                                                            }
                                                        >
                                                            {"却下"}
                                                        </button>
                                                    </Show>
                                                    <Show when=move || deletable>
                                                        <button
                                                            data-action="delete"
                                                            class="text-fg-muted hover:underline"
                                                            on:click=move |ev| {
                                                                ev.stop_propagation();
                                                                on_delete.call(stored.get_value());
                                                            }
                                                        >
                                                            {"削除"}
                                                        </button>
                                                    </Show>
                                                </div>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </Show>
        </div>
    }
}

#[component]
pub fn Pagination(
    page: Signal<usize>,
    total_pages: Signal<usize>,
    on_change: Callback<usize>,
) -> impl IntoView {
    view! {
        <Show when=move || { total_pages.get() > 1 }>
            <nav class="flex items-center justify-between px-2 py-3 text-sm" aria-label="ページ送り">
                <button
                    class="px-3 py-1 rounded border border-border disabled:opacity-50"
                    disabled=move || { page.get() <= 1 }
                    on:click=move |_| on_change.call(page.get_untracked().saturating_sub(1).max(1))
                >
                    {"前へ"}
                </button>
                <span class="text-fg-muted">
                    {move || format!("{} / {} ページ", page.get(), total_pages.get())}
                </span>
                <button
                    class="px-3 py-1 rounded border border-border disabled:opacity-50"
                    disabled=move || { page.get() >= total_pages.get() }
                    on:click=move |_| {
                        let next = (page.get_untracked() + 1).min(total_pages.get_untracked());
                        on_change.call(next);
                    }
                >
                    {"次へ"}
                </button>
            </nav>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::pages::vacations::types::{fixtures::request, RequestStatus};
    use crate::test_support::ssr::render_to_string;

    fn render_table(list: Vec<AbsenceRequest>, is_admin: bool) -> String {
        render_to_string(move || {
            let requests = Signal::derive(move || list.clone());
            view! {
                <VacationsTable
                    requests=requests
                    loading=Signal::derive(|| false)
                    error=Signal::derive(|| None)
                    is_admin=is_admin
                    can_delete=Callback::new(|request: AbsenceRequest| request.is_pending())
                    on_select=Callback::new(|_| {})
                    on_approve=Callback::new(|_| {})
                    on_reject=Callback::new(|_| {})
                    on_delete=Callback::new(|_| {})
                />
            }
        })
    }

    #[test]
    fn table_renders_rows_with_admin_actions() {
        let html = render_table(
            vec![
                request(1, "2030-03-01", "2030-03-03", RequestStatus::Pending),
                request(2, "2030-04-01", "2030-04-01", RequestStatus::Approved),
            ],
            true,
        );
        assert!(html.contains("Employee 1"));
        assert!(html.contains("2030-03-01 〜 2030-03-03"));
        assert!(html.contains("3日"));
        assert!(html.contains("承認待ち"));
        assert!(html.contains("承認済み"));
        assert!(html.contains("data-action=\"approve\""));
        assert_eq!(html.matches("data-action=\"delete\"").count(), 1);
    }

    #[test]
    fn table_hides_review_buttons_for_members() {
        let html = render_table(
            vec![request(1, "2030-03-01", "2030-03-03", RequestStatus::Pending)],
            false,
        );
        assert!(!html.contains("data-action=\"approve\""));
        assert!(html.contains("data-action=\"delete\""));
    }

    #[test]
    fn empty_list_shows_empty_state() {
        let html = render_table(Vec::new(), false);
        assert!(html.contains("表示できる申請がありません"));
    }

    #[test]
    fn pagination_hidden_for_single_page() {
        let html = render_to_string(|| {
            view! {
                <Pagination
                    page=Signal::derive(|| 1)
                    total_pages=Signal::derive(|| 1)
                    on_change=Callback::new(|_| {})
                />
            }
        });
        assert!(!html.contains("ページ送り"));

        let html = render_to_string(|| {
            view! {
                <Pagination
                    page=Signal::derive(|| 2)
                    total_pages=Signal::derive(|| 3)
                    on_change=Callback::new(|_| {})
                />
            }
        });
        // SSR escapes the slash in text nodes.
        assert!(html.contains("2 &#x2F; 3 ページ"));
    }
}
