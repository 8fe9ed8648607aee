use crate::components::empty_state::EmptyState;
use crate::pages::vacations::{
    components::status_badge::{absence_type_class, StatusBadge},
    types::AbsenceRequest,
};
use leptos::*;

#[component]
pub fn RequestCards(
    requests: Signal<Vec<AbsenceRequest>>,
    can_delete: Callback<AbsenceRequest, bool>,
    on_select: Callback<AbsenceRequest>,
    on_delete: Callback<AbsenceRequest>,
) -> impl IntoView {
    view! {
        <Show
            when=move || !requests.with(Vec::is_empty)
            fallback=|| view! { <EmptyState title="申請はまだありません" description="右下のボタンから申請できます。" /> }
        >
            <ul class="space-y-3">
                <For
                    each=move || requests.get()
                    key=|request| (request.id, request.status)
                    children=move |request: AbsenceRequest| {
                        let stored = store_value(request.clone());
                        let deletable = can_delete.call(request.clone());
                        view! {
                            <li
                                class=format!(
                                    "request-card bg-surface-elevated rounded-lg shadow p-4 space-y-1 {}",
                                    absence_type_class(request.absence_type),
                                )
                                on:click=move |_| on_select.call(stored.get_value())
                            >
                                <div class="flex items-center justify-between">
                                    <span class="font-semibold text-fg">{request.period_label()}</span>
                                    <StatusBadge status=request.status />
                                </div>
                                <p class="text-sm text-fg-muted">
                                    {format!("{} ・ {}日", request.absence_type.label(), request.duration_days())}
                                </p>
                                <p class="text-sm text-fg truncate">{request.reason.clone()}</p>
                                <Show when=move || deletable>
                                    <div class="flex justify-end">
                                        <button
                                            data-action="delete"
                                            class="text-sm text-status-error-text"
                                            on:click=move |ev| {
                                                ev.stop_propagation();
                                                on_delete.call(stored.get_value());
                                            }
                                        >
                                            {"取り下げ"}
                                        </button>
                                    </div>
                                </Show>
                            </li>
                        }
                    }
                />
            </ul>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::pages::vacations::types::{fixtures::request, RequestStatus};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn cards_render_each_request_with_withdraw_for_pending() {
        let html = render_to_string(|| {
            let list = vec![
                request(1, "2030-03-01", "2030-03-03", RequestStatus::Pending),
                request(2, "2030-04-01", "2030-04-01", RequestStatus::Rejected),
            ];
            view! {
                <RequestCards
                    requests=Signal::derive(move || list.clone())
                    can_delete=Callback::new(|request: AbsenceRequest| request.is_pending())
                    on_select=Callback::new(|_| {})
                    on_delete=Callback::new(|_| {})
                />
            }
        });
        assert_eq!(html.matches("request-card ").count(), 2);
        assert!(html.contains("休暇 ・ 3日"));
        assert_eq!(html.matches("data-action=\"delete\"").count(), 1);
    }

    #[test]
    fn empty_cards_show_hint() {
        let html = render_to_string(|| {
            view! {
                <RequestCards
                    requests=Signal::derive(Vec::new)
                    can_delete=Callback::new(|_| false)
                    on_select=Callback::new(|_| {})
                    on_delete=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("申請はまだありません"));
    }
}
