use crate::pages::vacations::{
    types::{Scope, StatusFilter, ViewMode},
    utils::RequestFilterState,
};
use leptos::*;

const STATUS_OPTIONS: [(StatusFilter, &str); 4] = [
    (StatusFilter::All, "すべて"),
    (StatusFilter::Pending, "承認待ち"),
    (StatusFilter::Approved, "承認済み"),
    (StatusFilter::Rejected, "却下"),
];

fn view_tab_class(active: bool) -> &'static str {
    if active {
        "px-3 py-1 text-sm rounded-md bg-action-primary-bg text-action-primary-text"
    } else {
        "px-3 py-1 text-sm rounded-md text-fg-muted hover:bg-action-ghost-bg-hover"
    }
}

#[component]
pub fn VacationsFilter(
    filter: RequestFilterState,
    #[prop(into)] is_admin: MaybeSignal<bool>,
) -> impl IntoView {
    let is_admin = Signal::derive(move || is_admin.get());
    let views = move || {
        if is_admin.get() {
            vec![ViewMode::Table, ViewMode::Calendar, ViewMode::Users]
        } else {
            vec![ViewMode::Table, ViewMode::Calendar]
        }
    };
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4 flex flex-col gap-3 lg:flex-row lg:items-center lg:justify-between">
            <div class="flex flex-wrap items-center gap-2">
                <select
                    class="border rounded px-2 py-1 text-sm"
                    aria-label="ステータス"
                    prop:value=move || filter.status().as_str()
                    on:change=move |ev| filter.set_status(StatusFilter::parse(&event_target_value(&ev)))
                >
                    {STATUS_OPTIONS
                        .iter()
                        .map(|(status, label)| {
                            view! { <option value=status.as_str()>{*label}</option> }
                        })
                        .collect_view()}
                </select>
                <input
                    type="search"
                    class="border rounded px-2 py-1 text-sm w-56"
                    placeholder="氏名・理由で検索"
                    prop:value=move || filter.search()
                    on:input=move |ev| filter.set_search(event_target_value(&ev))
                />
                <Show when=move || is_admin.get()>
                    <label class="inline-flex items-center gap-1 text-sm text-fg-muted">
                        <input
                            type="checkbox"
                            prop:checked=move || filter.scope() == Scope::All
                            on:change=move |ev| {
                                let scope = if event_target_checked(&ev) { Scope::All } else { Scope::Mine };
                                filter.set_scope(scope);
                            }
                        />
                        {"全社員の申請を表示"}
                    </label>
                </Show>
            </div>
            <div class="flex items-center gap-1" role="tablist">
                {move || {
                    views()
                        .into_iter()
                        .map(|mode| {
                            view! {
                                <button
                                    type="button"
                                    role="tab"
                                    aria-selected=move || (filter.view() == mode).to_string()
                                    class=move || view_tab_class(filter.view() == mode)
                                    on:click=move |_| filter.set_view(mode)
                                >
                                    {mode.label()}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
