use crate::api::UserSummary;
use crate::components::layout::LoadingSpinner;
use crate::pages::vacations::{
    components::status_badge::StatusBadge, lookup::UserLookup, repository::VacationsRepository,
};
use leptos::*;

#[component]
pub fn UserLookupView(lookup: UserLookup, repository: VacationsRepository, year: i32) -> impl IntoView {
    let repository = store_value(repository);
    view! {
        <div class="grid grid-cols-1 gap-4 lg:grid-cols-3">
            <div class="bg-surface-elevated shadow rounded-lg p-4 space-y-3">
                <input
                    type="search"
                    class="w-full border rounded px-2 py-1 text-sm"
                    placeholder="社員名で検索"
                    prop:value=move || lookup.term.get()
                    on:input=move |ev| lookup.on_input(repository.get_value(), event_target_value(&ev))
                />
                <Show when=move || lookup.searching.get()>
                    <p class="text-xs text-fg-muted">{"検索中..."}</p>
                </Show>
                <ul class="divide-y divide-border">
                    <For
                        each=move || lookup.results.get()
                        key=|user| user.id
                        children=move |user: UserSummary| {
                            let user_id = user.id;
                            let name = user.display_name();
                            let stored = store_value(user);
                            view! {
                                <li>
                                    <button
                                        class=move || {
                                            let active = lookup
                                                .selected
                                                .with(|current| current.as_ref().map(|u| u.id) == Some(user_id));
                                            if active {
                                                "w-full text-left px-2 py-2 text-sm bg-action-ghost-bg-hover"
                                            } else {
                                                "w-full text-left px-2 py-2 text-sm hover:bg-action-ghost-bg-hover"
                                            }
                                        }
                                        on:click=move |_| {
                                            lookup.select(repository.get_value(), stored.get_value(), year)
                                        }
                                    >
                                        {name}
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
            <div class="lg:col-span-2 bg-surface-elevated shadow rounded-lg p-4 space-y-3">
                <Show
                    when=move || lookup.selected.with(Option::is_some)
                    fallback=|| view! { <p class="text-sm text-fg-muted">{"社員を選択すると申請履歴を表示します。"}</p> }
                >
                    <div class="flex items-center justify-between">
                        <h3 class="text-lg font-semibold text-fg">
                            {move || {
                                lookup
                                    .selected
                                    .get()
                                    .map(|user| format!("{} さんの {}年の申請", user.display_name(), year))
                                    .unwrap_or_default()
                            }}
                        </h3>
                        <button class="text-sm text-fg-muted underline" on:click=move |_| lookup.clear_selection()>
                            {"選択解除"}
                        </button>
                    </div>
                    <Show when=move || lookup.loading_requests.get()>
                        <LoadingSpinner />
                    </Show>
                    <Show when=move || !lookup.loading_requests.get() && lookup.user_requests.with(Vec::is_empty)>
                        <p class="text-sm text-fg-muted">{"この年の申請はありません。"}</p>
                    </Show>
                    <ul class="divide-y divide-border">
                        {move || {
                            lookup
                                .user_requests
                                .get()
                                .into_iter()
                                .map(|request| {
                                    view! {
                                        <li class="flex items-center justify-between py-2 text-sm">
                                            <span>{request.period_label()}</span>
                                            <span class="text-fg-muted">{request.absence_type.label()}</span>
                                            <StatusBadge status=request.status />
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </Show>
            </div>
        </div>
    }
}
