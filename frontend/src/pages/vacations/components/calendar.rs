use crate::pages::vacations::{
    calendar::{month_grid, month_title, requests_on_day, shift_month, DayCell, WEEKDAY_LABELS},
    components::status_badge::{absence_type_class, StatusBadge},
    types::AbsenceRequest,
};
use crate::utils::dates::{to_local_ymd, today_local};
use chrono::{Datelike, NaiveDate};
use leptos::*;

fn day_cell_class(cell: &DayCell, selected: bool) -> String {
    let mut class = String::from("min-h-[5rem] p-1 border border-border text-left align-top");
    if !cell.in_month {
        class.push_str(" bg-surface-muted text-fg-muted");
    }
    if cell.is_today {
        class.push_str(" ring-2 ring-action-primary-focus");
    }
    if selected {
        class.push_str(" bg-action-ghost-bg-hover");
    }
    class
}

/// Month grid of pending and approved requests, with a popover listing the
/// requests on the clicked day.
#[component]
pub fn CalendarView(
    requests: Signal<Vec<AbsenceRequest>>,
    month: RwSignal<(i32, u32)>,
    selected_day: RwSignal<Option<NaiveDate>>,
    on_select: Callback<AbsenceRequest>,
) -> impl IntoView {
    let today = today_local();
    let weeks = create_memo(move |_| {
        let (year, month) = month.get();
        requests.with(|list| month_grid(year, month, today, list))
    });
    let day_requests = Signal::derive(move || {
        selected_day
            .get()
            .map(|day| requests.with(|list| requests_on_day(list, day)))
            .unwrap_or_default()
    });
    let step = move |delta: i32| {
        month.update(|(year, month)| {
            let (y, m) = shift_month(*year, *month, delta);
            *year = y;
            *month = m;
        });
        selected_day.set(None);
    };

    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4 space-y-3">
            <div class="flex items-center justify-between">
                <button class="px-2 py-1 text-sm rounded border border-border" on:click=move |_| step(-1)>
                    {"‹ 前月"}
                </button>
                <h3 class="text-lg font-semibold text-fg">
                    {move || { let (y, m) = month.get(); month_title(y, m) }}
                </h3>
                <div class="flex gap-2">
                    <button
                        class="px-2 py-1 text-sm rounded border border-border"
                        on:click=move |_| {
                            month.set((today.year(), today.month()));
                            selected_day.set(Some(today));
                        }
                    >
                        {"今日"}
                    </button>
                    <button class="px-2 py-1 text-sm rounded border border-border" on:click=move |_| step(1)>
                        {"翌月 ›"}
                    </button>
                </div>
            </div>
            <table class="w-full table-fixed border-collapse">
                <thead>
                    <tr>
                        {WEEKDAY_LABELS
                            .iter()
                            .map(|label| view! { <th class="py-1 text-xs text-fg-muted">{*label}</th> })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let current = selected_day.get();
                        weeks
                            .get()
                            .into_iter()
                            .map(|week| {
                                view! {
                                    <tr>
                                        {week
                                            .into_iter()
                                            .map(|cell| {
                                                let date = cell.date;
                                                let class = day_cell_class(&cell, current == Some(date));
                                                view! {
                                                    <td
                                                        class=class
                                                        data-date=to_local_ymd(date)
                                                        on:click=move |_| selected_day.set(Some(date))
                                                    >
                                                        <div class="text-xs">{date.day()}</div>
                                                        {cell
                                                            .markers
                                                            .iter()
                                                            .map(|event| {
                                                                view! {
                                                                    <div class=format!(
                                                                        "calendar-marker truncate text-xs px-1 rounded {}",
                                                                        absence_type_class(event.absence_type),
                                                                    )>
                                                                        {event.title.clone()}
                                                                    </div>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </td>
                                                }
                                            })
                                            .collect_view()}
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
            <Show when=move || selected_day.get().is_some()>
                <div class="border border-border rounded-md p-3 space-y-2" role="dialog" aria-label="日別の申請">
                    <div class="flex items-center justify-between">
                        <p class="text-sm font-semibold text-fg">
                            {move || selected_day.get().map(to_local_ymd).unwrap_or_default()}
                        </p>
                        <button
                            aria-label="閉じる"
                            class="text-fg-muted hover:text-fg"
                            on:click=move |_| selected_day.set(None)
                        >
                            {"✕"}
                        </button>
                    </div>
                    <Show
                        when=move || !day_requests.with(Vec::is_empty)
                        fallback=|| view! { <p class="text-sm text-fg-muted">{"この日の申請はありません。"}</p> }
                    >
                        <ul class="space-y-1">
                            {move || {
                                day_requests
                                    .get()
                                    .into_iter()
                                    .map(|request| {
                                        let stored = store_value(request.clone());
                                        view! {
                                            <li
                                                class="flex items-center justify-between gap-2 text-sm cursor-pointer"
                                                on:click=move |_| on_select.call(stored.get_value())
                                            >
                                                <span>{request.employee_name.clone()}</span>
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
            </Show>
        </div>
    }
}
