use crate::{
    api::VacationStats,
    pages::admin::utils::{stats_rows, year_options},
};
use leptos::*;

#[component]
pub fn StatsSection(
    year: RwSignal<i32>,
    current_year: i32,
    stats: Signal<Option<VacationStats>>,
) -> impl IntoView {
    let on_year = move |ev| {
        if let Ok(value) = event_target_value(&ev).parse::<i32>() {
            year.set(value);
        }
    };
    view! {
        <section class="rounded-lg bg-surface-elevated p-4 shadow-sm space-y-3">
            <div class="flex items-center justify-between">
                <h2 class="text-lg font-semibold text-fg">{"年間統計"}</h2>
                <select
                    class="rounded border border-border px-2 py-1 text-sm"
                    name="year"
                    on:change=on_year
                >
                    {year_options(current_year)
                        .into_iter()
                        .map(|option| {
                            view! {
                                <option value=option.to_string() selected=move || year.get() == option>
                                    {format!("{}年", option)}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
            {move || match stats.get() {
                Some(stats) => view! {
                    <dl class="grid grid-cols-2 gap-2 text-sm">
                        {stats_rows(&stats)
                            .into_iter()
                            .map(|(label, value)| {
                                view! {
                                    <>
                                        <dt class="text-fg-muted">{label}</dt>
                                        <dd class="text-right font-medium text-fg">{value}</dd>
                                    </>
                                }
                            })
                            .collect_view()}
                    </dl>
                }
                .into_view(),
                None => view! {
                    <p class="text-sm text-fg-muted">{"統計を読み込み中..."}</p>
                }
                .into_view(),
            }}
        </section>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn stats_section_lists_totals() {
        let html = render_to_string(|| {
            let year = create_rw_signal(2030);
            let stats = VacationStats {
                total_requests: 7,
                pending: 1,
                approved: 5,
                rejected: 1,
                total_days_approved: 12,
            };
            view! {
                <StatsSection
                    year=year
                    current_year=2030
                    stats=Signal::derive(move || Some(stats.clone()))
                />
            }
        });
        assert!(html.contains("申請総数"));
        assert!(html.contains("7件"));
        assert!(html.contains("2032年"));
        assert!(html.contains("2028年"));
    }

    #[test]
    fn stats_section_shows_placeholder_while_loading() {
        let html = render_to_string(|| {
            view! {
                <StatsSection
                    year=create_rw_signal(2030)
                    current_year=2030
                    stats=Signal::derive(|| None)
                />
            }
        });
        assert!(html.contains("統計を読み込み中..."));
    }
}
