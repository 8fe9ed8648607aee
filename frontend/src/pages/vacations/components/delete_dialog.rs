use crate::pages::vacations::types::AbsenceRequest;
use leptos::ev::KeyboardEvent;
use leptos::*;

/// Asks before deleting `target`. Closing the dialog clears the target; the
/// caller dispatches the delete from `on_confirm`.
#[component]
pub fn DeleteRequestDialog(
    target: RwSignal<Option<AbsenceRequest>>,
    #[prop(into)] title: String,
    #[prop(into)] confirm_label: String,
    busy: Signal<bool>,
    on_confirm: Callback<()>,
) -> impl IntoView {
    let close = move || target.set(None);
    let title = store_value(title);
    let confirm_label = store_value(confirm_label);

    move || {
        target
            .get()
            .map(|request| {
                view! {
                    <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                        <button
                            type="button"
                            aria-label="閉じる"
                            class="absolute inset-0 bg-overlay-backdrop"
                            on:click=move |_| close()
                        ></button>
                        <div
                            class="relative z-[71] w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                            role="dialog"
                            aria-modal="true"
                            tabindex="-1"
                            on:keydown=move |ev: KeyboardEvent| {
                                if ev.key() == "Escape" {
                                    ev.prevent_default();
                                    close();
                                }
                            }
                        >
                            <h2 class="text-lg font-semibold text-fg">{title.get_value()}</h2>
                            <dl class="grid grid-cols-3 gap-1 text-sm">
                                <dt class="text-fg-muted">{"申請者"}</dt>
                                <dd class="col-span-2 text-fg">{request.employee_name.clone()}</dd>
                                <dt class="text-fg-muted">{"期間"}</dt>
                                <dd class="col-span-2 text-fg">
                                    {format!("{} ({}日)", request.period_label(), request.duration_days())}
                                </dd>
                                <dt class="text-fg-muted">{"種別"}</dt>
                                <dd class="col-span-2 text-fg">{request.absence_type.label()}</dd>
                            </dl>
                            <p class="text-sm text-fg-muted">{"この操作は取り消せません。"}</p>
                            <div class="flex justify-end gap-2">
                                <button
                                    type="button"
                                    class="rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg"
                                    on:click=move |_| close()
                                >
                                    {"キャンセル"}
                                </button>
                                <button
                                    type="button"
                                    class="rounded-md px-4 py-2 text-sm font-semibold bg-action-danger-bg text-action-danger-text disabled:opacity-50"
                                    data-action="confirm-delete"
                                    disabled=move || busy.get()
                                    on:click=move |_| on_confirm.call(())
                                >
                                    {confirm_label.get_value()}
                                </button>
                            </div>
                        </div>
                    </div>
                }
            })
    }
}
