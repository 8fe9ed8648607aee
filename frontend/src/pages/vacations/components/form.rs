use crate::pages::vacations::{
    form::{FormPhase, SubmissionFormState},
    types::AbsenceType,
};
use leptos::ev::KeyboardEvent;
use leptos::*;

/// New-request dialog. Validation messages come from the view model; this
/// component only binds inputs and reports intent.
#[component]
pub fn SubmissionFormModal(
    form: SubmissionFormState,
    open: Signal<bool>,
    warning: Signal<Option<String>>,
    error: Signal<Option<String>>,
    on_submit: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let start = form.start_signal();
    let end = form.end_signal();
    let reason = form.reason_signal();
    let absence_type = form.absence_type_signal();
    let single_day = form.single_day_signal();
    let phase = form.phase();
    let submitting = Signal::derive(move || phase.with(FormPhase::is_submitting));
    let server_error = Signal::derive(move || match phase.get() {
        FormPhase::Failed(message) => Some(message),
        _ => None,
    });

    view! {
        <Show when=move || open.get()>
            <div class="fixed inset-0 z-50 flex items-end sm:items-center justify-center">
                <div class="fixed inset-0 bg-overlay-backdrop" on:click=move |_| on_close.call(())></div>
                <form
                    class="relative bg-surface-elevated rounded-lg shadow-xl w-full max-w-lg mx-4 p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            on_close.call(());
                        }
                    }
                    on:submit=move |ev| {
                        ev.prevent_default();
                        on_submit.call(());
                    }
                >
                    <div class="flex items-center justify-between">
                        <h2 class="text-lg font-semibold text-fg">{"休暇を申請"}</h2>
                        <button
                            type="button"
                            aria-label="閉じる"
                            class="text-fg-muted hover:text-fg"
                            on:click=move |_| on_close.call(())
                        >
                            {"✕"}
                        </button>
                    </div>
                    <label class="flex items-center gap-2 text-sm text-fg">
                        <input
                            type="checkbox"
                            prop:checked=move || single_day.get()
                            on:change=move |ev| form.set_single_day(event_target_checked(&ev))
                        />
                        {"1日のみ"}
                    </label>
                    <div class="grid grid-cols-1 gap-3 sm:grid-cols-2">
                        <label class="text-sm text-fg space-y-1">
                            <span>{"開始日"}</span>
                            <input
                                type="date"
                                name="start_date"
                                class="w-full border rounded px-2 py-1"
                                prop:value=move || start.get()
                                on:input=move |ev| form.set_start(event_target_value(&ev))
                            />
                        </label>
                        <Show when=move || !single_day.get()>
                            <label class="text-sm text-fg space-y-1">
                                <span>{"終了日"}</span>
                                <input
                                    type="date"
                                    name="end_date"
                                    class="w-full border rounded px-2 py-1"
                                    prop:value=move || end.get()
                                    on:input=move |ev| end.set(event_target_value(&ev))
                                />
                            </label>
                        </Show>
                    </div>
                    <label class="block text-sm text-fg space-y-1">
                        <span>{"種別"}</span>
                        <select
                            name="absence_type"
                            class="w-full border rounded px-2 py-1"
                            prop:value=move || absence_type.get().as_str()
                            on:change=move |ev| {
                                if let Some(kind) = AbsenceType::parse(&event_target_value(&ev)) {
                                    absence_type.set(kind);
                                }
                            }
                        >
                            {AbsenceType::ALL
                                .iter()
                                .map(|kind| view! { <option value=kind.as_str()>{kind.label()}</option> })
                                .collect_view()}
                        </select>
                    </label>
                    <label class="block text-sm text-fg space-y-1">
                        <span>{"理由"}</span>
                        <textarea
                            name="reason"
                            rows="3"
                            class="w-full border rounded px-2 py-1"
                            prop:value=move || reason.get()
                            on:input=move |ev| reason.set(event_target_value(&ev))
                        ></textarea>
                    </label>
                    <Show when=move || warning.get().is_some()>
                        <p class="form-warning text-sm bg-status-warning-bg text-status-warning-text rounded px-3 py-2">
                            {move || warning.get().unwrap_or_default()}
                        </p>
                    </Show>
                    <Show when=move || error.get().is_some()>
                        <p class="form-error text-sm text-status-error-text">
                            {move || error.get().unwrap_or_default()}
                        </p>
                    </Show>
                    <Show when=move || server_error.get().is_some()>
                        <p class="form-error text-sm bg-status-error-bg text-status-error-text rounded px-3 py-2">
                            {move || server_error.get().unwrap_or_default()}
                        </p>
                    </Show>
                    <div class="flex justify-end gap-2">
                        <button
                            type="button"
                            class="rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg"
                            on:click=move |_| on_close.call(())
                        >
                            {"キャンセル"}
                        </button>
                        <button
                            type="submit"
                            class="rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                            disabled=move || submitting.get()
                        >
                            {move || if submitting.get() { "送信中..." } else { "申請する" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
