use crate::state::toast::{use_toasts, Toast, ToastKind};
use leptos::*;

fn toast_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => {
            "flex items-start gap-3 rounded-md border px-4 py-3 shadow-lg bg-status-success-bg border-status-success-border text-status-success-text"
        }
        ToastKind::Error => {
            "flex items-start gap-3 rounded-md border px-4 py-3 shadow-lg bg-status-error-bg border-status-error-border text-status-error-text"
        }
    }
}

/// Bottom-right stack of the toasts currently alive.
#[component]
pub fn ToastViewport() -> impl IntoView {
    let toasts = use_toasts();
    let items = toasts.toasts();
    view! {
        <div class="fixed bottom-4 right-4 z-[80] flex flex-col gap-2 w-80 max-w-full" aria-live="polite">
            <For
                each=move || items.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast_class(toast.kind) role="status">
                            <p class="flex-1 text-sm">{toast.message}</p>
                            <button
                                type="button"
                                aria-label="閉じる"
                                class="text-sm opacity-70 hover:opacity-100"
                                on:click=move |_| toasts.dismiss(id)
                            >
                                {"✕"}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
