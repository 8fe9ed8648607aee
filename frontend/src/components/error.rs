use crate::api::ApiError;
use leptos::*;

/// Per-field messages of a validation response (`{"detail": [{"msg": ...}]}`).
fn detail_messages(error: &ApiError) -> Vec<String> {
    error
        .details
        .as_ref()
        .and_then(|details| details.get("detail"))
        .and_then(|detail| detail.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|msg| msg.as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                {move || error.get().map(|e| {
                    let messages = detail_messages(&e);
                    if messages.len() > 1 {
                        view! {
                            <ul class="list-disc list-inside text-sm">
                                {messages
                                    .into_iter()
                                    .map(|msg| view! { <li>{msg}</li> })
                                    .collect_view()}
                            </ul>
                        }
                        .into_view()
                    } else {
                        view! { <div class="font-bold">{e.error.clone()}</div> }.into_view()
                    }
                })}
                {move || error.get().and_then(|e| {
                    let show_code = !e.is_validation() && e.code != "UNKNOWN" && !e.code.is_empty();
                    show_code.then(|| view! { <div class="text-xs opacity-75">{"Code: "}{e.code}</div> })
                })}
            </div>
        </Show>
    }
}
