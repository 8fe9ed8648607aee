use leptos::*;

/// Placeholder for a list with nothing to show.
#[component]
pub fn EmptyState(
    #[prop(into)] title: String,
    #[prop(optional, into)] description: Option<String>,
) -> impl IntoView {
    view! {
        <div class="empty-state text-center py-12 px-4 rounded-lg border-2 border-dashed border-border-strong bg-surface-muted">
            <svg class="mx-auto h-12 w-12 text-fg-muted" fill="none" viewBox="0 0 24 24" stroke="currentColor" aria-hidden="true">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M8 7V3m8 4V3m-9 8h10M5 21h14a2 2 0 002-2V7a2 2 0 00-2-2H5a2 2 0 00-2 2v12a2 2 0 002 2z" />
            </svg>
            <h3 class="mt-2 text-sm font-semibold text-fg">{title}</h3>
            {description.map(|desc| view! { <p class="mt-1 text-sm text-fg-muted">{desc}</p> })}
        </div>
    }
}
