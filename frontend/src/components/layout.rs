use crate::state::auth::{sign_out, use_auth};
use leptos::*;

const NAV_LINK_CLASS: &str =
    "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";
const MOBILE_NAV_LINK_CLASS: &str =
    "block w-full text-left text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

/// (path, label, admin only)
const NAV_ITEMS: &[(&str, &str, bool)] = &[
    ("/vacations", "休暇申請", false),
    ("/m/vacations", "モバイル表示", false),
    ("/admin/vacations", "承認", true),
];

fn visible_nav_items(is_admin: bool) -> Vec<(&'static str, &'static str)> {
    NAV_ITEMS
        .iter()
        .filter(|(_, _, admin_only)| is_admin || !admin_only)
        .map(|(path, label, _)| (*path, *label))
        .collect()
}

#[component]
fn NavLinks(
    is_admin: Signal<bool>,
    link_class: &'static str,
    on_navigate: Callback<()>,
) -> impl IntoView {
    move || {
        visible_nav_items(is_admin.get())
            .into_iter()
            .map(|(path, label)| {
                view! {
                    <a href=path class=link_class on:click=move |_| on_navigate.call(())>
                        {label}
                    </a>
                }
            })
            .collect_view()
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let (auth, set_auth) = use_auth();
    let menu_open = create_rw_signal(false);
    let is_admin = Signal::derive(move || auth.with(|state| state.is_admin()));
    let user_label = move || {
        auth.with(|state| {
            state
                .user
                .as_ref()
                .map(|user| user.display_name())
                .unwrap_or_default()
        })
    };
    let close_menu = Callback::new(move |_| menu_open.set(false));
    let on_logout = move |_| {
        menu_open.set(false);
        sign_out(set_auth);
    };
    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center gap-3">
                        <h1 class="text-xl font-semibold text-fg">"Vacations"</h1>
                        <span class="hidden sm:inline text-sm text-fg-muted">{user_label}</span>
                    </div>
                    <nav class="hidden lg:flex space-x-4">
                        <NavLinks is_admin=is_admin link_class=NAV_LINK_CLASS on_navigate=close_menu />
                        <button on:click=on_logout class=NAV_LINK_CLASS>"ログアウト"</button>
                    </nav>
                    <button
                        type="button"
                        class="lg:hidden rounded-md px-3 py-2 text-sm text-fg-muted hover:bg-action-ghost-bg-hover"
                        aria-expanded=move || menu_open.get()
                        aria-controls="mobile-nav"
                        on:click=move |_| menu_open.update(|open| *open = !*open)
                    >
                        {move || if menu_open.get() { "閉じる" } else { "メニュー" }}
                    </button>
                </div>
                <Show when=move || menu_open.get()>
                    <nav id="mobile-nav" class="lg:hidden border-t border-border px-4 py-3 space-y-2">
                        <NavLinks is_admin=is_admin link_class=MOBILE_NAV_LINK_CLASS on_navigate=close_menu />
                        <button on:click=on_logout class=MOBILE_NAV_LINK_CLASS>"ログアウト"</button>
                    </nav>
                </Show>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                {children()}
            </main>
            <crate::components::toast::ToastViewport/>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! {
        <p role="alert" class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4 text-sm">
            {message}
        </p>
    }
}
