use crate::{
    components::layout::LoadingSpinner,
    state::auth::{use_auth, AuthState},
};
use leptos::*;

#[cfg(target_arch = "wasm32")]
fn redirect(target: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.location().set_href(target);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn redirect(_target: &str) {}

#[component]
fn SignInRequired() -> impl IntoView {
    view! {
        <div class="max-w-md mx-auto mt-16 p-6 rounded-lg border border-border bg-surface-elevated text-center space-y-2">
            <h2 class="text-lg font-semibold text-fg">{"ログインが必要です"}</h2>
            <p class="text-sm text-fg-muted">
                {"セッションが見つかりません。ポータルからログインし直してください。"}
            </p>
        </div>
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Loading,
    SignedOut,
    Forbidden,
    Granted,
}

fn access_for(state: &AuthState, admin_only: bool) -> Access {
    if state.loading {
        Access::Loading
    } else if !state.is_authenticated {
        Access::SignedOut
    } else if admin_only && !state.is_admin() {
        Access::Forbidden
    } else {
        Access::Granted
    }
}

fn guarded(admin_only: bool, children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let access = create_memo(move |_| auth.with(|state| access_for(state, admin_only)));
    create_effect(move |_| {
        if access.get() == Access::Forbidden {
            redirect("/vacations");
        }
    });
    view! {
        <Show
            when=move || access.get() == Access::Granted
            fallback=move || match access.get() {
                Access::Loading => view! { <LoadingSpinner /> }.into_view(),
                Access::SignedOut => view! { <SignInRequired /> }.into_view(),
                _ => ().into_view(),
            }
        >
            {children()}
        </Show>
    }
}

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    guarded(false, children)
}

/// Admin-only content. Signed-in non-admins are sent back to their own list.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    guarded(true, children)
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::{RequireAdmin, RequireAuth};
    use crate::state::auth::AuthState;
    use crate::test_support::helpers::{admin_user, regular_user};
    use crate::test_support::ssr::{render_as, render_to_string};
    use leptos::*;

    #[test]
    fn require_auth_renders_children_when_authenticated() {
        let html = render_as(Some(regular_user()), move || {
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn require_auth_explains_missing_session() {
        let html = render_as(None, move || {
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(!html.contains("protected-content"));
        assert!(html.contains("ログインが必要です"));
    }

    #[test]
    fn require_auth_shows_loading_spinner_while_loading() {
        let html = render_to_string(move || {
            let (auth, set_auth) = create_signal(AuthState {
                user: None,
                is_authenticated: false,
                loading: true,
            });
            provide_context((auth, set_auth));
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("animate-spin"));
    }

    #[test]
    fn require_admin_renders_children_for_admin_user() {
        let html = render_as(Some(admin_user()), move || {
            view! {
                <RequireAdmin>
                    {|| view! { <div>"admin-protected"</div> }}
                </RequireAdmin>
            }
        });
        assert!(html.contains("admin-protected"));
    }

    #[test]
    fn require_admin_hides_children_for_regular_user() {
        let html = render_as(Some(regular_user()), move || {
            view! {
                <RequireAdmin>
                    {|| view! { <div>"admin-protected"</div> }}
                </RequireAdmin>
            }
        });
        assert!(!html.contains("admin-protected"));
    }
}
