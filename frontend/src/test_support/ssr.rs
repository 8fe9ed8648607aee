use crate::api::UserResponse;
use crate::test_support::helpers::provide_auth;
use leptos::*;

pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    result
}

/// Renders with resource loading suppressed, so views backed by the REST
/// client show their loading state without touching the network.
pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    leptos_reactive::suppress_resource_load(true);
    let html = with_runtime(|| view().into_view().render_to_string().to_string());
    leptos_reactive::suppress_resource_load(false);
    html
}

/// `render_to_string` with `user` signed in (or no session for `None`).
pub fn render_as<F, N>(user: Option<UserResponse>, view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    render_to_string(move || {
        provide_auth(user);
        view()
    })
}
