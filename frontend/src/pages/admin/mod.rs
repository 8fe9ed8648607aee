use crate::components::guard::RequireAdmin;
use leptos::*;

pub mod components;
pub mod layout;
pub mod panel;
pub mod repository;
pub mod utils;
pub mod view_model;

pub use panel::AdminVacationsPanel;

#[component]
pub fn AdminPage() -> impl IntoView {
    view! {
        <RequireAdmin>
            <AdminVacationsPanel />
        </RequireAdmin>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::regular_user;
    use crate::test_support::ssr::render_as;

    #[test]
    fn admin_page_hides_queue_from_employees() {
        let html = render_as(Some(regular_user()), move || {
            view! { <AdminPage /> }
        });
        assert!(!html.contains("休暇申請の承認"));
    }
}
