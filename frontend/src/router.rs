use leptos::*;
use leptos_meta::provide_meta_context;
use leptos_router::*;

use crate::{
    components::guard::RequireAuth,
    pages::{AdminPage, MobileVacationsPage, VacationsPage},
    state::auth::AuthProvider,
};

pub const ROUTE_PATHS: &[&str] = &["/", "/vacations", "/m/vacations", "/admin/vacations"];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &["/", "/vacations", "/m/vacations", "/admin/vacations"];

pub const ADMIN_ROUTE_PATHS: &[&str] = &["/admin/vacations"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(crate::api::ApiClient::new());
    provide_meta_context();
    view! {
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=ProtectedVacations/>
                    <Route path="/vacations" view=ProtectedVacations/>
                    <Route path="/m/vacations" view=ProtectedMobileVacations/>
                    <Route path="/admin/vacations" view=AdminPage/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn ProtectedVacations() -> impl IntoView {
    view! { <RequireAuth><VacationsPage/></RequireAuth> }
}

#[component]
fn ProtectedMobileVacations() -> impl IntoView {
    view! { <RequireAuth><MobileVacationsPage/></RequireAuth> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn route_paths_include_all_views() {
        assert!(ROUTE_PATHS.contains(&"/vacations"));
        assert!(ROUTE_PATHS.contains(&"/m/vacations"));
        assert!(ROUTE_PATHS.contains(&"/admin/vacations"));
    }

    #[test]
    fn protected_and_admin_routes_are_subsets_of_all() {
        let all: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        for path in PROTECTED_ROUTE_PATHS.iter().chain(ADMIN_ROUTE_PATHS) {
            assert!(
                all.contains(path),
                "path missing from ROUTE_PATHS: {}",
                path
            );
        }
    }

    #[test]
    fn admin_routes_require_a_session() {
        for path in ADMIN_ROUTE_PATHS {
            assert!(PROTECTED_ROUTE_PATHS.contains(path));
        }
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }
}
