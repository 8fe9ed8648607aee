#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::UserResponse;
    use crate::state::auth::AuthState;
    use leptos::*;

    pub fn admin_user() -> UserResponse {
        UserResponse {
            id: 1,
            username: "admin".into(),
            full_name: "Admin User".into(),
            role: "admin".into(),
            company: Some("acme".into()),
        }
    }

    pub fn regular_user() -> UserResponse {
        UserResponse {
            id: 7,
            username: "member".into(),
            full_name: "Regular User".into(),
            role: "employee".into(),
            company: Some("acme".into()),
        }
    }

    pub fn provide_auth(
        user: Option<UserResponse>,
    ) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let (auth, set_auth) = create_signal(AuthState {
            is_authenticated: user.is_some(),
            user,
            loading: false,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }
}
