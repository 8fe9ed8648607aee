use crate::api::{ApiClient, Session, UserResponse};
use leptos::*;

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<UserResponse>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    pub fn from_session(session: &Session) -> Self {
        Self {
            user: session.user.clone(),
            is_authenticated: session.is_authenticated(),
            loading: false,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(UserResponse::is_admin).unwrap_or(false)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|user| user.id)
    }
}

fn create_auth_context() -> AuthContext {
    let session = Session::load();
    if !session.is_authenticated() {
        log::info!("No stored session found");
    }
    create_signal(AuthState::from_session(&session))
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    if use_context::<ApiClient>().is_none() {
        provide_context(ApiClient::new());
    }
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

/// Drops the persisted credentials. Signing in again happens outside the portal.
pub fn sign_out(set_auth_state: WriteSignal<AuthState>) {
    Session::clear_stored();
    set_auth_state.update(|state| {
        state.user = None;
        state.is_authenticated = false;
        state.loading = false;
    });
}
