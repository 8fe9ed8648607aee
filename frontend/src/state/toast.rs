use leptos::*;
use uuid::Uuid;

pub const TOAST_DURATION_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct ToastState {
    toasts: RwSignal<Vec<Toast>>,
}

impl Default for ToastState {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastState {
    pub fn new() -> Self {
        Self {
            toasts: create_rw_signal(Vec::new()),
        }
    }

    pub fn toasts(&self) -> Signal<Vec<Toast>> {
        self.toasts.into()
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.push(ToastKind::Success, message.into())
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.push(ToastKind::Error, message.into())
    }

    fn push(&self, kind: ToastKind, message: String) -> Uuid {
        let id = Uuid::new_v4();
        self.toasts.update(|list| list.push(Toast { id, kind, message }));
        self.schedule_dismiss(id);
        id
    }

    pub fn dismiss(&self, id: Uuid) {
        self.toasts.update(|list| list.retain(|toast| toast.id != id));
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule_dismiss(&self, id: Uuid) {
        let state = *self;
        gloo_timers::callback::Timeout::new(TOAST_DURATION_MS, move || state.dismiss(id)).forget();
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_dismiss(&self, _id: Uuid) {}
}

pub fn use_toasts() -> ToastState {
    match use_context::<ToastState>() {
        Some(state) => state,
        None => {
            let state = ToastState::new();
            provide_context(state);
            state
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn toasts_push_and_dismiss() {
        with_runtime(|| {
            let state = ToastState::new();
            let ok = state.success("承認しました。");
            let err = state.error("失敗しました。");
            assert_eq!(state.toasts().get().len(), 2);
            assert_ne!(ok, err);

            state.dismiss(ok);
            let remaining = state.toasts().get();
            assert_eq!(remaining.len(), 1);
            assert_eq!(remaining[0].kind, ToastKind::Error);
        });
    }

    #[test]
    fn use_toasts_shares_context() {
        with_runtime(|| {
            let first = use_toasts();
            first.success("a");
            let second = use_toasts();
            assert_eq!(second.toasts().get().len(), 1);
        });
    }
}
