use crate::api::UserSummary;
use crate::utils::stale::{LatestOnly, Ticket};
use leptos::*;

use super::repository::VacationsRepository;
use super::types::AbsenceRequest;

pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Admin user search with a debounced query box and a per-user request list.
/// Both fetches discard responses that arrive after newer input.
#[derive(Clone, Copy)]
pub struct UserLookup {
    pub term: RwSignal<String>,
    pub results: RwSignal<Vec<UserSummary>>,
    pub searching: RwSignal<bool>,
    pub selected: RwSignal<Option<UserSummary>>,
    pub user_requests: RwSignal<Vec<AbsenceRequest>>,
    pub loading_requests: RwSignal<bool>,
    search_guard: StoredValue<LatestOnly>,
    detail_guard: StoredValue<LatestOnly>,
    #[cfg(target_arch = "wasm32")]
    pending: StoredValue<Option<gloo_timers::callback::Timeout>>,
}

impl Default for UserLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl UserLookup {
    pub fn new() -> Self {
        Self {
            term: create_rw_signal(String::new()),
            results: create_rw_signal(Vec::new()),
            searching: create_rw_signal(false),
            selected: create_rw_signal(None),
            user_requests: create_rw_signal(Vec::new()),
            loading_requests: create_rw_signal(false),
            search_guard: store_value(LatestOnly::new()),
            detail_guard: store_value(LatestOnly::new()),
            #[cfg(target_arch = "wasm32")]
            pending: store_value(None),
        }
    }

    fn search_is_current(&self, ticket: Ticket) -> bool {
        self.search_guard
            .try_with_value(|guard| guard.is_current(ticket))
            .unwrap_or(false)
    }

    fn detail_is_current(&self, ticket: Ticket) -> bool {
        self.detail_guard
            .try_with_value(|guard| guard.is_current(ticket))
            .unwrap_or(false)
    }

    /// Records the input and schedules a search once typing pauses.
    pub fn on_input(&self, repo: VacationsRepository, term: String) {
        self.term.set(term.clone());
        let ticket = self.search_guard.with_value(LatestOnly::issue);
        if term.trim().is_empty() {
            self.results.set(Vec::new());
            self.searching.set(false);
            return;
        }
        self.schedule(repo, term, ticket);
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule(&self, repo: VacationsRepository, term: String, ticket: Ticket) {
        let lookup = *self;
        let timeout = gloo_timers::callback::Timeout::new(SEARCH_DEBOUNCE_MS, move || {
            spawn_local(async move {
                lookup.search(&repo, &term, ticket).await;
            });
        });
        // Replacing the stored timeout drops, and thereby cancels, the previous one.
        self.pending.set_value(Some(timeout));
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn schedule(&self, _repo: VacationsRepository, _term: String, _ticket: Ticket) {}

    pub fn issue_search(&self) -> Ticket {
        self.search_guard.with_value(LatestOnly::issue)
    }

    pub async fn search(&self, repo: &VacationsRepository, term: &str, ticket: Ticket) {
        if !self.search_is_current(ticket) {
            return;
        }
        self.searching.set(true);
        let result = repo.search_users(term).await;
        if !self.search_is_current(ticket) {
            return;
        }
        self.searching.set(false);
        match result {
            Ok(users) => self.results.set(users),
            Err(err) => {
                log::warn!("user search failed: {}", err);
                self.results.set(Vec::new());
            }
        }
    }

    pub fn select(&self, repo: VacationsRepository, user: UserSummary, year: i32) {
        let ticket = self.detail_guard.with_value(LatestOnly::issue);
        let lookup = *self;
        self.selected.set(Some(user.clone()));
        spawn_local(async move {
            lookup.load_user_requests(&repo, user.id, year, ticket).await;
        });
    }

    pub fn issue_detail(&self) -> Ticket {
        self.detail_guard.with_value(LatestOnly::issue)
    }

    pub async fn load_user_requests(
        &self,
        repo: &VacationsRepository,
        user_id: i64,
        year: i32,
        ticket: Ticket,
    ) {
        if !self.detail_is_current(ticket) {
            return;
        }
        self.loading_requests.set(true);
        let result = repo.list(Some(user_id), Some(year)).await;
        if !self.detail_is_current(ticket) {
            return;
        }
        self.loading_requests.set(false);
        match result {
            Ok(list) => self.user_requests.set(list),
            Err(err) => {
                log::warn!("requests for user {} failed: {}", user_id, err);
                self.user_requests.set(Vec::new());
            }
        }
    }

    pub fn clear_selection(&self) {
        self.detail_guard.with_value(LatestOnly::cancel);
        self.selected.set(None);
        self.user_requests.set(Vec::new());
        self.loading_requests.set(false);
    }
}
