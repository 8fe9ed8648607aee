use crate::api::{ApiClient, UsageResponse};
use leptos::*;
use std::collections::HashMap;

pub fn usage_key(user_id: i64, year: i32) -> String {
    format!("{}-{}", user_id, year)
}

/// Per-session memo of usage counts keyed by `{user}-{year}`.
///
/// A key is fetched at most once: cached keys and keys with a request in
/// flight are skipped. Failed fetches leave the key absent so a later need
/// can retry. Each fetch holds a ticket; invalidating a key voids its ticket
/// so a response that was already on the way is dropped.
#[derive(Debug, Clone, Default)]
pub struct UsageCache {
    entries: HashMap<String, UsageResponse>,
    in_flight: HashMap<String, u64>,
    next_ticket: u64,
}

impl UsageCache {
    pub fn get(&self, key: &str) -> Option<UsageResponse> {
        self.entries.get(key).copied()
    }

    /// Marks `key` as in flight. Returns `None` when no fetch is needed.
    pub fn begin(&mut self, key: &str) -> Option<u64> {
        if self.entries.contains_key(key) || self.in_flight.contains_key(key) {
            return None;
        }
        self.next_ticket += 1;
        self.in_flight.insert(key.to_string(), self.next_ticket);
        Some(self.next_ticket)
    }

    /// Stores the outcome of the fetch holding `ticket`. Outcomes from voided
    /// tickets are ignored.
    pub fn complete(&mut self, key: &str, ticket: u64, usage: Option<UsageResponse>) {
        if self.in_flight.get(key) != Some(&ticket) {
            return;
        }
        self.in_flight.remove(key);
        if let Some(usage) = usage {
            self.entries.insert(key.to_string(), usage);
        }
    }

    pub fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
        self.in_flight.remove(key);
    }

    pub fn is_loading(&self, key: &str) -> bool {
        self.in_flight.contains_key(key)
    }
}

#[derive(Clone, Copy)]
pub struct UsageStore {
    cache: RwSignal<UsageCache>,
}

impl Default for UsageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageStore {
    pub fn new() -> Self {
        Self {
            cache: create_rw_signal(UsageCache::default()),
        }
    }

    pub fn usage(&self, user_id: i64, year: i32) -> Option<UsageResponse> {
        let key = usage_key(user_id, year);
        self.cache.with(|cache| cache.get(&key))
    }

    pub fn ensure(&self, api: ApiClient, user_id: i64, year: i32) {
        let store = *self;
        spawn_local(async move {
            store.load(&api, user_id, year).await;
        });
    }

    pub async fn load(&self, api: &ApiClient, user_id: i64, year: i32) {
        let key = usage_key(user_id, year);
        let Some(ticket) = self.cache.try_update(|cache| cache.begin(&key)).flatten() else {
            return;
        };
        let usage = match api.get_vacation_usage(Some(user_id), Some(year), None).await {
            Ok(usage) => Some(usage),
            Err(err) => {
                log::debug!("usage fetch for {} failed: {}", key, err);
                None
            }
        };
        self.cache.update(|cache| cache.complete(&key, ticket, usage));
    }

    pub fn invalidate(&self, user_id: i64, year: i32) {
        let key = usage_key(user_id, year);
        self.cache.update(|cache| cache.invalidate(&key));
    }

    #[cfg(test)]
    pub(crate) fn seed(&self, user_id: i64, year: i32, usage: UsageResponse) {
        let key = usage_key(user_id, year);
        self.cache.update(|cache| {
            if let Some(ticket) = cache.begin(&key) {
                cache.complete(&key, ticket, Some(usage));
            }
        });
    }
}

pub fn use_usage_store() -> UsageStore {
    match use_context::<UsageStore>() {
        Some(store) => store,
        None => {
            let store = UsageStore::new();
            provide_context(store);
            store
        }
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::api::{Session, UserResponse};
    use serde_json::json;

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new_with_base_url(server.url("/api")).with_session(Session {
            access_token: Some("t".into()),
            user: Some(UserResponse {
                id: 3,
                username: "ana".into(),
                full_name: "Ana".into(),
                role: "employee".into(),
                company: None,
            }),
            selected_company: None,
        })
    }

    #[tokio::test]
    async fn repeated_lookups_issue_one_request() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/vacations/usage");
            then.status(200)
                .json_body(json!({ "approved_days_used": 3, "pending_days_requested": 1 }));
        });
        let runtime = create_runtime();
        let store = UsageStore::new();
        let api = client(&server);

        futures::join!(store.load(&api, 3, 2024), store.load(&api, 3, 2024));
        store.load(&api, 3, 2024).await;

        assert_eq!(server.hits(GET, "/api/vacations/usage"), 1);
        assert_eq!(store.usage(3, 2024).map(|u| u.approved_days_used), Some(3));
        runtime.dispose();
    }

    #[tokio::test]
    async fn errors_are_swallowed() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/vacations/usage");
            then.status(500).json_body(json!({ "detail": "boom" }));
        });
        let runtime = create_runtime();
        let store = UsageStore::new();
        let api = client(&server);

        store.load(&api, 3, 2024).await;
        assert!(store.usage(3, 2024).is_none());
        store.load(&api, 3, 2024).await;
        assert_eq!(server.hits(GET, "/api/vacations/usage"), 2);
        runtime.dispose();
    }
}
