use crate::utils::query::{build_query, current_search, parse_query, query_value};
use chrono::NaiveDateTime;
use leptos::*;

use super::types::{AbsenceRequest, RequestStatus, Scope, StatusFilter, ViewMode};

/// Keeps requests matching the status filter whose employee name or reason
/// contains `search` (case-insensitive). Input order is preserved.
pub fn filter_requests(
    requests: &[AbsenceRequest],
    status: StatusFilter,
    search: &str,
) -> Vec<AbsenceRequest> {
    let needle = search.trim().to_lowercase();
    requests
        .iter()
        .filter(|request| status.matches(request.status))
        .filter(|request| {
            needle.is_empty()
                || request.employee_name.to_lowercase().contains(&needle)
                || request.reason.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    total.div_ceil(size).max(1)
}

pub fn clamp_page(page: usize, total: usize, page_size: usize) -> usize {
    page.clamp(1, page_count(total, page_size))
}

/// One-based page slice; out-of-range pages are clamped.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    let size = page_size.max(1);
    let page = clamp_page(page, items.len(), size);
    items
        .iter()
        .skip((page - 1) * size)
        .take(size)
        .cloned()
        .collect()
}

/// Shallow comparison used by the background refresh to skip no-op updates.
pub fn requests_equivalent(current: &[AbsenceRequest], fetched: &[AbsenceRequest]) -> bool {
    current.len() == fetched.len()
        && current.iter().zip(fetched).all(|(a, b)| {
            a.id == b.id
                && a.status == b.status
                && a.start == b.start
                && a.end == b.end
                && a.absence_type == b.absence_type
                && a.reason == b.reason
                && a.employee_name == b.employee_name
                && a.admin_response == b.admin_response
        })
}

/// Puts a freshly created request at the front, replacing any copy with the
/// same id.
pub fn merge_created(list: &mut Vec<AbsenceRequest>, created: AbsenceRequest) {
    list.retain(|request| request.id != created.id);
    list.insert(0, created);
}

pub fn apply_status_change(
    list: &mut [AbsenceRequest],
    id: i64,
    status: RequestStatus,
    admin_response: Option<String>,
    reviewed_at: NaiveDateTime,
) -> Option<AbsenceRequest> {
    let request = list.iter_mut().find(|request| request.id == id)?;
    request.status = status;
    request.reviewed_at = Some(reviewed_at);
    if admin_response.is_some() {
        request.admin_response = admin_response;
    }
    Some(request.clone())
}

pub fn remove_request(list: &mut Vec<AbsenceRequest>, id: i64) -> bool {
    let before = list.len();
    list.retain(|request| request.id != id);
    list.len() != before
}

/// Filter, search, scope, view and page. Mirrored into the URL query string
/// (`status`, `q`, `scope`, `view`, `page`) and nowhere else.
#[derive(Clone, Copy)]
pub struct RequestFilterState {
    status: RwSignal<StatusFilter>,
    search: RwSignal<String>,
    scope: RwSignal<Scope>,
    view: RwSignal<ViewMode>,
    page: RwSignal<usize>,
}

impl Default for RequestFilterState {
    fn default() -> Self {
        Self::from_query(&current_search())
    }
}

impl RequestFilterState {
    pub fn from_query(search: &str) -> Self {
        let pairs = parse_query(search);
        let page = query_value(&pairs, "page")
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1);
        Self {
            status: create_rw_signal(StatusFilter::parse(
                query_value(&pairs, "status").unwrap_or_default(),
            )),
            search: create_rw_signal(query_value(&pairs, "q").unwrap_or_default().to_string()),
            scope: create_rw_signal(Scope::parse(
                query_value(&pairs, "scope").unwrap_or_default(),
            )),
            view: create_rw_signal(ViewMode::parse(
                query_value(&pairs, "view").unwrap_or_default(),
            )),
            page: create_rw_signal(page),
        }
    }

    pub fn status(&self) -> StatusFilter {
        self.status.get()
    }

    pub fn search(&self) -> String {
        self.search.get()
    }

    pub fn scope(&self) -> Scope {
        self.scope.get()
    }

    pub fn scope_untracked(&self) -> Scope {
        self.scope.get_untracked()
    }

    pub fn view(&self) -> ViewMode {
        self.view.get()
    }

    pub fn page(&self) -> usize {
        self.page.get()
    }

    pub fn set_status(&self, status: StatusFilter) {
        self.status.set(status);
        self.page.set(1);
    }

    pub fn set_search(&self, search: String) {
        self.search.set(search);
        self.page.set(1);
    }

    pub fn set_scope(&self, scope: Scope) {
        self.scope.set(scope);
        self.page.set(1);
    }

    pub fn set_view(&self, view: ViewMode) {
        self.view.set(view);
    }

    pub fn set_page(&self, page: usize) {
        self.page.set(page.max(1));
    }

    pub fn to_query(&self) -> String {
        let status = self.status.get();
        let scope = self.scope.get();
        let view = self.view.get();
        let page = self.page.get();
        build_query(&[
            (
                "status",
                if status == StatusFilter::All {
                    String::new()
                } else {
                    status.as_str().to_string()
                },
            ),
            ("q", self.search.get().trim().to_string()),
            (
                "scope",
                if scope == Scope::All {
                    scope.as_str().to_string()
                } else {
                    String::new()
                },
            ),
            (
                "view",
                if view == ViewMode::Table {
                    String::new()
                } else {
                    view.as_str().to_string()
                },
            ),
            (
                "page",
                if page > 1 {
                    page.to_string()
                } else {
                    String::new()
                },
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::vacations::types::fixtures::request;
    use crate::pages::vacations::types::AbsenceType;

    fn sample() -> Vec<AbsenceRequest> {
        let mut a = request(1, "2024-03-01", "2024-03-03", RequestStatus::Pending);
        a.employee_name = "Lucía Gómez".into();
        a.reason = "Boda de mi hermana".into();
        let mut b = request(2, "2024-04-10", "2024-04-10", RequestStatus::Approved);
        b.employee_name = "Kenji Sato".into();
        b.reason = "dentist".into();
        let mut c = request(3, "2024-05-01", "2024-05-02", RequestStatus::Rejected);
        c.employee_name = "Ana Pérez".into();
        c.reason = "mudanza".into();
        vec![a, b, c]
    }

    #[test]
    fn all_with_empty_search_keeps_everything_in_order() {
        let list = sample();
        let filtered = filter_requests(&list, StatusFilter::All, "");
        assert_eq!(filtered, list);
    }

    #[test]
    fn filter_matches_status_and_search_case_insensitively() {
        let list = sample();
        let by_status = filter_requests(&list, StatusFilter::Approved, "");
        assert_eq!(by_status.len(), 1);
        assert_eq!(by_status[0].id, 2);

        let by_name = filter_requests(&list, StatusFilter::All, "KENJI");
        assert_eq!(by_name.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);

        let by_reason = filter_requests(&list, StatusFilter::All, "boda");
        assert_eq!(by_reason[0].id, 1);

        assert!(filter_requests(&list, StatusFilter::Pending, "mudanza").is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let list = sample();
        let once = filter_requests(&list, StatusFilter::Pending, "a");
        let twice = filter_requests(&once, StatusFilter::Pending, "a");
        assert_eq!(once, twice);
        assert_eq!(once, filter_requests(&list, StatusFilter::Pending, "a"));
    }

    #[test]
    fn pagination_slices_and_clamps() {
        let items: Vec<u32> = (1..=23).collect();
        assert_eq!(page_count(items.len(), 10), 3);
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(paginate(&items, 1, 10), (1..=10).collect::<Vec<_>>());
        assert_eq!(paginate(&items, 3, 10), vec![21, 22, 23]);
        assert_eq!(paginate(&items, 9, 10), vec![21, 22, 23]);
        assert_eq!(paginate(&items, 0, 10), (1..=10).collect::<Vec<_>>());
        assert!(paginate::<u32>(&[], 1, 10).is_empty());
    }

    #[test]
    fn equivalence_detects_meaningful_changes_only() {
        let list = sample();
        let same = sample();
        assert!(requests_equivalent(&list, &same));

        let mut changed = sample();
        changed[1].status = RequestStatus::Rejected;
        assert!(!requests_equivalent(&list, &changed));

        let mut retyped = sample();
        retyped[0].absence_type = AbsenceType::Moving;
        assert!(!requests_equivalent(&list, &retyped));

        assert!(!requests_equivalent(&list, &list[..2]));
    }

    #[test]
    fn merge_created_prepends_and_replaces() {
        let mut list = sample();
        let created = request(9, "2024-06-01", "2024-06-02", RequestStatus::Pending);
        merge_created(&mut list, created.clone());
        assert_eq!(list[0].id, 9);
        assert_eq!(list.len(), 4);

        let mut updated = created;
        updated.reason = "updated".into();
        merge_created(&mut list, updated);
        assert_eq!(list.len(), 4);
        assert_eq!(list[0].reason, "updated");
    }

    #[test]
    fn status_change_and_removal_mutate_in_place() {
        let mut list = sample();
        let now = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let changed =
            apply_status_change(&mut list, 1, RequestStatus::Approved, Some("ok".into()), now)
                .unwrap();
        assert_eq!(changed.status, RequestStatus::Approved);
        assert_eq!(list[0].reviewed_at, Some(now));
        assert_eq!(list[0].admin_response.as_deref(), Some("ok"));
        assert!(apply_status_change(&mut list, 99, RequestStatus::Rejected, None, now).is_none());

        assert!(remove_request(&mut list, 2));
        assert!(!remove_request(&mut list, 2));
        assert_eq!(list.len(), 2);
    }
}
