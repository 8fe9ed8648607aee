use crate::api::VacationStats;
use crate::pages::vacations::types::AbsenceRequest;

/// Oldest submissions first; requests without a timestamp go last, then by start date.
pub fn sort_pending(requests: &mut [AbsenceRequest]) {
    requests.sort_by(|a, b| match (a.requested_at, b.requested_at) {
        (Some(x), Some(y)) => x.cmp(&y).then(a.start.cmp(&b.start)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.start.cmp(&b.start),
    });
}

pub fn stats_rows(stats: &VacationStats) -> Vec<(&'static str, String)> {
    vec![
        ("申請総数", format!("{}件", stats.total_requests)),
        ("承認待ち", format!("{}件", stats.pending)),
        ("承認済み", format!("{}件", stats.approved)),
        ("却下", format!("{}件", stats.rejected)),
        ("承認済み日数", format!("{}日", stats.total_days_approved)),
    ]
}

/// The current year with two years on either side, newest first.
pub fn year_options(current: i32) -> Vec<i32> {
    (current - 2..=current + 2).rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::vacations::types::{fixtures::request, parse_timestamp, RequestStatus};

    #[test]
    fn pending_sorted_oldest_first() {
        let mut a = request(1, "2030-03-01", "2030-03-01", RequestStatus::Pending);
        a.requested_at = parse_timestamp("2030-01-10T09:00:00");
        let mut b = request(2, "2030-02-01", "2030-02-01", RequestStatus::Pending);
        b.requested_at = parse_timestamp("2030-01-05T09:00:00");
        let c = request(3, "2030-01-15", "2030-01-15", RequestStatus::Pending);
        let mut list = vec![a, c, b];
        sort_pending(&mut list);
        let ids: Vec<i64> = list.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn stats_rows_label_every_total() {
        let rows = stats_rows(&VacationStats {
            total_requests: 9,
            pending: 2,
            approved: 6,
            rejected: 1,
            total_days_approved: 14,
        });
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4], ("承認済み日数", "14日".to_string()));
    }

    #[test]
    fn year_options_center_on_current() {
        assert_eq!(year_options(2030), vec![2032, 2031, 2030, 2029, 2028]);
    }
}
