use crate::pages::vacations::types::{AbsenceType, RequestStatus};
use leptos::*;

pub fn status_badge_class(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "bg-status-warning-bg text-status-warning-text",
        RequestStatus::Approved => "bg-status-success-bg text-status-success-text",
        RequestStatus::Rejected => "bg-status-error-bg text-status-error-text",
    }
}

pub fn absence_type_class(kind: AbsenceType) -> &'static str {
    match kind {
        AbsenceType::Vacation => "border-l-4 border-absence-vacation",
        AbsenceType::Personal => "border-l-4 border-absence-personal",
        AbsenceType::Moving => "border-l-4 border-absence-moving",
    }
}

#[component]
pub fn StatusBadge(status: RequestStatus) -> impl IntoView {
    view! {
        <span class=format!(
            "inline-flex items-center rounded-full px-2 py-0.5 text-xs font-medium {}",
            status_badge_class(status),
        )>
            {status.label()}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_status_has_distinct_styling() {
        let classes = [
            status_badge_class(RequestStatus::Pending),
            status_badge_class(RequestStatus::Approved),
            status_badge_class(RequestStatus::Rejected),
        ];
        assert_ne!(classes[0], classes[1]);
        assert_ne!(classes[1], classes[2]);
        assert!(absence_type_class(AbsenceType::Moving).contains("moving"));
    }
}
