use crate::pages::admin::{
    components::{pending::PendingRequestsSection, stats::StatsSection},
    layout::AdminReviewScaffold,
    view_model::use_admin_view_model,
};
use crate::pages::vacations::types::{AbsenceRequest, RequestStatus};
use crate::utils::dates::today_local;
use chrono::Datelike;
use leptos::*;

#[component]
pub fn AdminVacationsPanel() -> impl IntoView {
    let vm = use_admin_view_model();
    let current_year = today_local().year();
    let busy = vm.review_action.pending();

    let comments = Callback::new(move |id: i64| vm.comment(id));
    let on_comment = Callback::new(move |(id, text): (i64, String)| vm.set_comment(id, text));
    let on_review = Callback::new(move |(request, status): (AbsenceRequest, RequestStatus)| {
        vm.review(&request, status)
    });

    view! {
        <AdminReviewScaffold>
            <div class="grid grid-cols-1 gap-6 lg:grid-cols-3">
                <div class="lg:col-span-2">
                    <PendingRequestsSection
                        pending=vm.pending.into()
                        loading=vm.loading()
                        error=vm.load_error()
                        usage=vm.usage
                        comments=comments
                        on_comment=on_comment
                        on_review=on_review
                        busy=busy.into()
                    />
                </div>
                <StatsSection year=vm.year current_year=current_year stats=vm.stats() />
            </div>
        </AdminReviewScaffold>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::admin_user;
    use crate::test_support::ssr::render_as;

    #[test]
    fn admin_panel_renders_queue_and_stats() {
        let html = render_as(Some(admin_user()), move || {
            view! { <AdminVacationsPanel /> }
        });
        assert!(html.contains("休暇申請の承認"));
        assert!(html.contains("承認待ちの申請 (0件)"));
        assert!(html.contains("年間統計"));
    }
}
