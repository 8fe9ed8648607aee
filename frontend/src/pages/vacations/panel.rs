use crate::pages::vacations::{
    components::{
        calendar::CalendarView,
        delete_dialog::DeleteRequestDialog,
        detail::RequestDetailPanel,
        filter::VacationsFilter,
        form::SubmissionFormModal,
        list::{Pagination, VacationsTable},
        user_lookup::UserLookupView,
    },
    form::SubmissionRules,
    layout::VacationsLayout,
    types::{AbsenceRequest, ViewMode},
    view_model::use_vacations_view_model,
};
use crate::utils::dates::today_local;
use chrono::Datelike;
use leptos::*;

#[component]
pub fn VacationsPage() -> impl IntoView {
    let vm = use_vacations_view_model(SubmissionRules::DESKTOP);
    let is_admin = vm.is_admin();
    let filter = vm.filter;

    let on_select = Callback::new(move |request: AbsenceRequest| vm.selected.set(Some(request)));
    let on_approve = Callback::new(move |request: AbsenceRequest| vm.approve(&request, None));
    let on_reject = Callback::new(move |request: AbsenceRequest| vm.reject(&request, None));
    let on_delete = Callback::new(move |request: AbsenceRequest| vm.request_delete(request));
    let can_delete = Callback::new(move |request: AbsenceRequest| vm.can_delete(&request));
    let on_review_approve =
        Callback::new(move |(request, comment): (AbsenceRequest, Option<String>)| vm.approve(&request, comment));
    let on_review_reject =
        Callback::new(move |(request, comment): (AbsenceRequest, Option<String>)| vm.reject(&request, comment));
    let on_submit = Callback::new(move |_| {
        if let Err(err) = vm.submit() {
            log::debug!("submission blocked: {}", err);
        }
    });

    view! {
        <>
            <VacationsLayout
                title="休暇申請"
                description="休暇・私用・引越しの申請を作成し、状況を一覧とカレンダーで確認できます。"
            >
                <div class="flex justify-end">
                    <button
                        class="rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text"
                        on:click=move |_| vm.open_form()
                    >
                        {"新規申請"}
                    </button>
                </div>
                <VacationsFilter filter=filter is_admin=is_admin />
                <div class="grid grid-cols-1 gap-6 xl:grid-cols-3">
                    <div class="xl:col-span-2 space-y-2">
                        {move || match filter.view() {
                            ViewMode::Table => view! {
                                <>
                                    <VacationsTable
                                        requests=vm.page_items()
                                        loading=vm.loading()
                                        error=vm.load_error()
                                        is_admin=is_admin
                                        can_delete=can_delete
                                        on_select=on_select
                                        on_approve=on_approve
                                        on_reject=on_reject
                                        on_delete=on_delete
                                    />
                                    <Pagination
                                        page=vm.current_page()
                                        total_pages=vm.total_pages()
                                        on_change=Callback::new(move |page| filter.set_page(page))
                                    />
                                </>
                            }
                            .into_view(),
                            ViewMode::Calendar => view! {
                                <CalendarView
                                    requests=vm.filtered()
                                    month=vm.calendar_month
                                    selected_day=vm.selected_day
                                    on_select=on_select
                                />
                            }
                            .into_view(),
                            ViewMode::Users if is_admin.get() => view! {
                                <UserLookupView
                                    lookup=vm.lookup
                                    repository=vm.repository()
                                    year=today_local().year()
                                />
                            }
                            .into_view(),
                            ViewMode::Users => view! {
                                <p class="text-sm text-fg-muted">{"この表示は管理者のみ利用できます。"}</p>
                            }
                            .into_view(),
                        }}
                    </div>
                    <RequestDetailPanel
                        selected=vm.selected
                        usage=vm.usage
                        is_admin=is_admin
                        on_approve=on_review_approve
                        on_reject=on_review_reject
                    />
                </div>
            </VacationsLayout>
            <SubmissionFormModal
                form=vm.form
                open=vm.form_open.into()
                warning=vm.form_warning()
                error=vm.form_error()
                on_submit=on_submit
                on_close=Callback::new(move |_| vm.close_form())
            />
            <DeleteRequestDialog
                target=vm.pending_delete
                title="申請の削除"
                confirm_label="削除する"
                busy=vm.delete_action.pending().into()
                on_confirm=Callback::new(move |_| vm.confirm_delete())
            />
        </>
    }
}
