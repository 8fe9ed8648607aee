use crate::pages::mobile::components::cards::RequestCards;
use crate::pages::vacations::{
    components::{
        delete_dialog::DeleteRequestDialog, detail::RequestDetailPanel, form::SubmissionFormModal,
    },
    form::SubmissionRules,
    layout::VacationsLayout,
    types::{AbsenceRequest, Scope, StatusFilter},
    view_model::use_vacations_view_model,
};
use leptos::*;

const STATUS_CHIPS: [StatusFilter; 4] = [
    StatusFilter::All,
    StatusFilter::Pending,
    StatusFilter::Approved,
    StatusFilter::Rejected,
];

fn chip_label(status: StatusFilter) -> &'static str {
    match status {
        StatusFilter::All => "すべて",
        StatusFilter::Pending => "承認待ち",
        StatusFilter::Approved => "承認済み",
        StatusFilter::Rejected => "却下",
    }
}

/// Single-column view of the signed-in user's own requests. Submissions here
/// are checked for overlap with existing requests before they are sent.
#[component]
pub fn MobileVacationsPage() -> impl IntoView {
    let vm = use_vacations_view_model(SubmissionRules::MOBILE);
    let filter = vm.filter;
    if filter.scope_untracked() != Scope::Mine {
        filter.set_scope(Scope::Mine);
    }
    let on_select = Callback::new(move |request: AbsenceRequest| vm.selected.set(Some(request)));
    let on_delete = Callback::new(move |request: AbsenceRequest| vm.request_delete(request));
    let can_delete = Callback::new(move |request: AbsenceRequest| vm.can_delete(&request));
    let on_submit = Callback::new(move |_| {
        if let Err(err) = vm.submit() {
            log::debug!("submission blocked: {}", err);
        }
    });

    view! {
        <>
            <VacationsLayout title="マイ休暇" description="自分の申請状況をまとめて確認できます。">
                <div class="flex gap-2 overflow-x-auto pb-1">
                    {STATUS_CHIPS
                        .iter()
                        .map(|status| {
                            let status = *status;
                            view! {
                                <button
                                    class=move || {
                                        if filter.status() == status {
                                            "shrink-0 rounded-full px-3 py-1 text-sm bg-action-primary-bg text-action-primary-text"
                                        } else {
                                            "shrink-0 rounded-full px-3 py-1 text-sm bg-surface-muted text-fg"
                                        }
                                    }
                                    on:click=move |_| filter.set_status(status)
                                >
                                    {chip_label(status)}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <RequestCards
                    requests=vm.filtered()
                    can_delete=can_delete
                    on_select=on_select
                    on_delete=on_delete
                />
                <RequestDetailPanel
                    selected=vm.selected
                    usage=vm.usage
                    is_admin=false
                    on_approve=Callback::new(|_| {})
                    on_reject=Callback::new(|_| {})
                />
            </VacationsLayout>
            <button
                aria-label="新規申請"
                class="fixed bottom-6 right-6 h-14 w-14 rounded-full shadow-lg bg-action-primary-bg text-action-primary-text text-2xl"
                on:click=move |_| vm.open_form()
            >
                {"+"}
            </button>
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
                title="申請の取り下げ"
                confirm_label="取り下げる"
                busy=vm.delete_action.pending().into()
                on_confirm=Callback::new(move |_| vm.confirm_delete())
            />
        </>
    }
}
