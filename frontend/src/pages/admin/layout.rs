use crate::components::layout::Layout;
use leptos::*;
use leptos_meta::Title;

#[component]
pub fn AdminReviewFrame(children: Children) -> impl IntoView {
    view! {
        <div class="space-y-6 px-4 sm:px-0">
            <div>
                <h1 class="text-2xl font-bold text-fg">{"休暇申請の承認"}</h1>
                <p class="mt-1 text-sm text-fg-muted">
                    {"全社員の承認待ち申請と年間の取得状況を確認できます。"}
                </p>
            </div>
            {children()}
        </div>
    }
}

#[component]
pub fn AdminReviewScaffold(children: Children) -> impl IntoView {
    view! {
        <>
            <Title text="承認 | 休暇申請" />
            <Layout>
                <AdminReviewFrame>{children()}</AdminReviewFrame>
            </Layout>
        </>
    }
}
