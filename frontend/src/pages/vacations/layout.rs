use crate::components::layout::Layout;
use leptos::*;
use leptos_meta::Title;

#[component]
pub fn VacationsLayout(
    #[prop(into)] title: String,
    #[prop(into)] description: String,
    children: Children,
) -> impl IntoView {
    view! {
        <>
            <Title text=format!("{} | 休暇申請", title) />
            <Layout>
                <div class="space-y-6 px-4 sm:px-0">
                    <div>
                        <h1 class="text-2xl font-bold text-fg">{title}</h1>
                        <p class="mt-1 text-sm text-fg-muted">{description}</p>
                    </div>
                    {children()}
                </div>
            </Layout>
        </>
    }
}
