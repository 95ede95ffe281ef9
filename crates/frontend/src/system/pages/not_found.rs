use leptos::prelude::*;
use leptos_router::components::A;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <PageFrame page_id="sys_not_found--system" category=PAGE_CAT_SYSTEM>
            <div class="not-found">
                <h1 class="not-found__code">"404"</h1>
                <p class="not-found__text">"The page you are looking for does not exist."</p>
                <A href="/">"Back to dashboard"</A>
            </div>
        </PageFrame>
    }
}
