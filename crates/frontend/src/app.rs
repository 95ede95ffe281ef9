use crate::layout::global_context::AppGlobalContext;
use crate::layout::ModalService;
use crate::routes::routes::AppRoutes;
use crate::shared::components::notification::{NotificationContext, NotificationHost};
use crate::state::dashboard_store::DashboardStore;
use crate::system::auth::context::provide_auth_store;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Restore the session from localStorage before the first route renders
    let auth = provide_auth_store();
    auth.init_auth();

    provide_context(AppGlobalContext::new());

    // Provide ModalService for centralized modal management
    provide_context(ModalService::new());

    provide_context(NotificationContext::new());
    provide_context(DashboardStore::new());

    view! {
        <AppRoutes />
        <NotificationHost />
    }
}
