use leptos::prelude::*;
use leptos_router::components::{Outlet, ParentRoute, Route, Router, Routes};
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::path;

use crate::dashboards::OverviewDashboard;
use crate::domain::a101_charge_point::ui::{ChargePointDetails, ChargePointList};
use crate::domain::a102_transaction::ui::TransactionList;
use crate::domain::a103_id_tag::ui::IdTagListPage;
use crate::layout::{ModalService, Shell};
use crate::shared::api_utils::set_unauthorized_handler;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::{session_expired_target, RequireAuth};
use crate::system::pages::login::LoginPage;
use crate::system::pages::not_found::NotFoundPage;
use crate::system::users::ui::UsersListPage;

/// Router-wide side effects: dialogs close on navigation, a 401 from any
/// authenticated request ends the session.
#[component]
fn RouterEvents() -> impl IntoView {
    let auth = use_auth();
    let modals = use_context::<ModalService>().expect("ModalService not provided");
    let pathname = use_location().pathname;
    let navigate = use_navigate();

    set_unauthorized_handler(move || {
        log::info!("Session rejected by backend, redirecting to login");
        auth.clear_auth_state();
        let target = session_expired_target(&pathname.get_untracked());
        navigate(&target, Default::default());
    });

    Effect::new(move |prev: Option<String>| {
        let path = pathname.get();
        if prev.is_some_and(|p| p != path) {
            modals.close_all();
        }
        path
    });
}

/// Authenticated part of the app: guard, shell, then the routed page.
#[component]
fn ProtectedLayout() -> impl IntoView {
    view! {
        <RequireAuth>
            <Shell>
                <Outlet />
            </Shell>
        </RequireAuth>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <RouterEvents />
            <Routes fallback=|| view! { <NotFoundPage /> }>
                <Route path=path!("/login") view=LoginPage />
                <ParentRoute path=path!("") view=ProtectedLayout>
                    <Route path=path!("") view=OverviewDashboard />
                    <Route path=path!("charge-points") view=ChargePointList />
                    <Route path=path!("charge-points/:id") view=ChargePointDetails />
                    <Route path=path!("transactions") view=TransactionList />
                    <Route path=path!("users") view=UsersListPage />
                    <Route path=path!("id-tags") view=IdTagListPage />
                </ParentRoute>
            </Routes>
        </Router>
    }
}
