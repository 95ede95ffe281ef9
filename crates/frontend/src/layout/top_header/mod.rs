//! TopHeader component - application top navigation bar.
//!
//! Contains the sidebar toggle, the title, backend health, the signed-in
//! user and the logout button.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::LOGIN_PATH;
use crate::system::health::api as health_api;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

#[derive(Clone, Debug, PartialEq)]
enum Health {
    Unknown,
    Up(String),
    Down(String),
}

impl Health {
    fn css_class(&self) -> &'static str {
        match self {
            Health::Unknown => "health-dot health-dot--unknown",
            Health::Up(_) => "health-dot health-dot--up",
            Health::Down(_) => "health-dot health-dot--down",
        }
    }

    fn title(&self) -> String {
        match self {
            Health::Unknown => "Checking backend...".to_string(),
            Health::Up(msg) => format!("Backend online: {}", msg),
            Health::Down(msg) => format!("Backend unreachable: {}", msg),
        }
    }
}

#[component]
fn HealthIndicator() -> impl IntoView {
    let health = RwSignal::new(Health::Unknown);

    let check = move || {
        spawn_local(async move {
            let state = match health_api::get_health().await {
                Ok(h) if h.is_ok() => Health::Up(h.message),
                Ok(h) => Health::Down(h.status),
                Err(e) => {
                    log::warn!("Health check failed: {}", e);
                    Health::Down(e.to_string())
                }
            };
            health.set(state);
        });
    };
    check();

    view! {
        <button
            class="top-header__icon-btn"
            title=move || health.with(|h| h.title())
            on:click=move |_| check()
        >
            <span class=move || health.with(|h| h.css_class())></span>
        </button>
    }
}

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();
    let navigate = use_navigate();

    let logout = move |_| {
        let navigate = navigate.clone();
        spawn_local(async move {
            auth.logout().await;
            navigate(LOGIN_PATH, Default::default());
        });
    };

    let user_name = move || {
        auth.user.with(|u| {
            u.as_ref()
                .map(|u| u.display_name().to_string())
                .unwrap_or_default()
        })
    };

    view! {
        <header class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if ctx.left_open.get() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("dashboard")}
                </button>
                {icon("bolt")}
                <span class="top-header__title">"CSMS Dashboard"</span>
            </div>

            <div class="top-header__actions">
                <HealthIndicator />

                <div class="top-header__user">
                    {icon("user")}
                    <span>{user_name}</span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Logout">
                    {icon("logout")}
                </button>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_titles() {
        assert_eq!(Health::Up("CSMS is running".into()).title(), "Backend online: CSMS is running");
        assert_eq!(Health::Down("timeout".into()).css_class(), "health-dot health-dot--down");
    }
}
