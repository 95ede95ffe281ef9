use contracts::system::auth::LoginRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::system::auth::context::use_auth;
use crate::system::auth::guard::{decide, redirect_after_login, GuardDecision, LOGIN_PATH};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let query = use_query_map();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);

    // Arrived with a token: go home. A fresh login navigates on its own.
    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            let signed_in = auth.token.with_untracked(|t| t.is_some());
            if let GuardDecision::Redirect(target) = decide(LOGIN_PATH, signed_in) {
                navigate(&target, Default::default());
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let credentials = LoginRequest {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        let target = redirect_after_login(query.with_untracked(|q| q.get("redirect")).as_deref());
        let navigate = navigate.clone();

        set_error_message.set(None);

        spawn_local(async move {
            let outcome = auth.login(credentials).await;
            if outcome.success {
                navigate(&target, Default::default());
            } else {
                set_error_message.set(outcome.error);
            }
        });
    };

    let is_loading = move || auth.loading.get();

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"CSMS Dashboard"</h1>
                <h2>"Sign in"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            placeholder="admin@csms.local"
                            autocomplete="username"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            required
                            disabled=is_loading
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=is_loading
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=is_loading
                    >
                        {move || if is_loading() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
