use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate};
use thaw::*;

use super::context::{use_auth, SessionCheck};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Who may enter a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Open to everyone (not-found page).
    Public,
    /// Login page: an authenticated user is sent home.
    GuestOnly,
    /// Requires a valid session.
    Protected,
}

pub fn route_access(path: &str) -> RouteAccess {
    const PROTECTED: &[&str] = &["charge-points", "transactions", "users", "id-tags"];

    let trimmed = path.trim_end_matches('/');
    if trimmed == LOGIN_PATH {
        return RouteAccess::GuestOnly;
    }
    if trimmed.is_empty() {
        return RouteAccess::Protected;
    }
    let first = trimmed.trim_start_matches('/').split('/').next().unwrap_or("");
    if PROTECTED.contains(&first) {
        RouteAccess::Protected
    } else {
        RouteAccess::Public
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    /// Token present; confirm it with the backend before rendering.
    VerifySession,
    Redirect(String),
}

/// Navigation guard decision table.
pub fn decide(path: &str, is_authenticated: bool) -> GuardDecision {
    match (route_access(path), is_authenticated) {
        (RouteAccess::Protected, false) => GuardDecision::Redirect(login_path_for(path)),
        (RouteAccess::Protected, true) => GuardDecision::VerifySession,
        (RouteAccess::GuestOnly, true) => GuardDecision::Redirect(HOME_PATH.to_string()),
        (RouteAccess::GuestOnly, false) | (RouteAccess::Public, _) => GuardDecision::Proceed,
    }
}

/// `/login`, remembering where the user wanted to go.
pub fn login_path_for(path: &str) -> String {
    if path.is_empty() || path == HOME_PATH {
        LOGIN_PATH.to_string()
    } else {
        format!("{}?redirect={}", LOGIN_PATH, urlencoding::encode(path))
    }
}

/// Login target once the backend has rejected the session on `current_path`.
pub fn session_expired_target(current_path: &str) -> String {
    match route_access(current_path) {
        RouteAccess::GuestOnly => LOGIN_PATH.to_string(),
        _ => login_path_for(current_path),
    }
}

/// Navigation still owed by the guard after a session check on `path`.
/// A rejected session was already redirected by the unauthorized handler.
pub fn redirect_after_check(check: SessionCheck, path: &str) -> Option<String> {
    match check {
        SessionCheck::Valid | SessionCheck::Rejected => None,
        SessionCheck::Invalid => Some(login_path_for(path)),
    }
}

/// Where to go after a successful login. Only local paths are accepted.
pub fn redirect_after_login(redirect: Option<&str>) -> String {
    redirect
        .map(|r| urlencoding::decode(r).map(|s| s.into_owned()).unwrap_or_default())
        .filter(|r| r.starts_with('/') && !r.starts_with("//") && r != LOGIN_PATH)
        .unwrap_or_else(|| HOME_PATH.to_string())
}

/// Layout guard for protected routes.
///
/// Re-validates the session with the backend on every navigation and
/// redirects to the login page when it is gone.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let navigate = use_navigate();
    let (verified, set_verified) = signal(false);

    Effect::new(move |_| {
        let path = location.pathname.get();

        if auth.user.get_untracked().is_none() && auth.token.get_untracked().is_some() {
            auth.init_auth();
        }

        match decide(&path, auth.token.get_untracked().is_some()) {
            GuardDecision::Proceed => set_verified.set(true),
            GuardDecision::Redirect(target) => {
                set_verified.set(false);
                navigate(&target, Default::default());
            }
            GuardDecision::VerifySession => {
                let navigate = navigate.clone();
                spawn_local(async move {
                    let check = auth.check_auth().await;
                    set_verified.set(check == SessionCheck::Valid);
                    if let Some(target) = redirect_after_check(check, &path) {
                        navigate(&target, Default::default());
                    }
                });
            }
        }
    });

    view! {
        <Show
            when=move || verified.get() && auth.is_authenticated()
            fallback=|| view! {
                <div class="page-loading">
                    <Spinner />
                </div>
            }
        >
            {children()}
        </Show>
    }
}

/// Component that requires admin privileges
/// Shows fallback if not admin
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show
            when=move || auth.is_authenticated() && auth.is_admin()
            fallback=|| view! {
                <div class="alert alert--error">"Access denied. Administrator role required."</div>
            }
        >
            {children()}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_are_classified() {
        assert_eq!(route_access("/"), RouteAccess::Protected);
        assert_eq!(route_access("/charge-points"), RouteAccess::Protected);
        assert_eq!(route_access("/charge-points/12"), RouteAccess::Protected);
        assert_eq!(route_access("/transactions/"), RouteAccess::Protected);
        assert_eq!(route_access("/users"), RouteAccess::Protected);
        assert_eq!(route_access("/id-tags"), RouteAccess::Protected);
        assert_eq!(route_access("/login"), RouteAccess::GuestOnly);
        assert_eq!(route_access("/nowhere"), RouteAccess::Public);
    }

    #[test]
    fn protected_route_without_token_goes_to_login() {
        assert_eq!(decide("/", false), GuardDecision::Redirect("/login".into()));
        assert_eq!(
            decide("/charge-points/3", false),
            GuardDecision::Redirect("/login?redirect=%2Fcharge-points%2F3".into())
        );
    }

    #[test]
    fn protected_route_with_token_is_verified() {
        assert_eq!(decide("/transactions", true), GuardDecision::VerifySession);
    }

    #[test]
    fn login_with_token_goes_home() {
        assert_eq!(decide("/login", true), GuardDecision::Redirect("/".into()));
        assert_eq!(decide("/login", false), GuardDecision::Proceed);
        assert_eq!(decide("/missing", false), GuardDecision::Proceed);
    }

    #[test]
    fn cleared_session_keeps_the_requested_page() {
        let target = session_expired_target("/charge-points/3");
        assert_eq!(target, "/login?redirect=%2Fcharge-points%2F3");
        assert_eq!(decide("/charge-points/3", false), GuardDecision::Redirect(target));
        assert_eq!(session_expired_target("/"), "/login");
        assert_eq!(session_expired_target("/login"), "/login");
    }

    #[test]
    fn rejected_session_is_redirected_once() {
        assert_eq!(redirect_after_check(SessionCheck::Rejected, "/users"), None);
        assert_eq!(redirect_after_check(SessionCheck::Valid, "/users"), None);
        assert_eq!(
            redirect_after_check(SessionCheck::Invalid, "/users"),
            Some("/login?redirect=%2Fusers".to_string())
        );
    }

    #[test]
    fn login_page_sends_signed_in_user_home() {
        // decided on the token alone, the profile may still be loading
        assert_eq!(decide(LOGIN_PATH, true), GuardDecision::Redirect(HOME_PATH.into()));
        assert_eq!(decide(LOGIN_PATH, false), GuardDecision::Proceed);
    }

    #[test]
    fn redirect_target_must_be_local() {
        assert_eq!(redirect_after_login(Some("%2Fusers")), "/users");
        assert_eq!(redirect_after_login(Some("/charge-points/3")), "/charge-points/3");
        assert_eq!(redirect_after_login(Some("https://evil.example")), "/");
        assert_eq!(redirect_after_login(Some("//evil.example")), "/");
        assert_eq!(redirect_after_login(Some("/login")), "/");
        assert_eq!(redirect_after_login(None), "/");
    }
}
