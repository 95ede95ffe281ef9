use contracts::domain::User;
use contracts::system::auth::LoginRequest;
use leptos::prelude::*;

use super::storage::{self, BrowserStorage};
use super::api;
use crate::shared::api_utils::ApiError;

/// Fallback text when the server gives no reason for a failed login.
pub const LOGIN_FAILED: &str = "Login failed";

/// Result of a login attempt; errors are reported, never propagated.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl LoginOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(err: &ApiError) -> Self {
        Self {
            success: false,
            error: Some(login_error_message(err)),
        }
    }
}

pub fn login_error_message(err: &ApiError) -> String {
    err.server_message().unwrap_or(LOGIN_FAILED).to_string()
}

/// Outcome of validating the stored session with the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCheck {
    Valid,
    /// Backend answered 401; the unauthorized handler has already redirected.
    Rejected,
    /// No token, or the check could not be completed.
    Invalid,
}

impl SessionCheck {
    pub fn from_error(err: &ApiError) -> Self {
        if err.is_unauthorized() {
            SessionCheck::Rejected
        } else {
            SessionCheck::Invalid
        }
    }
}

/// Reactive auth store: bearer token and user profile, mirrored to
/// `localStorage` under `auth_token` / `user`.
#[derive(Clone, Copy)]
pub struct AuthStore {
    pub token: RwSignal<Option<String>>,
    pub user: RwSignal<Option<User>>,
    pub loading: RwSignal<bool>,
}

impl AuthStore {
    /// Token is read from storage right away, the profile by [`init_auth`].
    ///
    /// [`init_auth`]: AuthStore::init_auth
    pub fn new() -> Self {
        Self {
            token: RwSignal::new(storage::load_token(&BrowserStorage)),
            user: RwSignal::new(None),
            loading: RwSignal::new(false),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.with(|t| t.is_some())
    }

    pub fn is_admin(&self) -> bool {
        self.user
            .with(|u| u.as_ref().map(|u| u.is_admin()).unwrap_or(false))
    }

    /// Restore the cached user profile from storage
    pub fn init_auth(&self) {
        if let Some(user) = storage::load_user(&BrowserStorage) {
            log::debug!("Restored session for {}", user.email);
            self.user.set(Some(user));
        }
    }

    pub async fn login(&self, credentials: LoginRequest) -> LoginOutcome {
        self.loading.set(true);
        let outcome = match api::login(&credentials).await {
            Ok(response) => {
                storage::save_user(&BrowserStorage, &response.user);
                log::info!("Logged in as {}", response.user.email);
                self.user.set(Some(response.user));
                self.token.set(Some(response.access_token));
                LoginOutcome::ok()
            }
            Err(e) => {
                log::error!("Login error: {}", e);
                LoginOutcome::failed(&e)
            }
        };
        self.loading.set(false);
        outcome
    }

    pub async fn logout(&self) {
        if let Err(e) = api::logout().await {
            log::error!("Logout error: {}", e);
        }
        self.clear_auth_state();
    }

    pub fn clear_auth_state(&self) {
        self.token.set(None);
        self.user.set(None);
        storage::clear_session(&BrowserStorage);
    }

    /// Validate the session against `/auth/me`, refreshing the profile.
    pub async fn check_auth(&self) -> SessionCheck {
        if self.token.get_untracked().is_none() {
            return SessionCheck::Invalid;
        }

        match api::me().await {
            Ok(user) => {
                self.user.set(Some(user));
                SessionCheck::Valid
            }
            Err(e) => {
                log::error!("Auth check error: {}", e);
                self.clear_auth_state();
                SessionCheck::from_error(&e)
            }
        }
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the store, keep storage in sync with the token and provide it.
pub fn provide_auth_store() -> AuthStore {
    let store = AuthStore::new();

    Effect::new(move |_| match store.token.get() {
        Some(token) => storage::save_token(&BrowserStorage, &token),
        None => storage::remove_token(&BrowserStorage),
    });

    provide_context(store);
    store
}

/// Hook to access auth state
pub fn use_auth() -> AuthStore {
    use_context::<AuthStore>().expect("AuthStore not provided in component tree")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_failure_uses_server_message() {
        let err = ApiError::from_response(401, r#"{"message":"Invalid email or password"}"#, false);
        let outcome = LoginOutcome::failed(&err);
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("Invalid email or password"));
    }

    #[test]
    fn login_failure_without_message_is_generic() {
        let outcome = LoginOutcome::failed(&ApiError::Network("connection refused".into()));
        assert_eq!(outcome.error.as_deref(), Some(LOGIN_FAILED));

        let outcome = LoginOutcome::failed(&ApiError::from_response(500, "", false));
        assert_eq!(outcome.error.as_deref(), Some("Login failed"));
    }

    #[test]
    fn rejected_session_is_told_apart_from_failed_check() {
        let expired = ApiError::from_response(401, r#"{"error":"Invalid token"}"#, true);
        assert_eq!(SessionCheck::from_error(&expired), SessionCheck::Rejected);
        assert_eq!(
            SessionCheck::from_error(&ApiError::Network("offline".into())),
            SessionCheck::Invalid
        );
        assert_eq!(
            SessionCheck::from_error(&ApiError::from_response(500, "", true)),
            SessionCheck::Invalid
        );
    }

    #[test]
    fn successful_outcome_has_no_error() {
        assert_eq!(
            LoginOutcome::ok(),
            LoginOutcome {
                success: true,
                error: None
            }
        );
    }
}
