//! Runtime configuration of the dashboard.
//!
//! The API base URL can be pinned at build time:
//! ```text
//! CSMS_API_BASE=https://csms.example.com trunk build --release
//! ```
//! Without it the backend is expected on the page's host, port 3000.

/// Port the CSMS backend listens on by default.
pub const BACKEND_PORT: u16 = 3000;

/// Page size used by list pages; matches the backend's default `limit`.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Overview auto-refresh interval.
pub const DASHBOARD_REFRESH_MS: u32 = 30_000;

/// How long a toast stays on screen.
pub const TOAST_TIMEOUT_MS: u32 = 4_000;

const API_BASE_OVERRIDE: Option<&str> = option_env!("CSMS_API_BASE");

/// Base URL for API requests, without a trailing slash.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return resolve_api_base(API_BASE_OVERRIDE, "http:", "127.0.0.1"),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    resolve_api_base(API_BASE_OVERRIDE, &protocol, &hostname)
}

/// Build a full API URL from a path starting with `/`.
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

pub fn resolve_api_base(override_base: Option<&str>, protocol: &str, hostname: &str) -> String {
    match override_base.map(str::trim).filter(|s| !s.is_empty()) {
        Some(base) => base.trim_end_matches('/').to_string(),
        None => format!("{}//{}:{}", protocol, hostname, BACKEND_PORT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_page_host() {
        assert_eq!(
            resolve_api_base(None, "https:", "csms.local"),
            "https://csms.local:3000"
        );
    }

    #[test]
    fn override_wins_and_loses_trailing_slash() {
        assert_eq!(
            resolve_api_base(Some("https://api.csms.io/"), "http:", "localhost"),
            "https://api.csms.io"
        );
    }

    #[test]
    fn blank_override_is_ignored() {
        assert_eq!(
            resolve_api_base(Some("  "), "http:", "localhost"),
            "http://localhost:3000"
        );
    }
}
