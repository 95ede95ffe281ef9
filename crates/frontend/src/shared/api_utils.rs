//! API utilities for frontend-backend communication
//!
//! Every service module goes through the helpers here: they build the URL,
//! attach the bearer token, map non-2xx answers to [`ApiError`] and decode
//! the body unchanged.

use std::cell::RefCell;
use std::rc::Rc;

use contracts::shared::api::ApiErrorBody;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::config::api_url;
use crate::system::auth::storage::{self, BrowserStorage};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to send request: {0}")]
    Network(String),
    #[error("Failed to serialize request: {0}")]
    Serialize(String),
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Session expired, please log in again")]
    Unauthorized,
    #[error("{}", status_text(.status, .message))]
    Status { status: u16, message: Option<String> },
}

fn status_text(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("Request failed: {}", status),
    }
}

impl ApiError {
    /// Map a non-2xx response to an error.
    ///
    /// A 401 on an authenticated request means the stored token is dead;
    /// on the login request it is just a wrong password and keeps the
    /// server's message.
    pub fn from_response(status: u16, body: &str, authenticated: bool) -> Self {
        if status == 401 && authenticated {
            return ApiError::Unauthorized;
        }
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.text());
        ApiError::Status { status, message }
    }

    /// Message sent by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    fn builder(self, url: &str) -> RequestBuilder {
        match self {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Patch => Request::patch(url),
            HttpMethod::Delete => Request::delete(url),
        }
    }
}

thread_local! {
    static UNAUTHORIZED_HANDLER: RefCell<Option<Rc<dyn Fn()>>> = RefCell::new(None);
}

/// Register what happens when an authenticated request comes back 401.
/// The router installs a handler that clears the session and goes to the
/// login page, remembering the current path.
pub fn set_unauthorized_handler(handler: impl Fn() + 'static) {
    UNAUTHORIZED_HANDLER.with(|h| *h.borrow_mut() = Some(Rc::new(handler)));
}

fn notify_unauthorized() {
    let handler = UNAUTHORIZED_HANDLER.with(|h| h.borrow().clone());
    match handler {
        Some(handler) => handler(),
        None => storage::clear_session(&BrowserStorage),
    }
}

/// Append an urlencoded query string; empty params leave the path alone.
pub fn with_query<Q: Serialize>(path: &str, query: &Q) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Serialize(e.to_string()))?;
    if qs.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{}?{}", path, qs))
    }
}

fn auth_header() -> Option<String> {
    storage::load_token(&BrowserStorage).map(|token| format!("Bearer {}", token))
}

async fn send<T: DeserializeOwned>(
    method: HttpMethod,
    path: &str,
    body: Option<String>,
    authenticated: bool,
) -> Result<T, ApiError> {
    let url = api_url(path);
    let mut builder = method.builder(&url);

    if authenticated {
        if let Some(header) = auth_header() {
            builder = builder.header("Authorization", &header);
        }
    }

    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(json)
            .map_err(|e| ApiError::Serialize(e.to_string()))?,
        None => builder
            .build()
            .map_err(|e| ApiError::Serialize(e.to_string()))?,
    };

    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(status, &text, authenticated);
        log::warn!("{:?} {} -> {}", method, path, status);
        if err.is_unauthorized() {
            notify_unauthorized();
        }
        return Err(err);
    }

    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    decode_body(&text)
}

/// Decode a 2xx body. An empty body reads as `null`.
pub fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}

fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Serialize(e.to_string()))
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    send(HttpMethod::Get, path, None, true).await
}

pub async fn get_json_with_query<T, Q>(path: &str, query: &Q) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    Q: Serialize,
{
    let path = with_query(path, query)?;
    send(HttpMethod::Get, &path, None, true).await
}

pub async fn post_json<T, B>(path: &str, body: &B) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize,
{
    send(HttpMethod::Post, path, Some(encode(body)?), true).await
}

pub async fn post_empty<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    send(HttpMethod::Post, path, None, true).await
}

pub async fn put_json<T, B>(path: &str, body: &B) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize,
{
    send(HttpMethod::Put, path, Some(encode(body)?), true).await
}

pub async fn patch_json<T, B>(path: &str, body: &B) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize,
{
    send(HttpMethod::Patch, path, Some(encode(body)?), true).await
}

pub async fn delete_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    send(HttpMethod::Delete, path, None, true).await
}

/// Requests that must not carry the stored token (login, health probe).
pub async fn post_json_public<T, B>(path: &str, body: &B) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize,
{
    send(HttpMethod::Post, path, Some(encode(body)?), false).await
}

pub async fn get_json_public<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    send(HttpMethod::Get, path, None, false).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::User;
    use contracts::shared::api::ListParams;
    use serde_json::Value;
    use std::cell::Cell;

    #[test]
    fn authenticated_401_is_unauthorized() {
        let err = ApiError::from_response(401, r#"{"error":"Invalid token"}"#, true);
        assert_eq!(err, ApiError::Unauthorized);
        assert!(err.is_unauthorized());
    }

    #[test]
    fn login_401_keeps_server_message() {
        let err = ApiError::from_response(401, r#"{"message":"Invalid credentials"}"#, false);
        assert_eq!(err.server_message(), Some("Invalid credentials"));
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn non_json_body_has_generic_message() {
        let err = ApiError::from_response(502, "<html>Bad Gateway</html>", true);
        assert_eq!(err.server_message(), None);
        assert_eq!(err.to_string(), "Request failed: 502");
    }

    #[test]
    fn backend_error_field_is_used() {
        let err = ApiError::from_response(404, r#"{"error":"Charge point not found"}"#, true);
        assert_eq!(err.to_string(), "Charge point not found");
    }

    #[test]
    fn mutation_ack_body_is_accepted() {
        let ack: Value = decode_body(r#"{"message":"User created successfully"}"#).unwrap();
        assert_eq!(ack["message"], "User created successfully");

        let empty: Value = decode_body("").unwrap();
        assert!(empty.is_null());
    }

    #[test]
    fn ack_body_is_not_an_entity() {
        let err = decode_body::<User>(r#"{"message":"User updated successfully"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn registered_handler_runs_on_unauthorized() {
        let fired = Rc::new(Cell::new(0));
        let seen = fired.clone();
        set_unauthorized_handler(move || seen.set(seen.get() + 1));

        notify_unauthorized();
        assert_eq!(fired.get(), 1);

        UNAUTHORIZED_HANDLER.with(|h| *h.borrow_mut() = None);
    }

    #[test]
    fn empty_params_add_no_query() {
        let path = with_query("/api/v1/charge-points", &ListParams::default()).unwrap();
        assert_eq!(path, "/api/v1/charge-points");
    }

    #[test]
    fn paging_params_become_query() {
        let path = with_query("/api/v1/transactions", &ListParams::page(50, 100)).unwrap();
        assert_eq!(path, "/api/v1/transactions?limit=50&offset=100");
    }
}
