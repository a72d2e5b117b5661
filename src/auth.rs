//! Client-side authentication state.
//!
//! Tokens are issued by the backend API; this side only keeps the token the
//! login form received, the "remember me" flag, and guards protected
//! routes. Both values live in storage slots so a reload keeps the user
//! signed in.

use crate::session::Storage;
use serde::{Deserialize, Serialize};

/// Storage slot holding the bearer token
pub const TOKEN_SLOT: &str = "token";

/// Storage slot holding the remember flag (`"1"` when set)
pub const REMEMBER_SLOT: &str = "remember";

/// Route unauthenticated users are sent to
pub const LOGIN_ROUTE: &str = "/login";

/// Body of a successful `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

/// Outcome of a route guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(&'static str),
}

/// Signed-in state backed by storage slots.
#[derive(Debug)]
pub struct AuthSession<S> {
    storage: S,
    is_authenticated: bool,
    user: Option<serde_json::Value>,
    token: Option<String>,
    remember: bool,
}

impl<S: Storage> AuthSession<S> {
    /// Load the token and remember flag from storage.
    ///
    /// A stored token grants route access, but `is_authenticated` stays
    /// false until a login completes in this session.
    pub fn new(storage: S) -> Self {
        let token = read_slot(&storage, TOKEN_SLOT).filter(|t| !t.is_empty());
        let remember = read_slot(&storage, REMEMBER_SLOT).as_deref() == Some("1");
        Self {
            storage,
            is_authenticated: false,
            user: None,
            token,
            remember,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&serde_json::Value> {
        self.user.as_ref()
    }

    pub fn remember(&self) -> bool {
        self.remember
    }

    /// `Authorization` header value for API requests
    pub fn bearer_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    pub fn login_success(&mut self, response: LoginResponse) {
        write_slot(&self.storage, TOKEN_SLOT, Some(&response.access_token));
        self.is_authenticated = true;
        self.user = response.user;
        self.token = Some(response.access_token);
        log::info!("Login succeeded");
    }

    pub fn logout(&mut self) {
        self.is_authenticated = false;
        self.user = None;
        self.token = None;
        self.remember = false;
        write_slot(&self.storage, TOKEN_SLOT, None);
        write_slot(&self.storage, REMEMBER_SLOT, None);
        log::info!("Logged out");
    }

    pub fn set_remember(&mut self, remember: bool) {
        self.remember = remember;
        write_slot(&self.storage, REMEMBER_SLOT, remember.then_some("1"));
    }

    /// Protected routes need a token; everything else is open.
    pub fn guard(&self, protected: bool) -> RouteDecision {
        if protected && self.token.is_none() {
            RouteDecision::Redirect(LOGIN_ROUTE)
        } else {
            RouteDecision::Allow
        }
    }
}

fn read_slot(storage: &impl Storage, key: &str) -> Option<String> {
    storage.get(key).unwrap_or_else(|e| {
        log::warn!("Failed to read '{}' slot: {}", key, e);
        None
    })
}

/// Write or (with `None`) remove a slot, logging failures.
fn write_slot(storage: &impl Storage, key: &str, value: Option<&str>) {
    let result = match value {
        Some(value) => storage.set(key, value),
        None => storage.remove(key),
    };
    if let Err(e) = result {
        log::warn!("Failed to update '{}' slot: {}", key, e);
    }
}
