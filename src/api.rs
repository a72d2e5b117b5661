//! Requests against the backend API.
//!
//! The shell does not own an HTTP client. [`ApiClient`] validates a form
//! and resolves it into an [`ApiRequest`] (method, absolute URL, JSON body
//! and bearer header) for whatever transport the host uses.

use crate::error::ApiError;
use crate::forms::{CompanyForm, LoginForm, NewUserForm, RegisterForm, Validate};
use carbono_config::Config;
use serde::Serialize;

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const COMPANIES_PATH: &str = "/companies";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A request ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
    /// `Authorization` header value
    pub authorization: Option<String>,
}

/// Builds requests relative to the configured API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
    authorization: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self {
            base_url,
            authorization: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base_url.as_str())
    }

    /// Attach the signed-in user's header, as from
    /// [`crate::auth::AuthSession::bearer_header`].
    pub fn with_authorization(mut self, header: Option<String>) -> Self {
        self.authorization = header;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn login(&self, form: &LoginForm) -> Result<ApiRequest, ApiError> {
        self.post_validated(LOGIN_PATH, form)
    }

    pub fn register(&self, form: &RegisterForm) -> Result<ApiRequest, ApiError> {
        self.post_validated(REGISTER_PATH, form)
    }

    /// Accounts created by an admin go through the registration endpoint.
    pub fn create_user(&self, form: &NewUserForm) -> Result<ApiRequest, ApiError> {
        self.post_validated(REGISTER_PATH, form)
    }

    pub fn list_companies(&self) -> ApiRequest {
        self.request(Method::Get, COMPANIES_PATH, None)
    }

    pub fn create_company(&self, form: &CompanyForm) -> Result<ApiRequest, ApiError> {
        let body = serde_json::to_value(form)?;
        Ok(self.request(Method::Post, COMPANIES_PATH, Some(body)))
    }

    fn post_validated<F: Validate + Serialize>(
        &self,
        path: &str,
        form: &F,
    ) -> Result<ApiRequest, ApiError> {
        if let Err(errors) = form.validate() {
            log::debug!("Rejected form for {}: {}", path, errors);
            return Err(errors.into());
        }
        let body = serde_json::to_value(form)?;
        Ok(self.request(Method::Post, path, Some(body)))
    }

    fn request(&self, method: Method, path: &str, body: Option<serde_json::Value>) -> ApiRequest {
        ApiRequest {
            method,
            url: self.url(path),
            body,
            authorization: self.authorization.clone(),
        }
    }
}
