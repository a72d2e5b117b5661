//! Login, registration and company forms.
//!
//! Each form is a serde struct in the field names the backend expects,
//! plus a [`Validate`] impl that reports per-field errors before anything
//! is sent. [`crate::api::ApiClient`] turns a validated form into a request.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Shortest accepted password
pub const MIN_PASSWORD_LEN: usize = 6;

/// Shortest accepted workspace handle, after trimming
pub const MIN_HANDLE_LEN: usize = 2;

/// Role given to accounts created from the dashboard
pub const DEFAULT_ROLE: &str = "ADMIN";

pub const DEFAULT_COUNTRY: &str = "Brasil";

/// Loose email check used by the registration forms
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Stricter email check used for the company identifier
static COMPANY_EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"\S+@\S+\.\S+").expect("Failed to compile email regex")
    })
}

fn company_email_regex() -> &'static Regex {
    COMPANY_EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile company email regex")
    })
}

/// Why one field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("is required")]
    Required,

    #[error("is not a valid email")]
    InvalidEmail,

    #[error("must be at least {min} characters")]
    TooShort { min: usize },
}

/// Field errors keyed by the field's wire name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<FieldError> {
        self.0.get(field).copied()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }

    fn add(&mut self, field: &'static str, result: Result<(), FieldError>) {
        if let Err(error) = result {
            self.0.insert(field, error);
        }
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.fields().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field} {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Client-side checks run before a form is submitted.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

fn required(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(())
    }
}

fn email(value: &str) -> Result<(), FieldError> {
    required(value)?;
    if email_regex().is_match(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidEmail)
    }
}

fn password(value: &str) -> Result<(), FieldError> {
    required(value)?;
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(FieldError::TooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

// ── Sign-in ────────────────────────────────────────────────────────────────

/// How the company step identifies the tenant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    /// Workspace handle, e.g. `joinville`
    #[default]
    #[serde(alias = "name")]
    Handle,
    Email,
}

/// First login step: which company's workspace to enter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyIdentifier {
    pub kind: IdentifierKind,
    pub value: String,
}

impl CompanyIdentifier {
    pub fn handle(value: impl Into<String>) -> Self {
        Self {
            kind: IdentifierKind::Handle,
            value: value.into(),
        }
    }

    pub fn email(value: impl Into<String>) -> Self {
        Self {
            kind: IdentifierKind::Email,
            value: value.into(),
        }
    }
}

impl Validate for CompanyIdentifier {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let result = if self.value.is_empty() {
            Err(FieldError::Required)
        } else {
            match self.kind {
                IdentifierKind::Email if !company_email_regex().is_match(&self.value) => {
                    Err(FieldError::InvalidEmail)
                }
                IdentifierKind::Handle if self.value.trim().chars().count() < MIN_HANDLE_LEN => {
                    Err(FieldError::TooShort {
                        min: MIN_HANDLE_LEN,
                    })
                }
                _ => Ok(()),
            }
        };
        let mut errors = ValidationErrors::default();
        errors.add("identifier", result);
        errors.into_result()
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let present = |v: &str| if v.is_empty() { Err(FieldError::Required) } else { Ok(()) };
        let mut errors = ValidationErrors::default();
        errors.add("username", present(&self.username));
        errors.add("password", present(&self.password));
        errors.into_result()
    }
}

// ── Accounts ───────────────────────────────────────────────────────────────

/// Self-service registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterForm {
    pub nome: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            nome: String::new(),
            user_name: String::new(),
            email: String::new(),
            password: String::new(),
            role: default_role(),
        }
    }
}

impl Validate for RegisterForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.add("nome", required(&self.nome));
        errors.add("userName", required(&self.user_name));
        errors.add("email", email(&self.email));
        errors.add("password", password(&self.password));
        errors.into_result()
    }
}

/// A technician account created by an admin from the orders section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub city: String,
    #[serde(default = "default_role")]
    pub role: String,
}

impl Default for NewUserForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            username: String::new(),
            email: String::new(),
            password: String::new(),
            city: String::new(),
            role: default_role(),
        }
    }
}

impl Validate for NewUserForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.add("name", required(&self.name));
        errors.add("username", required(&self.username));
        errors.add("email", email(&self.email));
        errors.add("password", password(&self.password));
        errors.into_result()
    }
}

// ── Companies ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyAddress {
    pub cep: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub neighborhood: String,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub latitude: String,
    pub longitude: String,
}

impl Default for CompanyAddress {
    fn default() -> Self {
        Self {
            cep: String::new(),
            country: default_country(),
            state: String::new(),
            city: String::new(),
            neighborhood: String::new(),
            street: String::new(),
            number: String::new(),
            complement: String::new(),
            latitude: String::new(),
            longitude: String::new(),
        }
    }
}

/// A company registered from the operations section. The backend does
/// its own validation, so the payload is sent as entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyForm {
    pub name: String,
    pub cnpj: String,
    pub date_registration: String,
    pub accumulated_co2: f64,
    pub monthly_energy_consumption: f64,
    pub monthly_water_consumption: f64,
    pub monthly_waste: f64,
    pub address: CompanyAddress,
}
