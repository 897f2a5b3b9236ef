//! Error taxonomy shared by auth and both dispatchers
//!
//! Upstream failures arrive in two shapes: REST JSON `errors` arrays and
//! Trading XML `Errors` blocks. Both are normalized into [`ApiErrorDetail`]
//! through the [`ErrorEnvelope`] trait so a caller can branch on upstream
//! codes without re-parsing the transport response.
//!
//! # Source
//! - REST errors: https://developer.ebay.com/api-docs/static/handling-error-messages.html
//! - Trading errors: https://developer.ebay.com/devzone/xml/docs/Reference/ebay/Errors/errormessages.htm

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, EbayError>;

/// All failures surfaced by the client. None are retried internally.
#[derive(Debug, Error)]
pub enum EbayError {
    /// Missing or invalid configuration for the active environment
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Token endpoint rejected a grant
    #[error("{description}")]
    Authentication {
        description: String,
        code: String,
        raw_body: Option<String>,
    },

    /// Authenticated call attempted without a usable token
    #[error("Access token required but not available")]
    MissingToken,

    /// Unsupported HTTP verb
    #[error("Unsupported HTTP method: {0}")]
    InvalidMethod(String),

    /// Trading response body was not well-formed XML
    #[error("Failed to parse XML response: {message}")]
    InvalidXml { message: String, raw_body: String },

    /// Transport-level failure or non-2xx Trading response
    #[error("{message}")]
    RequestFailed {
        message: String,
        raw_body: Option<String>,
    },

    /// Upstream business error, normalized from either surface
    #[error("{message}")]
    Api {
        message: String,
        code: String,
        errors: Vec<ApiErrorDetail>,
        raw_body: Option<String>,
    },
}

impl EbayError {
    /// Machine-readable error code
    pub fn code(&self) -> &str {
        match self {
            EbayError::Configuration(_) => "configuration_error",
            EbayError::Authentication { code, .. } => code,
            EbayError::MissingToken => "missing_token",
            EbayError::InvalidMethod(_) => "invalid_method",
            EbayError::InvalidXml { .. } => "invalid_xml",
            EbayError::RequestFailed { .. } => "request_failed",
            EbayError::Api { code, .. } => code,
        }
    }

    /// Raw upstream body, when one was received
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            EbayError::Authentication { raw_body, .. }
            | EbayError::RequestFailed { raw_body, .. }
            | EbayError::Api { raw_body, .. } => raw_body.as_deref(),
            EbayError::InvalidXml { raw_body, .. } => Some(raw_body),
            _ => None,
        }
    }

    /// Normalized upstream sub-errors (empty for non-API failures)
    pub fn errors(&self) -> &[ApiErrorDetail] {
        match self {
            EbayError::Api { errors, .. } => errors,
            _ => &[],
        }
    }

    pub(crate) fn request_failed(message: impl Into<String>) -> Self {
        EbayError::RequestFailed { message: message.into(), raw_body: None }
    }
}

impl From<reqwest::Error> for EbayError {
    fn from(err: reqwest::Error) -> Self {
        EbayError::request_failed(format!("HTTP request failed: {}", err))
    }
}

/// One normalized upstream error entry
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    /// Human message (`message` for REST, `LongMessage` for Trading)
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
}

/// An upstream error payload that can be normalized into [`ApiErrorDetail`]s
pub trait ErrorEnvelope {
    /// Every error entry carried by the payload
    fn errors(&self) -> Vec<ApiErrorDetail>;

    /// Message used when the payload carries no entries
    fn fallback_message(&self) -> &'static str;

    /// Build the [`EbayError::Api`] for this payload
    fn into_api_error(&self, raw_body: Option<String>) -> EbayError {
        let errors = self.errors();
        let (message, code) = match errors.first() {
            Some(first) => (first.message.clone(), first.code.clone()),
            None => (self.fallback_message().to_string(), "unknown".to_string()),
        };
        EbayError::Api { message, code, errors, raw_body }
    }
}
