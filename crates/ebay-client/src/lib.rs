//! eBay API Client
//!
//! Dual surface support behind one OAuth2 token lifecycle:
//! - `trading`: legacy XML Trading API (`/ws/api.dll`)
//! - `commerce`: REST Commerce/Sell APIs (taxonomy, translation, inventory, fulfillment)
//! - `auth`: consent URL, authorization-code / refresh / client-credentials grants
//!
//! The [`Ebay`] facade composes all three for one credential set and site.
//!
//! # Official Documentation
//! - OAuth: https://developer.ebay.com/api-docs/static/oauth-tokens.html
//! - REST request components: https://developer.ebay.com/api-docs/static/rest-request-components.html
//! - Trading API calls: https://developer.ebay.com/devzone/xml/docs/Concepts/MakingACall.html
//! - Site IDs: https://developer.ebay.com/devzone/Product/Concepts/SiteIDToGlobalID.html

pub mod auth;
pub mod client;
pub mod commerce;
pub mod config;
pub mod error;
pub mod resources;
pub mod trading;
pub mod types;

pub use auth::{AppTokenCache, Auth, Token, TokenManager};
pub use client::Ebay;
pub use commerce::CommerceClient;
pub use config::{Credentials, EbayConfig, Endpoints, Environment, LoggingConfig};
pub use error::{ApiErrorDetail, EbayError, Result};
pub use resources::{Item, Order, Transaction};
pub use trading::{TradingClient, XmlElement};
pub use types::*;

/// Production REST base URL
pub const PRODUCTION_API_BASE: &str = "https://api.ebay.com";

/// Sandbox REST base URL
pub const SANDBOX_API_BASE: &str = "https://api.sandbox.ebay.com";

/// Production OAuth consent endpoint
/// Source: https://developer.ebay.com/api-docs/static/oauth-consent-request.html
pub const PRODUCTION_AUTH_BASE: &str = "https://auth.ebay.com";

/// Sandbox OAuth consent endpoint
pub const SANDBOX_AUTH_BASE: &str = "https://auth.sandbox.ebay.com";

/// Token endpoint path, relative to the REST base
pub const TOKEN_PATH: &str = "/identity/v1/oauth2/token";

/// Consent endpoint path, relative to the auth base
pub const AUTHORIZE_PATH: &str = "/oauth2/authorize";

/// Trading API endpoint path, relative to the REST base
pub const TRADING_PATH: &str = "/ws/api.dll";

/// Trading API XML namespace
pub const TRADING_NAMESPACE: &str = "urn:ebay:apis:eBLBaseComponents";

/// Default Trading API compatibility level
/// Source: https://developer.ebay.com/DevZone/XML/docs/ReleaseNotes.html
pub const DEFAULT_COMPATIBILITY_LEVEL: u32 = 1257;
