//! Client configuration
//!
//! Settings are read-only once a client is built. Switching environment goes
//! through [`crate::Ebay::set_environment`], which re-validates credentials
//! and rebuilds every dependent.
//!
//! # Environment variables
//! - `EBAY_ENVIRONMENT` (`sandbox` | `production`, default `sandbox`)
//! - `EBAY_SANDBOX_APP_ID`, `EBAY_SANDBOX_CERT_ID`, `EBAY_SANDBOX_DEV_ID`, `EBAY_SANDBOX_RUNAME`
//! - `EBAY_PRODUCTION_APP_ID`, `EBAY_PRODUCTION_CERT_ID`, `EBAY_PRODUCTION_DEV_ID`, `EBAY_PRODUCTION_RUNAME`
//! - `EBAY_DEFAULT_SITE` (site code, default `US`)
//! - `EBAY_COMPATIBILITY_LEVEL` (default 1257)
//! - `EBAY_LOGGING_ENABLED`, `EBAY_LOG_CHANNEL`

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{EbayError, Result};
use crate::types::Site;
use crate::{
    AUTHORIZE_PATH, DEFAULT_COMPATIBILITY_LEVEL, PRODUCTION_API_BASE, PRODUCTION_AUTH_BASE,
    SANDBOX_API_BASE, SANDBOX_AUTH_BASE, TOKEN_PATH, TRADING_PATH,
};

/// Default OAuth scopes requested for user consent
pub const DEFAULT_SCOPES: [&str; 15] = [
    "https://api.ebay.com/oauth/api_scope",
    "https://api.ebay.com/oauth/api_scope/sell.marketing.readonly",
    "https://api.ebay.com/oauth/api_scope/sell.marketing",
    "https://api.ebay.com/oauth/api_scope/sell.inventory.readonly",
    "https://api.ebay.com/oauth/api_scope/sell.inventory",
    "https://api.ebay.com/oauth/api_scope/sell.account.readonly",
    "https://api.ebay.com/oauth/api_scope/sell.account",
    "https://api.ebay.com/oauth/api_scope/sell.fulfillment.readonly",
    "https://api.ebay.com/oauth/api_scope/sell.fulfillment",
    "https://api.ebay.com/oauth/api_scope/sell.analytics.readonly",
    "https://api.ebay.com/oauth/api_scope/sell.finances",
    "https://api.ebay.com/oauth/api_scope/sell.payment.dispute",
    "https://api.ebay.com/oauth/api_scope/commerce.identity.readonly",
    "https://api.ebay.com/oauth/api_scope/commerce.notification.subscription",
    "https://api.ebay.com/oauth/api_scope/commerce.notification.subscription.readonly",
];

/// eBay API environment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = EbayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            other => Err(EbayError::Configuration(format!(
                "Invalid environment: {}. Must be 'sandbox' or 'production'",
                other
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application keyset for one environment
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// App ID (OAuth client ID)
    pub app_id: String,
    /// Cert ID (OAuth client secret)
    pub cert_id: String,
    /// Dev ID (Trading API only)
    pub dev_id: String,
    /// RuName (OAuth redirect identifier)
    pub ru_name: String,
}

impl Credentials {
    pub fn new(
        app_id: impl Into<String>,
        cert_id: impl Into<String>,
        dev_id: impl Into<String>,
        ru_name: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            cert_id: cert_id.into(),
            dev_id: dev_id.into(),
            ru_name: ru_name.into(),
        }
    }

    /// Read `EBAY_<ENV>_{APP_ID,CERT_ID,DEV_ID,RUNAME}`; missing vars become empty strings
    pub fn from_env(environment: Environment) -> Self {
        let prefix = environment.as_str().to_uppercase();
        let var = |key: &str| std::env::var(format!("EBAY_{}_{}", prefix, key)).unwrap_or_default();

        Self {
            app_id: var("APP_ID"),
            cert_id: var("CERT_ID"),
            dev_id: var("DEV_ID"),
            ru_name: var("RUNAME"),
        }
    }

    /// Fail on the first empty field
    pub fn validate(&self, environment: Environment) -> Result<()> {
        let fields = [
            ("app_id", &self.app_id),
            ("cert_id", &self.cert_id),
            ("dev_id", &self.dev_id),
            ("runame", &self.ru_name),
        ];

        for (key, value) in fields {
            if value.is_empty() {
                return Err(EbayError::Configuration(format!(
                    "Missing required configuration: ebay.{}.{}",
                    environment, key
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("cert_id", &"[REDACTED]")
            .field("dev_id", &self.dev_id)
            .field("ru_name", &self.ru_name)
            .finish()
    }
}

/// Upstream endpoint set for one environment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    /// REST base (no trailing slash)
    pub api_base: String,
    /// Trading API endpoint
    pub trading: String,
    /// OAuth token endpoint
    pub token: String,
    /// OAuth consent endpoint
    pub authorize: String,
}

impl Endpoints {
    pub fn for_environment(environment: Environment) -> Self {
        let (api, auth) = match environment {
            Environment::Sandbox => (SANDBOX_API_BASE, SANDBOX_AUTH_BASE),
            Environment::Production => (PRODUCTION_API_BASE, PRODUCTION_AUTH_BASE),
        };

        Self {
            api_base: api.to_string(),
            trading: format!("{}{}", api, TRADING_PATH),
            token: format!("{}{}", api, TOKEN_PATH),
            authorize: format!("{}{}", auth, AUTHORIZE_PATH),
        }
    }

    /// Every endpoint under a single base URL (mock servers, proxies)
    pub fn rooted_at(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            api_base: base.to_string(),
            trading: format!("{}{}", base, TRADING_PATH),
            token: format!("{}{}", base, TOKEN_PATH),
            authorize: format!("{}{}", base, AUTHORIZE_PATH),
        }
    }
}

/// Per-request logging switch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub enabled: bool,
    /// Attached to every request log record as the `channel` field
    pub channel: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { enabled: false, channel: "stack".to_string() }
    }
}

/// Top-level client configuration
#[derive(Clone, Debug)]
pub struct EbayConfig {
    pub environment: Environment,
    pub sandbox: Credentials,
    pub production: Credentials,
    pub default_site: Site,
    pub scopes: Vec<String>,
    pub compatibility_level: u32,
    pub logging: LoggingConfig,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Replaces the per-environment endpoint set when present
    pub endpoints: Option<Endpoints>,
}

impl Default for EbayConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Sandbox,
            sandbox: Credentials::default(),
            production: Credentials::default(),
            default_site: Site::Us,
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
            compatibility_level: DEFAULT_COMPATIBILITY_LEVEL,
            logging: LoggingConfig::default(),
            timeout: Duration::from_secs(30),
            endpoints: None,
        }
    }
}

impl EbayConfig {
    /// Build configuration from `EBAY_*` environment variables
    pub fn from_env() -> Result<Self> {
        let environment = match std::env::var("EBAY_ENVIRONMENT") {
            Ok(value) => value.parse()?,
            Err(_) => Environment::Sandbox,
        };

        // Unknown site codes fall back to US rather than failing
        let default_site = std::env::var("EBAY_DEFAULT_SITE")
            .ok()
            .and_then(|code| Site::from_code(&code))
            .unwrap_or_default();

        let compatibility_level = std::env::var("EBAY_COMPATIBILITY_LEVEL")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_COMPATIBILITY_LEVEL);

        let logging = LoggingConfig {
            enabled: std::env::var("EBAY_LOGGING_ENABLED")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
                .unwrap_or(false),
            channel: std::env::var("EBAY_LOG_CHANNEL").unwrap_or_else(|_| "stack".to_string()),
        };

        Ok(Self {
            environment,
            sandbox: Credentials::from_env(Environment::Sandbox),
            production: Credentials::from_env(Environment::Production),
            default_site,
            compatibility_level,
            logging,
            ..Self::default()
        })
    }

    /// Credentials for `environment`, validated
    pub fn credentials_for(&self, environment: Environment) -> Result<&Credentials> {
        let credentials = match environment {
            Environment::Sandbox => &self.sandbox,
            Environment::Production => &self.production,
        };
        credentials.validate(environment)?;
        Ok(credentials)
    }

    /// Endpoint set for `environment`, honoring the override
    pub fn endpoints_for(&self, environment: Environment) -> Endpoints {
        self.endpoints.clone().unwrap_or_else(|| Endpoints::for_environment(environment))
    }

    pub fn with_credentials(mut self, environment: Environment, credentials: Credentials) -> Self {
        match environment {
            Environment::Sandbox => self.sandbox = credentials,
            Environment::Production => self.production = credentials,
        }
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!("sandbox".parse::<Environment>().unwrap(), Environment::Sandbox);
        assert_eq!("PRODUCTION".parse::<Environment>().unwrap(), Environment::Production);

        let err = "staging".parse::<Environment>().unwrap_err();
        assert!(matches!(err, EbayError::Configuration(_)));
        assert!(err.to_string().contains("Invalid environment: staging"));
    }

    #[test]
    fn test_credentials_debug_redacts_cert() {
        let creds = Credentials::new("app-id", "super_secret_cert", "dev-id", "runame");
        let debug_str = format!("{:?}", creds);
        assert!(!debug_str.contains("super_secret_cert"));
        assert!(debug_str.contains("app-id"));
    }

    #[test]
    fn test_missing_credentials_named_in_error() {
        let config = EbayConfig::default()
            .with_credentials(Environment::Sandbox, Credentials::new("app", "cert", "", "ru"));

        let err = config.credentials_for(Environment::Sandbox).unwrap_err();
        assert_eq!(err.to_string(), "configuration error: Missing required configuration: ebay.sandbox.dev_id");
        assert!(config.credentials_for(Environment::Production).is_err());
    }

    #[test]
    fn test_endpoints_per_environment() {
        let sandbox = Endpoints::for_environment(Environment::Sandbox);
        assert_eq!(sandbox.token, "https://api.sandbox.ebay.com/identity/v1/oauth2/token");
        assert_eq!(sandbox.authorize, "https://auth.sandbox.ebay.com/oauth2/authorize");
        assert_eq!(sandbox.trading, "https://api.sandbox.ebay.com/ws/api.dll");

        let production = Endpoints::for_environment(Environment::Production);
        assert_eq!(production.api_base, "https://api.ebay.com");
        assert_eq!(production.authorize, "https://auth.ebay.com/oauth2/authorize");
    }

    #[test]
    fn test_endpoints_rooted_at_trims_slash() {
        let endpoints = Endpoints::rooted_at("http://127.0.0.1:8080/");
        assert_eq!(endpoints.api_base, "http://127.0.0.1:8080");
        assert_eq!(endpoints.token, "http://127.0.0.1:8080/identity/v1/oauth2/token");
    }

    #[test]
    fn test_default_config() {
        let config = EbayConfig::default();
        assert_eq!(config.compatibility_level, 1257);
        assert_eq!(config.scopes.len(), 15);
        assert_eq!(config.default_site, Site::Us);
        assert!(!config.logging.enabled);
        assert_eq!(config.logging.channel, "stack");
    }
}
