//! `Ebay` facade: one credential set, one site, both API surfaces
//!
//! Switching site rebuilds the dispatchers and keeps the current tokens.
//! Switching environment rebuilds everything and drops the tokens, since
//! tokens are issued per environment.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::info;

use crate::auth::{Auth, Token, TokenManager};
use crate::commerce::CommerceClient;
use crate::config::{EbayConfig, Environment};
use crate::error::{EbayError, Result};
use crate::trading::TradingClient;
use crate::types::Site;

/// Auth plus the Trading and Commerce dispatchers, bound to one environment and site
pub struct Ebay {
    config: EbayConfig,
    http: Client,
    environment: Environment,
    site: Site,
    auth: Arc<Auth>,
    trading: TradingClient,
    commerce: CommerceClient,
}

impl Ebay {
    /// Build for `config.environment` and `config.default_site`.
    ///
    /// Fails with a configuration error when any credential of the active
    /// environment is empty.
    pub fn new(config: EbayConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EbayError::request_failed(format!("Failed to build HTTP client: {}", e)))?;

        let environment = config.environment;
        let site = config.default_site;
        let auth = build_auth(&config, &http, environment)?;
        let (trading, commerce) = build_dispatchers(&config, &http, &auth, environment, site)?;

        Ok(Self { config, http, environment, site, auth, trading, commerce })
    }

    /// Build from `EBAY_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(EbayConfig::from_env()?)
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn trading(&self) -> &TradingClient {
        &self.trading
    }

    /// Mutable access, e.g. to change the compatibility level
    pub fn trading_mut(&mut self) -> &mut TradingClient {
        &mut self.trading
    }

    pub fn commerce(&self) -> &CommerceClient {
        &self.commerce
    }

    pub fn site(&self) -> Site {
        self.site
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn config(&self) -> &EbayConfig {
        &self.config
    }

    /// Rebind both dispatchers to `site`, keeping their tokens. No-op for the current site.
    pub async fn set_site(&mut self, site: Site) -> Result<&mut Self> {
        if site == self.site {
            return Ok(self);
        }

        let trading_tokens = self.trading.tokens().snapshot().await;
        let commerce_tokens = self.commerce.tokens().snapshot().await;

        let (trading, commerce) = build_dispatchers(&self.config, &self.http, &self.auth, self.environment, site)?;
        trading.tokens().restore(&trading_tokens).await;
        commerce.tokens().restore(&commerce_tokens).await;

        info!("Site switched: {} -> {}", self.site.code(), site.code());
        self.trading = trading;
        self.commerce = commerce;
        self.site = site;
        Ok(self)
    }

    /// Rebuild for `environment` with its own credentials. Tokens are dropped.
    /// No-op for the current environment.
    pub fn set_environment(&mut self, environment: Environment) -> Result<&mut Self> {
        if environment == self.environment {
            return Ok(self);
        }

        let auth = build_auth(&self.config, &self.http, environment)?;
        let (trading, commerce) = build_dispatchers(&self.config, &self.http, &auth, environment, self.site)?;

        info!("Environment switched: {} -> {}", self.environment, environment);
        self.auth = auth;
        self.trading = trading;
        self.commerce = commerce;
        self.environment = environment;
        Ok(self)
    }

    /// Set the access token on both dispatchers
    pub async fn set_access_token(&self, token: &str, expires_at: DateTime<Utc>) {
        self.trading.set_access_token(token, expires_at).await;
        self.commerce.set_access_token(token, expires_at).await;
    }

    /// Set the refresh token on both dispatchers
    pub async fn set_refresh_token(&self, token: &str, expires_at: Option<DateTime<Utc>>) {
        self.trading.set_refresh_token(token, expires_at).await;
        self.commerce.set_refresh_token(token, expires_at).await;
    }

    /// Consent URL; scopes default to the configured list, locale to the site's
    pub fn consent_url(&self, scopes: Option<&[String]>, state: Option<&str>, locale: Option<&str>) -> String {
        let scopes = scopes.unwrap_or(self.config.scopes.as_slice());
        self.auth.consent_url(scopes, state, locale.unwrap_or(self.site.locale()))
    }

    /// Exchange an authorization code and hand the token pair to both dispatchers
    pub async fn exchange_code_for_token(&self, code: &str) -> Result<Token> {
        let token = self.auth.exchange_code(code).await?;
        self.trading.tokens().apply(&token).await;
        self.commerce.tokens().apply(&token).await;
        Ok(token)
    }

    /// Profile URL of `username` on `site`
    pub fn user_url(site: Site, username: &str) -> String {
        site.user_url(username)
    }
}

fn build_auth(config: &EbayConfig, http: &Client, environment: Environment) -> Result<Arc<Auth>> {
    let credentials = config.credentials_for(environment)?.clone();
    let auth = Auth::with_http_client(environment, credentials, http.clone())
        .with_endpoints(config.endpoints_for(environment))
        .with_default_scopes(config.scopes.clone());
    Ok(Arc::new(auth))
}

fn build_dispatchers(
    config: &EbayConfig,
    http: &Client,
    auth: &Arc<Auth>,
    environment: Environment,
    site: Site,
) -> Result<(TradingClient, CommerceClient)> {
    let credentials = config.credentials_for(environment)?.clone();
    let endpoints = config.endpoints_for(environment);

    let trading = TradingClient::new(
        http.clone(),
        &endpoints.trading,
        credentials,
        site,
        Arc::new(TokenManager::new(auth.clone())),
    )
    .with_compatibility_level(config.compatibility_level)
    .with_logging(config.logging.clone());

    let commerce = CommerceClient::new(
        http.clone(),
        &endpoints.api_base,
        site,
        Arc::new(TokenManager::new(auth.clone())),
    )
    .with_logging(config.logging.clone());

    Ok((trading, commerce))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Credentials, Endpoints};
    use chrono::Duration;

    fn sandbox_config() -> EbayConfig {
        EbayConfig::default()
            .with_credentials(Environment::Sandbox, Credentials::new("sb-app", "sb-cert", "sb-dev", "sb-ru"))
    }

    fn full_config() -> EbayConfig {
        sandbox_config()
            .with_credentials(Environment::Production, Credentials::new("pr-app", "pr-cert", "pr-dev", "pr-ru"))
    }

    #[test]
    fn test_new_requires_credentials() {
        let err = Ebay::new(EbayConfig::default()).err().unwrap();
        assert!(matches!(err, EbayError::Configuration(_)));
        assert!(err.to_string().contains("ebay.sandbox.app_id"));
    }

    #[test]
    fn test_defaults_from_config() {
        let config = EbayConfig { default_site: Site::Germany, ..sandbox_config() };
        let ebay = Ebay::new(config).unwrap();

        assert_eq!(ebay.site(), Site::Germany);
        assert_eq!(ebay.environment(), Environment::Sandbox);
        assert_eq!(ebay.trading().site(), Site::Germany);
        assert_eq!(ebay.commerce().site(), Site::Germany);
        assert_eq!(ebay.trading().compatibility_level(), 1257);
    }

    #[test]
    fn test_consent_url_defaults() {
        let ebay = Ebay::new(EbayConfig { default_site: Site::France, ..sandbox_config() }).unwrap();
        let url = ebay.consent_url(None, Some("xyz"), None);

        assert!(url.starts_with("https://auth.sandbox.ebay.com/oauth2/authorize?"));
        assert!(url.contains("client_id=sb-app"));
        assert!(url.contains("locale=fr-FR"));
        assert!(url.contains("sell.inventory"));
        assert!(url.contains("state=xyz"));

        let scopes = vec!["only_this".to_string()];
        let url = ebay.consent_url(Some(&scopes), None, Some("en-GB"));
        assert!(url.contains("scope=only_this&"));
        assert!(url.contains("locale=en-GB"));
        assert!(!url.contains("state="));
    }

    #[tokio::test]
    async fn test_set_site_carries_tokens() {
        let mut ebay = Ebay::new(sandbox_config()).unwrap();
        let expires_at = Utc::now() + Duration::hours(2);
        ebay.set_access_token("user-token", expires_at).await;
        ebay.set_refresh_token("refresh-token", None).await;

        ebay.set_site(Site::Uk).await.unwrap();

        assert_eq!(ebay.site(), Site::Uk);
        assert_eq!(ebay.commerce().site(), Site::Uk);
        for tokens in [ebay.trading().tokens(), ebay.commerce().tokens()] {
            let snapshot = tokens.snapshot().await;
            assert_eq!(snapshot.access_token.as_deref(), Some("user-token"));
            assert_eq!(snapshot.access_token_expires_at, Some(expires_at));
            assert_eq!(snapshot.refresh_token.as_deref(), Some("refresh-token"));
        }
    }

    #[tokio::test]
    async fn test_same_site_is_noop() {
        let mut ebay = Ebay::new(sandbox_config()).unwrap();
        ebay.set_access_token("user-token", Utc::now() + Duration::hours(2)).await;
        let before = Arc::as_ptr(ebay.commerce().tokens());

        ebay.set_site(Site::Us).await.unwrap();

        assert_eq!(Arc::as_ptr(ebay.commerce().tokens()), before);
        assert_eq!(ebay.commerce().tokens().access_token().await.unwrap().as_deref(), Some("user-token"));
    }

    #[tokio::test]
    async fn test_set_environment_rebuilds_and_clears_tokens() {
        let mut ebay = Ebay::new(full_config()).unwrap();
        ebay.set_access_token("sandbox-token", Utc::now() + Duration::hours(2)).await;

        ebay.set_environment(Environment::Production).unwrap();

        assert_eq!(ebay.environment(), Environment::Production);
        assert_eq!(ebay.auth().environment(), Environment::Production);
        assert_eq!(ebay.auth().app_id(), "pr-app");
        assert!(ebay.trading().tokens().snapshot().await.access_token.is_none());
        assert!(ebay.consent_url(None, None, None).starts_with("https://auth.ebay.com/"));
    }

    #[tokio::test]
    async fn test_same_environment_is_noop() {
        let mut ebay = Ebay::new(sandbox_config()).unwrap();
        ebay.set_access_token("user-token", Utc::now() + Duration::hours(2)).await;

        ebay.set_environment(Environment::Sandbox).unwrap();

        let snapshot = ebay.trading().tokens().snapshot().await;
        assert_eq!(snapshot.access_token.as_deref(), Some("user-token"));
    }

    #[test]
    fn test_set_environment_without_credentials_keeps_state() {
        let mut ebay = Ebay::new(sandbox_config()).unwrap();
        let err = ebay.set_environment(Environment::Production).err().unwrap();

        assert_eq!(
            err.to_string(),
            "configuration error: Missing required configuration: ebay.production.app_id"
        );
        assert_eq!(ebay.environment(), Environment::Sandbox);
    }

    #[test]
    fn test_endpoint_override_applies() {
        let config = sandbox_config().with_endpoints(Endpoints::rooted_at("http://localhost:9000"));
        let ebay = Ebay::new(config).unwrap();
        assert!(ebay.consent_url(None, None, None).starts_with("http://localhost:9000/oauth2/authorize?"));
    }

    #[test]
    fn test_user_url() {
        assert_eq!(Ebay::user_url(Site::Uk, "seller_1"), "https://ebay.co.uk/usr/seller_1");
    }
}
