//! Trading API client

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use super::errors::AckErrors;
use super::xml::{build_document, ATTRIBUTES_KEY};
use super::XmlElement;
use crate::auth::TokenManager;
use crate::config::{Credentials, LoggingConfig};
use crate::error::{EbayError, ErrorEnvelope, Result};
use crate::types::Site;
use crate::{DEFAULT_COMPATIBILITY_LEVEL, TRADING_NAMESPACE};

/// XML dispatcher for Trading calls
#[derive(Clone)]
pub struct TradingClient {
    http: Client,
    endpoint: String,
    credentials: Credentials,
    site: Site,
    compatibility_level: u32,
    tokens: Arc<TokenManager>,
    logging: LoggingConfig,
}

impl TradingClient {
    pub fn new(http: Client, endpoint: &str, credentials: Credentials, site: Site, tokens: Arc<TokenManager>) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
            credentials,
            site,
            compatibility_level: DEFAULT_COMPATIBILITY_LEVEL,
            tokens,
            logging: LoggingConfig::default(),
        }
    }

    pub fn with_compatibility_level(mut self, level: u32) -> Self {
        self.compatibility_level = level;
        self
    }

    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    pub fn set_compatibility_level(&mut self, level: u32) -> &mut Self {
        self.compatibility_level = level;
        self
    }

    pub fn compatibility_level(&self) -> u32 {
        self.compatibility_level
    }

    pub fn site(&self) -> Site {
        self.site
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    pub async fn set_access_token(&self, token: impl Into<String>, expires_at: DateTime<Utc>) {
        self.tokens.set_access_token(token, expires_at).await;
    }

    pub async fn set_refresh_token(&self, token: impl Into<String>, expires_at: Option<DateTime<Utc>>) {
        self.tokens.set_refresh_token(token, expires_at).await;
    }

    /// Call a Trading method and return the parsed response document.
    ///
    /// `data` is a JSON object merged into the envelope after the standard
    /// fields (`null` means no fields). A token, when available, is always sent
    /// in `X-EBAY-API-IAF-TOKEN`; the `RequesterCredentials` block is only
    /// embedded when `requires_auth` is set.
    ///
    /// Responses without an `Ack` element are returned unchanged.
    pub async fn call(
        &self,
        method: &str,
        data: &Value,
        requires_auth: bool,
        version: Option<u32>,
    ) -> Result<XmlElement> {
        let token = self.tokens.access_token().await?;
        if requires_auth && token.is_none() {
            return Err(EbayError::MissingToken);
        }

        let body = self.build_request_body(method, data, token.as_deref().filter(|_| requires_auth), version)?;

        if self.logging.enabled {
            info!(channel = %self.logging.channel, method, site = self.site.code(), "Trading API request");
        }
        debug!("POST {} ({})", self.endpoint, method);

        let mut request = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "text/xml")
            .header("X-EBAY-API-SITEID", self.site.id().to_string())
            .header("X-EBAY-API-COMPATIBILITY-LEVEL", self.compatibility_level.to_string())
            .header("X-EBAY-API-CALL-NAME", method)
            .header("X-EBAY-API-APP-NAME", &self.credentials.app_id)
            .header("X-EBAY-API-DEV-NAME", &self.credentials.dev_id)
            .header("X-EBAY-API-CERT-NAME", &self.credentials.cert_id);

        if let Some(token) = &token {
            request = request.header("X-EBAY-API-IAF-TOKEN", token);
        }

        let response = request.body(body).send().await?;
        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            debug!("HTTP {} for {}", status, method);
            return Err(EbayError::RequestFailed {
                message: format!("Trading API request failed: {}", method),
                raw_body: Some(raw),
            });
        }

        let document = XmlElement::parse(&raw)?;

        match document.child_text("Ack") {
            Some("Failure") | Some("PartialFailure") => Err(AckErrors(&document).into_api_error(Some(raw))),
            _ => Ok(document),
        }
    }

    fn build_request_body(
        &self,
        method: &str,
        data: &Value,
        auth_token: Option<&str>,
        version: Option<u32>,
    ) -> Result<String> {
        let mut fields = Map::new();
        fields.insert(ATTRIBUTES_KEY.to_string(), json!({ "xmlns": TRADING_NAMESPACE }));
        fields.insert("Version".to_string(), json!(version.unwrap_or(self.compatibility_level)));
        fields.insert("WarningLevel".to_string(), json!("High"));
        fields.insert("ErrorLanguage".to_string(), json!(self.site.language()));

        if let Some(token) = auth_token {
            fields.insert("RequesterCredentials".to_string(), json!({ "eBayAuthToken": token }));
        }

        match data {
            Value::Null => {}
            Value::Object(extra) => {
                for (key, value) in extra {
                    fields.insert(key.clone(), value.clone());
                }
            }
            _ => {
                return Err(EbayError::Configuration(format!(
                    "Trading call data for {} must be a JSON object",
                    method
                )))
            }
        }

        build_document(&format!("{}Request", method), &fields)
    }

    /// Endpoint: GetOrders (auth)
    /// Source: https://developer.ebay.com/Devzone/XML/docs/Reference/eBay/GetOrders.html
    pub async fn get_orders(&self, params: &Value) -> Result<XmlElement> {
        self.call("GetOrders", params, true, None).await
    }

    /// Endpoint: GetCategories
    pub async fn get_categories(&self, params: &Value) -> Result<XmlElement> {
        self.call("GetCategories", params, false, None).await
    }

    /// Endpoint: GetCategoryFeatures with `DetailLevel=ReturnAll`
    pub async fn get_category_features(&self, category_id: &str) -> Result<XmlElement> {
        let data = json!({ "CategoryID": category_id, "DetailLevel": "ReturnAll" });
        self.call("GetCategoryFeatures", &data, false, None).await
    }

    /// Endpoint: GetItem
    pub async fn get_item(&self, item_id: &str) -> Result<XmlElement> {
        self.call("GetItem", &json!({ "ItemID": item_id }), false, None).await
    }

    /// Endpoint: AddFixedPriceItem (auth). `item` is wrapped in an `Item` element.
    /// Source: https://developer.ebay.com/devzone/xml/docs/reference/ebay/AddFixedPriceItem.html
    pub async fn add_fixed_price_item(&self, item: &Value) -> Result<XmlElement> {
        self.call("AddFixedPriceItem", &json!({ "Item": item }), true, None).await
    }

    /// Endpoint: GetMyeBaySelling (auth)
    pub async fn get_my_ebay_selling(&self, params: &Value) -> Result<XmlElement> {
        self.call("GetMyeBaySelling", params, true, None).await
    }
}
