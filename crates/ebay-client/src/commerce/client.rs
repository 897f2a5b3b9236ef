//! Commerce/Sell REST client

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_CHARSET, ACCEPT_LANGUAGE};
use reqwest::{Client, Method};
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use super::errors::RestErrorBody;
use crate::auth::TokenManager;
use crate::config::LoggingConfig;
use crate::error::{EbayError, ErrorEnvelope, Result};
use crate::types::Site;

/// Translation context used when the caller gives none
pub const DEFAULT_TRANSLATION_CONTEXT: &str = "ITEM_TITLE";

/// JSON dispatcher with bearer-token attachment and marketplace headers
#[derive(Clone)]
pub struct CommerceClient {
    http: Client,
    api_base: String,
    site: Site,
    tokens: Arc<TokenManager>,
    logging: LoggingConfig,
}

impl CommerceClient {
    pub fn new(http: Client, api_base: &str, site: Site, tokens: Arc<TokenManager>) -> Self {
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            site,
            tokens,
            logging: LoggingConfig::default(),
        }
    }

    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
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

    /// Perform one REST call and return the decoded JSON body.
    ///
    /// `method` is case-insensitive (GET, POST, PUT, PATCH, DELETE). For GET the
    /// `data` object becomes the query string; otherwise it is sent as JSON.
    /// An empty success body decodes to `{}`. Extra `headers` replace the site
    /// defaults of the same name.
    pub async fn request(
        &self,
        method: &str,
        endpoint: &str,
        data: Option<&Value>,
        headers: &[(&str, &str)],
        requires_auth: bool,
    ) -> Result<Value> {
        let method = parse_method(method)?;
        let url = format!("{}{}", self.api_base, endpoint);

        if self.logging.enabled {
            info!(channel = %self.logging.channel, %method, endpoint, "Commerce API request");
        }
        debug!("{} {}", method, url);

        let mut builder = self.http.request(method.clone(), &url).headers(self.merged_headers(headers)?);

        if requires_auth {
            let token = self.tokens.access_token().await?.ok_or(EbayError::MissingToken)?;
            builder = builder.bearer_auth(token);
        }

        if let Some(data) = data {
            builder = if method == Method::GET {
                builder.query(&query_pairs(data))
            } else {
                builder.json(data)
            };
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!("HTTP {} for {}", status, url);
            let error: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            return Err(RestErrorBody(&error).into_api_error(Some(body)));
        }

        if body.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        serde_json::from_str(&body).map_err(|e| EbayError::RequestFailed {
            message: format!("Failed to parse JSON response: {}", e),
            raw_body: Some(body.clone()),
        })
    }

    /// Site defaults, with any caller header of the same name replacing the default
    fn merged_headers(&self, extra: &[(&str, &str)]) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        map.insert(ACCEPT, HeaderValue::from_static("application/json"));
        map.insert(ACCEPT_CHARSET, HeaderValue::from_static("utf-8"));
        map.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(self.site.locale()));
        map.insert(HeaderName::from_static("x-ebay-c-marketplace-id"), HeaderValue::from_static(self.site.marketplace()));

        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| EbayError::Configuration(format!("Invalid header name {:?}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| EbayError::Configuration(format!("Invalid value for header {}: {}", name, e)))?;
            map.insert(name, value);
        }
        Ok(map)
    }

    /// Required and recommended aspects for a leaf category
    ///
    /// Endpoint: GET /commerce/taxonomy/v1/category_tree/{tree_id}/get_item_aspects_for_category
    pub async fn get_item_aspects_for_category(&self, category_tree_id: &str, category_id: &str) -> Result<Value> {
        let endpoint = format!(
            "/commerce/taxonomy/v1/category_tree/{}/get_item_aspects_for_category",
            urlencoding::encode(category_tree_id)
        );
        let query = json!({ "category_id": category_id });
        self.request("GET", &endpoint, Some(&query), &[], false).await
    }

    /// Translate a single text. Returns `None` when the response has no translation.
    ///
    /// Endpoint: POST /commerce/translation/v1_beta/translate
    pub async fn translate(
        &self,
        text: &str,
        from_language: &str,
        to_language: &str,
        context: Option<&str>,
    ) -> Result<Option<String>> {
        let payload = json!({
            "from": from_language,
            "to": to_language,
            "text": [text],
            "translationContext": context.unwrap_or(DEFAULT_TRANSLATION_CONTEXT),
        });

        let response = self
            .request("POST", "/commerce/translation/v1_beta/translate", Some(&payload), &[], true)
            .await?;

        Ok(response
            .pointer("/translations/0/translatedText")
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    /// Endpoint: GET /sell/inventory/v1/inventory_item/{sku}
    pub async fn get_inventory_item(&self, sku: &str) -> Result<Value> {
        let endpoint = format!("/sell/inventory/v1/inventory_item/{}", urlencoding::encode(sku));
        self.request("GET", &endpoint, None, &[], true).await
    }

    /// Endpoint: PUT /sell/inventory/v1/inventory_item/{sku}
    pub async fn create_or_replace_inventory_item(&self, sku: &str, item: &Value) -> Result<Value> {
        let endpoint = format!("/sell/inventory/v1/inventory_item/{}", urlencoding::encode(sku));
        self.request("PUT", &endpoint, Some(item), &[], true).await
    }

    /// Endpoint: GET /sell/fulfillment/v1/order/{order_id}
    pub async fn get_fulfillment_order(&self, order_id: &str) -> Result<Value> {
        let endpoint = format!("/sell/fulfillment/v1/order/{}", urlencoding::encode(order_id));
        self.request("GET", &endpoint, None, &[], true).await
    }

    /// Endpoint: GET /sell/fulfillment/v1/order
    pub async fn get_fulfillment_orders(&self, params: Option<&Value>) -> Result<Value> {
        self.request("GET", "/sell/fulfillment/v1/order", params, &[], true).await
    }
}

fn parse_method(method: &str) -> Result<Method> {
    match method.to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "PATCH" => Ok(Method::PATCH),
        "DELETE" => Ok(Method::DELETE),
        _ => Err(EbayError::InvalidMethod(method.to_string())),
    }
}

/// Flatten a JSON object into query pairs. Arrays are comma-joined, nulls skipped.
fn query_pairs(data: &Value) -> Vec<(String, String)> {
    let Some(object) = data.as_object() else {
        return Vec::new();
    };

    object
        .iter()
        .filter_map(|(key, value)| {
            let rendered = match value {
                Value::Null => return None,
                Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(","),
                other => scalar_text(other),
            };
            Some((key.clone(), rendered))
        })
        .collect()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
