//! REST dispatcher for the Commerce and Sell APIs
//!
//! Base URL: https://api.ebay.com (sandbox: https://api.sandbox.ebay.com)
//!
//! # Endpoints
//! - GET /commerce/taxonomy/v1/category_tree/{id}/get_item_aspects_for_category (no auth)
//! - POST /commerce/translation/v1_beta/translate
//! - GET/PUT /sell/inventory/v1/inventory_item/{sku}
//! - GET /sell/fulfillment/v1/order[/{orderId}]
//!
//! # Source
//! - Request components: https://developer.ebay.com/api-docs/static/rest-request-components.html
//! - Error payloads: https://developer.ebay.com/api-docs/static/handling-error-messages.html

pub mod client;
pub mod errors;

pub use client::CommerceClient;
pub use errors::RestErrorBody;
