//! Dispatcher for the legacy XML Trading API
//!
//! Every call is a POST to `/ws/api.dll` carrying a `<CallName>Request` envelope.
//! The call name travels in the `X-EBAY-API-CALL-NAME` header.
//!
//! # Source
//! - Making a call: https://developer.ebay.com/devzone/xml/docs/Concepts/MakingACall.html
//! - Call reference: https://developer.ebay.com/devzone/xml/docs/Reference/ebay/index.html
//! - Ack values: https://developer.ebay.com/devzone/xml/docs/Reference/eBay/types/AckCodeType.html

pub mod client;
pub mod errors;
pub mod xml;

pub use client::TradingClient;
pub use errors::AckErrors;
pub use xml::XmlElement;
