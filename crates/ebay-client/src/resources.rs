//! Typed views over common responses
//!
//! Each mapper keeps the full payload in `raw` for fields not lifted here.
//!
//! # Source
//! - ItemType: https://developer.ebay.com/devzone/xml/docs/Reference/eBay/types/ItemType.html
//! - OrderType: https://developer.ebay.com/devzone/xml/docs/Reference/eBay/types/OrderType.html
//! - REST Order: https://developer.ebay.com/api-docs/sell/fulfillment/types/sel:Order

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::trading::XmlElement;
use crate::types::{ListingStatus, ListingType, OrderStatus, PaymentStatus};

/// Currency assumed when an order total carries none
const DEFAULT_CURRENCY: &str = "USD";

/// A listing, from a Trading `Item` element
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Item {
    pub item_id: String,
    pub title: String,
    pub listing_status: Option<ListingStatus>,
    pub listing_type: Option<ListingType>,
    pub current_price: Option<f64>,
    pub currency_code: Option<String>,
    pub quantity: Option<i64>,
    pub quantity_sold: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub view_item_url: Option<String>,
    #[serde(skip)]
    pub raw: Value,
}

impl Item {
    pub fn from_xml(item: &XmlElement) -> Self {
        let price = item.path("SellingStatus/CurrentPrice");

        Self {
            item_id: item.child_text("ItemID").unwrap_or_default().to_string(),
            title: item.child_text("Title").unwrap_or_default().to_string(),
            listing_status: item.path_text("SellingStatus/ListingStatus").and_then(ListingStatus::from_code),
            listing_type: item.child_text("ListingType").and_then(ListingType::from_code),
            current_price: price.and_then(|p| parse_number(&p.text)),
            currency_code: price.and_then(|p| p.attr("currencyID")).map(str::to_string),
            quantity: item.child_text("Quantity").and_then(parse_int),
            quantity_sold: item.path_text("SellingStatus/QuantitySold").and_then(parse_int),
            start_time: item.path_text("ListingDetails/StartTime").and_then(parse_time),
            end_time: item.path_text("ListingDetails/EndTime").and_then(parse_time),
            view_item_url: item.path_text("ListingDetails/ViewItemURL").map(str::to_string),
            raw: item.to_json(),
        }
    }
}

/// One purchased line of an order
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub item_id: String,
    pub title: String,
    pub quantity: i64,
    pub transaction_price: f64,
}

impl Transaction {
    fn from_xml(transaction: &XmlElement) -> Self {
        Self {
            transaction_id: transaction.child_text("TransactionID").unwrap_or_default().to_string(),
            item_id: transaction.path_text("Item/ItemID").unwrap_or_default().to_string(),
            title: transaction.path_text("Item/Title").unwrap_or_default().to_string(),
            quantity: transaction.child_text("QuantityPurchased").and_then(parse_int).unwrap_or(0),
            transaction_price: transaction
                .child_text("TransactionPrice")
                .and_then(parse_number)
                .unwrap_or(0.0),
        }
    }

    /// From a REST `lineItems` entry
    fn from_line_item(line: &Value) -> Self {
        Self {
            transaction_id: string_at(line, "/lineItemId").unwrap_or_default(),
            item_id: string_at(line, "/legacyItemId").unwrap_or_default(),
            title: string_at(line, "/title").unwrap_or_default(),
            quantity: line.get("quantity").and_then(json_int).unwrap_or(0),
            transaction_price: line.pointer("/lineItemCost/value").and_then(json_number).unwrap_or(0.0),
        }
    }
}

/// An order, from either a Trading `Order` element or a REST fulfillment order
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Order {
    pub order_id: String,
    pub order_status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub total: f64,
    pub currency_code: String,
    pub buyer_user_id: Option<String>,
    pub created_time: Option<DateTime<Utc>>,
    pub transactions: Vec<Transaction>,
    #[serde(skip)]
    pub raw: Value,
}

impl Order {
    pub fn from_xml(order: &XmlElement) -> Self {
        let total = order.child("Total");

        let transactions = order
            .child("TransactionArray")
            .map(|array| array.children_named("Transaction").map(Transaction::from_xml).collect())
            .unwrap_or_default();

        Self {
            order_id: order.child_text("OrderID").unwrap_or_default().to_string(),
            order_status: order.child_text("OrderStatus").and_then(OrderStatus::from_code),
            payment_status: order.path_text("CheckoutStatus/Status").and_then(PaymentStatus::from_code),
            total: total.and_then(|t| parse_number(&t.text)).unwrap_or(0.0),
            currency_code: total
                .and_then(|t| t.attr("currencyID"))
                .unwrap_or(DEFAULT_CURRENCY)
                .to_string(),
            buyer_user_id: order.child_text("BuyerUserID").map(str::to_string),
            created_time: order.child_text("CreatedTime").and_then(parse_time),
            transactions,
            raw: order.to_json(),
        }
    }

    /// From a REST fulfillment order, accepting the flat legacy spellings too
    pub fn from_json(data: &Value) -> Self {
        let first = |pointers: &[&str]| pointers.iter().find_map(|p| string_at(data, p));

        let transactions = ["/lineItems", "/transactions"]
            .iter()
            .find_map(|p| data.pointer(p).and_then(Value::as_array))
            .map(|lines| lines.iter().map(Transaction::from_line_item).collect())
            .unwrap_or_default();

        Self {
            order_id: first(&["/orderId", "/order_id"]).unwrap_or_default(),
            order_status: first(&["/orderStatus", "/orderFulfillmentStatus"])
                .and_then(|s| OrderStatus::from_code(&s)),
            payment_status: first(&["/paymentStatus", "/orderPaymentStatus"])
                .and_then(|s| PaymentStatus::from_code(&s)),
            total: ["/total", "/pricingSummary/total/value"]
                .iter()
                .find_map(|p| data.pointer(p).and_then(json_number))
                .unwrap_or(0.0),
            currency_code: first(&["/currencyCode", "/pricingSummary/total/currency"])
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            buyer_user_id: first(&["/buyerUserId", "/buyer/username"]),
            created_time: first(&["/createdTime", "/creationDate"]).and_then(|s| parse_time(&s)),
            transactions,
            raw: data.clone(),
        }
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}

fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

fn parse_time(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim()).ok().map(|t| t.with_timezone(&Utc))
}

fn string_at(value: &Value, pointer: &str) -> Option<String> {
    value.pointer(pointer).and_then(Value::as_str).map(str::to_string)
}

/// REST amounts arrive as strings ("12.50"), counts as numbers
fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

fn json_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => parse_int(s),
        _ => None,
    }
}
