//! eBay code tables
//!
//! # Design Principles
//! 1. Every table is a closed enum; lookups never allocate
//! 2. Parsing from upstream strings returns `Option` - unknown codes are not errors
//! 3. Serialized names match the upstream code values exactly
//!
//! # Sources
//! - SiteCodeType: https://developer.ebay.com/devzone/XML/docs/Reference/eBay/types/SiteCodeType.html
//! - Marketplace IDs: https://developer.ebay.com/api-docs/static/rest-request-components.html#marketpl
//! - CurrencyCodeType: https://developer.ebay.com/devzone/xml/docs/reference/ebay/types/CurrencyCodeType.html
//! - ConditionCodeType: https://developer.ebay.com/devzone/xml/docs/reference/ebay/types/ConditionCodeType.html

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Sites / Marketplaces
// ============================================================================

/// eBay site (marketplace)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Site {
    #[default]
    Us,
    Canada,
    Uk,
    Australia,
    Austria,
    BelgiumFrench,
    France,
    Germany,
    Italy,
    BelgiumDutch,
    Netherlands,
    Spain,
    Switzerland,
    HongKong,
    India,
    Ireland,
    Malaysia,
    CanadaFrench,
    Philippines,
    Poland,
    Singapore,
}

/// Static description of one marketplace
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarketplaceDescriptor {
    /// Legacy numeric site ID (`X-EBAY-API-SITEID`)
    pub site_id: u32,
    /// Short lowercase code used in configuration (`us`, `uk`, ...)
    pub code: &'static str,
    pub title: &'static str,
    pub url: &'static str,
    /// BCP-47 locale (`Accept-Language`)
    pub locale: &'static str,
    /// Underscore language tag (Trading `ErrorLanguage`)
    pub language: &'static str,
    pub currency: Currency,
    /// REST marketplace ID (`X-EBAY-C-MARKETPLACE-ID`)
    pub marketplace_id: &'static str,
}

#[allow(clippy::too_many_arguments)]
const fn site(
    site_id: u32,
    code: &'static str,
    title: &'static str,
    url: &'static str,
    locale: &'static str,
    language: &'static str,
    currency: Currency,
    marketplace_id: &'static str,
) -> MarketplaceDescriptor {
    MarketplaceDescriptor { site_id, code, title, url, locale, language, currency, marketplace_id }
}

// Indexed by `Site as usize`; order must follow the enum declaration.
static SITE_TABLE: [MarketplaceDescriptor; 21] = [
    site(0, "us", "United States", "https://ebay.com", "en-US", "en_US", Currency::Usd, "EBAY_US"),
    site(2, "ca", "Canada", "https://ebay.ca", "en-CA", "en_CA", Currency::Cad, "EBAY_CA"),
    site(3, "uk", "Great Britain", "https://ebay.co.uk", "en-GB", "en_GB", Currency::Gbp, "EBAY_GB"),
    site(15, "au", "Australia", "https://ebay.com.au", "en-AU", "en_AU", Currency::Aud, "EBAY_AU"),
    site(16, "at", "Austria", "https://ebay.at", "de-AT", "de_AT", Currency::Eur, "EBAY_AT"),
    site(23, "befr", "Belgium (Française)", "https://befr.ebay.be", "fr-BE", "fr_BE", Currency::Eur, "EBAY_BE"),
    site(71, "fr", "France", "https://ebay.fr", "fr-FR", "fr_FR", Currency::Eur, "EBAY_FR"),
    site(77, "de", "Germany", "https://ebay.de", "de-DE", "de_DE", Currency::Eur, "EBAY_DE"),
    site(101, "it", "Italy", "https://ebay.it", "it-IT", "it_IT", Currency::Eur, "EBAY_IT"),
    site(123, "benl", "Belgium (Nederlandse)", "https://benl.ebay.be", "nl-BE", "nl_BE", Currency::Eur, "EBAY_BE"),
    site(146, "nl", "Netherlands", "https://ebay.nl", "nl-NL", "nl_NL", Currency::Eur, "EBAY_NL"),
    site(186, "es", "Spain", "https://ebay.es", "es-ES", "es_ES", Currency::Eur, "EBAY_ES"),
    site(193, "ch", "Switzerland", "https://ebay.ch", "de-CH", "de_CH", Currency::Chf, "EBAY_CH"),
    site(201, "hk", "Hong Kong", "https://ebay.com.hk", "zh-HK", "zh_HK", Currency::Hkd, "EBAY_HK"),
    site(203, "in", "India", "https://ebay.in", "en-IN", "en_IN", Currency::Inr, "EBAY_IN"),
    site(205, "ie", "Ireland", "https://ebay.ie", "en-IE", "en_IE", Currency::Eur, "EBAY_IE"),
    site(207, "my", "Malaysia", "https://ebay.com.my", "en-US", "en_US", Currency::Myr, "EBAY_MY"),
    site(210, "cafr", "Canada (Française)", "https://cafr.ebay.ca", "fr-CA", "fr_CA", Currency::Cad, "EBAY_CA"),
    site(211, "ph", "Philippines", "https://ebay.ph", "en-PH", "en_PH", Currency::Php, "EBAY_PH"),
    site(212, "pl", "Poland", "https://ebay.pl", "pl-PL", "pl_PL", Currency::Pln, "EBAY_PL"),
    site(216, "sg", "Singapore", "https://ebay.com.sg", "en-US", "en_US", Currency::Sgd, "EBAY_SG"),
];

impl Site {
    /// Every supported site, in table order
    pub const ALL: [Site; 21] = [
        Site::Us,
        Site::Canada,
        Site::Uk,
        Site::Australia,
        Site::Austria,
        Site::BelgiumFrench,
        Site::France,
        Site::Germany,
        Site::Italy,
        Site::BelgiumDutch,
        Site::Netherlands,
        Site::Spain,
        Site::Switzerland,
        Site::HongKong,
        Site::India,
        Site::Ireland,
        Site::Malaysia,
        Site::CanadaFrench,
        Site::Philippines,
        Site::Poland,
        Site::Singapore,
    ];

    pub fn descriptor(self) -> &'static MarketplaceDescriptor {
        &SITE_TABLE[self as usize]
    }

    pub fn id(self) -> u32 {
        self.descriptor().site_id
    }

    pub fn code(self) -> &'static str {
        self.descriptor().code
    }

    pub fn title(self) -> &'static str {
        self.descriptor().title
    }

    pub fn url(self) -> &'static str {
        self.descriptor().url
    }

    pub fn locale(self) -> &'static str {
        self.descriptor().locale
    }

    pub fn language(self) -> &'static str {
        self.descriptor().language
    }

    pub fn currency(self) -> Currency {
        self.descriptor().currency
    }

    pub fn marketplace(self) -> &'static str {
        self.descriptor().marketplace_id
    }

    /// Public profile URL of a user on this site
    pub fn user_url(self, username: &str) -> String {
        format!("{}/usr/{}", self.url().trim_end_matches('/'), username)
    }

    /// Look up by short code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.to_lowercase();
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Look up by REST marketplace ID (case-insensitive).
    /// Shared marketplace IDs resolve to the first site in table order.
    pub fn from_marketplace(marketplace: &str) -> Option<Self> {
        let marketplace = marketplace.to_uppercase();
        Self::ALL.into_iter().find(|s| s.marketplace() == marketplace)
    }

    /// Look up by legacy numeric site ID
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ============================================================================
// Currencies
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Cad,
    Gbp,
    Aud,
    Eur,
    Chf,
    Cny,
    Hkd,
    Php,
    Pln,
    Sek,
    Sgd,
    Twd,
    Myr,
    Inr,
}

impl Currency {
    pub const ALL: [Currency; 15] = [
        Currency::Usd,
        Currency::Cad,
        Currency::Gbp,
        Currency::Aud,
        Currency::Eur,
        Currency::Chf,
        Currency::Cny,
        Currency::Hkd,
        Currency::Php,
        Currency::Pln,
        Currency::Sek,
        Currency::Sgd,
        Currency::Twd,
        Currency::Myr,
        Currency::Inr,
    ];

    /// ISO 4217 code
    pub fn as_str(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Cad => "CAD",
            Currency::Gbp => "GBP",
            Currency::Aud => "AUD",
            Currency::Eur => "EUR",
            Currency::Chf => "CHF",
            Currency::Cny => "CNY",
            Currency::Hkd => "HKD",
            Currency::Php => "PHP",
            Currency::Pln => "PLN",
            Currency::Sek => "SEK",
            Currency::Sgd => "SGD",
            Currency::Twd => "TWD",
            Currency::Myr => "MYR",
            Currency::Inr => "INR",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Currency::Usd => "US Dollar",
            Currency::Cad => "Canadian Dollar",
            Currency::Gbp => "British Pound",
            Currency::Aud => "Australian Dollar",
            Currency::Eur => "Euro",
            Currency::Chf => "Swiss Franc",
            Currency::Cny => "Chinese Renminbi",
            Currency::Hkd => "Hong Kong Dollar",
            Currency::Php => "Philippines Peso",
            Currency::Pln => "Polish Zloty",
            Currency::Sek => "Sweden Krona",
            Currency::Sgd => "Singapore Dollar",
            Currency::Twd => "Taiwanese Dollar",
            Currency::Myr => "Malaysian Ringgit",
            Currency::Inr => "Indian Rupee",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd | Currency::Cad | Currency::Aud | Currency::Sgd | Currency::Hkd | Currency::Twd => "$",
            Currency::Gbp => "£",
            Currency::Eur => "€",
            Currency::Chf => "Fr",
            Currency::Cny => "¥",
            Currency::Php => "₱",
            Currency::Pln => "zł",
            Currency::Sek => "kr",
            Currency::Myr => "RM",
            Currency::Inr => "₹",
        }
    }

    /// Symbol as numeric HTML entities
    pub fn html_entity(self) -> &'static str {
        match self {
            Currency::Usd | Currency::Cad | Currency::Aud | Currency::Sgd => "&#36;",
            Currency::Gbp => "&#163;",
            Currency::Eur => "&#8364;",
            Currency::Chf => "&#8355;",
            Currency::Cny | Currency::Hkd => "&#20803;",
            Currency::Php => "&#8369;",
            Currency::Pln => "&#122;&#322;",
            Currency::Sek => "&#107;&#114;",
            Currency::Twd => "&#78;&#84;&#36;",
            Currency::Myr => "&#82;&#77;",
            Currency::Inr => "&#8377;",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.to_uppercase();
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Countries
// Source: https://developer.ebay.com/devzone/xml/docs/reference/ebay/types/CountryCodeType.html
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Country {
    Us,
    Ca,
    Gb,
    Au,
    At,
    Be,
    Fr,
    De,
    It,
    Nl,
    Es,
    Ch,
    Hk,
    In,
    Ie,
    My,
    Ph,
    Pl,
    Sg,
    Cn,
    Jp,
    Se,
}

impl Country {
    pub const ALL: [Country; 22] = [
        Country::Us,
        Country::Ca,
        Country::Gb,
        Country::Au,
        Country::At,
        Country::Be,
        Country::Fr,
        Country::De,
        Country::It,
        Country::Nl,
        Country::Es,
        Country::Ch,
        Country::Hk,
        Country::In,
        Country::Ie,
        Country::My,
        Country::Ph,
        Country::Pl,
        Country::Sg,
        Country::Cn,
        Country::Jp,
        Country::Se,
    ];

    /// ISO 3166 alpha-2 code
    pub fn as_str(self) -> &'static str {
        match self {
            Country::Us => "US",
            Country::Ca => "CA",
            Country::Gb => "GB",
            Country::Au => "AU",
            Country::At => "AT",
            Country::Be => "BE",
            Country::Fr => "FR",
            Country::De => "DE",
            Country::It => "IT",
            Country::Nl => "NL",
            Country::Es => "ES",
            Country::Ch => "CH",
            Country::Hk => "HK",
            Country::In => "IN",
            Country::Ie => "IE",
            Country::My => "MY",
            Country::Ph => "PH",
            Country::Pl => "PL",
            Country::Sg => "SG",
            Country::Cn => "CN",
            Country::Jp => "JP",
            Country::Se => "SE",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Country::Us => "United States",
            Country::Ca => "Canada",
            Country::Gb => "United Kingdom",
            Country::Au => "Australia",
            Country::At => "Austria",
            Country::Be => "Belgium",
            Country::Fr => "France",
            Country::De => "Germany",
            Country::It => "Italy",
            Country::Nl => "Netherlands",
            Country::Es => "Spain",
            Country::Ch => "Switzerland",
            Country::Hk => "Hong Kong",
            Country::In => "India",
            Country::Ie => "Ireland",
            Country::My => "Malaysia",
            Country::Ph => "Philippines",
            Country::Pl => "Poland",
            Country::Sg => "Singapore",
            Country::Cn => "China",
            Country::Jp => "Japan",
            Country::Se => "Sweden",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.to_uppercase();
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }
}

// ============================================================================
// Item Condition
// ============================================================================

/// Item condition, keyed by numeric condition ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    New,
    NewWithTags,
    NewWithoutTags,
    NewWithDefects,
    ManufacturerRefurbished,
    SellerRefurbished,
    LikeNew,
    UsedExcellent,
    UsedVeryGood,
    UsedGood,
    UsedAcceptable,
    ForPartsNotWorking,
}

impl Condition {
    pub const ALL: [Condition; 12] = [
        Condition::New,
        Condition::NewWithTags,
        Condition::NewWithoutTags,
        Condition::NewWithDefects,
        Condition::ManufacturerRefurbished,
        Condition::SellerRefurbished,
        Condition::LikeNew,
        Condition::UsedExcellent,
        Condition::UsedVeryGood,
        Condition::UsedGood,
        Condition::UsedAcceptable,
        Condition::ForPartsNotWorking,
    ];

    /// Numeric `ConditionID`
    pub fn id(self) -> u32 {
        match self {
            Condition::New => 1000,
            Condition::NewWithTags => 1500,
            Condition::NewWithoutTags => 1750,
            Condition::NewWithDefects => 2000,
            Condition::ManufacturerRefurbished => 2010,
            Condition::SellerRefurbished => 2500,
            Condition::LikeNew => 2750,
            Condition::UsedExcellent => 3000,
            Condition::UsedVeryGood => 4000,
            Condition::UsedGood => 5000,
            Condition::UsedAcceptable => 6000,
            Condition::ForPartsNotWorking => 7000,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::NewWithTags => "New with tags",
            Condition::NewWithoutTags => "New without tags",
            Condition::NewWithDefects => "New with defects",
            Condition::ManufacturerRefurbished => "Manufacturer refurbished",
            Condition::SellerRefurbished => "Seller refurbished",
            Condition::LikeNew => "Like New",
            Condition::UsedExcellent => "Used - Excellent",
            Condition::UsedVeryGood => "Used - Very Good",
            Condition::UsedGood => "Used - Good",
            Condition::UsedAcceptable => "Used - Acceptable",
            Condition::ForPartsNotWorking => "For parts or not working",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Condition::New => "A brand-new, unused, unopened, undamaged item in its original packaging",
            Condition::NewWithTags => "A brand-new, unused item with tags attached",
            Condition::NewWithoutTags => "A brand-new, unused item without tags",
            Condition::NewWithDefects => "A new item with minor defects or cosmetic imperfections",
            Condition::ManufacturerRefurbished => "Professionally restored to working order by the manufacturer",
            Condition::SellerRefurbished => "Professionally restored to working order by the seller",
            Condition::LikeNew => "An item in excellent condition with no signs of wear",
            Condition::UsedExcellent => "An item that has been used but is in excellent condition",
            Condition::UsedVeryGood => "An item that has been used but is in very good condition",
            Condition::UsedGood => "An item that has been used and shows signs of wear",
            Condition::UsedAcceptable => "An item that has been heavily used but is still functional",
            Condition::ForPartsNotWorking => "An item that does not function as intended",
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

// ============================================================================
// Listing Type
// Source: https://developer.ebay.com/devzone/xml/docs/reference/ebay/types/ListingTypeCodeType.html
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingType {
    #[serde(rename = "Chinese")]
    Auction,
    #[serde(rename = "FixedPriceItem")]
    FixedPrice,
    StoresFixedPrice,
    PersonalOffer,
    AdType,
    LeadGeneration,
}

impl ListingType {
    pub const ALL: [ListingType; 6] = [
        ListingType::Auction,
        ListingType::FixedPrice,
        ListingType::StoresFixedPrice,
        ListingType::PersonalOffer,
        ListingType::AdType,
        ListingType::LeadGeneration,
    ];

    /// Upstream `ListingType` value
    pub fn as_str(self) -> &'static str {
        match self {
            ListingType::Auction => "Chinese",
            ListingType::FixedPrice => "FixedPriceItem",
            ListingType::StoresFixedPrice => "StoresFixedPrice",
            ListingType::PersonalOffer => "PersonalOffer",
            ListingType::AdType => "AdType",
            ListingType::LeadGeneration => "LeadGeneration",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ListingType::Auction => "Auction",
            ListingType::FixedPrice => "Fixed Price",
            ListingType::StoresFixedPrice => "Stores Fixed Price",
            ListingType::PersonalOffer => "Personal Offer",
            ListingType::AdType => "Advertisement",
            ListingType::LeadGeneration => "Lead Generation",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ListingType::Auction => "Competitive bidding format where the highest bidder wins",
            ListingType::FixedPrice => "Buy It Now format with a fixed price",
            ListingType::StoresFixedPrice => "Fixed price listing in an eBay Store",
            ListingType::PersonalOffer => "Personal offer to a specific buyer",
            ListingType::AdType => "Advertisement listing",
            ListingType::LeadGeneration => "Lead generation listing",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == code)
    }
}

// ============================================================================
// Listing Status
// Source: https://developer.ebay.com/devzone/xml/docs/reference/ebay/types/ListingStatusCodeType.html
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingStatus {
    Active,
    Completed,
    Ended,
}

impl ListingStatus {
    pub const ALL: [ListingStatus; 3] = [ListingStatus::Active, ListingStatus::Completed, ListingStatus::Ended];

    pub fn as_str(self) -> &'static str {
        match self {
            ListingStatus::Active => "Active",
            ListingStatus::Completed => "Completed",
            ListingStatus::Ended => "Ended",
        }
    }

    pub fn title(self) -> &'static str {
        self.as_str()
    }

    pub fn description(self) -> &'static str {
        match self {
            ListingStatus::Active => {
                "The listing is still active or the listing has ended with a sale but eBay has not \
                 completed processing the sale details (e.g., total price and high bidder). A \
                 multi-item listing is considered active until all items have winning bids or \
                 purchases or the listing ends with at least one winning bid or purchase. If the \
                 listing has ended with a sale but this Active status is returned, please allow \
                 several minutes for eBay to finish processing the listing."
            }
            ListingStatus::Completed => {
                "The listing has closed and eBay has completed processing the sale. All sale \
                 information returned from eBay (e.g., total price and high bidder) should be \
                 considered accurate and complete. Although the Final Value Fee (FVF) for \
                 FixedPriceItem and StoresFixedPrice items is returned by GetSellerTransactions \
                 and GetItemTransactions, all other listing types (excluding Buy It Now \
                 purchases) require the listing status to be Completed before the Final Value \
                 Fee is returned."
            }
            ListingStatus::Ended => {
                "The listing has ended. If the listing ended with a sale, eBay has completed \
                 processing of the sale. All sale information returned from eBay (e.g., total \
                 price and high bidder) should be considered accurate and complete. However, the \
                 final value fee is not yet available."
            }
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == code)
    }
}

// ============================================================================
// Order Status
// Source: https://developer.ebay.com/devzone/xml/docs/reference/ebay/types/OrderStatusCodeType.html
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Active,
    Authenticated,
    Cancelled,
    Completed,
    Default,
    Inactive,
    InProcess,
    Invalid,
    Shipped,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 9] = [
        OrderStatus::Active,
        OrderStatus::Authenticated,
        OrderStatus::Cancelled,
        OrderStatus::Completed,
        OrderStatus::Default,
        OrderStatus::Inactive,
        OrderStatus::InProcess,
        OrderStatus::Invalid,
        OrderStatus::Shipped,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Active => "Active",
            OrderStatus::Authenticated => "Authenticated",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Completed => "Completed",
            OrderStatus::Default => "Default",
            OrderStatus::Inactive => "Inactive",
            OrderStatus::InProcess => "InProcess",
            OrderStatus::Invalid => "Invalid",
            OrderStatus::Shipped => "Shipped",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            OrderStatus::InProcess => "In Process",
            other => other.as_str(),
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == code)
    }
}

// ============================================================================
// Payment Status
// Source: https://developer.ebay.com/Devzone/XML/docs/Reference/eBay/types/PaymentStatusCodeType.html
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    NoPaymentFailure,
    #[serde(rename = "BuyerECheckBounced")]
    BuyerEcheckBounced,
    BuyerCreditCardFailed,
    BuyerFailedPaymentReportedByEbay,
    PaymentInProcess,
    PaidPendingTransfer,
    Paid,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 7] = [
        PaymentStatus::NoPaymentFailure,
        PaymentStatus::BuyerEcheckBounced,
        PaymentStatus::BuyerCreditCardFailed,
        PaymentStatus::BuyerFailedPaymentReportedByEbay,
        PaymentStatus::PaymentInProcess,
        PaymentStatus::PaidPendingTransfer,
        PaymentStatus::Paid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::NoPaymentFailure => "NoPaymentFailure",
            PaymentStatus::BuyerEcheckBounced => "BuyerECheckBounced",
            PaymentStatus::BuyerCreditCardFailed => "BuyerCreditCardFailed",
            PaymentStatus::BuyerFailedPaymentReportedByEbay => "BuyerFailedPaymentReportedByEbay",
            PaymentStatus::PaymentInProcess => "PaymentInProcess",
            PaymentStatus::PaidPendingTransfer => "PaidPendingTransfer",
            PaymentStatus::Paid => "Paid",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PaymentStatus::NoPaymentFailure => "No Payment Failure",
            PaymentStatus::BuyerEcheckBounced => "Buyer eCheck Bounced",
            PaymentStatus::BuyerCreditCardFailed => "Buyer Credit Card Failed",
            PaymentStatus::BuyerFailedPaymentReportedByEbay => "Buyer Failed Payment Reported by eBay",
            PaymentStatus::PaymentInProcess => "Payment In Process",
            PaymentStatus::PaidPendingTransfer => "Paid Pending Transfer",
            PaymentStatus::Paid => "Paid",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == code)
    }
}
