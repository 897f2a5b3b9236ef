//! eBay API Smoke Test CLI
//!
//! Commands:
//! - `consent-url`: Print the OAuth consent URL for the configured app
//! - `exchange`: Exchange an authorization code for a user token pair
//! - `app-token`: Fetch a client-credentials application token
//! - `get-item`: Trading GetItem, mapped to a typed item
//! - `orders`: Trading GetOrders (or REST fulfillment orders with `--rest`)
//! - `translate`: Commerce translation of one text
//! - `aspects`: Commerce taxonomy aspects for a category
//!
//! Credentials come from `EBAY_*` environment variables. User-token commands read
//! `--access-token` or `EBAY_ACCESS_TOKEN`.
//!
//! # Usage
//! ```bash
//! EBAY_SANDBOX_APP_ID=... EBAY_SANDBOX_CERT_ID=... EBAY_SANDBOX_DEV_ID=... EBAY_SANDBOX_RUNAME=...
//! ebay_smoke consent-url --state abc
//! ebay_smoke exchange --code 'v^1.1#i^1...'
//! ebay_smoke app-token --scope https://api.ebay.com/oauth/api_scope
//! ebay_smoke get-item --item-id 110123456789 --site de
//! ebay_smoke orders --days 30 --out data/orders.json
//! ebay_smoke translate --text "Red lamp" --from en --to de
//! ebay_smoke aspects --category-id 9355
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use ebay_client::{Ebay, EbayConfig, Environment, Item, Order, Site};

/// Lifetime assumed for a token passed on the command line
const CLI_TOKEN_LIFETIME_HOURS: i64 = 2;

#[derive(Parser)]
#[command(name = "ebay_smoke")]
#[command(about = "eBay API smoke test CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Override EBAY_ENVIRONMENT (sandbox, production)
    #[arg(long, global = true)]
    environment: Option<String>,

    /// Site short code (us, uk, de, ...)
    #[arg(long, global = true)]
    site: Option<String>,

    /// User access token (falls back to EBAY_ACCESS_TOKEN)
    #[arg(long, global = true)]
    access_token: Option<String>,

    /// Output file for the JSON result (defaults to stdout)
    #[arg(long, global = true)]
    out: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the OAuth consent URL
    ConsentUrl {
        /// Scope to request. Can specify multiple times (default: configured scopes)
        #[arg(long)]
        scope: Vec<String>,

        /// Opaque state echoed back on redirect
        #[arg(long)]
        state: Option<String>,

        /// Consent page locale (default: site locale)
        #[arg(long)]
        locale: Option<String>,
    },

    /// Exchange an authorization code for a user token pair
    Exchange {
        #[arg(long)]
        code: String,
    },

    /// Fetch an application token (client credentials)
    AppToken {
        /// Scope to request. Can specify multiple times
        #[arg(long, default_value = "https://api.ebay.com/oauth/api_scope")]
        scope: Vec<String>,
    },

    /// Trading GetItem
    GetItem {
        #[arg(long)]
        item_id: String,
    },

    /// Seller orders from the last N days
    Orders {
        #[arg(long, default_value = "30")]
        days: u32,

        /// Use the REST fulfillment API instead of Trading GetOrders
        #[arg(long, default_value = "false")]
        rest: bool,
    },

    /// Commerce translation
    Translate {
        #[arg(long)]
        text: String,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        /// ITEM_TITLE or ITEM_DESCRIPTION
        #[arg(long)]
        context: Option<String>,
    },

    /// Commerce taxonomy aspects for a leaf category
    Aspects {
        #[arg(long)]
        category_id: String,

        /// Category tree (0 = EBAY_US)
        #[arg(long, default_value = "0")]
        tree_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt().with_env_filter(env_filter).with_target(false).init();

    let ebay = build_client(&cli)?;

    info!("=== eBay Smoke Test ===");
    info!("Environment: {}", ebay.environment());
    info!("Site: {} ({})", ebay.site().title(), ebay.site().marketplace());
    info!("");

    let access_token = cli.access_token.clone().or_else(|| std::env::var("EBAY_ACCESS_TOKEN").ok());

    let output = match cli.command {
        Commands::ConsentUrl { scope, state, locale } => {
            let scopes = (!scope.is_empty()).then_some(scope.as_slice());
            let url = ebay.consent_url(scopes, state.as_deref(), locale.as_deref());
            info!("Open in a browser, sign in, then pass the returned code to `exchange`");
            json!({ "consent_url": url })
        }
        Commands::Exchange { code } => run_exchange(&ebay, &code).await?,
        Commands::AppToken { scope } => run_app_token(&ebay, &scope).await?,
        Commands::GetItem { item_id } => run_get_item(&ebay, &item_id).await?,
        Commands::Orders { days, rest } => {
            apply_access_token(&ebay, access_token.as_deref()).await?;
            run_orders(&ebay, days, rest).await?
        }
        Commands::Translate { text, from, to, context } => {
            apply_access_token(&ebay, access_token.as_deref()).await?;
            let translated = ebay
                .commerce()
                .translate(&text, &from, &to, context.as_deref())
                .await
                .context("Translation failed")?;
            if translated.is_none() {
                warn!("Response carried no translation");
            }
            json!({ "text": text, "from": from, "to": to, "translated": translated })
        }
        Commands::Aspects { category_id, tree_id } => {
            let aspects = ebay
                .commerce()
                .get_item_aspects_for_category(&tree_id, &category_id)
                .await
                .context("Aspect lookup failed")?;
            let count = aspects.get("aspects").and_then(Value::as_array).map(Vec::len).unwrap_or(0);
            info!("Aspects returned: {}", count);
            aspects
        }
    };

    write_output(&output, cli.out).await
}

fn build_client(cli: &Cli) -> Result<Ebay> {
    let mut config = EbayConfig::from_env().context("Failed to read EBAY_* configuration")?;

    if let Some(environment) = &cli.environment {
        config.environment = environment.parse::<Environment>()?;
    }
    if let Some(code) = &cli.site {
        config.default_site = match Site::from_code(code) {
            Some(site) => site,
            None => {
                error!("Unknown site code: {}", code);
                anyhow::bail!("Unknown site code: {}", code);
            }
        };
    }

    Ebay::new(config).context("Failed to build eBay client")
}

async fn apply_access_token(ebay: &Ebay, token: Option<&str>) -> Result<()> {
    let Some(token) = token else {
        error!("Missing user token. Pass --access-token or set EBAY_ACCESS_TOKEN");
        anyhow::bail!("Missing user token");
    };
    ebay.set_access_token(token, Utc::now() + Duration::hours(CLI_TOKEN_LIFETIME_HOURS)).await;
    Ok(())
}

async fn run_exchange(ebay: &Ebay, code: &str) -> Result<Value> {
    info!("Exchanging authorization code...");
    let token = ebay.exchange_code_for_token(code).await.context("Code exchange failed")?;

    info!("Access token expires: {}", token.expires_at);
    if let Some(refresh_expiry) = token.refresh_token_expires_at {
        info!("Refresh token expires: {}", refresh_expiry);
    }
    Ok(serde_json::to_value(&token)?)
}

async fn run_app_token(ebay: &Ebay, scopes: &[String]) -> Result<Value> {
    info!("Requesting application token for {} scope(s)", scopes.len());
    let token = ebay.auth().application_token(scopes).await.context("Application token request failed")?;

    info!("Token type: {}", token.token_type);
    info!("Expires: {}", token.expires_at);
    Ok(json!({
        "token_type": token.token_type,
        "expires_in": token.expires_in,
        "expires_at": token.expires_at,
        "access_token": token.access_token,
    }))
}

async fn run_get_item(ebay: &Ebay, item_id: &str) -> Result<Value> {
    info!("GetItem {}", item_id);
    let doc = ebay.trading().get_item(item_id).await.context("GetItem failed")?;

    let Some(element) = doc.child("Item") else {
        warn!("Response has no Item element");
        return Ok(doc.to_json());
    };

    let item = Item::from_xml(element);
    info!("Title: {}", item.title);
    info!("Price: {:?} {}", item.current_price, item.currency_code.as_deref().unwrap_or(""));
    info!("Status: {:?}", item.listing_status);
    Ok(serde_json::to_value(&item)?)
}

async fn run_orders(ebay: &Ebay, days: u32, rest: bool) -> Result<Value> {
    let orders: Vec<Order> = if rest {
        info!("REST fulfillment orders, last {} day(s)", days);
        let since = (Utc::now() - Duration::days(i64::from(days))).format("%Y-%m-%dT%H:%M:%S%.3fZ");
        let params = json!({ "filter": format!("creationdate:[{}..]", since), "limit": 50 });
        let response = ebay.commerce().get_fulfillment_orders(Some(&params)).await.context("getOrders failed")?;

        response
            .get("orders")
            .and_then(Value::as_array)
            .map(|orders| orders.iter().map(Order::from_json).collect())
            .unwrap_or_default()
    } else {
        info!("Trading GetOrders, last {} day(s)", days);
        let params = json!({ "NumberOfDays": days, "OrderRole": "Seller" });
        let doc = ebay.trading().get_orders(&params).await.context("GetOrders failed")?;

        doc.child("OrderArray")
            .map(|array| array.children_named("Order").map(Order::from_xml).collect())
            .unwrap_or_default()
    };

    info!("Orders returned: {}", orders.len());
    for order in orders.iter().take(5) {
        info!("  {}: {:.2} {} ({:?})", order.order_id, order.total, order.currency_code, order.order_status);
    }
    Ok(serde_json::to_value(&orders)?)
}

async fn write_output(output: &Value, out: Option<PathBuf>) -> Result<()> {
    let json_output = serde_json::to_string_pretty(output)?;

    if let Some(out_path) = out {
        if let Some(parent) = out_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&out_path, &json_output).await?;
        info!("");
        info!("Output written to: {}", out_path.display());
    } else {
        println!();
        println!("{}", json_output);
    }

    Ok(())
}
