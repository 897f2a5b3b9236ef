//! OAuth2 token lifecycle
//!
//! # Flows
//! - Authorization code: consent URL -> code -> user token pair
//! - Refresh: refresh token -> new access token (refresh token may be reused)
//! - Client credentials: application token, memoized per `(app_id, scopes)`
//!
//! # Source
//! - Consent: https://developer.ebay.com/api-docs/static/oauth-consent-request.html
//! - Code grant: https://developer.ebay.com/api-docs/static/oauth-auth-code-grant-request.html
//! - Refresh: https://developer.ebay.com/api-docs/static/oauth-refresh-token-request.html
//! - Client credentials: https://developer.ebay.com/api-docs/static/oauth-client-credentials-grant.html

pub mod cache;
pub mod oauth;
pub mod token;

pub use cache::AppTokenCache;
pub use oauth::Auth;
pub use token::{is_refresh_token_expired, is_token_expired, Token, TokenManager, TokenSnapshot};
