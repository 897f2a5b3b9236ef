//! Token model and the shared refresh policy used by both dispatchers

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::Auth;
use crate::error::Result;

/// A token is expired when its expiry is at or before now
pub fn is_token_expired(expires_at: DateTime<Utc>) -> bool {
    Utc::now() >= expires_at
}

/// Same boundary as [`is_token_expired`]
pub fn is_refresh_token_expired(expires_at: DateTime<Utc>) -> bool {
    Utc::now() >= expires_at
}

/// Raw token endpoint response
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub refresh_token_expires_in: Option<i64>,
}

/// Normalized token pair with absolute expiry timestamps
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds as returned by the server
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
    pub refresh_token: Option<String>,
    pub refresh_token_expires_in: Option<i64>,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
}

fn expiry_after(now: DateTime<Utc>, secs: i64) -> Option<DateTime<Utc>> {
    now.checked_add_signed(Duration::try_seconds(secs)?)
}

impl Token {
    /// `None` when a lifetime does not fit a timestamp
    pub(crate) fn from_response(response: TokenResponse, now: DateTime<Utc>) -> Option<Self> {
        let refresh_token_expires_at = match response.refresh_token_expires_in {
            Some(secs) => Some(expiry_after(now, secs)?),
            None => None,
        };

        Some(Self {
            access_token: response.access_token,
            token_type: response.token_type.unwrap_or_else(|| "Bearer".to_string()),
            expires_in: response.expires_in,
            expires_at: expiry_after(now, response.expires_in)?,
            refresh_token: response.refresh_token,
            refresh_token_expires_in: response.refresh_token_expires_in,
            refresh_token_expires_at,
        })
    }

    pub fn is_expired(&self) -> bool {
        is_token_expired(self.expires_at)
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_token_expires_at", &self.refresh_token_expires_at)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
struct StoredToken {
    value: String,
    /// `None` means unknown and is treated as not expired
    expires_at: Option<DateTime<Utc>>,
}

impl StoredToken {
    fn is_expired(&self) -> bool {
        self.expires_at.map(is_token_expired).unwrap_or(false)
    }
}

/// Point-in-time copy of a dispatcher's cached tokens
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenSnapshot {
    pub access_token: Option<String>,
    pub access_token_expires_at: Option<DateTime<Utc>>,
    pub refresh_token: Option<String>,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for TokenSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSnapshot")
            .field("has_access_token", &self.access_token.is_some())
            .field("access_token_expires_at", &self.access_token_expires_at)
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("refresh_token_expires_at", &self.refresh_token_expires_at)
            .finish()
    }
}

#[derive(Default)]
struct TokenState {
    access: Option<StoredToken>,
    refresh: Option<StoredToken>,
}

/// Per-dispatcher token cache with transparent refresh.
///
/// The lock is held across check, refresh and write so concurrent callers
/// never refresh twice or overwrite a fresher token.
pub struct TokenManager {
    auth: Arc<Auth>,
    state: Mutex<TokenState>,
}

impl TokenManager {
    pub fn new(auth: Arc<Auth>) -> Self {
        Self { auth, state: Mutex::new(TokenState::default()) }
    }

    pub async fn set_access_token(&self, token: impl Into<String>, expires_at: DateTime<Utc>) {
        let mut state = self.state.lock().await;
        state.access = Some(StoredToken { value: token.into(), expires_at: Some(expires_at) });
    }

    pub async fn set_refresh_token(&self, token: impl Into<String>, expires_at: Option<DateTime<Utc>>) {
        let mut state = self.state.lock().await;
        state.refresh = Some(StoredToken { value: token.into(), expires_at });
    }

    /// Store both halves of a freshly issued token
    pub async fn apply(&self, token: &Token) {
        let mut state = self.state.lock().await;
        apply_token(&mut state, token);
    }

    /// Seed from a snapshot taken on another manager
    pub async fn restore(&self, snapshot: &TokenSnapshot) {
        let mut state = self.state.lock().await;
        state.access = match (&snapshot.access_token, snapshot.access_token_expires_at) {
            (Some(value), Some(expires_at)) => {
                Some(StoredToken { value: value.clone(), expires_at: Some(expires_at) })
            }
            _ => None,
        };
        state.refresh = snapshot.refresh_token.as_ref().map(|value| StoredToken {
            value: value.clone(),
            expires_at: snapshot.refresh_token_expires_at,
        });
    }

    pub async fn snapshot(&self) -> TokenSnapshot {
        let state = self.state.lock().await;
        TokenSnapshot {
            access_token: state.access.as_ref().map(|t| t.value.clone()),
            access_token_expires_at: state.access.as_ref().and_then(|t| t.expires_at),
            refresh_token: state.refresh.as_ref().map(|t| t.value.clone()),
            refresh_token_expires_at: state.refresh.as_ref().and_then(|t| t.expires_at),
        }
    }

    /// Current usable access token, refreshing it first when expired.
    ///
    /// Returns `Ok(None)` when no token was ever set, or when the access token
    /// is expired and no unexpired refresh token is available.
    pub async fn access_token(&self) -> Result<Option<String>> {
        let mut state = self.state.lock().await;

        let Some(access) = state.access.as_ref() else {
            return Ok(None);
        };
        if !access.is_expired() {
            return Ok(Some(access.value.clone()));
        }

        let refresh_token = match state.refresh.as_ref() {
            Some(refresh) if !refresh.is_expired() => refresh.value.clone(),
            _ => {
                debug!("Access token expired and no usable refresh token");
                return Ok(None);
            }
        };

        let token = self
            .auth
            .refresh_access_token(&refresh_token, &[] as &[&str])
            .await
            .inspect_err(|e| warn!("Access token refresh failed: {}", e))?;
        apply_token(&mut state, &token);
        info!("Access token refreshed (expires_at: {})", token.expires_at);

        Ok(Some(token.access_token))
    }
}

fn apply_token(state: &mut TokenState, token: &Token) {
    state.access = Some(StoredToken {
        value: token.access_token.clone(),
        expires_at: Some(token.expires_at),
    });
    // Servers may omit the refresh token, meaning the current one stays valid
    if let Some(refresh) = &token.refresh_token {
        state.refresh = Some(StoredToken {
            value: refresh.clone(),
            expires_at: token.refresh_token_expires_at,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AppTokenCache;
    use crate::config::{Credentials, Endpoints, Environment};
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_auth(base_url: &str) -> Arc<Auth> {
        let auth = Auth::new(Environment::Sandbox, Credentials::new("app-id", "cert-id", "dev-id", "runame"))
            .unwrap()
            .with_endpoints(Endpoints::rooted_at(base_url))
            .with_token_cache(Arc::new(AppTokenCache::default()));
        Arc::new(auth)
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        assert!(is_token_expired(now - Duration::hours(1)));
        assert!(is_token_expired(now));
        assert!(!is_token_expired(now + Duration::hours(1)));
        assert!(is_refresh_token_expired(now - Duration::seconds(1)));
    }

    #[test]
    fn test_token_from_response_computes_absolute_expiry() {
        let now = Utc::now();
        let token = Token::from_response(
            TokenResponse {
                access_token: "a".into(),
                token_type: None,
                expires_in: 7200,
                refresh_token: Some("r".into()),
                refresh_token_expires_in: Some(47_304_000),
            },
            now,
        )
        .unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_at, now + Duration::seconds(7200));
        assert_eq!(token.refresh_token_expires_at, Some(now + Duration::seconds(47_304_000)));
    }

    #[test]
    fn test_out_of_range_lifetime_is_rejected() {
        let response = |expires_in, refresh_in| TokenResponse {
            access_token: "a".into(),
            token_type: None,
            expires_in,
            refresh_token: None,
            refresh_token_expires_in: refresh_in,
        };
        assert!(Token::from_response(response(i64::MAX, None), Utc::now()).is_none());
        assert!(Token::from_response(response(7200, Some(i64::MAX)), Utc::now()).is_none());
        assert!(Token::from_response(response(7200, Some(60)), Utc::now()).is_some());
    }

    #[test]
    fn test_token_debug_redacts() {
        let token = Token::from_response(
            TokenResponse {
                access_token: "v^1.1#secret".into(),
                token_type: Some("User Access Token".into()),
                expires_in: 10,
                refresh_token: Some("refresh-secret".into()),
                refresh_token_expires_in: None,
            },
            Utc::now(),
        )
        .unwrap();
        let debug_str = format!("{:?}", token);
        assert!(!debug_str.contains("v^1.1#secret"));
        assert!(!debug_str.contains("refresh-secret"));
    }

    #[tokio::test]
    async fn test_no_token_set_yields_none() {
        let manager = TokenManager::new(test_auth("http://127.0.0.1:9"));
        assert_eq!(manager.access_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unexpired_token_returned_as_is() {
        let manager = TokenManager::new(test_auth("http://127.0.0.1:9"));
        manager.set_access_token("live", Utc::now() + Duration::hours(1)).await;
        assert_eq!(manager.access_token().await.unwrap().as_deref(), Some("live"));
    }

    #[tokio::test]
    async fn test_expired_without_refresh_yields_none() {
        let manager = TokenManager::new(test_auth("http://127.0.0.1:9"));
        manager.set_access_token("old", Utc::now() - Duration::minutes(1)).await;
        assert_eq!(manager.access_token().await.unwrap(), None);

        manager.set_refresh_token("stale", Some(Utc::now() - Duration::minutes(1))).await;
        assert_eq!(manager.access_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_token_is_refreshed_and_refresh_token_kept() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/identity/v1/oauth2/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=keep-me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "fresh",
                "token_type": "User Access Token",
                "expires_in": 7200
            })))
            .expect(1)
            .mount(&server)
            .await;

        let manager = TokenManager::new(test_auth(&server.uri()));
        manager.set_access_token("old", Utc::now() - Duration::minutes(1)).await;
        manager.set_refresh_token("keep-me", Some(Utc::now() + Duration::days(30))).await;

        assert_eq!(manager.access_token().await.unwrap().as_deref(), Some("fresh"));
        // Second call uses the cached refreshed token
        assert_eq!(manager.access_token().await.unwrap().as_deref(), Some("fresh"));

        let snapshot = manager.snapshot().await;
        assert_eq!(snapshot.refresh_token.as_deref(), Some("keep-me"));
    }

    #[tokio::test]
    async fn test_refresh_replaces_refresh_token_when_returned() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/identity/v1/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "fresh",
                "expires_in": 7200,
                "refresh_token": "rotated",
                "refresh_token_expires_in": 47304000
            })))
            .mount(&server)
            .await;

        let manager = TokenManager::new(test_auth(&server.uri()));
        manager.set_access_token("old", Utc::now() - Duration::minutes(1)).await;
        manager.set_refresh_token("original", None).await;

        manager.access_token().await.unwrap();
        let snapshot = manager.snapshot().await;
        assert_eq!(snapshot.refresh_token.as_deref(), Some("rotated"));
        assert!(snapshot.refresh_token_expires_at.is_some());
    }

    #[tokio::test]
    async fn test_refresh_failure_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/identity/v1/oauth2/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "the provided authorization refresh token is invalid"
            })))
            .mount(&server)
            .await;

        let manager = TokenManager::new(test_auth(&server.uri()));
        manager.set_access_token("old", Utc::now() - Duration::minutes(1)).await;
        manager.set_refresh_token("revoked", None).await;

        let err = manager.access_token().await.unwrap_err();
        assert_eq!(err.code(), "invalid_grant");
    }

    #[tokio::test]
    async fn test_concurrent_callers_refresh_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/identity/v1/oauth2/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "access_token": "fresh", "expires_in": 7200 }))
                    .set_delay(std::time::Duration::from_millis(50)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let manager = Arc::new(TokenManager::new(test_auth(&server.uri())));
        manager.set_access_token("old", Utc::now() - Duration::minutes(1)).await;
        manager.set_refresh_token("long-lived", None).await;

        let handles: Vec<_> = (0..5)
            .map(|_| {
                let manager = manager.clone();
                tokio::spawn(async move { manager.access_token().await })
            })
            .collect();

        for handle in handles {
            let token = handle.await.unwrap().unwrap();
            assert_eq!(token.as_deref(), Some("fresh"));
        }
    }

    #[tokio::test]
    async fn test_snapshot_restore() {
        let auth = test_auth("http://127.0.0.1:9");
        let source = TokenManager::new(auth.clone());
        let expires = Utc::now() + Duration::hours(2);
        source.set_access_token("a", expires).await;
        source.set_refresh_token("r", None).await;

        let target = TokenManager::new(auth);
        target.restore(&source.snapshot().await).await;
        assert_eq!(target.snapshot().await, source.snapshot().await);
    }
}
