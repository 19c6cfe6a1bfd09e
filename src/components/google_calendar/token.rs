use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// OAuth tokens obtained from the authorization code exchange
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credentials {
    /// Build credentials from a token response, turning `expires_in` into an absolute time.
    ///
    /// An `expires_in` that cannot be represented as a timestamp leaves the expiry unknown.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in_secs: Option<i64>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            expires_at: expires_in_secs.and_then(|secs| {
                TimeDelta::try_seconds(secs).and_then(|delta| Utc::now().checked_add_signed(delta))
            }),
        }
    }

    /// Whether the access token has passed its reported expiry.
    ///
    /// Tokens without an expiry are never considered expired.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() >= expires_at,
            None => false,
        }
    }
}

/// Holds the credentials of the current session in memory.
///
/// Cloning shares the same underlying slot. Nothing is persisted, so a restart
/// returns the server to the unauthenticated state.
#[derive(Clone, Default)]
pub struct TokenManager {
    credentials: Arc<RwLock<Option<Credentials>>>,
}

impl TokenManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any stored credentials
    pub async fn set_credentials(&self, credentials: Credentials) {
        info!(
            "Storing credentials (refresh token: {}, expires at: {:?})",
            credentials.refresh_token.is_some(),
            credentials.expires_at
        );
        *self.credentials.write().await = Some(credentials);
    }

    /// Get a copy of the stored credentials if a non-empty access token is held
    pub async fn get_credentials(&self) -> Option<Credentials> {
        let guard = self.credentials.read().await;
        match guard.as_ref() {
            Some(credentials) if !credentials.access_token.is_empty() => Some(credentials.clone()),
            Some(_) => {
                debug!("Stored credentials have an empty access token");
                None
            }
            None => None,
        }
    }

    /// Get the current access token if any
    pub async fn access_token(&self) -> Option<String> {
        self.get_credentials()
            .await
            .map(|credentials| credentials.access_token)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.get_credentials().await.is_some()
    }
}
