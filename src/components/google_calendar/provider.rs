use super::client::CalendarClient;
use super::models::{CreatedEvent, EventPayload};
use super::oauth::OAuthClient;
use super::token::Credentials;
use crate::config::Config;
use crate::error::AppResult;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

/// Everything the server needs from the identity provider and the calendar API
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// URL of the consent page for the given scopes
    async fn authorization_url(&self, scopes: &[&str]) -> AppResult<Url>;

    /// Exchange an authorization code for credentials
    async fn exchange_code(&self, code: &str) -> AppResult<Credentials>;

    /// Insert an event using the given credentials
    async fn insert_event(
        &self,
        credentials: &Credentials,
        payload: &EventPayload,
    ) -> AppResult<CreatedEvent>;
}

/// Google implementation backed by the OAuth endpoints and Calendar v3 API
#[derive(Clone)]
pub struct GoogleProvider {
    oauth: OAuthClient,
    calendar: CalendarClient,
}

impl GoogleProvider {
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Build the provider around an existing HTTP client, shared by both endpoints
    pub fn with_client(config: Arc<RwLock<Config>>, client: Client) -> Self {
        Self {
            oauth: OAuthClient::new(Arc::clone(&config), client.clone()),
            calendar: CalendarClient::new(config, client),
        }
    }
}

#[async_trait]
impl CalendarProvider for GoogleProvider {
    async fn authorization_url(&self, scopes: &[&str]) -> AppResult<Url> {
        self.oauth.authorization_url(scopes).await
    }

    async fn exchange_code(&self, code: &str) -> AppResult<Credentials> {
        self.oauth.exchange_code(code).await
    }

    async fn insert_event(
        &self,
        credentials: &Credentials,
        payload: &EventPayload,
    ) -> AppResult<CreatedEvent> {
        self.calendar.insert_event(credentials, payload).await
    }
}
