use super::token::Credentials;
use crate::config::Config;
use crate::error::{authentication_error, config_error, AppResult};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

/// Full read/write access to calendars
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Successful response from the token endpoint
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

/// Builds consent URLs and exchanges authorization codes against Google's OAuth endpoints
#[derive(Clone)]
pub struct OAuthClient {
    config: Arc<RwLock<Config>>,
    client: Client,
}

impl OAuthClient {
    pub fn new(config: Arc<RwLock<Config>>, client: Client) -> Self {
        Self { config, client }
    }

    /// Build the URL of the consent page, requesting offline access so a refresh token is issued
    pub async fn authorization_url(&self, scopes: &[&str]) -> AppResult<Url> {
        let config = self.config.read().await;

        let mut url = Url::parse(&config.auth_url)
            .map_err(|e| config_error(&format!("Invalid authorization URL: {}", e)))?;

        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &config.google_client_id)
            .append_pair("redirect_uri", &config.redirect_url)
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent")
            .append_pair("scope", &scopes.join(" "));

        debug!("Built authorization URL: {}", url);
        Ok(url)
    }

    /// Exchange an authorization code for tokens
    pub async fn exchange_code(&self, code: &str) -> AppResult<Credentials> {
        let (token_url, params) = {
            let config = self.config.read().await;
            (
                config.token_url.clone(),
                [
                    ("client_id", config.google_client_id.clone()),
                    ("client_secret", config.google_client_secret.clone()),
                    ("code", code.to_string()),
                    ("redirect_uri", config.redirect_url.clone()),
                    ("grant_type", "authorization_code".to_string()),
                ],
            )
        };

        let response = self
            .client
            .post(&token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| authentication_error(&format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(authentication_error(&format!(
                "Failed to get token: HTTP {} - {}",
                status, error_body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| authentication_error(&format!("Failed to parse token response: {}", e)))?;

        if token.access_token.is_empty() {
            return Err(authentication_error("Token response has an empty 'access_token'"));
        }

        info!("Tokens received");
        Ok(Credentials::new(
            token.access_token,
            token.refresh_token,
            token.expires_in,
        ))
    }
}
