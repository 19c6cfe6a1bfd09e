use super::models::{CreatedEvent, EventPayload};
use super::token::Credentials;
use crate::config::Config;
use crate::error::{provider_error, AppResult};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use url::Url;

/// Events are always created in the authorized user's primary calendar
const CALENDAR_ID: &str = "primary";

/// Thin client for the Calendar v3 events endpoint
#[derive(Clone)]
pub struct CalendarClient {
    config: Arc<RwLock<Config>>,
    client: Client,
}

impl CalendarClient {
    pub fn new(config: Arc<RwLock<Config>>, client: Client) -> Self {
        Self { config, client }
    }

    /// Insert an event into the primary calendar, asking Google to create
    /// conference data and to notify all attendees
    pub async fn insert_event(
        &self,
        credentials: &Credentials,
        payload: &EventPayload,
    ) -> AppResult<CreatedEvent> {
        let url = {
            let config = self.config.read().await;
            events_url(&config.calendar_api_url, CALENDAR_ID)?
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&credentials.access_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| provider_error(&format!("Failed to insert event: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(provider_error(&format!(
                "Failed to insert event: HTTP {} - {}",
                status, error_body
            )));
        }

        let event: CreatedEvent = response
            .json()
            .await
            .map_err(|e| provider_error(&format!("Failed to parse event response: {}", e)))?;

        info!(
            "Created event {} (conference request {})",
            event.id,
            payload.conference_request_id()
        );
        Ok(event)
    }
}

/// URL of the events collection of a calendar, with insert options attached
fn events_url(api_url: &str, calendar_id: &str) -> AppResult<Url> {
    let mut url = Url::parse(api_url)
        .map_err(|e| provider_error(&format!("Failed to parse URL: {}", e)))?;

    url.path_segments_mut()
        .map_err(|_| provider_error("Calendar API URL cannot be a base"))?
        .pop_if_empty()
        .extend(["calendars", calendar_id, "events"]);

    url.query_pairs_mut()
        .append_pair("conferenceDataVersion", "1")
        .append_pair("sendUpdates", "all");

    Ok(url)
}
