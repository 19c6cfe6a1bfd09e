use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::AppState;
use crate::components::google_calendar::{EventPayload, CALENDAR_SCOPE};
use crate::error::{authentication_error, AppResult, Error};

/// Scopes requested during authorization
pub const SCOPES: [&str; 1] = [CALENDAR_SCOPE];

/// Query parameters Google appends to the redirect URL
#[derive(Debug, Deserialize)]
pub struct AuthCallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Body returned after an event was created
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEventResponse {
    pub status: u16,
    pub message: String,
    pub link: Option<String>,
}

/// Liveness check
pub async fn health_handler() -> &'static str {
    "Hello World"
}

/// Send the browser to Google's consent page
pub async fn auth_handler(State(state): State<AppState>) -> AppResult<Response> {
    let url = state.provider.authorization_url(&SCOPES).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response())
}

/// Complete the authorization by exchanging the code for tokens
pub async fn auth_redirect_handler(
    State(state): State<AppState>,
    Query(params): Query<AuthCallbackParams>,
) -> AppResult<&'static str> {
    let code = match (params.code, params.error) {
        (Some(code), _) if !code.is_empty() => code,
        (_, Some(error)) => {
            return Err(authentication_error(&format!(
                "Authorization was not granted: {}",
                error
            )))
        }
        _ => return Err(authentication_error("No authorization code found in callback")),
    };

    let credentials = state.provider.exchange_code(&code).await?;
    state.tokens.set_credentials(credentials).await;

    info!("Authentication completed");
    Ok("Authentication successful! You can now create events.")
}

/// Create the demo event and return its Meet link
pub async fn create_event_handler(
    State(state): State<AppState>,
) -> AppResult<Json<CreateEventResponse>> {
    let credentials = state
        .tokens
        .get_credentials()
        .await
        .ok_or(Error::NotAuthenticated)?;

    // Expiry is reported but not enforced; Google rejects the call if the token is stale
    if credentials.is_expired() {
        warn!(
            "Access token expired at {:?}, attempting event creation anyway",
            credentials.expires_at
        );
    }

    let payload = EventPayload::demo()?;
    let event = state.provider.insert_event(&credentials, &payload).await?;

    Ok(Json(CreateEventResponse {
        status: StatusCode::OK.as_u16(),
        message: "Event created".to_string(),
        link: event.hangout_link,
    }))
}
