use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use meetlink::components::google_calendar::{
    CalendarProvider, CreatedEvent, Credentials, EventPayload, CALENDAR_SCOPE,
};
use meetlink::error::{authentication_error, provider_error, AppResult};
use meetlink::server::{router, AppState};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use url::Url;

const MEET_LINK: &str = "https://meet.google.com/abc-defg-hij";

/// Mock provider that records calls instead of talking to Google
#[derive(Default)]
pub struct MockCalendarProvider {
    fail_exchange: bool,
    fail_insert: bool,
    exchange_calls: AtomicUsize,
    insert_calls: AtomicUsize,
    request_ids: Mutex<Vec<String>>,
    tokens_used: Mutex<Vec<String>>,
}

impl MockCalendarProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_exchange() -> Self {
        Self {
            fail_exchange: true,
            ..Default::default()
        }
    }

    pub fn failing_insert() -> Self {
        Self {
            fail_insert: true,
            ..Default::default()
        }
    }

    pub fn exchange_calls(&self) -> usize {
        self.exchange_calls.load(Ordering::SeqCst)
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CalendarProvider for MockCalendarProvider {
    async fn authorization_url(&self, scopes: &[&str]) -> AppResult<Url> {
        let mut url = Url::parse("https://accounts.example.com/o/oauth2/v2/auth").unwrap();
        url.query_pairs_mut()
            .append_pair("access_type", "offline")
            .append_pair("scope", &scopes.join(" "));
        Ok(url)
    }

    async fn exchange_code(&self, code: &str) -> AppResult<Credentials> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_exchange {
            return Err(authentication_error("HTTP 400 - invalid_grant"));
        }
        Ok(Credentials::new(
            format!("access-{}", code),
            Some("refresh".to_string()),
            Some(3600),
        ))
    }

    async fn insert_event(
        &self,
        credentials: &Credentials,
        payload: &EventPayload,
    ) -> AppResult<CreatedEvent> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.tokens_used
            .lock()
            .unwrap()
            .push(credentials.access_token.clone());
        self.request_ids
            .lock()
            .unwrap()
            .push(payload.conference_request_id().to_string());
        if self.fail_insert {
            return Err(provider_error("HTTP 403 - insufficient permissions"));
        }
        Ok(CreatedEvent {
            id: "event1".to_string(),
            html_link: Some("https://www.google.com/calendar/event?eid=event1".to_string()),
            hangout_link: Some(MEET_LINK.to_string()),
        })
    }
}

fn setup(provider: MockCalendarProvider) -> (AppState, Arc<MockCalendarProvider>) {
    let provider = Arc::new(provider);
    let state = AppState::new(provider.clone());
    (state, provider)
}

async fn get(state: &AppState, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router(state.clone()).oneshot(request).await.unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (state, _) = setup(MockCalendarProvider::new());
    let response = get(&state, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "Hello World");
}

#[tokio::test]
async fn test_auth_redirects_to_consent_page() {
    let (state, _) = setup(MockCalendarProvider::new());
    let response = get(&state, "/auth").await;
    assert_eq!(response.status(), StatusCode::FOUND);

    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    let url = Url::parse(location).unwrap();
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(pairs.contains(&("access_type".to_string(), "offline".to_string())));
    assert!(pairs.contains(&("scope".to_string(), CALENDAR_SCOPE.to_string())));
}

#[tokio::test]
async fn test_create_event_requires_authentication() {
    let (state, provider) = setup(MockCalendarProvider::new());

    for _ in 0..3 {
        let response = get(&state, "/create-event").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_string(response).await,
            "Not authenticated. Please authenticate first."
        );
    }

    assert_eq!(provider.insert_calls(), 0);
}

#[tokio::test]
async fn test_successful_exchange_enables_event_creation() {
    let (state, provider) = setup(MockCalendarProvider::new());

    let response = get(&state, "/auth/redirect?code=4%2Fabc").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_string(response).await,
        "Authentication successful! You can now create events."
    );
    assert_eq!(provider.exchange_calls(), 1);
    assert_eq!(state.tokens.access_token().await.as_deref(), Some("access-4/abc"));

    let response = get(&state, "/create-event").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(provider.insert_calls(), 1);
    assert_eq!(
        provider.tokens_used.lock().unwrap().as_slice(),
        ["access-4/abc".to_string()]
    );

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], 200);
    assert_eq!(body["message"], "Event created");
    assert_eq!(body["link"], MEET_LINK);
}

#[tokio::test]
async fn test_each_event_uses_new_conference_request_id() {
    let (state, provider) = setup(MockCalendarProvider::new());
    get(&state, "/auth/redirect?code=abc").await;

    get(&state, "/create-event").await;
    get(&state, "/create-event").await;

    let ids = provider.request_ids.lock().unwrap();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

#[tokio::test]
async fn test_failed_exchange_leaves_credentials_unchanged() {
    let (state, provider) = setup(MockCalendarProvider::failing_exchange());

    let response = get(&state, "/auth/redirect?code=expired").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "Authentication failed");
    assert_eq!(provider.exchange_calls(), 1);
    assert!(!state.tokens.is_authenticated().await);

    // Previously stored credentials survive a failed exchange
    state
        .tokens
        .set_credentials(Credentials::new("existing", None, None))
        .await;
    let response = get(&state, "/auth/redirect?code=expired").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(state.tokens.access_token().await.as_deref(), Some("existing"));
}

#[tokio::test]
async fn test_callback_without_code_fails_without_exchange() {
    let (state, provider) = setup(MockCalendarProvider::new());

    let response = get(&state, "/auth/redirect").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = get(&state, "/auth/redirect?error=access_denied").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(provider.exchange_calls(), 0);
    assert!(!state.tokens.is_authenticated().await);
}

#[tokio::test]
async fn test_provider_failure_returns_server_error() {
    let (state, provider) = setup(MockCalendarProvider::failing_insert());
    get(&state, "/auth/redirect?code=abc").await;

    let response = get(&state, "/create-event").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "Error creating event");
    assert_eq!(provider.insert_calls(), 1);
}

#[tokio::test]
async fn test_expired_token_still_attempts_call() {
    let (state, provider) = setup(MockCalendarProvider::new());
    state
        .tokens
        .set_credentials(Credentials::new("stale", None, Some(-60)))
        .await;

    let response = get(&state, "/create-event").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(provider.insert_calls(), 1);
}

#[tokio::test]
async fn test_unknown_route() {
    let (state, _) = setup(MockCalendarProvider::new());
    let response = get(&state, "/events").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
