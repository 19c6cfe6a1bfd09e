mod client;
pub mod models;
pub mod oauth;
mod provider;
pub mod token;

pub use models::{CreatedEvent, EventPayload};
pub use oauth::CALENDAR_SCOPE;
pub use provider::{CalendarProvider, GoogleProvider};
pub use token::{Credentials, TokenManager};
