use chrono::{DateTime, TimeZone};
use chrono_tz::Asia::Kolkata;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{provider_error, AppResult};

/// Start or end of an event as the Calendar API expects it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    pub date_time: String,
    pub time_zone: String,
}

impl EventDateTime {
    pub fn from_zoned(time: &DateTime<Tz>) -> Self {
        Self {
            date_time: time.to_rfc3339(),
            time_zone: time.timezone().name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConferenceRequest {
    pub request_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceData {
    pub create_request: CreateConferenceRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    pub email: String,
}

/// Body of an events.insert request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub summary: String,
    pub location: String,
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    pub color_id: String,
    pub conference_data: ConferenceData,
    pub attendees: Vec<Attendee>,
}

impl EventPayload {
    /// Build the demo Meet event.
    ///
    /// Every call generates a new conference request id, so Google creates a
    /// fresh Meet link instead of treating the insert as a retry.
    pub fn demo() -> AppResult<Self> {
        let start = Kolkata
            .with_ymd_and_hms(2024, 8, 16, 20, 55, 0)
            .single()
            .ok_or_else(|| provider_error("Event start is not a valid local time"))?;
        let end = Kolkata
            .with_ymd_and_hms(2024, 8, 16, 21, 55, 0)
            .single()
            .ok_or_else(|| provider_error("Event end is not a valid local time"))?;

        Ok(Self {
            summary: "Test User".to_string(),
            location: "Google Meet".to_string(),
            description: "Demo event.".to_string(),
            start: EventDateTime::from_zoned(&start),
            end: EventDateTime::from_zoned(&end),
            color_id: "1".to_string(),
            conference_data: ConferenceData {
                create_request: CreateConferenceRequest {
                    request_id: Uuid::new_v4().to_string(),
                },
            },
            attendees: vec![Attendee {
                email: "test@gmail.com".to_string(),
            }],
        })
    }

    /// The conference request id sent with this payload
    pub fn conference_request_id(&self) -> &str {
        &self.conference_data.create_request.request_id
    }
}

/// The parts of an inserted event we care about
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEvent {
    #[serde(default)]
    pub id: String,
    pub html_link: Option<String>,
    pub hangout_link: Option<String>,
}
