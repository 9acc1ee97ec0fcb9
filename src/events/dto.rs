use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::events::repo_types::Event;

/// Request body for creating or replacing an event. Fields are checked
/// explicitly before an [`Event`] is constructed, so a 400 can name every
/// offending field at once.
#[derive(Debug, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date_time: Option<OffsetDateTime>,
}

impl EventPayload {
    /// Validate and build the domain object. `id` and `user_id` come from the
    /// route and the authenticated caller respectively.
    pub fn into_event(self, id: i64, user_id: i64) -> Result<Event, Vec<String>> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name".to_string());
        }
        if self.description.trim().is_empty() {
            missing.push("description".to_string());
        }
        if self.location.trim().is_empty() {
            missing.push("location".to_string());
        }
        let Some(date_time) = self.date_time else {
            missing.push("date_time".to_string());
            return Err(missing);
        };
        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(Event {
            id,
            name: self.name,
            description: self.description,
            location: self.location,
            date_time,
            user_id,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn full_payload() -> EventPayload {
        EventPayload {
            name: "E".into(),
            description: "d".into(),
            location: "l".into(),
            date_time: Some(datetime!(2030-01-01 10:00 UTC)),
        }
    }

    #[test]
    fn into_event_binds_id_and_owner() {
        let event = full_payload().into_event(3, 42).expect("valid payload");
        assert_eq!(event.id, 3);
        assert_eq!(event.user_id, 42);
        assert_eq!(event.name, "E");
    }

    #[test]
    fn into_event_lists_every_missing_field() {
        let payload = EventPayload {
            name: String::new(),
            description: "d".into(),
            location: " ".into(),
            date_time: None,
        };
        let missing = payload.into_event(0, 1).unwrap_err();
        assert_eq!(
            missing,
            vec![
                "name".to_string(),
                "location".to_string(),
                "date_time".to_string()
            ]
        );
    }

    #[test]
    fn payload_deserializes_rfc3339_date_time() {
        let payload: EventPayload = serde_json::from_str(
            r#"{"name":"E","description":"d","location":"l","date_time":"2030-01-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(payload.date_time, Some(datetime!(2030-01-01 10:00 UTC)));
    }

    #[test]
    fn event_json_uses_original_field_names() {
        let event = full_payload().into_event(1, 2).unwrap();
        let json = serde_json::to_value(&event).unwrap();
        for key in ["id", "name", "description", "location", "date_time", "user_id"] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }
}
