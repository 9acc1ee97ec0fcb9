use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::auth::services::AuthUser;
use crate::error::{ApiError, Error};
use crate::events::dto::{EventPayload, MessageResponse};
use crate::events::repo_types::Event;
use crate::state::AppState;

// Ids arrive as text so a bad id gets the fixed error body instead of the
// framework's plain-text rejection.
fn parse_event_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::bad_request("Invalid event ID"))
}

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/:id", get(get_event))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event))
        .route("/events/:id", put(update_event).delete(delete_event))
        .route(
            "/events/:id/register",
            post(register_for_event).delete(unregister_from_event),
        )
}

#[instrument(skip(state))]
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, ApiError> {
    let events = Event::all(&state.db).await.map_err(|e| {
        error!(error = %e, "list events failed");
        ApiError::internal("Could not fetch events")
    })?;
    Ok(Json(events))
}

#[instrument(skip(state))]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    let id = parse_event_id(&id)?;
    let event = Event::by_id(&state.db, id).await.map_err(|e| match e {
        Error::EventNotFound => ApiError::not_found("Event not found"),
        other => {
            error!(error = %other, event_id = id, "load event failed");
            ApiError::internal("Could not fetch event")
        }
    })?;
    Ok(Json(event))
}

#[instrument(skip(state, payload))]
pub async fn create_event(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<EventPayload>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let event = payload.into_event(0, user_id).map_err(ApiError::Validation)?;

    let event = Event::create(&state.db, &event).await.map_err(|e| {
        error!(error = %e, user_id, "create event failed");
        ApiError::internal("Event could not be created")
    })?;

    info!(event_id = event.id, user_id, "event created");
    Ok((StatusCode::CREATED, Json(event)))
}

#[instrument(skip(state, payload))]
pub async fn update_event(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<EventPayload>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_event_id(&id)?;

    // Ownership is settled before the body is looked at.
    let existing = Event::by_id(&state.db, id).await.map_err(|e| match e {
        Error::EventNotFound => ApiError::not_found("Event not found"),
        other => {
            error!(error = %other, event_id = id, "load event failed");
            ApiError::internal("Event could not be updated")
        }
    })?;
    if existing.user_id != user_id {
        warn!(event_id = id, user_id, owner = existing.user_id, "update rejected: not the owner");
        return Err(ApiError::forbidden("Not allowed to modify this event"));
    }

    let updated = payload.into_event(id, user_id).map_err(ApiError::Validation)?;
    Event::update(&state.db, &updated).await.map_err(|e| {
        error!(error = %e, event_id = id, "update event failed");
        ApiError::internal("Event could not be updated")
    })?;

    info!(event_id = id, user_id, "event updated");
    Ok(Json(MessageResponse {
        message: "Event updated successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_event_id(&id)?;
    let existing = Event::by_id(&state.db, id).await.map_err(|e| match e {
        Error::EventNotFound => ApiError::not_found("Event not found"),
        other => {
            error!(error = %other, event_id = id, "load event failed");
            ApiError::internal("Event could not be deleted")
        }
    })?;
    if existing.user_id != user_id {
        warn!(event_id = id, user_id, owner = existing.user_id, "delete rejected: not the owner");
        return Err(ApiError::forbidden("Not allowed to modify this event"));
    }

    Event::delete(&state.db, id).await.map_err(|e| {
        error!(error = %e, event_id = id, "delete event failed");
        ApiError::internal("Event could not be deleted")
    })?;

    info!(event_id = id, user_id, "event deleted");
    Ok(Json(MessageResponse {
        message: "Event deleted successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn register_for_event(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let id = parse_event_id(&id)?;
    let event = Event::by_id(&state.db, id).await.map_err(|e| {
        match &e {
            Error::EventNotFound => warn!(event_id = id, "register for unknown event"),
            other => error!(error = %other, event_id = id, "load event failed"),
        }
        ApiError::internal("Event not found")
    })?;

    Event::register(&state.db, event.id, user_id)
        .await
        .map_err(|e| {
            match &e {
                Error::DuplicateRegistration => {
                    warn!(event_id = id, user_id, "already registered")
                }
                other => error!(error = %other, event_id = id, user_id, "register failed"),
            }
            ApiError::internal("Could not register for event")
        })?;

    info!(event_id = id, user_id, "registered for event");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Event registered successfully".into(),
        }),
    ))
}

#[instrument(skip(state))]
pub async fn unregister_from_event(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_event_id(&id)?;
    let event = Event::by_id(&state.db, id).await.map_err(|e| {
        match &e {
            Error::EventNotFound => warn!(event_id = id, "unregister from unknown event"),
            other => error!(error = %other, event_id = id, "load event failed"),
        }
        ApiError::internal("Event not found")
    })?;

    Event::unregister(&state.db, event.id, user_id)
        .await
        .map_err(|e| {
            error!(error = %e, event_id = id, user_id, "unregister failed");
            ApiError::internal("Could not unregister from event")
        })?;

    info!(event_id = id, user_id, "unregistered from event");
    Ok(Json(MessageResponse {
        message: "Event unregistered successfully".into(),
    }))
}
