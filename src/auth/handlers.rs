use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::auth::dto::{LoginRequest, LoginResponse, MessageResponse, SignupRequest};
use crate::auth::repo_types::User;
use crate::auth::services::JwtKeys;
use crate::error::{ApiError, Error};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let user = User::create(&state.db, &payload.email, &payload.password)
        .await
        .map_err(|e| {
            match &e {
                Error::DuplicateEmail => warn!(email = %payload.email, "email already taken"),
                other => error!(error = %other, "create user failed"),
            }
            ApiError::internal("User could not be saved")
        })?;

    info!(user_id = user.id, email = %user.email, "user signed up");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created successfully".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    // Every credential failure reads the same to the caller.
    let user = User::validate_credentials(&state.db, &payload.email, &payload.password)
        .await
        .map_err(|e| {
            match &e {
                Error::InvalidCredentials => warn!(email = %payload.email, "login rejected"),
                other => error!(error = %other, "credential check failed"),
            }
            ApiError::unauthorized("Invalid credentials")
        })?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user.email, user.id).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        ApiError::internal("Could not generate token")
    })?;

    info!(user_id = user.id, "user logged in");
    Ok(Json(LoginResponse {
        message: "User logged in successfully".into(),
        token,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_carries_token() {
        let response = LoginResponse {
            message: "User logged in successfully".into(),
            token: "abc".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""token":"abc""#));
        assert!(json.contains("User logged in successfully"));
    }

    #[test]
    fn user_json_never_exposes_password_hash() {
        let user = User {
            id: 1,
            email: "a@x.com".into(),
            password_hash: "$argon2id$secret".into(),
            created_at: time::OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
    }
}
