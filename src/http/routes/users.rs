//! User endpoints
//!
//! Five handlers, each a straight mapping from the parsed request to a
//! repository call and from its result to a response. Create makes two
//! sequential store calls (email pre-check, then insert); the rest make one.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::{User, UserRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Request body for create and update.
///
/// All fields are optional at the wire level: create checks presence by
/// hand, update writes whatever arrived straight through.
#[derive(Deserialize)]
pub struct UserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

/// Delete confirmation body
#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// Path ids arrive as raw segments; anything non-numeric is rejected
/// before the store is touched.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidUserId)
}

/// GET / - all users, store-default order
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserRepo::new(state.pool()).list().await?;
    Ok(Json(users))
}

/// GET /{id} - single user by id
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_id(&id)?;
    let user = UserRepo::new(state.pool()).get(id).await?;
    Ok(Json(user))
}

/// POST / - validate presence, pre-check the email, insert
async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<UserPayload>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    // name/email must be present and non-empty; age only present (zero is fine)
    let (name, email, age) = match (&body.name, &body.email, body.age) {
        (Some(name), Some(email), Some(age)) if !name.is_empty() && !email.is_empty() => {
            (name.as_str(), email.as_str(), age)
        }
        _ => return Err(ApiError::MissingFields),
    };

    let repo = UserRepo::new(state.pool());

    // Check-then-insert, not atomic: a concurrent create that wins the race
    // leaves this insert to trip the store's unique constraint, which maps
    // to a 500 rather than this 400.
    if repo.find_by_email(email).await?.is_some() {
        return Err(ApiError::EmailExists);
    }

    let user = repo.insert(name, email, age).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /{id} - unconditional overwrite of all three fields
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UserPayload>,
) -> Result<Json<User>, ApiError> {
    let id = parse_id(&id)?;
    let user = UserRepo::new(state.pool())
        .update(id, body.name.as_deref(), body.email.as_deref(), body.age)
        .await?;
    Ok(Json(user))
}

/// DELETE /{id}
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&id)?;
    UserRepo::new(state.pool()).delete(id).await?;
    Ok(Json(DeleteResponse {
        message: "User deleted",
    }))
}

/// User routes.
///
/// The collection is registered under both `/api/users` and `/api/users/`;
/// the router treats those as distinct paths and clients use both.
pub fn router() -> Router<AppState> {
    let collection = get(list_users).post(create_user);
    Router::new()
        .route("/api/users", collection.clone())
        .route("/api/users/", collection)
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_parse() {
        assert!(matches!(parse_id("1"), Ok(1)));
        assert!(matches!(parse_id("42"), Ok(42)));
        assert!(matches!(parse_id("-7"), Ok(-7)));
    }

    #[test]
    fn non_numeric_ids_are_rejected() {
        for raw in ["abc", "12abc", "1.5", "", " "] {
            assert!(matches!(parse_id(raw), Err(ApiError::InvalidUserId)), "{raw:?}");
        }
    }
}
