//! User CRUD request handlers.

use axum::{
    Json, Router,
    extract::{FromRequestParts, Path, State},
    http::{StatusCode, request::Parts},
    routing::get,
};
use uuid::Uuid;

use crate::api::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// Creates user-related routes.
///
/// Routes:
/// - GET /        - List all users
/// - POST /       - Create a new user
/// - GET /{id}    - Get user by ID
/// - PUT /{id}    - Update user by ID
/// - DELETE /{id} - Delete user by ID
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

/// An id that is not a UUID cannot name a stored user.
fn parse_user_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::user_not_found("id", raw))
}

/// `{id}` path segment as a user id.
///
/// Extracted from the request head, so an unknown id is reported before
/// the body is read or validated.
struct UserId(Uuid);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest {
                message: e.body_text(),
            })?;
        parse_user_id(&raw).map(UserId)
    }
}

/// GET /users - List all users
async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.services.users.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/{id} - Get user by ID
async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// POST /users - Create new user
///
/// Returns 201 Created with the stored user, including its new `_id`.
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .services
        .users
        .create_user(payload.into_new_user())
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// PUT /users/{id} - Update user
///
/// Applies only the supplied fields. Responds 200 with an empty body.
async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<StatusCode> {
    state
        .services
        .users
        .update_user(id, payload.into_update_user())
        .await?;
    Ok(StatusCode::OK)
}

/// DELETE /users/{id} - Delete user
async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<StatusCode> {
    state.services.users.delete_user(id).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_user_id(&id.to_string()).unwrap(), id);

        match parse_user_id("not-a-uuid") {
            Err(AppError::NotFound { field, value, .. }) => {
                assert_eq!(field, "id");
                assert_eq!(value, "not-a-uuid");
            }
            other => panic!("Expected NotFound error, got {:?}", other),
        }
    }
}
