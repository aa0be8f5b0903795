//! Store bootstrap middleware.
//!
//! Makes sure the user store is connected before a handler runs. The first
//! request after startup (or after a failed attempt) pays for the connection.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

pub async fn ensure_connected(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.connection.is_connected()
        && let Err(e) = state.connection.store().await
    {
        return e.into_response();
    }

    next.run(request).await
}
