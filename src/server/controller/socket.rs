use axum::{
    extract::{ws::WebSocketUpgrade, State},
    response::IntoResponse,
};

use crate::server::{realtime::session, state::AppState};

/// Tag for grouping realtime endpoints in OpenAPI documentation
pub static REALTIME_TAG: &str = "realtime";

/// Upgrade to the realtime WebSocket.
///
/// Clients send `join-poll` and `leave-poll` frames, then receive `vote-update`
/// and `poll-closed` events for the polls they joined. No authentication.
#[utoipa::path(
    get,
    path = "/socket",
    tag = REALTIME_TAG,
    responses(
        (status = 101, description = "Switching to the WebSocket protocol"),
        (status = 400, description = "Not a WebSocket upgrade request")
    ),
)]
pub async fn upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    let hub = state.hub.clone();
    ws.on_upgrade(move |socket| session::run(socket, hub))
}
