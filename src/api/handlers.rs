use axum::{
    body::Bytes,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tower::ServiceExt;

use super::error::RelayError;
use super::types::{parse_chat_request, ChatReply, ConfigResponse, ErrorBody, HealthResponse};
use super::ServerState;
use crate::prompt::with_system_prompt;

/// Reply text used when the provider answers without any content.
pub const EMPTY_REPLY: &str = "No response.";

/// Handles chat requests: prepends the system instruction and forwards the
/// conversation to the upstream provider.
///
/// # Returns
/// * `Ok(Json<ChatReply>)` - The first choice's text
/// * `Err(RelayError)` - Configuration (500), validation (400) or upstream failure
///
/// The credential is checked before the body, and neither failure reaches the
/// upstream provider.
pub async fn handle_chat(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<ChatReply>, RelayError> {
    let provider = state.provider.as_ref().ok_or_else(|| {
        RelayError::Configuration(state.backend.missing_key_message().to_string())
    })?;

    let conversation = parse_chat_request(&body).map_err(|e| {
        log::debug!("rejected chat request: {e}");
        e
    })?;

    let messages = with_system_prompt(&state.session, conversation);
    log::debug!(
        "forwarding {} messages to {}",
        messages.len(),
        provider.name()
    );

    let response = provider.chat(&messages).await.map_err(|e| {
        log::error!("{} call failed: {e}", provider.name());
        RelayError::from(e)
    })?;

    Ok(Json(ChatReply {
        message: response.text().unwrap_or_else(|| EMPTY_REPLY.to_string()),
    }))
}

/// Serves the read-only session descriptor.
pub async fn handle_config(State(state): State<ServerState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        topic: state.session.topic().map(str::to_string),
    })
}

pub async fn handle_health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        provider: state.backend.id().to_string(),
        topic: state.session.topic().map(str::to_string),
        company_context: state.session.has_knowledge(),
    })
}

/// Catch-all for unrouted requests.
///
/// Anything under the `/api` prefix (including `/api` itself and look-alikes
/// such as `/apiv2`) gets a JSON 404 and never reaches the front-end's
/// `index.html`. Everything else is served from the static directory when one
/// is configured.
pub async fn handle_fallback(State(state): State<ServerState>, req: Request) -> Response {
    if is_api_path(req.uri().path()) {
        return api_not_found().into_response();
    }

    match state.static_files {
        Some(files) => match files.oneshot(req).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        },
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn is_api_path(path: &str) -> bool {
    path.starts_with("/api")
}

fn api_not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found".to_string(),
        }),
    )
}
