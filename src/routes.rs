use axum::{
    extract::State,
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::ProxyError;
use crate::state::AppState;
use crate::text_correction::{CorrectionRequest, CorrectionResult};
use crate::translate::{BilingualMessage, TranslationRequest, TranslationResult};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/api/health", get(health_check))
        .route("/translate", post(translate_text))
        .route("/translate/pair", post(translate_pair))
        .route("/correct", post(correct_text))
}

/// Full application: routes, CORS and request tracing, bound to `state`.
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.system_config.cors_allowed_origins);

    Router::new()
        .merge(create_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        warn!("CORS is permissive: any origin, method and header is allowed");
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn translate_text(
    State(state): State<AppState>,
    Json(request): Json<TranslationRequest>,
) -> Result<Json<TranslationResult>, ProxyError> {
    let cancel = state.shutdown.child_token();
    let result = state
        .translator
        .translate(&request.text, &request.lang, &cancel)
        .await;

    let translated_text = match result {
        Ok(text) => text,
        Err(e) if state.config.system_config.legacy_error_strings => {
            warn!("Translation failed, answering with legacy string: {}", e);
            e.legacy_message()
        }
        Err(e) => {
            warn!("Translation failed: {}", e);
            return Err(e);
        }
    };

    Ok(Json(TranslationResult { translated_text }))
}

/// Translate a chat message and return it in both languages.
async fn translate_pair(
    State(state): State<AppState>,
    Json(request): Json<TranslationRequest>,
) -> Result<Json<BilingualMessage>, ProxyError> {
    let cancel = state.shutdown.child_token();
    let translated = state
        .translator
        .translate(&request.text, &request.lang, &cancel)
        .await
        .map_err(|e| {
            warn!("Pair translation failed: {}", e);
            e
        })?;

    Ok(Json(BilingualMessage::pair(
        request.text,
        &request.lang,
        translated,
    )))
}

async fn correct_text(
    State(state): State<AppState>,
    Json(request): Json<CorrectionRequest>,
) -> Result<Json<CorrectionResult>, ProxyError> {
    let cancel = state.shutdown.child_token();
    let corrected_text = state
        .text_corrector
        .correct(&request.text, &cancel)
        .await
        .map_err(|e| {
            warn!("Text correction failed: {}", e);
            e
        })?;

    Ok(Json(CorrectionResult { corrected_text }))
}
