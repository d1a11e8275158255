//! scrollwise-api - HTTP API server for scrollwise

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrollwise_core::{
    BookmarkRepository, CollectionRepository, CreateBookmarkRequest, TagRepository,
    UpdateBookmarkRequest,
};
use scrollwise_db::{Database, DbConfig};
use scrollwise_inference::{OpenAIBackend, Summarizer, TranscriptClient};

/// Maximum accepted request body size in bytes.
const MAX_BODY_BYTES: usize = 256 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    db: Database,
    summarizer: Arc<Summarizer<OpenAIBackend>>,
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

/// API-layer error with an HTTP status mapping.
#[derive(Debug)]
enum ApiError {
    /// Storage or external-service fault, surfaced as 500.
    Internal(scrollwise_core::Error),
    NotFound(String),
    BadRequest(String),
}

impl From<scrollwise_core::Error> for ApiError {
    fn from(err: scrollwise_core::Error) -> Self {
        match &err {
            scrollwise_core::Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            scrollwise_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            // Transcript faults are bad-input conditions: the video has no
            // usable captions, or the URL points nowhere.
            scrollwise_core::Error::Transcript(msg) => ApiError::BadRequest(msg.clone()),
            _ => ApiError::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

/// Body for POST /bookmarks. `text` is validated here so a missing field is
/// a 400, not a deserialization rejection.
#[derive(Debug, Deserialize)]
struct CreateBookmarkBody {
    text: Option<String>,
    title: Option<String>,
    collection_id: Option<i64>,
    #[serde(default)]
    tag_ids: Vec<i64>,
}

/// Body for PUT /bookmarks/{id}. All fields optional; a present `tag_ids`
/// replaces the whole tag set.
#[derive(Debug, Deserialize)]
struct UpdateBookmarkBody {
    title: Option<String>,
    collection_id: Option<i64>,
    tag_ids: Option<Vec<i64>>,
}

/// Body for POST /collections and POST /tags.
#[derive(Debug, Deserialize)]
struct CreateNamedBody {
    name: Option<String>,
}

/// Body for POST /summarize: the URL travels in `text`.
#[derive(Debug, Deserialize)]
struct SummarizeBody {
    text: Option<String>,
}

/// Pull a required non-empty string field out of a body, or fail with 400.
fn require_field(value: Option<String>, message: &str) -> Result<String, ApiError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ApiError::BadRequest(message.to_string())),
    }
}

// =============================================================================
// BOOKMARK HANDLERS
// =============================================================================

async fn create_bookmark(
    State(state): State<AppState>,
    Json(body): Json<CreateBookmarkBody>,
) -> Result<impl IntoResponse, ApiError> {
    let text = require_field(body.text, "Text is required")?;

    let id = state
        .db
        .bookmarks
        .create(CreateBookmarkRequest {
            text,
            title: body.title,
            collection_id: body.collection_id,
            tag_ids: body.tag_ids,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": id,
            "message": "Bookmark saved successfully",
        })),
    ))
}

async fn get_bookmark(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let bookmark = state
        .db
        .bookmarks
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Bookmark not found".to_string()))?;
    Ok(Json(bookmark))
}

async fn list_bookmarks(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let bookmarks = state.db.bookmarks.list().await?;
    Ok(Json(bookmarks))
}

async fn update_bookmark(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateBookmarkBody>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .db
        .bookmarks
        .update(
            id,
            UpdateBookmarkRequest {
                title: body.title,
                collection_id: body.collection_id,
                tag_ids: body.tag_ids,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({
        "message": "Bookmark updated successfully",
    })))
}

async fn list_bookmarks_by_tag(
    State(state): State<AppState>,
    Path(tag_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let bookmarks = state.db.bookmarks.list_by_tag(tag_id).await?;
    Ok(Json(bookmarks))
}

async fn list_bookmarks_by_collection(
    State(state): State<AppState>,
    Path(collection_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let bookmarks = state.db.bookmarks.list_by_collection(collection_id).await?;
    Ok(Json(bookmarks))
}

// =============================================================================
// COLLECTION / TAG HANDLERS
// =============================================================================

async fn list_collections(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let collections = state.db.collections.list().await?;
    Ok(Json(collections))
}

async fn create_collection(
    State(state): State<AppState>,
    Json(body): Json<CreateNamedBody>,
) -> Result<impl IntoResponse, ApiError> {
    let name = require_field(body.name, "Collection name is required")?;
    let id = state.db.collections.create(&name).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": id,
            "message": "Collection created successfully",
        })),
    ))
}

async fn list_tags(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let tags = state.db.tags.list().await?;
    Ok(Json(tags))
}

async fn create_tag(
    State(state): State<AppState>,
    Json(body): Json<CreateNamedBody>,
) -> Result<impl IntoResponse, ApiError> {
    let name = require_field(body.name, "Tag name is required")?;
    let id = state.db.tags.create(&name).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": id,
            "message": "Tag created successfully",
        })),
    ))
}

// =============================================================================
// SUMMARIZATION HANDLER
// =============================================================================

async fn summarize(
    State(state): State<AppState>,
    Json(body): Json<SummarizeBody>,
) -> Result<impl IntoResponse, ApiError> {
    let url = require_field(body.text, "Text is required")?;

    let summary = state.summarizer.summarize(&url).await?;
    Ok(Json(serde_json::json!({ "summary": summary })))
}

// =============================================================================
// SYSTEM
// =============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/bookmarks", post(create_bookmark).get(list_bookmarks))
        .route("/bookmarks/:id", get(get_bookmark).put(update_bookmark))
        .route(
            "/collections",
            get(list_collections).post(create_collection),
        )
        .route("/collections/:id/bookmarks", get(list_bookmarks_by_collection))
        .route("/tags", get(list_tags).post(create_tag))
        .route("/tags/:id/bookmarks", get(list_bookmarks_by_tag))
        .route("/summarize", post(summarize))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   RUST_LOG    - standard env filter (default: "scrollwise_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "scrollwise_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("scrollwise-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(non_blocking),
                )
                .init();
        }
        Some(guard)
    } else if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
        None
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
        None
    };

    // Connection target: DATABASE_URL wins, otherwise the POSTGRES_* parts.
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DbConfig::from_env().url());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "5000".to_string())
        .parse()
        .unwrap_or(5000);

    info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;
    info!("Database connected");

    // Schema initialization is idempotent; failure here aborts startup.
    db.initialize_schema().await?;
    info!("Schema initialized");

    let summarizer = Arc::new(Summarizer::new(
        TranscriptClient::from_env()?,
        OpenAIBackend::from_env()?,
    ));

    let state = AppState { db, summarizer };
    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("scrollwise-api listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from(scrollwise_core::Error::NotFound("gone".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_input_maps_to_400() {
        let err = ApiError::from(scrollwise_core::Error::InvalidInput("bad".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_transcript_fault_maps_to_400() {
        let err = ApiError::from(scrollwise_core::Error::Transcript(
            "captions disabled".to_string(),
        ));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_inference_fault_maps_to_500() {
        let err = ApiError::from(scrollwise_core::Error::Inference("down".to_string()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_require_field_rejects_missing_and_blank() {
        assert!(require_field(None, "Text is required").is_err());
        assert!(require_field(Some("   ".to_string()), "Text is required").is_err());
        assert_eq!(
            require_field(Some("ok".to_string()), "Text is required").unwrap(),
            "ok"
        );
    }
}
