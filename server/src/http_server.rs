use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use minutes_core::{
    validate_analysis_input, validate_input, MeetingAnalysis, MinutesError, NotesAnalyzerRef,
    TaskResult, TaskSummarizerRef, EXTRACTION_FAILED_MESSAGE,
};
use minutes_records::{MeetingRecords, StoreError, StoredRecord};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

const SUMMARIZE_INTERNAL_ERROR: &str = "Internal Server Error";
const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again.";
const RECORDS_ERROR: &str = "Failed to access saved records";

/// Largest request body accepted; images arrive base64-encoded inside JSON
pub const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// Application state shared with all routes
#[derive(Clone)]
pub struct AppState {
    analyzer: NotesAnalyzerRef,
    summarizer: TaskSummarizerRef,
    records: Arc<MeetingRecords>,
}

impl AppState {
    pub fn new(
        analyzer: NotesAnalyzerRef,
        summarizer: TaskSummarizerRef,
        records: Arc<MeetingRecords>,
    ) -> Self {
        Self {
            analyzer,
            summarizer,
            records,
        }
    }
}

/// Body of `POST /api/analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    content: String,
    /// Image as a `data:<mime>;base64,<data>` URI
    #[serde(default)]
    image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: String,
}

/// Error type for HTTP server
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    ExtractionFailed(String),
    /// The request body could not be read, e.g. it exceeds the size limit
    Rejected { status: StatusCode, message: String },
    /// Logged with full detail, reported to the client as `public` only
    InternalError {
        public: &'static str,
        source: anyhow::Error,
    },
}

impl ApiError {
    fn internal(public: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::InternalError {
            public,
            source: source.into(),
        }
    }

    fn from_analysis(e: MinutesError) -> Self {
        match e {
            e if e.is_user_error() => Self::BadRequest(e.to_string()),
            MinutesError::ExtractionFailed => {
                Self::ExtractionFailed(EXTRACTION_FAILED_MESSAGE.to_string())
            }
            e => Self::internal(UNEXPECTED_ERROR, e),
        }
    }

    fn from_rejection(rejection: BytesRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }

    fn from_store(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(msg) => Self::NotFound(msg),
            e => Self::internal(RECORDS_ERROR, e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::ExtractionFailed(message) => {
                warn!("Extraction failed: {}", message);
                (StatusCode::BAD_GATEWAY, message)
            }
            Self::Rejected { status, message } => {
                warn!(status = status.as_u16(), "Rejected request body: {}", message);
                (status, message)
            }
            Self::InternalError { public, source } => {
                error!(error = %source, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, public.to_string())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Build the router with all routes attached
pub fn router(state: AppState) -> Router {
    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .route("/api/summarize", post(handle_summarize))
        .route("/api/analyze", post(handle_analyze))
        .route("/api/records", get(list_records).post(create_record))
        .route(
            "/api/records/:index",
            put(update_record).delete(delete_record),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn run_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    info!("Starting HTTP server on {}", addr);

    axum::Server::bind(&addr)
        .serve(router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start HTTP server: {}", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}

/// Health check handler
async fn health() -> impl IntoResponse {
    "Minute Master is running"
}

fn parse_body<T: DeserializeOwned>(body: Result<Bytes, BytesRejection>) -> Result<T, ApiError> {
    let body = body.map_err(ApiError::from_rejection)?;
    serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))
}

fn parse_index(raw: &str) -> Result<usize, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid record index: {}", raw)))
}

/// Summarize text into `{summary, tasks}`.
///
/// A missing or null `text` is validated as empty text. A body that is not
/// JSON, or a `text` that is not a string, is reported as an internal error.
async fn handle_summarize(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<TaskResult>, ApiError> {
    let body = body.map_err(ApiError::from_rejection)?;
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::internal(SUMMARIZE_INTERNAL_ERROR, e))?;
    let text = match payload.get("text") {
        None | Some(Value::Null) => "",
        Some(Value::String(text)) => text.as_str(),
        Some(other) => {
            return Err(ApiError::internal(
                SUMMARIZE_INTERNAL_ERROR,
                anyhow::anyhow!("text is not a string: {}", other),
            ));
        }
    };

    validate_input(text).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let result = state
        .summarizer
        .summarize(text)
        .await
        .map_err(|e| ApiError::internal(SUMMARIZE_INTERNAL_ERROR, e))?;
    Ok(Json(result))
}

/// Extract a full meeting analysis from text and/or an image
async fn handle_analyze(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MeetingAnalysis>, ApiError> {
    let request: AnalyzeRequest = parse_body(body)?;
    let image = request.image.as_deref();

    validate_analysis_input(&request.content, image)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    info!(
        strategy = state.analyzer.strategy_name(),
        has_image = image.is_some(),
        "Analyzing notes"
    );
    let analysis = state
        .analyzer
        .analyze(&request.content, image)
        .await
        .map_err(ApiError::from_analysis)?;
    Ok(Json(analysis))
}

async fn list_records(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredRecord>>, ApiError> {
    let records = state.records.list().await.map_err(ApiError::from_store)?;
    Ok(Json(records))
}

async fn create_record(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<StoredRecord>), ApiError> {
    let analysis: MeetingAnalysis = parse_body(body)?;
    let record = state
        .records
        .save(analysis)
        .await
        .map_err(ApiError::from_store)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_record(
    State(state): State<AppState>,
    Path(index): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<StoredRecord>, ApiError> {
    let index = parse_index(&index)?;
    let analysis: MeetingAnalysis = parse_body(body)?;
    let record = state
        .records
        .update(index, analysis)
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(record))
}

async fn delete_record(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<StatusCode, ApiError> {
    let index = parse_index(&index)?;
    state
        .records
        .delete(index)
        .await
        .map_err(ApiError::from_store)?;
    Ok(StatusCode::NO_CONTENT)
}
