use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use code_copilot::{
    AnalysisReport, ChatReply, CodeCopilotService, ExecutionRequest, ExecutionResult, ServiceConfig,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::{net::SocketAddr, sync::Arc};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Service error: {0}")]
    Service(#[from] code_copilot::Error),
    #[error("Model backend error: {0}")]
    Upstream(code_copilot::Error),
    #[error("Server error: {0}")]
    ServerError(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::Upstream(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            ServerError::Service(_) | ServerError::ServerError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RunCodeRequest {
    pub language: String,
    pub code: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AnalyzeCodeRequest {
    pub language: String,
    pub code: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AskRequest {
    pub query: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GenerateCodeRequest {
    pub task: String,
    #[serde(default = "default_generation_language")]
    pub language: String,
    #[serde(default)]
    pub model: Option<String>,
}

fn default_generation_language() -> String {
    "java".to_string()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GenerateCodeResponse {
    pub code: String,
}

#[derive(Clone)]
pub struct AppState {
    service: Arc<CodeCopilotService>,
}

pub fn create_app(config: ServiceConfig) -> Result<Router, ServerError> {
    let service = CodeCopilotService::new(config).map_err(ServerError::Service)?;
    Ok(router(service))
}

/// Router over an already constructed service
pub fn router(service: CodeCopilotService) -> Router {
    let state = AppState {
        service: Arc::new(service),
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/ping", get(ping))
        .route("/run_code", post(run_code))
        .route("/check_syntax", post(check_syntax))
        .route("/analyze_code", post(analyze_code))
        .route("/ask", post(ask))
        .route("/chat", post(chat))
        .route("/generate_code", post(generate_code))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), ServerError> {
    info!("Starting code copilot server on {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    Ok(())
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Code copilot API is running." }))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

fn validate(code: &str) -> Result<(), ServerError> {
    require("code", code)
}

fn require(field: &str, value: &str) -> Result<(), ServerError> {
    if value.trim().is_empty() {
        return Err(ServerError::InvalidRequest(format!("{} must not be empty", field)));
    }
    Ok(())
}

async fn run_code(
    State(state): State<AppState>,
    Json(payload): Json<RunCodeRequest>,
) -> Result<Json<ExecutionResult>, ServerError> {
    validate(&payload.code)?;
    debug!("run_code request for {}", payload.language);

    let request = ExecutionRequest::new(payload.language, payload.code);
    Ok(Json(state.service.execute(&request).await))
}

async fn check_syntax(
    State(state): State<AppState>,
    Json(payload): Json<RunCodeRequest>,
) -> Result<Json<ExecutionResult>, ServerError> {
    validate(&payload.code)?;
    debug!("check_syntax request for {}", payload.language);

    let request = ExecutionRequest::new(payload.language, payload.code);
    Ok(Json(state.service.check_syntax(&request).await))
}

async fn analyze_code(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeCodeRequest>,
) -> Result<Json<AnalysisReport>, ServerError> {
    validate(&payload.code)?;
    debug!("analyze_code request for {}", payload.language);

    let request = ExecutionRequest::new(payload.language, payload.code);
    let report = state
        .service
        .analyze(&request, payload.model.as_deref())
        .await;

    Ok(Json(report))
}

async fn ask(
    State(state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>, ServerError> {
    require("query", &payload.query)?;

    let answer = state
        .service
        .ask(&payload.query, payload.model.as_deref())
        .await
        .map_err(ServerError::Upstream)?;

    Ok(Json(AskResponse { answer }))
}

async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ServerError> {
    require("message", &payload.message)?;

    let reply = state
        .service
        .chat(&payload.message, payload.model.as_deref())
        .await
        .map_err(ServerError::Upstream)?;

    Ok(Json(reply))
}

async fn generate_code(
    State(state): State<AppState>,
    Json(payload): Json<GenerateCodeRequest>,
) -> Result<Json<GenerateCodeResponse>, ServerError> {
    require("task", &payload.task)?;
    debug!("generate_code request for {}", payload.language);

    let code = state
        .service
        .generate_code(&payload.task, &payload.language, payload.model.as_deref())
        .await
        .map_err(ServerError::Upstream)?;

    Ok(Json(GenerateCodeResponse { code }))
}
