use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use cutting_plan::{CuttingPlan, FurnitureModule, PlanConfig, PlanError, build_plan};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct PlanRequest {
    modules: Vec<FurnitureModule>,
    #[serde(default)]
    config: PlanConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    module_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    part: Option<String>,
}

impl From<&PlanError> for ErrorResponse {
    fn from(err: &PlanError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
            module_id: err.module_id().map(str::to_string),
            part: err.part().map(|p| p.to_string()),
        }
    }
}

fn status_for(err: &PlanError) -> StatusCode {
    match err {
        PlanError::InvalidConfig(_) => StatusCode::BAD_REQUEST,
        PlanError::InvalidModuleGeometry { .. }
        | PlanError::PieceTooLarge { .. }
        | PlanError::InvalidPartCount { .. }
        | PlanError::TooManyPieces { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

async fn plan(
    Json(req): Json<PlanRequest>,
) -> Result<Json<CuttingPlan>, (StatusCode, Json<ErrorResponse>)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /plan"
    );

    build_plan(&req.modules, &req.config).map(Json).map_err(|e| {
        tracing::warn!(error = %e, "plan rejected");
        (status_for(&e), Json(ErrorResponse::from(&e)))
    })
}

async fn serve() -> std::io::Result<()> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/plan", post(plan))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await
}

fn main() {
    let _sentry = sentry::init((
        std::env::var("SENTRY_DSN").ok(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to start tokio runtime");

    if let Err(e) = runtime.block_on(serve()) {
        tracing::error!(error = %e, "server stopped");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
