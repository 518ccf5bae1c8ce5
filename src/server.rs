//! HTTP serving layer.
//!
//! Exposes the prediction service over three routes:
//! - `GET /` — the bundled demo page
//! - `GET /api/models` — fitted model artifacts available for prediction
//! - `POST /api/predict` — run the prediction pipeline on a JSON body

use crate::error::PredictError;
use crate::features::RawFeatures;
use crate::service::PredictionService;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, Serialize)]
struct ModelsResponse {
    models: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PredictResponse {
    prediction: f64,
    model_used: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// HTTP-facing wrapper that maps [`PredictError`] to a status code.
struct ApiError(PredictError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PredictError::MissingField(_) | PredictError::InvalidField { .. } => {
                StatusCode::BAD_REQUEST
            }
            PredictError::ArtifactNotFound(_) => StatusCode::NOT_FOUND,
            PredictError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<PredictError> for ApiError {
    fn from(err: PredictError) -> Self {
        ApiError(err)
    }
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn list_models(
    State(service): State<Arc<PredictionService>>,
) -> Result<Json<ModelsResponse>, ApiError> {
    let models = service.available_models()?;
    Ok(Json(ModelsResponse { models }))
}

async fn predict(
    State(service): State<Arc<PredictionService>>,
    Json(raw): Json<RawFeatures>,
) -> Result<Json<PredictResponse>, ApiError> {
    let result = service.predict(&raw)?;
    Ok(Json(PredictResponse {
        prediction: result.value,
        model_used: result.model_used,
    }))
}

/// Build the application router.
pub fn build_router(service: Arc<PredictionService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/api/models", get(list_models))
        .route("/api/predict", post(predict))
        .layer(cors)
        .with_state(service)
}

/// Bind and serve until the process is stopped.
pub async fn serve(service: Arc<PredictionService>, port: u16) -> std::io::Result<()> {
    let app = build_router(service);
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    println!("Serving on http://{}", addr);
    axum::serve(listener, app).await
}
