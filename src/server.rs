use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::Request;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::error::ServeError;
use crate::puzzle::{Move, State, GOAL};
use crate::scramble::scramble;
use crate::search::{self, Solution};

const DEFAULT_SCRAMBLE_STEPS: usize = 20;

#[derive(Debug, Deserialize)]
struct SolveRequest {
    start: Vec<i64>,
}

#[derive(Debug, Serialize)]
struct SolveResponse {
    moves: Vec<State>,
    actions: Vec<Move>,
    cost: usize,
    expanded: usize,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl From<Solution> for SolveResponse {
    fn from(solution: Solution) -> Self {
        let message = if solution.found {
            None
        } else {
            Some("no solution found (start state is not reachable from the goal)".to_string())
        };
        SolveResponse {
            cost: solution.cost(),
            expanded: solution.expanded,
            ok: solution.found,
            moves: solution.path,
            actions: solution.actions,
            message,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ShuffleRequest {
    #[serde(default)]
    steps: i64,
}

#[derive(Debug, Serialize)]
struct StateResponse {
    state: State,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Error)]
enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("solver task failed: {0}")]
    Internal(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

async fn handle_init() -> Json<StateResponse> {
    Json(StateResponse { state: GOAL })
}

async fn handle_shuffle(
    payload: Result<Json<ShuffleRequest>, JsonRejection>,
) -> Result<Json<StateResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        debug!(%rejection, "rejected shuffle request");
        ApiError::BadRequest("invalid JSON".to_string())
    })?;
    let steps = if req.steps <= 0 {
        DEFAULT_SCRAMBLE_STEPS
    } else {
        req.steps as usize
    };
    let state = tokio::task::spawn_blocking(move || scramble(steps)).await?;
    info!(steps, "shuffle request served");
    Ok(Json(StateResponse { state }))
}

async fn handle_solve(
    payload: Result<Json<SolveRequest>, JsonRejection>,
) -> Result<Json<SolveResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        debug!(%rejection, "rejected solve request");
        ApiError::BadRequest("invalid JSON".to_string())
    })?;
    let start = State::try_from(req.start.as_slice()).map_err(|err| {
        debug!(%err, "rejected solve request");
        ApiError::BadRequest(err.to_string())
    })?;

    // Each search owns its frontier and bookkeeping, so concurrent requests
    // share nothing. Run on the blocking pool to keep worker threads free.
    let solution = tokio::task::spawn_blocking(move || search::solve(start)).await?;
    info!(
        cost = solution.cost(),
        expanded = solution.expanded,
        found = solution.found,
        "solve request served"
    );
    Ok(Json(SolveResponse::from(solution)))
}

fn apply_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,POST,OPTIONS"),
    );
    response
}

async fn with_cors(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return apply_cors_headers(StatusCode::OK.into_response());
    }
    apply_cors_headers(next.run(request).await)
}

/// The API surface: `GET /api/init`, `POST /api/shuffle`, `POST /api/solve`,
/// all behind a permissive CORS layer.
pub fn router() -> Router {
    Router::new()
        .route("/api/init", get(handle_init))
        .route("/api/shuffle", post(handle_shuffle))
        .route("/api/solve", post(handle_solve))
        .layer(middleware::from_fn(with_cors))
}

/// Bind and serve the API until the process is stopped.
pub async fn serve(addr: SocketAddr) -> Result<(), ServeError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "8-puzzle API listening");
    axum::serve(listener, router()).await?;
    Ok(())
}
