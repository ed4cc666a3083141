use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::error::{ErrorKind, LookupError};
use crate::health::HealthMonitor;
use crate::model::{BibleChapter, HealthReport, HealthStatus};
use crate::resolver::Resolver;
use scripture_common::mcp_api::{BookListResponse, BookSummary};

#[derive(Clone)]
pub struct HttpState {
    resolver: Resolver,
    monitor: Arc<HealthMonitor>,
}

impl HttpState {
    pub fn new(resolver: Resolver, monitor: Arc<HealthMonitor>) -> Self {
        Self { resolver, monitor }
    }
}

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/chapter", get(get_chapter))
        .route("/bible/{code}/{chapter}", get(get_chapter_by_code))
        .route("/books", get(get_books))
        .route("/health", get(get_health))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: HttpState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(listen_addr = %addr, "REST API ready");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ChapterQuery {
    reference: String,
}

async fn get_chapter(
    State(state): State<HttpState>,
    Query(query): Query<ChapterQuery>,
) -> Result<Json<BibleChapter>, ApiError> {
    let chapter = state.resolver.fetch_chapter(&query.reference).await?;
    Ok(Json(chapter))
}

async fn get_chapter_by_code(
    State(state): State<HttpState>,
    Path((code, chapter)): Path<(String, u32)>,
) -> Result<Json<BibleChapter>, ApiError> {
    let chapter = state.resolver.fetch_by_code(&code, chapter).await?;
    Ok(Json(chapter))
}

async fn get_books(State(state): State<HttpState>) -> Json<BookListResponse> {
    let books = state
        .resolver
        .registry()
        .all_books()
        .iter()
        .map(|b| b.summary())
        .collect();
    Json(BookListResponse { books })
}

async fn get_health(State(state): State<HttpState>) -> (StatusCode, Json<HealthReport>) {
    let report = state.monitor.check().await;
    let status = match report.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(report))
}

/// Maps an error category onto an HTTP status.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Input | ErrorKind::Range => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Network => StatusCode::BAD_GATEWAY,
        ErrorKind::Extraction => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    candidates: Option<Vec<BookSummary>>,
}

pub struct ApiError(LookupError);

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        let status = status_for(kind);
        if status.is_server_error() || status == StatusCode::BAD_GATEWAY {
            warn!(error = %self.0, kind = kind.as_str(), "chapter request failed");
        }
        let body = ErrorBody {
            error: self.0.to_string(),
            kind,
            candidates: self.0.candidates().map(<[BookSummary]>::to_vec),
        };
        (status, Json(body)).into_response()
    }
}
