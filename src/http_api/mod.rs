use std::{io, net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::export::{BackupFile, BackupFormat, BackupSink, ExportError, Exporter};
use crate::holiday::HolidayTable;
use crate::indicator::{ExportIndicator, ExportState, ResetTicket};
use crate::render::html::{CalendarPage, render_page};
use crate::sprint::SprintSection;
use crate::table::SprintTable;

#[derive(Clone)]
pub struct AppState {
    table: Arc<SprintTable>,
    holidays: Arc<HolidayTable>,
    exporter: Arc<Exporter>,
    indicator: Arc<RwLock<ExportIndicator>>,
    fallback_host: Arc<str>,
}

impl AppState {
    pub fn new(table: SprintTable, holidays: HolidayTable, exporter: Exporter, reset_delay: Duration) -> Self {
        Self {
            table: Arc::new(table),
            holidays: Arc::new(holidays),
            exporter: Arc::new(exporter),
            indicator: Arc::new(RwLock::new(ExportIndicator::new(reset_delay))),
            fallback_host: Arc::from("localhost"),
        }
    }

    pub fn with_fallback_host(mut self, host: impl AsRef<str>) -> Self {
        self.fallback_host = Arc::from(host.as_ref());
        self
    }

    pub fn export_state(&self) -> ExportState {
        self.indicator.read().state()
    }

    /// Generated fresh on every call; the table itself is never mutated.
    fn sections(&self) -> Vec<SprintSection> {
        self.table.generate(&self.holidays)
    }

    fn host(&self, headers: &HeaderMap) -> String {
        headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .filter(|host| !host.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.fallback_host.to_string())
    }

    fn schedule_reset(&self, ticket: ResetTicket) {
        let indicator = self.indicator.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ticket.delay()).await;
            indicator.write().expire(ticket);
        });
    }
}

/// Build the attachment header for a backup file. Names that cannot be
/// carried in a header mean the browser has nothing to save.
pub fn content_disposition(file: &BackupFile) -> Result<HeaderValue, ExportError> {
    HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file.file_name)).map_err(|err| {
        ExportError::DownloadUnavailable {
            target: file.file_name.clone().into(),
            source: io::Error::new(io::ErrorKind::InvalidInput, err),
        }
    })
}

/// The response body is the download; delivery fails only when the file
/// cannot be sent as an attachment.
struct ResponseSink;

impl BackupSink for ResponseSink {
    fn deliver(&self, file: &BackupFile) -> Result<(), ExportError> {
        content_disposition(file).map(|_| ())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Unavailable(String),
    Internal(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }

    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Unavailable(message) => {
                (StatusCode::SERVICE_UNAVAILABLE, "download_unavailable", message)
            }
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct ExportQuery {
    format: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(calendar_page))
        .route("/health", get(health))
        .route("/sprints", get(list_sprints))
        .route("/sprints/:id", get(get_sprint))
        .route("/holidays", get(list_holidays))
        .route("/holidays/:date", get(check_holiday))
        .route("/export", get(export_backup))
        .route("/export/status", get(export_status))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "calendar page listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn calendar_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let host = state.host(&headers);
    let reset_after = state.indicator.read().delay();
    let page = CalendarPage::new(&state.sections(), &host, state.export_state(), reset_after);
    let body = render_page(&page).map_err(|err| ApiError::internal(err.to_string()))?;
    Ok(Html(body))
}

async fn list_sprints(State(state): State<AppState>) -> Json<Vec<SprintSection>> {
    Json(state.sections())
}

async fn get_sprint(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SprintSection>, ApiError> {
    state
        .table
        .generate_one(&id, &state.holidays)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("sprint {id} not found")))
}

async fn list_holidays(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.holidays.keys())
}

async fn check_holiday(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::invalid(format!("invalid date '{date}' (expected YYYY-MM-DD)")))?;
    let holiday = state.holidays.contains(parsed);
    Ok(Json(json!({
        "date": parsed.format("%Y-%m-%d").to_string(),
        "holiday": holiday,
    })))
}

async fn export_backup(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let format = match query.format.as_deref() {
        Some(raw) => BackupFormat::from_str(raw).map_err(|err| ApiError::invalid(err.to_string()))?,
        None => BackupFormat::Json,
    };
    let host = state.host(&headers);
    let sections = state.sections();

    let outcome = {
        let mut indicator = state.indicator.write();
        state
            .exporter
            .export(&mut indicator, format, &host, &sections, &ResponseSink)
    };
    state.schedule_reset(outcome.ticket);
    if let Some(err) = &outcome.error {
        return Err(ApiError::Unavailable(err.notice()));
    }

    let file = outcome.file;
    let disposition = content_disposition(&file).map_err(|err| ApiError::Unavailable(err.notice()))?;
    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static(file.content_type)),
        (header::CONTENT_DISPOSITION, disposition),
    ];
    Ok((headers, file.contents).into_response())
}

async fn export_status(State(state): State<AppState>) -> Json<serde_json::Value> {
    let indicator = state.indicator.read();
    Json(json!({
        "state": indicator.state().as_str(),
        "reset_after_ms": indicator.delay().as_millis() as u64,
    }))
}
