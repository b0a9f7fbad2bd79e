use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use crate::export::ExportKind;
use crate::upstream_client::UpstreamClient;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the upstream company/records API.
    pub upstream: UpstreamClient,
}

/// Query string accepted by the export endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ExportQueryParams {
    #[serde(rename = "empresaId")]
    pub empresa_id: Option<String>,
}

/// Health check endpoint.
///
/// Returns the service status, version, and health information.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /api/empresas
///
/// Proxies the upstream company list so the user can pick which company to export.
pub async fn list_companies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<serde_json::Value>>, AppError> {
    tracing::info!("GET /api/empresas");

    let companies = state
        .upstream
        .fetch_companies()
        .await
        .context("Erro ao carregar empresas.")?;

    Ok(Json(companies))
}

/// GET /api/export/cadtipopag?empresaId=N
pub async fn export_payment_types(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportQueryParams>,
) -> Result<Response, AppError> {
    export_file(&state, &params, ExportKind::PaymentTypes).await
}

/// GET /api/export/cadtpg?empresaId=N
pub async fn export_payment_terms(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportQueryParams>,
) -> Result<Response, AppError> {
    export_file(&state, &params, ExportKind::PaymentTerms).await
}

/// Fetches the company's records, builds the legacy file and returns it as an attachment.
async fn export_file(
    state: &AppState,
    params: &ExportQueryParams,
    kind: ExportKind,
) -> Result<Response, AppError> {
    let company_id = parse_company_id(params.empresa_id.as_deref())?;
    tracing::info!("GET /api/export/{} - empresaId: {}", kind, company_id);

    let items = state
        .upstream
        .fetch_export_items(kind, company_id)
        .await
        .with_context(|| kind.failure_message())?;

    let content = kind
        .build_file(items)
        .with_context(|| kind.failure_message())?;

    tracing::info!(
        "✓ Built {} for company {} ({} bytes)",
        kind.file_name(),
        company_id,
        content.len()
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, kind.content_disposition()),
        ],
        content,
    )
        .into_response())
}

/// Validates the `empresaId` query value.
///
/// Parsing is lenient: leading whitespace and trailing garbage are ignored, so
/// `"12abc"` reads as `12`. The result must be a positive integer.
pub fn parse_company_id(raw: Option<&str>) -> Result<i64, AppError> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            return Err(AppError::bad_request(
                "Informe o identificador da empresa (empresaId).",
            ))
        }
    };

    let invalid = || AppError::BadRequest {
        message: "Identificador da empresa inválido.".to_string(),
        details: Some(format!("Valor recebido: {}", raw)),
    };

    match leading_integer(raw) {
        Some(id) if id > 0 => Ok(id),
        _ => Err(invalid()),
    }
}

fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;

    Some(if negative { -value } else { value })
}
