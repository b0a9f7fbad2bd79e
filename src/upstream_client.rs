use failsafe::futures::CircuitBreaker;
use serde_json::Value;
use std::time::Duration;

use crate::circuit_breaker::{create_upstream_circuit_breaker, UpstreamCircuitBreaker};
use crate::config::Config;
use crate::errors::AppError;
use crate::export::ExportKind;

/// Client for the upstream company/records API.
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
    breaker: UpstreamCircuitBreaker,
}

impl UpstreamClient {
    /// Creates a new `UpstreamClient` from the loaded configuration.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create upstream client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            breaker: create_upstream_circuit_breaker(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists the companies available for export.
    ///
    /// Entries (`id`, `nome`, `cnpj`, ...) are passed through as the upstream
    /// sends them; only the list itself must be an array.
    pub async fn fetch_companies(&self) -> Result<Vec<Value>, AppError> {
        let url = format!("{}/empresas", self.base_url);
        tracing::info!("Fetching companies from upstream: {}", url);

        match self.get_json(&url, "Falha ao buscar empresas na API.").await? {
            Value::Array(companies) => {
                tracing::info!("✓ Fetched {} companies", companies.len());
                Ok(companies)
            }
            _ => Err(AppError::InvalidResponse(
                "Resposta inválida ao buscar empresas.".to_string(),
            )),
        }
    }

    /// Fetches the raw registry items backing an export for one company.
    ///
    /// Items are returned untouched; filtering and ordering happen in
    /// [`ExportKind::build_file`].
    pub async fn fetch_export_items(
        &self,
        kind: ExportKind,
        company_id: i64,
    ) -> Result<Vec<Value>, AppError> {
        let url = format!(
            "{}/empresas/{}/{}",
            self.base_url,
            company_id,
            kind.upstream_resource()
        );
        tracing::info!(
            "Fetching {} records for company {} from upstream: {}",
            kind,
            company_id,
            url
        );

        match self.get_json(&url, "Falha ao buscar dados na API.").await? {
            Value::Array(items) => {
                tracing::info!("✓ Fetched {} {} items", items.len(), kind);
                Ok(items)
            }
            other => Err(AppError::InvalidResponse(format!(
                "Resposta inválida ao buscar dados ({}).",
                json_kind(&other)
            ))),
        }
    }

    /// GETs `url` through the circuit breaker and parses the body as JSON.
    ///
    /// `failure_message` is the client-facing message for non-success statuses.
    async fn get_json(&self, url: &str, failure_message: &str) -> Result<Value, AppError> {
        let request = async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| AppError::ExternalApiError(format!("Upstream request failed: {}", e)))?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(AppError::Upstream {
                    status: status.as_u16(),
                    message: failure_message.to_string(),
                    details: error_text,
                });
            }

            response.json::<Value>().await.map_err(|e| {
                AppError::InternalError(format!("Failed to parse upstream response: {}", e))
            })
        };

        self.breaker
            .call_with(trips_breaker, request)
            .await
            .map_err(|e| {
                if matches!(e, failsafe::Error::Rejected) {
                    tracing::warn!("Upstream circuit open, rejecting request to {}", url);
                }
                AppError::from(e)
            })
    }
}

/// Transport failures and upstream 5xx count towards opening the circuit.
fn trips_breaker(err: &AppError) -> bool {
    match err {
        AppError::ExternalApiError(_) => true,
        AppError::Upstream { status, .. } => *status >= 500,
        _ => false,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
