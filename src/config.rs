use serde::Deserialize;

/// Environment variables holding the upstream API base URL, in precedence order.
pub const API_URL_VARS: [&str; 3] = [
    "API_URL_INTERNAL",
    "VEMOVEL_API_URL",
    "NEXT_PUBLIC_VEMOVEL_API_URL",
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Normalized upstream base URL, always ending in `/api`.
    pub api_base_url: String,
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Upstream API base URL: {}", config.api_base_url);
        tracing::debug!("Upstream timeout: {}s", config.upstream_timeout_secs);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let raw_url = API_URL_VARS
            .iter()
            .find_map(|key| non_blank(key))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Upstream API URL not configured: set NEXT_PUBLIC_VEMOVEL_API_URL \
                     (optionally API_URL_INTERNAL or VEMOVEL_API_URL)"
                )
            })?;

        Ok(Self {
            port: non_blank("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            api_base_url: normalize_api_base_url(&raw_url)?,
            upstream_timeout_secs: non_blank("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .trim()
                .parse()
                .ok()
                .filter(|secs: &u64| *secs > 0)
                .ok_or_else(|| {
                    anyhow::anyhow!("UPSTREAM_TIMEOUT_SECS must be a positive number of seconds")
                })?,
        })
    }
}

/// Strips one trailing slash and makes sure the URL ends in `/api`.
pub fn normalize_api_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        anyhow::bail!("Upstream API URL must start with http:// or https://");
    }
    url::Url::parse(trimmed)
        .map_err(|e| anyhow::anyhow!("Upstream API URL is not a valid URL: {}", e))?;

    let normalized = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if normalized.to_lowercase().ends_with("/api") {
        Ok(normalized.to_string())
    } else {
        Ok(format!("{}/api", normalized))
    }
}
