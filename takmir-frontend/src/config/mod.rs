use secrecy::Secret;
use serde::Deserialize;
use service_core::error::AppError;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub drafts: DraftSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct BackendSettings {
    /// Base URL of the bookkeeping REST API (e.g. http://backend:3000).
    pub url: String,
    /// Bearer token sent on every backend call.
    #[serde(default)]
    pub api_token: Option<Secret<String>>,
    #[serde(default = "default_accounts_path")]
    pub accounts_path: String,
    #[serde(default = "default_transactions_path")]
    pub transactions_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_accounts_path() -> String {
    "/api/akun".to_string()
}

fn default_transactions_path() -> String {
    "/api/jurnal".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

#[derive(Deserialize, Clone)]
pub struct DraftSettings {
    /// Directory for file-backed drafts; in-memory when unset.
    #[serde(default)]
    pub directory: Option<String>,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for DraftSettings {
    fn default() -> Self {
        Self {
            directory: None,
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    2000
}

#[derive(Deserialize, Clone)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector endpoint (e.g. http://tempo:4317); export is off when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn get_configuration() -> Result<Settings, AppError> {
    service_core::config::load("takmir-frontend")
}
