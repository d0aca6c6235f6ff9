//! REST client for the bookkeeping backend.
//!
//! The backend owns persistence; this service only reads snapshots of the
//! chart of accounts and the journal and derives everything else locally.

use crate::config::BackendSettings;
use crate::services::metrics;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use service_core::error::AppError;
use service_core::http::{retry_http_call, RetryConfig, UpstreamError};
use service_core::middleware::RequestId;
use service_core::observability::TracedClientExt;
use std::time::Duration;
use takmir_ledger::{Account, JournalTransaction};
use tracing::instrument;

/// Read access to the backend's collections. Handlers depend on this trait
/// so tests can substitute canned data.
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn list_accounts(&self, request_id: &RequestId) -> Result<Vec<Account>, AppError>;

    async fn list_transactions(
        &self,
        request_id: &RequestId,
    ) -> Result<Vec<JournalTransaction>, AppError>;
}

/// List responses arrive either bare or wrapped as `{"data": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Wrapped { data } => data,
            ListEnvelope::Bare(items) => items,
        }
    }
}

pub struct BackendClient {
    http: reqwest::Client,
    settings: BackendSettings,
    retry: RetryConfig,
}

impl BackendClient {
    pub fn new(settings: BackendSettings) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;

        tracing::info!(backend_url = %settings.url, "Backend client configured");

        Ok(Self {
            http,
            retry: RetryConfig::with_max_retries(settings.max_retries),
            settings,
        })
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.settings.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        request_id: &RequestId,
    ) -> Result<Vec<T>, AppError> {
        let url = self.url(path);
        let url = url.as_str();

        let result = retry_http_call(&self.retry, operation, move || async move {
            let mut request = self.http.traced_get(url).request_id(request_id.as_str());
            if let Some(token) = &self.settings.api_token {
                request = request.bearer_auth(token.expose_secret());
            }

            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(UpstreamError::Status {
                    status: status.as_u16(),
                    message,
                });
            }

            response
                .json::<ListEnvelope<T>>()
                .await
                .map(ListEnvelope::into_items)
                .map_err(|e| UpstreamError::Decode(e.to_string()))
        })
        .await;

        metrics::record_backend_call(operation, result.is_ok());

        let items = result.map_err(|e| {
            tracing::error!(operation, url, error = %e, "Backend call failed");
            AppError::from(e)
        })?;

        tracing::debug!(operation, count = items.len(), "Backend call succeeded");
        Ok(items)
    }
}

#[async_trait]
impl BackendApi for BackendClient {
    #[instrument(skip(self, request_id), fields(request_id = %request_id.as_str()))]
    async fn list_accounts(&self, request_id: &RequestId) -> Result<Vec<Account>, AppError> {
        self.fetch_list("list_accounts", &self.settings.accounts_path, request_id)
            .await
    }

    #[instrument(skip(self, request_id), fields(request_id = %request_id.as_str()))]
    async fn list_transactions(
        &self,
        request_id: &RequestId,
    ) -> Result<Vec<JournalTransaction>, AppError> {
        self.fetch_list(
            "list_transactions",
            &self.settings.transactions_path,
            request_id,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(url: &str) -> BackendSettings {
        BackendSettings {
            url: url.to_string(),
            api_token: None,
            accounts_path: "/api/akun".to_string(),
            transactions_path: "api/jurnal".to_string(),
            timeout_secs: 1,
            max_retries: 0,
        }
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = BackendClient::new(settings("http://backend:3000/")).unwrap();
        assert_eq!(client.url("/api/akun"), "http://backend:3000/api/akun");
        assert_eq!(client.url("api/jurnal"), "http://backend:3000/api/jurnal");
    }

    #[test]
    fn test_envelope_accepts_wrapped_and_bare() {
        let wrapped: ListEnvelope<Account> = serde_json::from_str(
            r#"{"data": [{"id": 1, "code": "1", "name": "Aset", "type": "ASSET"}]}"#,
        )
        .unwrap();
        assert_eq!(wrapped.into_items().len(), 1);

        let bare: ListEnvelope<Account> =
            serde_json::from_str(r#"[{"id": 1, "code": "1", "name": "Aset"}]"#).unwrap();
        assert_eq!(bare.into_items()[0].code, "1");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_bad_gateway() {
        let client = BackendClient::new(settings("http://127.0.0.1:9"))
            .unwrap()
            .with_retry(RetryConfig::no_retry());

        let err = client
            .list_accounts(&RequestId("test".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadGateway(_)));
    }
}
