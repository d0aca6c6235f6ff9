#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use service_core::error::AppError;
use service_core::middleware::RequestId;
use std::sync::Arc;
use std::time::Duration;
use takmir_frontend::services::backend_client::BackendApi;
use takmir_frontend::services::draft_store::{DraftDebouncer, MemoryDraftStore};
use takmir_frontend::startup::build_router;
use takmir_frontend::AppState;
use takmir_ledger::{Account, AccountType, JournalEntry, JournalTransaction};
use tower::ServiceExt;

/// Canned backend; `down` simulates an unreachable upstream.
#[derive(Default)]
pub struct FakeBackend {
    pub accounts: Vec<Account>,
    pub transactions: Vec<JournalTransaction>,
    pub down: bool,
}

#[async_trait]
impl BackendApi for FakeBackend {
    async fn list_accounts(&self, _request_id: &RequestId) -> Result<Vec<Account>, AppError> {
        if self.down {
            return Err(AppError::BadGateway("backend unreachable".to_string()));
        }
        Ok(self.accounts.clone())
    }

    async fn list_transactions(
        &self,
        _request_id: &RequestId,
    ) -> Result<Vec<JournalTransaction>, AppError> {
        if self.down {
            return Err(AppError::BadGateway("backend unreachable".to_string()));
        }
        Ok(self.transactions.clone())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn rp(amount: i64) -> Decimal {
    Decimal::new(amount, 0)
}

pub fn masjid_backend() -> FakeBackend {
    FakeBackend {
        accounts: vec![
            Account::new(1, "1", "Aset", AccountType::Asset).group(),
            Account::new(2, "1.1", "Kas", AccountType::Asset)
                .with_parent(1)
                .with_category("Kas dan Setara Kas"),
            Account::new(5, "1.2", "Kas Lama", AccountType::Asset)
                .with_parent(1)
                .inactive(),
            Account::new(3, "3.1", "Aset Neto", AccountType::Equity),
            Account::new(4, "4.1", "Infaq", AccountType::Revenue).with_category("Penerimaan"),
        ],
        transactions: vec![
            JournalTransaction::new(1, date(2024, 1, 1), "Saldo awal")
                .with_entry(JournalEntry::debit(2, rp(1_000_000)))
                .with_entry(JournalEntry::kredit(3, rp(1_000_000))),
            JournalTransaction::new(2, date(2024, 2, 2), "Infaq Jumat")
                .with_referensi("BKM-001")
                .with_entry(JournalEntry::debit(2, rp(250_000)))
                .with_entry(JournalEntry::kredit(4, rp(250_000))),
        ],
        down: false,
    }
}

pub fn app_with(backend: FakeBackend) -> (Router, Arc<MemoryDraftStore>) {
    let store = Arc::new(MemoryDraftStore::new());
    let drafts = Arc::new(DraftDebouncer::new(store.clone(), Duration::from_millis(20)));
    let state = AppState::new(Arc::new(backend), drafts);
    (build_router(state), store)
}

pub fn app() -> Router {
    app_with(masjid_backend()).0
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, body)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}
