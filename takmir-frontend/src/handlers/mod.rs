pub mod accounts;
pub mod app;
pub mod drafts;
pub mod journals;
pub mod metrics;
pub mod reports;

use crate::AppState;
use chrono::NaiveDate;
use service_core::error::AppError;
use service_core::middleware::RequestId;
use takmir_ledger::models::parse_date;
use takmir_ledger::{Account, JournalTransaction, LedgerError};

/// Fetch accounts and transactions concurrently. Every request works on a
/// fresh snapshot; nothing is cached between requests.
pub(crate) async fn fetch_snapshot(
    state: &AppState,
    request_id: &RequestId,
) -> Result<(Vec<Account>, Vec<JournalTransaction>), AppError> {
    tokio::try_join!(
        state.backend.list_accounts(request_id),
        state.backend.list_transactions(request_id)
    )
}

/// Parse an optional `YYYY-MM-DD` query parameter; blank means absent.
pub(crate) fn parse_query_date(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| LedgerError::InvalidDate(s.to_string()).into()),
    }
}
