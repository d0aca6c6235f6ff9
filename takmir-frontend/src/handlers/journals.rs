//! Journal listing and pre-submission validation.

use super::parse_query_date;
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use service_core::error::AppError;
use service_core::middleware::RequestId;
use takmir_ledger::filter::{filter_transactions, TransactionFilter};
use takmir_ledger::validation::{validate_transaction, TransactionInput, ValidatedTransaction};
use takmir_ledger::{Id, JournalTransaction};

#[derive(Debug, Default, Deserialize)]
pub struct JournalQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
}

impl JournalQuery {
    fn into_filter(self) -> Result<TransactionFilter, AppError> {
        Ok(TransactionFilter {
            from: parse_query_date(self.from.as_deref())?,
            to: parse_query_date(self.to.as_deref())?,
            query: self.q,
            account_id: self
                .account_id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .map(Id::from),
        })
    }
}

pub async fn list_journals(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(query): Query<JournalQuery>,
) -> Result<Json<Vec<JournalTransaction>>, AppError> {
    let filter = query.into_filter()?;
    let transactions = state.backend.list_transactions(&request_id).await?;

    let matches: Vec<JournalTransaction> = filter_transactions(&transactions, &filter)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(
        total = transactions.len(),
        matched = matches.len(),
        "Journal filtered"
    );

    Ok(Json(matches))
}

/// 200 with totals and warnings, 422 with field errors.
pub async fn validate_journal(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(input): Json<TransactionInput>,
) -> Result<Json<ValidatedTransaction>, AppError> {
    let accounts = state.backend.list_accounts(&request_id).await?;
    let validated = validate_transaction(&input, &accounts)?;

    if !validated.warnings.is_empty() {
        tracing::info!(
            warnings = validated.warnings.len(),
            "Journal entries posted against the non-normal side"
        );
    }

    Ok(Json(validated))
}
