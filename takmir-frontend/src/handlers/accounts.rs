//! Chart-of-accounts endpoints.

use super::{fetch_snapshot, parse_query_date};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use service_core::middleware::RequestId;
use takmir_ledger::coa::{build_tree, next_child_code, AccountNode};
use takmir_ledger::filter::{search_accounts, selectable_accounts};
use takmir_ledger::statements::{account_ledger, AccountLedger};
use takmir_ledger::{Account, Ledger};

#[derive(Debug, Default, Deserialize)]
pub struct AccountQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

pub async fn list_accounts(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(query): Query<AccountQuery>,
) -> Result<Json<Vec<Account>>, AppError> {
    let accounts = state.backend.list_accounts(&request_id).await?;

    let matches = search_accounts(&accounts, query.q.as_deref().unwrap_or_default())
        .into_iter()
        .filter(|account| query.include_inactive || account.is_active)
        .cloned()
        .collect();

    Ok(Json(matches))
}

pub async fn account_tree(
    State(state): State<AppState>,
    request_id: RequestId,
) -> Result<Json<Vec<AccountNode>>, AppError> {
    let accounts = state.backend.list_accounts(&request_id).await?;
    Ok(Json(build_tree(&accounts)?))
}

pub async fn selectable(
    State(state): State<AppState>,
    request_id: RequestId,
) -> Result<Json<Vec<Account>>, AppError> {
    let accounts = state.backend.list_accounts(&request_id).await?;
    Ok(Json(
        selectable_accounts(&accounts).into_iter().cloned().collect(),
    ))
}

#[derive(Debug, Deserialize)]
pub struct NextCodeQuery {
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NextCode {
    pub parent: Option<String>,
    pub code: String,
}

/// Suggested code for a new account under `parent` (a parent code, not id).
pub async fn next_code(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(query): Query<NextCodeQuery>,
) -> Result<Json<NextCode>, AppError> {
    let accounts = state.backend.list_accounts(&request_id).await?;
    let parent = query
        .parent
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    if let Some(parent) = &parent {
        if !accounts.iter().any(|a| a.code.trim() == parent) {
            return Err(AppError::NotFound(anyhow::anyhow!(
                "Parent account with code {} not found",
                parent
            )));
        }
    }

    let code = next_child_code(&accounts, parent.as_deref());
    Ok(Json(NextCode { parent, code }))
}

#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

/// Buku besar for one account.
pub async fn ledger(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(id): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<AccountLedger>, AppError> {
    let from = parse_query_date(query.from.as_deref())?;
    let to = parse_query_date(query.to.as_deref())?;

    let (accounts, transactions) = fetch_snapshot(&state, &request_id).await?;
    let ledger = Ledger::new(accounts, &transactions);

    Ok(Json(account_ledger(&ledger, &id, from, to)?))
}
