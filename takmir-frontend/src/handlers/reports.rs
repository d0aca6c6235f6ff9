//! Financial statement endpoints.

use super::{fetch_snapshot, parse_query_date};
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;
use service_core::error::AppError;
use service_core::middleware::RequestId;
use takmir_ledger::statements::{
    balance_sheet, equity_statement, equity_statement_for_year, income_statement, BalanceSheet,
    EquityStatement, IncomeStatement,
};
use takmir_ledger::Ledger;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn start_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

async fn load_ledger(state: &AppState, request_id: &RequestId) -> Result<Ledger, AppError> {
    let (accounts, transactions) = fetch_snapshot(state, request_id).await?;
    Ok(Ledger::new(accounts, &transactions))
}

#[derive(Debug, Default, Deserialize)]
pub struct AsOfQuery {
    #[serde(default)]
    pub as_of: Option<String>,
}

/// Laporan Posisi Keuangan; `as_of` defaults to today.
pub async fn posisi_keuangan(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<BalanceSheet>, AppError> {
    let as_of = parse_query_date(query.as_of.as_deref())?.unwrap_or_else(today);
    let ledger = load_ledger(&state, &request_id).await?;
    Ok(Json(balance_sheet(&ledger, as_of)))
}

#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl PeriodQuery {
    /// Explicit bounds, else year-to-date.
    fn range(&self) -> Result<(NaiveDate, NaiveDate), AppError> {
        let to = parse_query_date(self.to.as_deref())?.unwrap_or_else(today);
        let from = parse_query_date(self.from.as_deref())?.unwrap_or_else(|| start_of_year(to));
        Ok((from, to))
    }
}

/// Laporan Penghasilan Komprehensif; defaults to year-to-date.
pub async fn penghasilan_komprehensif(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<IncomeStatement>, AppError> {
    let (from, to) = query.range()?;
    let ledger = load_ledger(&state, &request_id).await?;
    Ok(Json(income_statement(&ledger, from, to)))
}

/// Laporan Perubahan Aset Neto, by `year` or by `from`/`to`.
pub async fn perubahan_aset_neto(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<EquityStatement>, AppError> {
    let statement = match query.year {
        Some(year) => {
            let ledger = load_ledger(&state, &request_id).await?;
            equity_statement_for_year(&ledger, year).ok_or_else(|| {
                AppError::BadRequest(anyhow::anyhow!("Year {} is out of range", year))
            })?
        }
        None => {
            let (from, to) = query.range()?;
            let ledger = load_ledger(&state, &request_id).await?;
            equity_statement(&ledger, from, to)
        }
    };

    Ok(Json(statement))
}
