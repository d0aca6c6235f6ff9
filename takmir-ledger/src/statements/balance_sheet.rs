//! Laporan Posisi Keuangan / Neraca (balance sheet).

use super::{build_section, surplus, Section};
use crate::balance::{DateWindow, Ledger, SplitBalance};
use crate::models::{AccountType, ReportKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    pub as_of: NaiveDate,
    pub aset: Section,
    pub kewajiban: Section,
    pub ekuitas: Section,
    /// Accumulated revenue minus expense up to `as_of`.
    pub surplus_berjalan: SplitBalance,
    /// Equity accounts plus `surplus_berjalan`, per restriction column.
    pub total_aset_neto: SplitBalance,
    pub total_aset: Decimal,
    pub total_kewajiban: Decimal,
    pub total_ekuitas: Decimal,
    pub total_kewajiban_dan_ekuitas: Decimal,
    /// Display hint only; nothing is rejected when the books do not balance.
    pub is_balanced: bool,
}

/// Balances of ASSET, LIABILITY and EQUITY accounts as of a date (inclusive).
#[instrument(skip(ledger), level = "debug")]
pub fn balance_sheet(ledger: &Ledger, as_of: NaiveDate) -> BalanceSheet {
    let window = DateWindow::AsOf(as_of);
    let report = ReportKind::Neraca;

    let aset = build_section(ledger, AccountType::Asset, report, window);
    let kewajiban = build_section(ledger, AccountType::Liability, report, window);
    let ekuitas = build_section(ledger, AccountType::Equity, report, window);
    let surplus_berjalan = surplus(ledger, window);

    let total_aset_neto = ekuitas.total + surplus_berjalan;
    let total_aset = aset.total.saldo;
    let total_kewajiban = kewajiban.total.saldo;
    let total_ekuitas = total_aset_neto.saldo;
    let total_kewajiban_dan_ekuitas = total_kewajiban + total_ekuitas;

    BalanceSheet {
        as_of,
        aset,
        kewajiban,
        ekuitas,
        surplus_berjalan,
        total_aset_neto,
        total_aset,
        total_kewajiban,
        total_ekuitas,
        total_kewajiban_dan_ekuitas,
        is_balanced: total_aset == total_kewajiban_dan_ekuitas,
    }
}
