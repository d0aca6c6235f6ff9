//! Laporan Penghasilan Komprehensif (income statement).

use super::{build_section, Section};
use crate::balance::{DateWindow, Ledger, SplitBalance};
use crate::models::{AccountType, ReportKind};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub pendapatan: Section,
    pub beban: Section,
    pub total_pendapatan: SplitBalance,
    pub total_beban: SplitBalance,
    /// `total_pendapatan - total_beban`
    pub laba_rugi: SplitBalance,
}

/// Revenue and expense over `from..=to`. Reversed bounds are swapped.
#[instrument(skip(ledger), level = "debug")]
pub fn income_statement(ledger: &Ledger, from: NaiveDate, to: NaiveDate) -> IncomeStatement {
    let (from, to) = if from <= to { (from, to) } else { (to, from) };
    let window = DateWindow::Range { from, to };

    let pendapatan = build_section(
        ledger,
        AccountType::Revenue,
        ReportKind::LaporanPenghasilanKomprehensif,
        window,
    );
    let beban = build_section(
        ledger,
        AccountType::Expense,
        ReportKind::LaporanPenghasilanKomprehensif,
        window,
    );

    let total_pendapatan = pendapatan.total;
    let total_beban = beban.total;

    IncomeStatement {
        from,
        to,
        pendapatan,
        beban,
        total_pendapatan,
        total_beban,
        laba_rugi: total_pendapatan - total_beban,
    }
}

/// Revenue minus expense for any window; the surplus (or deficit) that
/// has not been moved into an equity account.
pub fn surplus(ledger: &Ledger, window: DateWindow) -> SplitBalance {
    let report = ReportKind::LaporanPenghasilanKomprehensif;
    build_section(ledger, AccountType::Revenue, report, window).total
        - build_section(ledger, AccountType::Expense, report, window).total
}
