//! Laporan Perubahan Aset Neto (statement of changes in net assets).

use super::{category_of, income_statement, reportable_accounts, surplus};
use crate::balance::{DateWindow, Ledger, SplitBalance};
use crate::models::{AccountType, Id, ReportKind};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

/// Movement of one equity account over the period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityLine {
    pub account_id: Id,
    pub code: String,
    pub name: String,
    pub category: String,
    pub saldo_awal: SplitBalance,
    pub perubahan: SplitBalance,
    pub saldo_akhir: SplitBalance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityStatement {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub accounts: Vec<EquityLine>,
    /// Equity balances before `from` plus the surplus accumulated before it.
    pub saldo_awal: SplitBalance,
    /// Period surplus from the income statement.
    pub laba_rugi: SplitBalance,
    /// Equity movement not explained by the period's surplus.
    pub perubahan_modal: SplitBalance,
    /// `saldo_awal + laba_rugi + perubahan_modal`
    pub saldo_akhir: SplitBalance,
}

impl EquityStatement {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.saldo_akhir.is_all_zero() && self.laba_rugi.is_all_zero()
    }
}

/// Changes in net assets over `from..=to`. Reversed bounds are swapped.
#[instrument(skip(ledger), level = "debug")]
pub fn equity_statement(ledger: &Ledger, from: NaiveDate, to: NaiveDate) -> EquityStatement {
    let (from, to) = if from <= to { (from, to) } else { (to, from) };
    let before = DateWindow::Before(from);
    let period = DateWindow::Range { from, to };

    let mut equity_before = SplitBalance::ZERO;
    let mut perubahan_modal = SplitBalance::ZERO;
    let mut accounts: Vec<EquityLine> = Vec::new();

    for account in reportable_accounts(ledger, AccountType::Equity, ReportKind::Neraca) {
        let saldo_awal = ledger.split_balance(account.id.as_str(), before);
        let perubahan = ledger.split_balance(account.id.as_str(), period);
        let saldo_akhir = saldo_awal + perubahan;

        // Totals take every account; only the row is hidden at zero saldo.
        equity_before += saldo_awal;
        perubahan_modal += perubahan;

        if saldo_awal.saldo.is_zero() && perubahan.saldo.is_zero() && saldo_akhir.saldo.is_zero()
        {
            continue;
        }

        accounts.push(EquityLine {
            account_id: account.id.clone(),
            code: account.code.clone(),
            name: account.name.clone(),
            category: category_of(ledger, account),
            saldo_awal,
            perubahan,
            saldo_akhir,
        });
    }

    let saldo_awal = equity_before + surplus(ledger, before);
    let laba_rugi = income_statement(ledger, from, to).laba_rugi;

    EquityStatement {
        from,
        to,
        accounts,
        saldo_awal,
        laba_rugi,
        perubahan_modal,
        saldo_akhir: saldo_awal + laba_rugi + perubahan_modal,
    }
}

/// Fiscal-year variant: January 1 to December 31 of `year`. `None` for
/// years outside the supported calendar range.
pub fn equity_statement_for_year(ledger: &Ledger, year: i32) -> Option<EquityStatement> {
    let from = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let to = NaiveDate::from_ymd_opt(year, 12, 31)?;
    Some(equity_statement(ledger, from, to))
}
