//! Buku besar: one account's entries with a running balance.

use crate::balance::{DateWindow, Ledger};
use crate::error::LedgerError;
use crate::models::{Account, Id, NormalBalance};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerLine {
    pub transaction_id: Id,
    pub tanggal: NaiveDate,
    pub referensi: Option<String>,
    pub keterangan: String,
    pub debit: Decimal,
    pub kredit: Decimal,
    pub has_restriction: bool,
    /// Running balance after this line, signed by the normal side.
    pub saldo: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLedger {
    pub account: Account,
    pub normal_balance: NormalBalance,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub saldo_awal: Decimal,
    pub lines: Vec<LedgerLine>,
    pub total_debit: Decimal,
    pub total_kredit: Decimal,
    pub saldo_akhir: Decimal,
}

/// Entries of one account between the optional bounds (inclusive), ordered
/// by date, journal order within a day.
pub fn account_ledger(
    ledger: &Ledger,
    account_id: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<AccountLedger, LedgerError> {
    let account = ledger
        .account(account_id)
        .ok_or_else(|| LedgerError::AccountNotFound(Id::from(account_id)))?;
    let side = NormalBalance::for_account(account);

    let (from, to) = match (from, to) {
        (Some(f), Some(t)) if f > t => (Some(t), Some(f)),
        bounds => bounds,
    };
    let saldo_awal = from.map_or(Decimal::ZERO, |from| {
        ledger.balance(account_id, DateWindow::Before(from))
    });

    let mut entries: Vec<_> = ledger
        .lines_for(account_id)
        .filter(|line| from.map_or(true, |f| line.tanggal >= f))
        .filter(|line| to.map_or(true, |t| line.tanggal <= t))
        .collect();
    entries.sort_by_key(|line| line.tanggal);

    let mut saldo = saldo_awal;
    let mut total_debit = Decimal::ZERO;
    let mut total_kredit = Decimal::ZERO;
    let mut lines = Vec::with_capacity(entries.len());

    for line in entries {
        saldo += side.signed(line.tipe, line.jumlah);
        let (debit, kredit) = match line.tipe {
            NormalBalance::Debit => (line.jumlah, Decimal::ZERO),
            NormalBalance::Kredit => (Decimal::ZERO, line.jumlah),
        };
        total_debit += debit;
        total_kredit += kredit;

        lines.push(LedgerLine {
            transaction_id: line.transaction_id.clone(),
            tanggal: line.tanggal,
            referensi: line.referensi.clone(),
            keterangan: line.keterangan.clone(),
            debit,
            kredit,
            has_restriction: line.has_restriction,
            saldo,
        });
    }

    Ok(AccountLedger {
        account: account.clone(),
        normal_balance: side,
        from,
        to,
        saldo_awal,
        lines,
        total_debit,
        total_kredit,
        saldo_akhir: saldo,
    })
}
