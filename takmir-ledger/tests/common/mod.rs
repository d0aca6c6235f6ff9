//! Shared fixture: a small mosque chart of accounts and one quarter of
//! journal activity.

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use takmir_ledger::{
    Account, AccountType, JournalEntry, JournalTransaction, Ledger, Restriction,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn rp(amount: i64) -> Decimal {
    Decimal::new(amount, 0)
}

pub fn accounts() -> Vec<Account> {
    vec![
        Account::new(1, "1", "Aset", AccountType::Asset).group(),
        Account::new(2, "1.1", "Kas", AccountType::Asset)
            .with_parent(1)
            .with_category("Kas dan Setara Kas"),
        Account::new(3, "1.2", "Bank Syariah", AccountType::Asset).with_parent(1),
        Account::new(15, "1.3", "Kas Lama", AccountType::Asset)
            .with_parent(1)
            .inactive(),
        Account::new(4, "2", "Kewajiban", AccountType::Liability).group(),
        Account::new(5, "2.1", "Utang Usaha", AccountType::Liability)
            .with_parent(4)
            .with_category("Kewajiban Jangka Pendek"),
        Account::new(6, "3", "Aset Neto", AccountType::Equity).group(),
        Account::new(7, "3.1", "Aset Neto Tanpa Pembatasan", AccountType::Equity)
            .with_parent(6)
            .with_restriction(Restriction::TanpaPembatasan),
        Account::new(8, "3.2", "Aset Neto Dengan Pembatasan", AccountType::Equity)
            .with_parent(6)
            .with_restriction(Restriction::DenganPembatasan),
        Account::new(9, "4", "Pendapatan", AccountType::Revenue).group(),
        Account::new(10, "4.1", "Infaq", AccountType::Revenue)
            .with_parent(9)
            .with_category("Penerimaan"),
        Account::new(11, "4.2", "Donasi Wakaf", AccountType::Revenue)
            .with_parent(9)
            .with_category("Penerimaan"),
        Account::new(12, "5", "Beban", AccountType::Expense).group(),
        Account::new(13, "5.1", "Beban Listrik", AccountType::Expense)
            .with_parent(12)
            .with_category("Beban Operasional"),
        Account::new(14, "5.2", "Beban Kebersihan", AccountType::Expense)
            .with_parent(12)
            .with_category("Beban Operasional"),
    ]
}

pub fn journal() -> Vec<JournalTransaction> {
    vec![
        JournalTransaction::new(1, date(2023, 12, 31), "Saldo awal")
            .with_entry(JournalEntry::debit(2, rp(5_000_000)))
            .with_entry(JournalEntry::kredit(7, rp(5_000_000))),
        JournalTransaction::new(2, date(2024, 1, 5), "Infaq Jumat")
            .with_referensi("BKM-001")
            .with_entry(JournalEntry::debit(2, rp(1_500_000)))
            .with_entry(JournalEntry::kredit(10, rp(1_500_000))),
        JournalTransaction::new(3, date(2024, 1, 20), "Donasi wakaf sajadah")
            .with_referensi("BKM-002")
            .with_entry(JournalEntry::debit(3, rp(2_000_000)).restricted())
            .with_entry(JournalEntry::kredit(11, rp(2_000_000)).restricted()),
        JournalTransaction::new(4, date(2024, 2, 10), "Bayar listrik")
            .with_referensi("BKK-001")
            .with_entry(JournalEntry::debit(13, rp(300_000)))
            .with_entry(JournalEntry::kredit(2, rp(300_000))),
        JournalTransaction::new(5, date(2024, 2, 15), "Pinjaman renovasi")
            .with_entry(JournalEntry::debit(2, rp(1_000_000)))
            .with_entry(JournalEntry::kredit(5, rp(1_000_000))),
        JournalTransaction::new(6, date(2024, 3, 1), "Hibah pembangunan")
            .with_entry(JournalEntry::debit(3, rp(500_000)).restricted())
            .with_entry(JournalEntry::kredit(8, rp(500_000))),
    ]
}

pub fn ledger() -> Ledger {
    Ledger::new(accounts(), &journal())
}
