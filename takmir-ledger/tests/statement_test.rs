//! Financial statement integration tests over the mosque fixture.

mod common;

use common::{date, ledger, rp};
use rust_decimal::Decimal;
use takmir_ledger::statements::{
    account_ledger, balance_sheet, equity_statement, equity_statement_for_year, income_statement,
};
use takmir_ledger::{LedgerError, SplitBalance};

/// Assets equal liabilities plus net assets for a balanced journal
#[test]
fn balance_sheet_identity_holds() {
    let sheet = balance_sheet(&ledger(), date(2024, 3, 31));

    assert_eq!(sheet.total_aset, rp(9_700_000));
    assert_eq!(sheet.total_kewajiban, rp(1_000_000));
    assert_eq!(sheet.total_ekuitas, rp(8_700_000));
    assert_eq!(sheet.total_kewajiban_dan_ekuitas, sheet.total_aset);
    assert!(sheet.is_balanced);
}

/// Accounts group by category, falling back to the parent's name
#[test]
fn balance_sheet_groups_by_category() {
    let sheet = balance_sheet(&ledger(), date(2024, 3, 31));

    let categories: Vec<&str> = sheet.aset.categories.iter().map(|g| g.category.as_str()).collect();
    assert_eq!(categories, ["Kas dan Setara Kas", "Aset"]);

    let kas = sheet.aset.category("Kas dan Setara Kas").unwrap();
    assert_eq!(kas.subtotal.saldo, rp(7_200_000));
    assert_eq!(kas.subtotal.tanpa_pembatasan, rp(7_200_000));

    let bank = sheet.aset.category("Aset").unwrap();
    assert_eq!(bank.subtotal, SplitBalance::new(Decimal::ZERO, rp(2_500_000)));
}

/// Restricted donations flow into the dengan pembatasan column
#[test]
fn net_assets_split_by_restriction() {
    let sheet = balance_sheet(&ledger(), date(2024, 3, 31));

    assert_eq!(
        sheet.surplus_berjalan,
        SplitBalance::new(rp(1_200_000), rp(2_000_000))
    );
    assert_eq!(
        sheet.total_aset_neto,
        SplitBalance::new(rp(6_200_000), rp(2_500_000))
    );
}

/// Zero-saldo and inactive accounts never appear
#[test]
fn zero_balance_accounts_are_excluded() {
    let ledger = ledger();
    let sheet = balance_sheet(&ledger, date(2024, 3, 31));
    let income = income_statement(&ledger, date(2024, 1, 1), date(2024, 3, 31));

    let codes: Vec<&str> = sheet
        .aset
        .accounts()
        .chain(sheet.kewajiban.accounts())
        .chain(sheet.ekuitas.accounts())
        .chain(income.pendapatan.accounts())
        .chain(income.beban.accounts())
        .map(|line| line.code.as_str())
        .collect();

    assert!(!codes.contains(&"5.2"));
    assert!(!codes.contains(&"1.3"));
    assert!(sheet
        .aset
        .accounts()
        .chain(income.beban.accounts())
        .all(|line| !line.amounts.saldo.is_zero()));
}

/// Before any activity every section is empty rather than an error
#[test]
fn empty_period_yields_empty_sections() {
    let sheet = balance_sheet(&ledger(), date(2020, 1, 1));
    assert!(sheet.aset.is_empty());
    assert!(sheet.ekuitas.is_empty());
    assert_eq!(sheet.total_aset, Decimal::ZERO);
    assert!(sheet.is_balanced);
}

/// laba rugi is revenue minus expense and subtotals sum to totals
#[test]
fn income_statement_totals_are_consistent() {
    let income = income_statement(&ledger(), date(2024, 1, 1), date(2024, 3, 31));

    assert_eq!(income.total_pendapatan.saldo, rp(3_500_000));
    assert_eq!(income.total_beban.saldo, rp(300_000));
    assert_eq!(income.laba_rugi.saldo, rp(3_200_000));

    let subtotal_sum: SplitBalance = income.pendapatan.categories.iter().map(|g| g.subtotal).sum();
    assert_eq!(subtotal_sum, income.total_pendapatan);

    let penerimaan = income.pendapatan.category("Penerimaan").unwrap();
    assert_eq!(penerimaan.accounts.len(), 2);
}

/// Reversed bounds produce the same statement
#[test]
fn income_statement_swaps_reversed_range() {
    let ledger = ledger();
    assert_eq!(
        income_statement(&ledger, date(2024, 3, 31), date(2024, 1, 1)),
        income_statement(&ledger, date(2024, 1, 1), date(2024, 3, 31))
    );
}

/// saldo akhir equals saldo awal plus laba rugi plus perubahan modal
#[test]
fn equity_statement_identity() {
    let equity = equity_statement(&ledger(), date(2024, 1, 1), date(2024, 12, 31));

    assert_eq!(equity.saldo_awal.saldo, rp(5_000_000));
    assert_eq!(equity.laba_rugi.saldo, rp(3_200_000));
    assert_eq!(equity.perubahan_modal.saldo, rp(500_000));
    assert_eq!(
        equity.saldo_akhir,
        equity.saldo_awal + equity.laba_rugi + equity.perubahan_modal
    );
    assert_eq!(equity.accounts.len(), 2);
}

/// The equity statement closes at the balance sheet's net assets
#[test]
fn equity_statement_agrees_with_balance_sheet() {
    let ledger = ledger();
    let equity = equity_statement_for_year(&ledger, 2024).unwrap();
    let sheet = balance_sheet(&ledger, date(2024, 12, 31));

    assert_eq!(equity.saldo_akhir, sheet.total_aset_neto);
}

/// The fiscal-year variant covers January through December
#[test]
fn equity_statement_for_opening_year() {
    let equity = equity_statement_for_year(&ledger(), 2023).unwrap();

    assert_eq!(equity.from, date(2023, 1, 1));
    assert_eq!(equity.to, date(2023, 12, 31));
    assert!(equity.saldo_awal.is_all_zero());
    assert_eq!(equity.perubahan_modal.saldo, rp(5_000_000));
    assert!(equity_statement_for_year(&ledger(), 300_000).is_none());
}

/// Buku besar carries the opening balance into a running saldo
#[test]
fn account_ledger_running_balance() {
    let kas = account_ledger(&ledger(), "2", Some(date(2024, 1, 1)), Some(date(2024, 2, 28))).unwrap();

    assert_eq!(kas.saldo_awal, rp(5_000_000));
    let running: Vec<Decimal> = kas.lines.iter().map(|line| line.saldo).collect();
    assert_eq!(running, [rp(6_500_000), rp(6_200_000), rp(7_200_000)]);
    assert_eq!(kas.total_debit, rp(2_500_000));
    assert_eq!(kas.total_kredit, rp(300_000));
    assert_eq!(kas.saldo_akhir, rp(7_200_000));
}

/// Unknown accounts are reported, not silently empty
#[test]
fn account_ledger_unknown_account() {
    let err = account_ledger(&ledger(), "404", None, None).unwrap_err();
    assert!(matches!(err, LedgerError::AccountNotFound(_)));
}

/// Releasing a restriction nets to zero saldo but still moves the columns
#[test]
fn released_restriction_moves_into_unrestricted_totals() {
    use takmir_ledger::{Account, AccountType, JournalEntry, JournalTransaction, Ledger};

    let accounts = vec![
        Account::new(1, "1.1", "Kas", AccountType::Asset),
        Account::new(2, "3.1", "Aset Neto", AccountType::Equity),
        Account::new(3, "4.1", "Infaq Renovasi", AccountType::Revenue).with_category("Penerimaan"),
        Account::new(4, "4.9", "Pelepasan Pembatasan", AccountType::Revenue)
            .with_category("Penerimaan"),
    ];
    let journal = vec![
        JournalTransaction::new(1, date(2024, 1, 5), "Infaq renovasi")
            .with_entry(JournalEntry::debit(1, rp(100)).restricted())
            .with_entry(JournalEntry::kredit(3, rp(100)).restricted()),
        JournalTransaction::new(2, date(2024, 2, 1), "Renovasi selesai")
            .with_entry(JournalEntry::debit(4, rp(100)).restricted())
            .with_entry(JournalEntry::kredit(4, rp(100))),
        JournalTransaction::new(3, date(2024, 2, 2), "Reklasifikasi aset neto")
            .with_entry(JournalEntry::debit(2, rp(40)).restricted())
            .with_entry(JournalEntry::kredit(2, rp(40))),
    ];
    let ledger = Ledger::new(accounts, &journal);

    let income = income_statement(&ledger, date(2024, 1, 1), date(2024, 12, 31));
    assert_eq!(income.total_pendapatan, SplitBalance::new(rp(100), Decimal::ZERO));
    let penerimaan = income.pendapatan.category("Penerimaan").unwrap();
    assert_eq!(penerimaan.subtotal, income.total_pendapatan);
    assert_eq!(penerimaan.accounts.len(), 1);
    assert_eq!(penerimaan.accounts[0].code, "4.1");

    let sheet = balance_sheet(&ledger, date(2024, 12, 31));
    assert_eq!(sheet.surplus_berjalan, SplitBalance::new(rp(100), Decimal::ZERO));
    assert_eq!(sheet.ekuitas.total, SplitBalance::new(rp(40), rp(-40)));
    assert!(sheet.ekuitas.accounts().next().is_none());
    assert_eq!(sheet.total_aset_neto, SplitBalance::new(rp(140), rp(-40)));

    let equity = equity_statement_for_year(&ledger, 2024).unwrap();
    assert!(equity.accounts.is_empty());
    assert_eq!(equity.perubahan_modal, SplitBalance::new(rp(40), rp(-40)));
    assert_eq!(equity.saldo_akhir, sheet.total_aset_neto);
}
