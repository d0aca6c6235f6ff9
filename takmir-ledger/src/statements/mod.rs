//! Financial statements derived from the ledger.
//!
//! Shared rules: only active, non-group accounts of the statement's types
//! are considered; accounts whose `report` names the other statement are
//! left out; zero-saldo accounts get no row but still count toward the
//! column subtotals; accounts are grouped by
//! category, groups ordered by their lowest code. Generators never fail;
//! an empty [`Section`] is the "no data" case.

mod account_ledger;
mod balance_sheet;
mod equity;
mod income_statement;

pub use account_ledger::{account_ledger, AccountLedger, LedgerLine};
pub use balance_sheet::{balance_sheet, BalanceSheet};
pub use equity::{equity_statement, equity_statement_for_year, EquityLine, EquityStatement};
pub use income_statement::{income_statement, surplus, IncomeStatement};

use crate::balance::{DateWindow, Ledger, SplitBalance};
use crate::coa::compare_codes;
use crate::models::{Account, AccountType, Id, ReportKind};
use serde::Serialize;

/// Group label for accounts with neither a category nor a known parent.
pub const UNCATEGORIZED: &str = "Lainnya";

/// One account's row in a statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLine {
    pub account_id: Id,
    pub code: String,
    pub name: String,
    pub category: String,
    #[serde(flatten)]
    pub amounts: SplitBalance,
}

/// Accounts sharing a category, with their subtotal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub category: String,
    pub accounts: Vec<AccountLine>,
    pub subtotal: SplitBalance,
}

/// A statement section (e.g. all ASET accounts).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub categories: Vec<CategoryGroup>,
    pub total: SplitBalance,
}

impl Section {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn accounts(&self) -> impl Iterator<Item = &AccountLine> {
        self.categories.iter().flat_map(|group| group.accounts.iter())
    }

    pub fn category(&self, name: &str) -> Option<&CategoryGroup> {
        self.categories.iter().find(|group| group.category == name)
    }
}

pub(crate) fn is_reportable(account: &Account, account_type: AccountType, report: ReportKind) -> bool {
    account.is_postable()
        && account.account_type == Some(account_type)
        && account.report.map_or(true, |r| r == report)
}

/// Display category: the account's own, else its parent's name.
pub(crate) fn category_of(ledger: &Ledger, account: &Account) -> String {
    account
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .or_else(|| {
            account
                .parent_id
                .as_ref()
                .and_then(|parent| ledger.account(parent.as_str()))
                .map(|parent| parent.name.clone())
        })
        .unwrap_or_else(|| UNCATEGORIZED.to_string())
}

/// Reportable accounts of one type, sorted by code.
pub(crate) fn reportable_accounts<'a>(
    ledger: &'a Ledger,
    account_type: AccountType,
    report: ReportKind,
) -> Vec<&'a Account> {
    let mut accounts: Vec<&Account> = ledger
        .accounts()
        .iter()
        .filter(|account| is_reportable(account, account_type, report))
        .collect();
    accounts.sort_by(|a, b| compare_codes(&a.code, &b.code));
    accounts
}

pub(crate) fn build_section(
    ledger: &Ledger,
    account_type: AccountType,
    report: ReportKind,
    window: DateWindow,
) -> Section {
    let mut categories: Vec<CategoryGroup> = Vec::new();

    for account in reportable_accounts(ledger, account_type, report) {
        let amounts = ledger.split_balance(account.id.as_str(), window);
        if amounts.is_all_zero() {
            continue;
        }

        let category = category_of(ledger, account);
        let index = match categories.iter().position(|g| g.category == category) {
            Some(index) => index,
            None => {
                categories.push(CategoryGroup {
                    category: category.clone(),
                    accounts: Vec::new(),
                    subtotal: SplitBalance::ZERO,
                });
                categories.len() - 1
            }
        };
        let group = &mut categories[index];

        // A released restriction nets to zero saldo but still moves amounts
        // between the columns, so it counts toward the subtotal unshown.
        group.subtotal += amounts;
        if amounts.saldo.is_zero() {
            continue;
        }

        group.accounts.push(AccountLine {
            account_id: account.id.clone(),
            code: account.code.clone(),
            name: account.name.clone(),
            category,
            amounts,
        });
    }

    let total = categories.iter().map(|group| group.subtotal).sum();

    Section { categories, total }
}
