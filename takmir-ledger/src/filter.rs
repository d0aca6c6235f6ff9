//! Search and filtering over account and journal snapshots.

use crate::coa::compare_codes;
use crate::models::{Account, Id, JournalTransaction};
use chrono::NaiveDate;
use serde::Deserialize;

/// Case-insensitive substring match on code, name or category. A blank
/// query matches everything. Sorted by code.
pub fn search_accounts<'a>(accounts: &'a [Account], query: &str) -> Vec<&'a Account> {
    let needle = query.trim().to_lowercase();
    let mut matches: Vec<&Account> = accounts
        .iter()
        .filter(|account| needle.is_empty() || account_matches(account, &needle))
        .collect();
    matches.sort_by(|a, b| compare_codes(&a.code, &b.code));
    matches
}

fn account_matches(account: &Account, needle: &str) -> bool {
    account.code.to_lowercase().contains(needle)
        || account.name.to_lowercase().contains(needle)
        || account
            .category
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(needle))
}

/// Accounts offered when posting an entry: active and non-group, by code.
pub fn selectable_accounts(accounts: &[Account]) -> Vec<&Account> {
    let mut selectable: Vec<&Account> = accounts.iter().filter(|a| a.is_postable()).collect();
    selectable.sort_by(|a, b| compare_codes(&a.code, &b.code));
    selectable
}

/// Journal list filter. All bounds are inclusive and every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionFilter {
    #[serde(default, deserialize_with = "crate::models::deserialize_optional_date")]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::models::deserialize_optional_date")]
    pub to: Option<NaiveDate>,
    /// Substring of keterangan or referensi, case-insensitive.
    #[serde(default, alias = "q")]
    pub query: Option<String>,
    #[serde(default)]
    pub account_id: Option<Id>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &JournalTransaction) -> bool {
        let (from, to) = match (self.from, self.to) {
            (Some(f), Some(t)) if f > t => (Some(t), Some(f)),
            bounds => bounds,
        };
        if from.is_some_and(|f| tx.tanggal < f) || to.is_some_and(|t| tx.tanggal > t) {
            return false;
        }

        if let Some(account_id) = &self.account_id {
            if !tx.entries.iter().any(|e| &e.akun_id == account_id) {
                return false;
            }
        }

        match self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => {
                let needle = query.to_lowercase();
                tx.keterangan.to_lowercase().contains(&needle)
                    || tx
                        .referensi
                        .as_deref()
                        .is_some_and(|r| r.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}

/// Matching transactions, newest first; same-day transactions by id.
pub fn filter_transactions<'a>(
    transactions: &'a [JournalTransaction],
    filter: &TransactionFilter,
) -> Vec<&'a JournalTransaction> {
    let mut matches: Vec<&JournalTransaction> =
        transactions.iter().filter(|tx| filter.matches(tx)).collect();
    matches.sort_by(|a, b| {
        b.tanggal
            .cmp(&a.tanggal)
            .then_with(|| compare_codes(a.id.as_str(), b.id.as_str()))
    });
    matches
}
