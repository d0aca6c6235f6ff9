//! Balance accumulation over flattened journal entries.

use crate::models::{Account, EntryLine, Id, JournalTransaction, NormalBalance};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Which entry dates a balance covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    All,
    /// `tanggal <= date`
    AsOf(NaiveDate),
    /// `tanggal < date`
    Before(NaiveDate),
    /// `from <= tanggal <= to`
    Range { from: NaiveDate, to: NaiveDate },
}

impl DateWindow {
    /// Inclusive range; reversed bounds are swapped.
    pub fn range(from: NaiveDate, to: NaiveDate) -> Self {
        if from <= to {
            Self::Range { from, to }
        } else {
            Self::Range { from: to, to: from }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Self::All => true,
            Self::AsOf(as_of) => date <= as_of,
            Self::Before(before) => date < before,
            Self::Range { from, to } => from <= date && date <= to,
        }
    }
}

impl From<Option<NaiveDate>> for DateWindow {
    fn from(as_of: Option<NaiveDate>) -> Self {
        as_of.map_or(Self::All, Self::AsOf)
    }
}

/// A balance split into the unrestricted and donor-restricted columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitBalance {
    pub tanpa_pembatasan: Decimal,
    pub dengan_pembatasan: Decimal,
    pub saldo: Decimal,
}

impl SplitBalance {
    pub const ZERO: SplitBalance = SplitBalance {
        tanpa_pembatasan: Decimal::ZERO,
        dengan_pembatasan: Decimal::ZERO,
        saldo: Decimal::ZERO,
    };

    pub fn new(tanpa_pembatasan: Decimal, dengan_pembatasan: Decimal) -> Self {
        Self {
            tanpa_pembatasan,
            dengan_pembatasan,
            saldo: tanpa_pembatasan + dengan_pembatasan,
        }
    }

    /// True only when both columns are zero. A balance whose `saldo` nets
    /// to zero can still carry equal and opposite column amounts.
    pub fn is_all_zero(&self) -> bool {
        self.tanpa_pembatasan.is_zero() && self.dengan_pembatasan.is_zero()
    }
}

impl Add for SplitBalance {
    type Output = SplitBalance;

    fn add(self, rhs: SplitBalance) -> SplitBalance {
        SplitBalance::new(
            self.tanpa_pembatasan + rhs.tanpa_pembatasan,
            self.dengan_pembatasan + rhs.dengan_pembatasan,
        )
    }
}

impl AddAssign for SplitBalance {
    fn add_assign(&mut self, rhs: SplitBalance) {
        *self = *self + rhs;
    }
}

impl Neg for SplitBalance {
    type Output = SplitBalance;

    fn neg(self) -> SplitBalance {
        SplitBalance::new(-self.tanpa_pembatasan, -self.dengan_pembatasan)
    }
}

impl Sub for SplitBalance {
    type Output = SplitBalance;

    fn sub(self, rhs: SplitBalance) -> SplitBalance {
        self + -rhs
    }
}

impl std::iter::Sum for SplitBalance {
    fn sum<I: Iterator<Item = SplitBalance>>(iter: I) -> SplitBalance {
        iter.fold(SplitBalance::ZERO, Add::add)
    }
}

/// Flatten transactions into dated entry lines.
pub fn flatten_entries(transactions: &[JournalTransaction]) -> Vec<EntryLine> {
    transactions
        .iter()
        .flat_map(|tx| tx.entries.iter().map(move |entry| EntryLine::from_entry(tx, entry)))
        .collect()
}

/// Signed sum of the account's entries inside `window`: entries on the
/// account's normal side add, the others subtract.
pub fn balance<'a>(
    entries: impl IntoIterator<Item = &'a EntryLine>,
    account: &Account,
    window: DateWindow,
) -> Decimal {
    split_balance(entries, account, window).saldo
}

/// Like [`balance`], keeping restricted and unrestricted entries apart. An
/// entry is restricted when flagged so, or when the account itself is
/// DENGAN_PEMBATASAN.
pub fn split_balance<'a>(
    entries: impl IntoIterator<Item = &'a EntryLine>,
    account: &Account,
    window: DateWindow,
) -> SplitBalance {
    let side = NormalBalance::for_account(account);
    let account_restricted = account.is_restricted();

    let (tanpa, dengan) = entries
        .into_iter()
        .filter(|line| line.akun_id == account.id && window.contains(line.tanggal))
        .fold((Decimal::ZERO, Decimal::ZERO), |(tanpa, dengan), line| {
            let amount = side.signed(line.tipe, line.jumlah);
            if line.has_restriction || account_restricted {
                (tanpa, dengan + amount)
            } else {
                (tanpa + amount, dengan)
            }
        });

    SplitBalance::new(tanpa, dengan)
}

/// Accounts and entry lines indexed for repeated balance lookups.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    accounts: Vec<Account>,
    account_index: HashMap<Id, usize>,
    lines: Vec<EntryLine>,
    lines_by_account: HashMap<Id, Vec<usize>>,
}

impl Ledger {
    pub fn new(accounts: Vec<Account>, transactions: &[JournalTransaction]) -> Self {
        Self::from_lines(accounts, flatten_entries(transactions))
    }

    pub fn from_lines(accounts: Vec<Account>, lines: Vec<EntryLine>) -> Self {
        let account_index = accounts
            .iter()
            .enumerate()
            .map(|(i, account)| (account.id.clone(), i))
            .collect();

        let mut lines_by_account: HashMap<Id, Vec<usize>> = HashMap::new();
        for (i, line) in lines.iter().enumerate() {
            lines_by_account
                .entry(line.akun_id.clone())
                .or_default()
                .push(i);
        }

        Self {
            accounts,
            account_index,
            lines,
            lines_by_account,
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn lines(&self) -> &[EntryLine] {
        &self.lines
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.account_index.get(id).map(|&i| &self.accounts[i])
    }

    /// Entry lines posted to `id`, in journal order.
    pub fn lines_for<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a EntryLine> + 'a {
        self.lines_by_account
            .get(id)
            .into_iter()
            .flatten()
            .map(move |&i| &self.lines[i])
    }

    /// Zero for unknown accounts.
    pub fn balance(&self, id: &str, window: DateWindow) -> Decimal {
        self.split_balance(id, window).saldo
    }

    pub fn split_balance(&self, id: &str, window: DateWindow) -> SplitBalance {
        match self.account(id) {
            Some(account) => split_balance(self.lines_for(id), account, window),
            None => SplitBalance::ZERO,
        }
    }
}
