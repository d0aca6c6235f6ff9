//! Normal balance resolution: which side increases an account.

use crate::models::{Account, AccountType, NormalBalance};
use rust_decimal::Decimal;

impl NormalBalance {
    /// Normal side of an account: the explicit override if set, else the
    /// side implied by its type.
    pub fn for_account(account: &Account) -> Self {
        account
            .normal_balance
            .unwrap_or_else(|| Self::for_type(account.account_type))
    }

    /// ASSET/EXPENSE increase on the debit side, LIABILITY/EQUITY/REVENUE on
    /// the kredit side. Missing types default to DEBIT.
    pub fn for_type(account_type: Option<AccountType>) -> Self {
        match account_type {
            Some(AccountType::Liability | AccountType::Equity | AccountType::Revenue) => {
                Self::Kredit
            }
            Some(AccountType::Asset | AccountType::Expense) | None => Self::Debit,
        }
    }

    /// Bare-label variant, accepting backend or display spelling. Unknown
    /// labels default to DEBIT.
    pub fn for_type_label(label: &str) -> Self {
        Self::for_type(label.parse().ok())
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Kredit,
            Self::Kredit => Self::Debit,
        }
    }

    /// Signed contribution of an entry on side `tipe` to an account whose
    /// normal side is `self`.
    pub fn signed(self, tipe: NormalBalance, amount: Decimal) -> Decimal {
        if self == tipe {
            amount
        } else {
            -amount
        }
    }
}

/// True when `tipe` is the account's normal side. Posting against the
/// normal side is allowed; callers use this only to flag the entry.
pub fn is_normal_balance(account: &Account, tipe: NormalBalance) -> bool {
    NormalBalance::for_account(account) == tipe
}
