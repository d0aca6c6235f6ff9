//! Takmir ledger - double-entry bookkeeping derivations for mosque accounts.
//!
//! Everything here is pure computation over in-memory snapshots of the chart
//! of accounts and the journal: ordering and tree assembly, balances, and the
//! three financial statements.

pub mod balance;
pub mod coa;
pub mod error;
pub mod filter;
pub mod format;
pub mod models;
pub mod statements;
pub mod validation;

pub use balance::{DateWindow, Ledger, SplitBalance};
pub use error::LedgerError;
pub use models::{
    Account, AccountType, EntryLine, Id, JournalEntry, JournalTransaction, NormalBalance,
    ReportKind, Restriction,
};
