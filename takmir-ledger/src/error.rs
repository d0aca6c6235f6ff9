//! Domain errors for the bookkeeping derivations.

use crate::models::Id;
use service_core::error::AppError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Account {0} is part of a cyclic parent chain")]
    CyclicParent(Id),

    #[error("Account {0} not found")]
    AccountNotFound(Id),

    #[error("Unknown account type: {0}")]
    UnknownAccountType(String),

    #[error("Unknown balance side: {0}")]
    UnknownNormalBalance(String),

    #[error("Unknown restriction: {0}")]
    UnknownRestriction(String),

    #[error("Unknown report: {0}")]
    UnknownReportKind(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccountNotFound(_) => AppError::NotFound(anyhow::Error::new(err)),
            LedgerError::CyclicParent(_) => AppError::BadGateway(err.to_string()),
            _ => AppError::BadRequest(anyhow::Error::new(err)),
        }
    }
}
