//! Journal input validation before submission to the backend.

use crate::coa::is_normal_balance;
use crate::models::{deserialize_optional_date, Account, Id, NormalBalance, TransactionTotals};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use validator::{Validate, ValidationError, ValidationErrors};

/// Transaction form as submitted by the journal editor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    #[validate(required(message = "Tanggal wajib diisi"))]
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub tanggal: Option<NaiveDate>,
    #[validate(length(max = 500, message = "Keterangan terlalu panjang"))]
    #[serde(default)]
    pub keterangan: String,
    #[validate(length(max = 100, message = "Referensi terlalu panjang"))]
    #[serde(default)]
    pub referensi: Option<String>,
    #[validate(length(min = 1, message = "Minimal satu entri"))]
    #[serde(default)]
    pub entries: Vec<EntryInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryInput {
    #[serde(default)]
    pub akun_id: Option<Id>,
    pub tipe: NormalBalance,
    #[serde(default)]
    pub jumlah: Decimal,
    #[serde(default)]
    pub has_restriction: bool,
    #[serde(default)]
    pub keterangan: Option<String>,
}

impl EntryInput {
    pub fn new(akun_id: impl Into<Id>, tipe: NormalBalance, jumlah: Decimal) -> Self {
        Self {
            akun_id: Some(akun_id.into()),
            tipe,
            jumlah,
            has_restriction: false,
            keterangan: None,
        }
    }
}

/// Entry posted against its account's non-normal side. Legitimate for
/// reversals, so it is reported rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryWarning {
    pub index: usize,
    pub akun_id: Id,
    pub tipe: NormalBalance,
    pub normal_balance: NormalBalance,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedTransaction {
    pub totals: TransactionTotals,
    pub warnings: Vec<EntryWarning>,
}

/// Check a transaction form against the chart of accounts.
///
/// Unbalanced transactions pass; the caller shows `totals.selisih`.
pub fn validate_transaction(
    input: &TransactionInput,
    accounts: &[Account],
) -> Result<ValidatedTransaction, ValidationErrors> {
    let mut errors = match input.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    let by_id: HashMap<&Id, &Account> = accounts.iter().map(|a| (&a.id, a)).collect();
    let mut warnings = Vec::new();

    for (index, entry) in input.entries.iter().enumerate() {
        if entry.jumlah <= Decimal::ZERO {
            errors.add(
                "entries",
                entry_error(index, "positive_amount", "Jumlah harus lebih dari nol"),
            );
        }

        let Some(akun_id) = entry.akun_id.as_ref() else {
            errors.add(
                "entries",
                entry_error(index, "account_required", "Akun wajib dipilih"),
            );
            continue;
        };

        let Some(account) = by_id.get(akun_id) else {
            errors.add(
                "entries",
                entry_error(index, "account_not_found", "Akun tidak ditemukan"),
            );
            continue;
        };

        if !account.is_postable() {
            errors.add(
                "entries",
                entry_error(
                    index,
                    "account_not_postable",
                    "Akun grup atau nonaktif tidak dapat dipakai",
                ),
            );
            continue;
        }

        if !is_normal_balance(account, entry.tipe) {
            let normal_balance = NormalBalance::for_account(account);
            warnings.push(EntryWarning {
                index,
                akun_id: akun_id.clone(),
                tipe: entry.tipe,
                normal_balance,
                message: format!(
                    "{} {} dicatat di sisi {}, saldo normalnya {}",
                    account.code, account.name, entry.tipe, normal_balance
                ),
            });
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedTransaction {
        totals: TransactionTotals::from_entries(input.entries.iter().map(|e| (e.tipe, e.jumlah))),
        warnings,
    })
}

fn entry_error(index: usize, code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code).with_message(Cow::Borrowed(message));
    error.add_param(Cow::Borrowed("index"), &index);
    error
}
