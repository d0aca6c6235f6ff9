//! Journal transaction and entry models.

use super::{deserialize_date, Id, NormalBalance};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Single DEBIT or KREDIT line of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    #[serde(default)]
    pub id: Option<Id>,
    pub akun_id: Id,
    pub tipe: NormalBalance,
    pub jumlah: Decimal,
    #[serde(default)]
    pub has_restriction: bool,
    #[serde(default)]
    pub keterangan: Option<String>,
}

impl JournalEntry {
    pub fn new(akun_id: impl Into<Id>, tipe: NormalBalance, jumlah: Decimal) -> Self {
        Self {
            id: None,
            akun_id: akun_id.into(),
            tipe,
            jumlah,
            has_restriction: false,
            keterangan: None,
        }
    }

    pub fn debit(akun_id: impl Into<Id>, jumlah: Decimal) -> Self {
        Self::new(akun_id, NormalBalance::Debit, jumlah)
    }

    pub fn kredit(akun_id: impl Into<Id>, jumlah: Decimal) -> Self {
        Self::new(akun_id, NormalBalance::Kredit, jumlah)
    }

    pub fn restricted(mut self) -> Self {
        self.has_restriction = true;
        self
    }
}

/// Journal transaction; created, edited and deleted as a whole by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalTransaction {
    pub id: Id,
    #[serde(deserialize_with = "deserialize_date")]
    pub tanggal: NaiveDate,
    #[serde(default)]
    pub keterangan: String,
    #[serde(default)]
    pub referensi: Option<String>,
    #[serde(default)]
    pub entries: Vec<JournalEntry>,
}

impl JournalTransaction {
    pub fn new(id: impl Into<Id>, tanggal: NaiveDate, keterangan: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tanggal,
            keterangan: keterangan.into(),
            referensi: None,
            entries: Vec::new(),
        }
    }

    pub fn with_entry(mut self, entry: JournalEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn with_referensi(mut self, referensi: impl Into<String>) -> Self {
        self.referensi = Some(referensi.into());
        self
    }

    /// Debit and kredit sums. Transactions are allowed to be unbalanced
    /// while entries are posted incrementally.
    pub fn totals(&self) -> TransactionTotals {
        TransactionTotals::from_entries(self.entries.iter().map(|e| (e.tipe, e.jumlah)))
    }
}

/// Debit/kredit sums of one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTotals {
    pub debit: Decimal,
    pub kredit: Decimal,
    /// `debit - kredit`.
    pub selisih: Decimal,
    pub is_balanced: bool,
}

impl TransactionTotals {
    pub fn from_entries(entries: impl IntoIterator<Item = (NormalBalance, Decimal)>) -> Self {
        let (debit, kredit) = entries.into_iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(debit, kredit), (tipe, jumlah)| match tipe {
                NormalBalance::Debit => (debit + jumlah, kredit),
                NormalBalance::Kredit => (debit, kredit + jumlah),
            },
        );
        let selisih = debit - kredit;

        Self {
            debit,
            kredit,
            selisih,
            is_balanced: selisih.is_zero(),
        }
    }
}

/// A journal entry flattened together with its transaction's date; the unit
/// balances are accumulated over.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryLine {
    pub transaction_id: Id,
    pub tanggal: NaiveDate,
    pub referensi: Option<String>,
    pub keterangan: String,
    pub akun_id: Id,
    pub tipe: NormalBalance,
    pub jumlah: Decimal,
    pub has_restriction: bool,
}

impl EntryLine {
    pub fn from_entry(transaction: &JournalTransaction, entry: &JournalEntry) -> Self {
        Self {
            transaction_id: transaction.id.clone(),
            tanggal: transaction.tanggal,
            referensi: transaction.referensi.clone(),
            keterangan: entry
                .keterangan
                .clone()
                .filter(|k| !k.trim().is_empty())
                .unwrap_or_else(|| transaction.keterangan.clone()),
            akun_id: entry.akun_id.clone(),
            tipe: entry.tipe,
            jumlah: entry.jumlah,
            has_restriction: entry.has_restriction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_deserialize_backend_transaction() {
        let json = r#"{
            "id": 12,
            "tanggal": "2024-05-02T00:00:00.000Z",
            "keterangan": "Infaq Jumat",
            "referensi": "BKM-001",
            "entries": [
                {"id": 1, "akunId": 4, "tipe": "DEBIT", "jumlah": 150000},
                {"id": 2, "akunId": 9, "tipe": "KREDIT", "jumlah": "150000.00", "hasRestriction": true}
            ]
        }"#;

        let tx: JournalTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.tanggal, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(tx.entries.len(), 2);
        assert_eq!(tx.entries[0].jumlah, Decimal::new(150000, 0));
        assert_eq!(tx.entries[1].tipe, NormalBalance::Kredit);
        assert!(tx.entries[1].has_restriction);
        assert!(tx.totals().is_balanced);
    }

    #[test]
    fn test_unbalanced_totals() {
        let tx = JournalTransaction::new(1, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "")
            .with_entry(JournalEntry::debit(1, Decimal::new(500, 0)))
            .with_entry(JournalEntry::kredit(2, Decimal::new(200, 0)));

        let totals = tx.totals();
        assert_eq!(totals.debit, Decimal::new(500, 0));
        assert_eq!(totals.kredit, Decimal::new(200, 0));
        assert_eq!(totals.selisih, Decimal::new(300, 0));
        assert!(!totals.is_balanced);
    }

    #[test]
    fn test_entry_line_falls_back_to_transaction_description() {
        let tx = JournalTransaction::new(1, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "Zakat")
            .with_entry(JournalEntry::debit(1, Decimal::ONE));
        let line = EntryLine::from_entry(&tx, &tx.entries[0]);
        assert_eq!(line.keterangan, "Zakat");
    }
}
