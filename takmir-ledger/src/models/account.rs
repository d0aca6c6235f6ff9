//! Chart-of-accounts node.

use super::{deserialize_lenient, Id};
use crate::error::LedgerError;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Implements `Deserialize` through `FromStr` so that every accepted
/// spelling (backend enum, display label, any case) round-trips.
macro_rules! deserialize_via_from_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    let raw = String::deserialize(deserializer)?;
                    raw.parse().map_err(serde::de::Error::custom)
                }
            }
        )+
    };
}

/// Account types following standard accounting categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl AccountType {
    pub const ALL: [AccountType; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Revenue,
        Self::Expense,
    ];

    /// Backend enum spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Equity => "EQUITY",
            Self::Revenue => "REVENUE",
            Self::Expense => "EXPENSE",
        }
    }

    /// Localized display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Asset => "ASET",
            Self::Liability => "KEWAJIBAN",
            Self::Equity => "EKUITAS",
            Self::Revenue => "PENDAPATAN",
            Self::Expense => "BEBAN",
        }
    }

    /// Balance-sheet types are reported on the Neraca, the rest on the
    /// income statement.
    pub fn default_report(&self) -> ReportKind {
        match self {
            Self::Asset | Self::Liability | Self::Equity => ReportKind::Neraca,
            Self::Revenue | Self::Expense => ReportKind::LaporanPenghasilanKomprehensif,
        }
    }
}

impl FromStr for AccountType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ASSET" | "ASET" => Ok(Self::Asset),
            "LIABILITY" | "KEWAJIBAN" => Ok(Self::Liability),
            "EQUITY" | "EKUITAS" => Ok(Self::Equity),
            "REVENUE" | "PENDAPATAN" => Ok(Self::Revenue),
            "EXPENSE" | "BEBAN" => Ok(Self::Expense),
            _ => Err(LedgerError::UnknownAccountType(s.to_string())),
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Side of a journal entry, and the side on which an account increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NormalBalance {
    Debit,
    Kredit,
}

impl NormalBalance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "DEBIT",
            Self::Kredit => "KREDIT",
        }
    }
}

impl FromStr for NormalBalance {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBIT" => Ok(Self::Debit),
            "KREDIT" | "CREDIT" => Ok(Self::Kredit),
            _ => Err(LedgerError::UnknownNormalBalance(s.to_string())),
        }
    }
}

impl std::fmt::Display for NormalBalance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Donor restriction on net assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Restriction {
    TanpaPembatasan,
    DenganPembatasan,
}

impl FromStr for Restriction {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace([' ', '-'], "_").as_str() {
            "TANPA_PEMBATASAN" => Ok(Self::TanpaPembatasan),
            "DENGAN_PEMBATASAN" => Ok(Self::DenganPembatasan),
            _ => Err(LedgerError::UnknownRestriction(s.to_string())),
        }
    }
}

/// Statement an account's balance belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportKind {
    Neraca,
    LaporanPenghasilanKomprehensif,
}

impl FromStr for ReportKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace([' ', '-'], "_").as_str() {
            "NERACA" => Ok(Self::Neraca),
            "LAPORAN_PENGHASILAN_KOMPREHENSIF" => Ok(Self::LaporanPenghasilanKomprehensif),
            _ => Err(LedgerError::UnknownReportKind(s.to_string())),
        }
    }
}

deserialize_via_from_str!(AccountType, NormalBalance, Restriction, ReportKind);

fn default_true() -> bool {
    true
}

/// Chart-of-accounts node as persisted by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Id,
    pub code: String,
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "deserialize_lenient")]
    pub account_type: Option<AccountType>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub normal_balance: Option<NormalBalance>,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub parent_id: Option<Id>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub restriction: Option<Restriction>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub report: Option<ReportKind>,
}

impl Account {
    /// Active, postable account with no parent.
    pub fn new(
        id: impl Into<Id>,
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            account_type: Some(account_type),
            normal_balance: None,
            is_group: false,
            is_active: true,
            parent_id: None,
            category: None,
            restriction: None,
            report: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<Id>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_normal_balance(mut self, side: NormalBalance) -> Self {
        self.normal_balance = Some(side);
        self
    }

    pub fn with_restriction(mut self, restriction: Restriction) -> Self {
        self.restriction = Some(restriction);
        self
    }

    pub fn with_report(mut self, report: ReportKind) -> Self {
        self.report = Some(report);
        self
    }

    pub fn group(mut self) -> Self {
        self.is_group = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Postable accounts are active leaves that can carry journal entries.
    pub fn is_postable(&self) -> bool {
        self.is_active && !self.is_group
    }

    pub fn is_restricted(&self) -> bool {
        self.restriction == Some(Restriction::DenganPembatasan)
    }

    /// Statement this account's balance appears on: the explicit `report`
    /// field, else the one implied by its type.
    pub fn effective_report(&self) -> Option<ReportKind> {
        self.report
            .or_else(|| self.account_type.map(|t| t.default_report()))
    }

    pub fn type_label(&self) -> Option<&'static str> {
        self.account_type.map(|t| t.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_accepts_both_spellings() {
        assert_eq!("ASSET".parse::<AccountType>().unwrap(), AccountType::Asset);
        assert_eq!("aset".parse::<AccountType>().unwrap(), AccountType::Asset);
        assert_eq!("Beban".parse::<AccountType>().unwrap(), AccountType::Expense);
        assert_eq!(
            "KEWAJIBAN".parse::<AccountType>().unwrap(),
            AccountType::Liability
        );
        assert!("MODAL".parse::<AccountType>().is_err());
    }

    #[test]
    fn test_deserialize_backend_account() {
        let json = r#"{
            "id": 7,
            "code": "3.1.01",
            "name": "Aset Neto Tanpa Pembatasan",
            "type": "EKUITAS",
            "normalBalance": "kredit",
            "isGroup": false,
            "parentId": 3,
            "category": "Aset Neto",
            "restriction": "TANPA_PEMBATASAN",
            "report": "NERACA"
        }"#;

        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.id, Id::from(7));
        assert_eq!(account.account_type, Some(AccountType::Equity));
        assert_eq!(account.normal_balance, Some(NormalBalance::Kredit));
        assert_eq!(account.parent_id, Some(Id::from("3")));
        assert_eq!(account.restriction, Some(Restriction::TanpaPembatasan));
        assert_eq!(account.report, Some(ReportKind::Neraca));
        assert!(account.is_active);
    }

    #[test]
    fn test_unknown_enum_values_are_dropped() {
        let json = r#"{"id": "a", "code": "9", "name": "X", "type": "OTHER", "normalBalance": ""}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_type, None);
        assert_eq!(account.normal_balance, None);
        assert_eq!(account.effective_report(), None);
    }

    #[test]
    fn test_serializes_backend_spelling() {
        let account = Account::new(1, "1.1", "Kas", AccountType::Asset);
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["type"], "ASSET");
        assert_eq!(value["isActive"], true);
    }
}
