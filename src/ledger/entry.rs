use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A fully validated cheque record. This is the only shape allowed to enter
/// the ledger as a saved entry: all six fields are present, the date is a
/// real calendar date and the amount is a non-negative number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChequeRecord {
    pub cheque_number: String,
    pub bank_name: String,
    pub date: NaiveDate,
    pub owner_name: String,
    pub amount: f64,
    /// Relative filename of the scanned image under the artifact directory.
    pub artifact_path: String,
}

/// Editable field slots of a ledger entry.
///
/// Drafts and manual edits hold operator-entered text, so date and amount
/// stay strings here; they are only normalized when a record comes through
/// the scan pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryFields {
    pub cheque_number: Option<String>,
    pub bank_name: Option<String>,
    pub date: Option<String>,
    pub owner_name: Option<String>,
    pub amount: Option<String>,
    pub artifact_path: Option<String>,
}

impl EntryFields {
    /// Names of required fields that are absent or blank, in display order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.cheque_number) {
            missing.push("chequeNumber");
        }
        if is_blank(&self.bank_name) {
            missing.push("bankName");
        }
        if is_blank(&self.date) {
            missing.push("date");
        }
        if is_blank(&self.owner_name) {
            missing.push("ownerName");
        }
        if is_blank(&self.amount) {
            missing.push("amount");
        }
        if is_blank(&self.artifact_path) {
            missing.push("artifactPath");
        }
        missing
    }

    /// True when all six required fields are non-empty.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// True when no field has been filled in at all.
    pub fn is_empty(&self) -> bool {
        self.missing_fields().len() == 6
    }

    /// Apply a partial update, overwriting only the fields the patch carries.
    pub fn apply_patch(&mut self, patch: &EntryPatch) {
        if let Some(v) = &patch.cheque_number {
            self.cheque_number = Some(v.clone());
        }
        if let Some(v) = &patch.bank_name {
            self.bank_name = Some(v.clone());
        }
        if let Some(v) = &patch.date {
            self.date = Some(v.clone());
        }
        if let Some(v) = &patch.owner_name {
            self.owner_name = Some(v.clone());
        }
        if let Some(v) = &patch.amount {
            self.amount = Some(v.clone());
        }
        if let Some(v) = &patch.artifact_path {
            self.artifact_path = Some(v.clone());
        }
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |v| v.trim().is_empty())
}

impl From<&ChequeRecord> for EntryFields {
    fn from(record: &ChequeRecord) -> Self {
        Self {
            cheque_number: Some(record.cheque_number.clone()),
            bank_name: Some(record.bank_name.clone()),
            date: Some(record.date.format("%Y-%m-%d").to_string()),
            owner_name: Some(record.owner_name.clone()),
            amount: Some(record.amount.to_string()),
            artifact_path: Some(record.artifact_path.clone()),
        }
    }
}

/// Partial field update sent by the operator UI for manual edits.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    pub cheque_number: Option<String>,
    pub bank_name: Option<String>,
    pub date: Option<String>,
    pub owner_name: Option<String>,
    pub amount: Option<String>,
    pub artifact_path: Option<String>,
}

/// One row of the cheque ledger.
///
/// Lifecycle: created empty as a draft, mutated field-by-field by manual
/// edits or overwritten whole by a pipeline merge, saved once complete.
/// Exactly one draft exists at any time (the perpetual "next empty row").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    #[serde(flatten)]
    pub fields: EntryFields,
    pub is_draft: bool,
    pub saved_on: Option<NaiveDate>,
}

impl LedgerEntry {
    /// A fresh empty draft with a random id.
    pub fn new_draft() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            fields: EntryFields::default(),
            is_draft: true,
            saved_on: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> ChequeRecord {
        ChequeRecord {
            cheque_number: "123".into(),
            bank_name: "Bank X".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            owner_name: "Bob".into(),
            amount: 50.5,
            artifact_path: "cheque-123.jpg".into(),
        }
    }

    #[test]
    fn new_draft_is_empty() {
        let entry = LedgerEntry::new_draft();
        assert!(entry.is_draft);
        assert!(entry.saved_on.is_none());
        assert!(entry.fields.is_empty());
        assert!(!entry.id.is_empty());
    }

    #[test]
    fn record_converts_to_complete_fields() {
        let fields = EntryFields::from(&full_record());
        assert!(fields.is_complete());
        assert_eq!(fields.date.as_deref(), Some("2024-03-01"));
        assert_eq!(fields.amount.as_deref(), Some("50.5"));
    }

    #[test]
    fn whole_amount_has_no_trailing_fraction() {
        let mut record = full_record();
        record.amount = 100.0;
        let fields = EntryFields::from(&record);
        assert_eq!(fields.amount.as_deref(), Some("100"));
    }

    #[test]
    fn missing_fields_are_named() {
        let fields = EntryFields {
            cheque_number: Some("1".into()),
            bank_name: Some("  ".into()),
            ..Default::default()
        };
        let missing = fields.missing_fields();
        assert!(!missing.contains(&"chequeNumber"));
        assert!(missing.contains(&"bankName"), "blank counts as missing");
        assert!(missing.contains(&"date"));
        assert!(missing.contains(&"artifactPath"));
    }

    #[test]
    fn patch_overwrites_only_given_fields() {
        let mut fields = EntryFields::from(&full_record());
        let patch = EntryPatch {
            owner_name: Some("Alice".into()),
            ..Default::default()
        };
        fields.apply_patch(&patch);
        assert_eq!(fields.owner_name.as_deref(), Some("Alice"));
        assert_eq!(fields.bank_name.as_deref(), Some("Bank X"));
    }

    #[test]
    fn entry_serializes_with_flattened_fields() {
        let mut entry = LedgerEntry::new_draft();
        entry.fields = EntryFields::from(&full_record());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["chequeNumber"], "123");
        assert_eq!(json["isDraft"], true);
        assert!(json["savedOn"].is_null());
    }
}
