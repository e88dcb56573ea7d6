//! Post-parse validation and normalization of a candidate record.
//!
//! Nothing is silently defaulted: every failure is explicit and
//! attributable to one field, so the operator knows what the model could
//! not read.

use chrono::NaiveDate;

use super::parse::CandidateRecord;
use super::ScanError;
use crate::ledger::ChequeRecord;

/// Validate presence of all five extracted fields plus the artifact path,
/// then canonicalize date and amount.
pub fn normalize(
    candidate: CandidateRecord,
    artifact_path: &str,
) -> Result<ChequeRecord, ScanError> {
    let mut missing = Vec::new();
    if is_blank(&candidate.cheque_num) {
        missing.push("chequeNum");
    }
    if is_blank(&candidate.owner) {
        missing.push("owner");
    }
    if is_blank(&candidate.date) {
        missing.push("date");
    }
    if is_blank(&candidate.amount) {
        missing.push("amount");
    }
    if is_blank(&candidate.bank_name) {
        missing.push("BankName");
    }
    if artifact_path.trim().is_empty() {
        missing.push("path");
    }
    if !missing.is_empty() {
        return Err(ScanError::IncompleteRecord(missing));
    }

    // Presence was just checked
    let date_text = candidate.date.as_deref().unwrap_or_default().trim();
    let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")
        .map_err(|_| ScanError::InvalidDate(date_text.to_string()))?;

    let amount_text = candidate.amount.as_deref().unwrap_or_default().trim();
    let amount: f64 = amount_text
        .parse()
        .map_err(|_| ScanError::InvalidAmount(amount_text.to_string()))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(ScanError::InvalidAmount(amount_text.to_string()));
    }

    Ok(ChequeRecord {
        cheque_number: trimmed(&candidate.cheque_num),
        bank_name: trimmed(&candidate.bank_name),
        date,
        owner_name: trimmed(&candidate.owner),
        amount,
        artifact_path: artifact_path.trim().to_string(),
    })
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |v| v.trim().is_empty())
}

fn trimmed(field: &Option<String>) -> String {
    field.as_deref().unwrap_or_default().trim().to_string()
}
