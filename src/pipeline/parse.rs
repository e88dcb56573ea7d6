//! Sanitize and parse the recognition service's raw text output.
//!
//! The service is allowed to wrap its JSON in a documented envelope of
//! decorations: code-fence markers, escaped newline sequences and
//! surrounding whitespace. A fixed set of substitutions strips exactly
//! that envelope; anything left that is not one JSON object fails closed
//! as `MalformedResponse`. No best-effort recovery — silently accepting
//! corrupted financial data is worse than a retry.

use serde_json::Value;

use super::ScanError;

/// Candidate record parsed from the service response. All fields optional
/// until validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateRecord {
    pub cheque_num: Option<String>,
    pub owner: Option<String>,
    pub date: Option<String>,
    pub amount: Option<String>,
    pub bank_name: Option<String>,
}

/// Strip the documented decoration envelope: ```json fences, bare ```
/// markers, literal \n escape sequences, surrounding whitespace.
/// Idempotent: undecorated JSON passes through unchanged.
pub fn strip_decorations(raw: &str) -> String {
    raw.replace("```json", "")
        .replace("```", "")
        .replace("\\n", "")
        .trim()
        .to_string()
}

/// Parse the raw response into a candidate record.
///
/// Expected keys: `chequeNum, owner, date, amount, BankName`. Extra keys
/// are ignored, missing keys stay absent. String values pass through;
/// bare numbers are stringified (the model occasionally unquotes the
/// amount); any other value type fails.
pub fn parse_candidate(raw: &str) -> Result<CandidateRecord, ScanError> {
    let cleaned = strip_decorations(raw);

    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| ScanError::MalformedResponse(format!("not valid JSON: {e}")))?;

    let obj = value
        .as_object()
        .ok_or_else(|| ScanError::MalformedResponse("expected a JSON object".into()))?;

    Ok(CandidateRecord {
        cheque_num: field_string(obj, "chequeNum")?,
        owner: field_string(obj, "owner")?,
        date: field_string(obj, "date")?,
        amount: field_string(obj, "amount")?,
        bank_name: field_string(obj, "BankName")?,
    })
}

fn field_string(
    obj: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<Option<String>, ScanError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(ScanError::MalformedResponse(format!(
            "field {key} has unsupported type: {other}"
        ))),
    }
}
