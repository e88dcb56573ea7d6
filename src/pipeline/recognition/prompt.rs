//! The fixed, versioned extraction prompt.
//!
//! The prompt is part of the service contract: it pins the exact output
//! schema (five keys, date as yyyy-MM-dd) and the disambiguation rules for
//! handwritten cheques. Changing the wording means bumping the version.

pub const PROMPT_VERSION: &str = "v2";

const EXTRACTION_PROMPT: &str = r#"Please extract the following details from the provided cheque image and format them as JSON:
{
  "chequeNum": "<cheque number>",
  "owner": "<name of the owner>",
  "date": "<date in yyyy-MM-dd format>",
  "amount": "<amount>",
  "BankName": "<complete bank name>"
}
Only respond with this JSON object, without extra text, return lines or spaces.
The owner of the cheque is the name below the label "Titulaire de compte" or "N° du compte"; the owner is never the name in front of the words "à l'ordre de".
The amount is always the handwritten figure in the top right corner."#;

/// The extraction prompt sent with every request.
pub fn extraction_prompt() -> &'static str {
    EXTRACTION_PROMPT
}
