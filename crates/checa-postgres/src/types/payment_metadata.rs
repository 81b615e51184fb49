//! Payment metadata embedded in receipt documents.
//!
//! The original portal schema stores structured payment details as JSON
//! inside the free-text `note` column of a receipt document. This module is
//! the compatibility shim around that: parsing is lenient and a malformed
//! note degrades to empty metadata instead of failing the read path.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TRACING_TARGET_QUERY;
use crate::types::PaymentMethod;

/// Structured payment details carried in a receipt document's note.
///
/// Every field is optional; callers must apply their own fallbacks (amount
/// `"0"`, method [`PaymentMethod::Eft`], payment date = document upload
/// time).
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentMetadata {
    /// Declared payment amount, kept as a string to match legacy notes
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub amount: Option<String>,

    /// Declared payment method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,

    /// Date of payment as written by the uploader
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,

    /// Bank or transaction reference number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
}

impl PaymentMetadata {
    /// Returns whether no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.payment_method.is_none()
            && self.payment_date.is_none()
            && self.reference_number.is_none()
    }

    /// Returns the amount, falling back to `"0"`.
    pub fn amount_or_default(&self) -> &str {
        self.amount.as_deref().unwrap_or("0")
    }

    /// Returns the method, falling back to [`PaymentMethod::Eft`].
    pub fn method_or_default(&self) -> PaymentMethod {
        self.payment_method.unwrap_or_default()
    }

    /// Serializes this metadata back into note form.
    pub fn encode_note(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Legacy notes sometimes carry the amount as a JSON number.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number for amount, got {}",
            other
        ))),
    }
}

/// Parses the payment metadata embedded in a receipt note.
///
/// Returns empty metadata when the note is absent, blank, or not valid JSON
/// of the expected shape. Parse failures are logged with the offending
/// document id and never propagated; all downstream consumers must treat
/// every field as optional.
pub fn parse_payment_metadata(note: Option<&str>, document_id: Uuid) -> PaymentMetadata {
    let Some(raw) = note.map(str::trim).filter(|s| !s.is_empty()) else {
        return PaymentMetadata::default();
    };

    match serde_json::from_str(raw) {
        Ok(metadata) => metadata,
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET_QUERY,
                document_id = %document_id,
                error = %error,
                "Failed to parse payment metadata from note, treating as empty"
            );
            PaymentMetadata::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_id() -> Uuid {
        Uuid::new_v4()
    }

    #[test]
    fn parses_full_metadata() {
        let note = r#"{"amount":"350.00","paymentMethod":"vote_transfer","paymentDate":"2025-06-02","referenceNumber":"VT-2025-0113"}"#;
        let metadata = parse_payment_metadata(Some(note), doc_id());

        assert_eq!(metadata.amount.as_deref(), Some("350.00"));
        assert_eq!(metadata.payment_method, Some(PaymentMethod::VoteTransfer));
        assert_eq!(metadata.payment_date.as_deref(), Some("2025-06-02"));
        assert_eq!(metadata.reference_number.as_deref(), Some("VT-2025-0113"));
    }

    #[test]
    fn round_trips_through_note_encoding() {
        let note = r#"{"amount":"120.50","paymentMethod":"eft","paymentDate":"2025-01-15","referenceNumber":"EFT-991"}"#;
        let metadata = parse_payment_metadata(Some(note), doc_id());
        let reparsed = parse_payment_metadata(Some(&metadata.encode_note()), doc_id());
        assert_eq!(metadata, reparsed);
    }

    #[test]
    fn malformed_note_degrades_to_empty() {
        let metadata = parse_payment_metadata(Some("{not json"), doc_id());
        assert!(metadata.is_empty());

        let metadata = parse_payment_metadata(Some("approved by finance"), doc_id());
        assert!(metadata.is_empty());
    }

    #[test]
    fn missing_or_blank_note_is_empty() {
        assert!(parse_payment_metadata(None, doc_id()).is_empty());
        assert!(parse_payment_metadata(Some("   "), doc_id()).is_empty());
    }

    #[test]
    fn numeric_amount_is_accepted() {
        let metadata = parse_payment_metadata(Some(r#"{"amount":350}"#), doc_id());
        assert_eq!(metadata.amount.as_deref(), Some("350"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let note = r#"{"amount":"10","legacyField":true}"#;
        let metadata = parse_payment_metadata(Some(note), doc_id());
        assert_eq!(metadata.amount.as_deref(), Some("10"));
        assert!(metadata.payment_method.is_none());
    }

    #[test]
    fn fallbacks() {
        let metadata = PaymentMetadata::default();
        assert_eq!(metadata.amount_or_default(), "0");
        assert_eq!(metadata.method_or_default(), PaymentMethod::Eft);
    }
}
