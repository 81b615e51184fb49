//! Document type enumeration for booking artifacts.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines the kind of artifact attached to a booking.
///
/// This enumeration corresponds to the `DOCUMENT_TYPE` PostgreSQL enum. The
/// seven values are a fixed contract: the verification-state aggregation
/// enumerates exactly this list, so adding or removing a variant changes the
/// gate computation for every booking.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::DocumentType"]
#[strum(serialize_all = "snake_case")]
pub enum DocumentType {
    /// Invoice issued to the customer
    #[db_rename = "invoice"]
    #[serde(rename = "invoice")]
    Invoice,

    /// Service request form generated by the portal, awaiting signature
    #[db_rename = "service_form_unsigned"]
    #[serde(rename = "service_form_unsigned")]
    ServiceFormUnsigned,

    /// Service request form uploaded back with signatures
    #[db_rename = "service_form_signed"]
    #[serde(rename = "service_form_signed")]
    ServiceFormSigned,

    /// Workspace rental form generated by the portal, awaiting signature
    #[db_rename = "workspace_form_unsigned"]
    #[serde(rename = "workspace_form_unsigned")]
    WorkspaceFormUnsigned,

    /// Workspace rental form uploaded back with signatures
    #[db_rename = "workspace_form_signed"]
    #[serde(rename = "workspace_form_signed")]
    WorkspaceFormSigned,

    /// Proof of payment uploaded by the customer
    #[db_rename = "payment_receipt"]
    #[serde(rename = "payment_receipt")]
    PaymentReceipt,

    /// Analytical result produced by the lab
    #[db_rename = "sample_result"]
    #[serde(rename = "sample_result")]
    SampleResult,
}

impl DocumentType {
    /// All document types, in the order used for grouped queries.
    pub const ALL: [DocumentType; 7] = [
        DocumentType::Invoice,
        DocumentType::ServiceFormUnsigned,
        DocumentType::ServiceFormSigned,
        DocumentType::WorkspaceFormUnsigned,
        DocumentType::WorkspaceFormSigned,
        DocumentType::PaymentReceipt,
        DocumentType::SampleResult,
    ];

    /// Returns whether documents of this type go through verification.
    ///
    /// Unsigned forms and lab outputs are portal-generated and never enter
    /// the verification queue.
    #[inline]
    pub fn requires_verification(self) -> bool {
        matches!(
            self,
            DocumentType::ServiceFormSigned
                | DocumentType::WorkspaceFormSigned
                | DocumentType::PaymentReceipt
        )
    }

    /// Returns whether this type is uploaded by the customer.
    #[inline]
    pub fn is_customer_upload(self) -> bool {
        self.requires_verification()
    }

    /// Returns whether this type is only applicable to bookings with a
    /// workspace rental component.
    #[inline]
    pub fn is_workspace_form(self) -> bool {
        matches!(
            self,
            DocumentType::WorkspaceFormUnsigned | DocumentType::WorkspaceFormSigned
        )
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn all_covers_every_variant() {
        let iterated: Vec<DocumentType> = DocumentType::iter().collect();
        assert_eq!(iterated, DocumentType::ALL.to_vec());
    }

    #[test]
    fn serde_names_are_snake_case() {
        let json = serde_json::to_string(&DocumentType::ServiceFormSigned).unwrap();
        assert_eq!(json, "\"service_form_signed\"");

        let parsed: DocumentType = serde_json::from_str("\"payment_receipt\"").unwrap();
        assert_eq!(parsed, DocumentType::PaymentReceipt);
    }

    #[test]
    fn verification_scope() {
        assert!(DocumentType::PaymentReceipt.requires_verification());
        assert!(DocumentType::ServiceFormSigned.requires_verification());
        assert!(!DocumentType::Invoice.requires_verification());
        assert!(!DocumentType::SampleResult.requires_verification());
        assert!(!DocumentType::ServiceFormUnsigned.requires_verification());
    }
}
