//! Request bodies for booking document endpoints.

use checa_postgres::types::{DocumentType, PaymentMetadata, PaymentMethod};
use serde::Deserialize;
use validator::Validate;

/// Metadata for the stored file backing an upload.
///
/// Files land in object storage before this request is made; the body only
/// carries the resulting location and descriptors.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadRequest {
    /// Opaque key in the backing object store
    #[validate(length(min = 1, max = 256))]
    pub storage_key: String,
    /// Public or signed URL for retrieval
    #[validate(url)]
    pub url: String,
    /// Original file name
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    /// MIME type as reported by the client
    #[validate(length(min = 1, max = 128))]
    pub mime_type: String,
    /// File size in bytes
    #[validate(range(min = 1))]
    pub size_bytes: i64,
}

/// Payment details declared alongside a receipt upload.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetailsRequest {
    /// Declared payment amount
    #[validate(length(min = 1, max = 32))]
    pub amount: Option<String>,
    /// Declared payment method
    pub payment_method: Option<PaymentMethod>,
    /// Date of payment as written by the uploader
    #[validate(length(min = 1, max = 32))]
    pub payment_date: Option<String>,
    /// Bank or transaction reference number
    #[validate(length(min = 1, max = 64))]
    pub reference_number: Option<String>,
}

impl PaymentDetailsRequest {
    /// Converts the declared details into storable metadata.
    pub fn into_metadata(self) -> PaymentMetadata {
        PaymentMetadata {
            amount: self.amount,
            payment_method: self.payment_method,
            payment_date: self.payment_date,
            reference_number: self.reference_number,
        }
    }
}

/// Body for uploading a new booking document.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadDocumentRequest {
    /// Which document slot this upload fills
    pub document_type: DocumentType,
    /// Form number, for types that carry one
    #[validate(length(min = 1, max = 64))]
    pub form_number: Option<String>,
    /// Free-text note
    #[validate(length(max = 2000))]
    pub note: Option<String>,
    /// Payment details; only meaningful for receipt uploads
    #[validate(nested)]
    pub payment: Option<PaymentDetailsRequest>,
    /// The stored file backing this document
    #[validate(nested)]
    pub file: FileUploadRequest,
}

/// Body for verifying a pending document.
///
/// Finance staff may correct the declared payment details while approving a
/// receipt; both fields are ignored for other document types.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyDocumentRequest {
    /// Replacement note text
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    /// Corrected payment method
    pub payment_method: Option<PaymentMethod>,
    /// Corrected payment amount
    #[validate(length(min = 1, max = 32))]
    pub amount: Option<String>,
}

impl VerifyDocumentRequest {
    /// Returns whether the verifier supplied payment corrections.
    pub fn has_corrections(&self) -> bool {
        self.payment_method.is_some() || self.amount.is_some()
    }
}

/// Body for rejecting a pending document.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RejectDocumentRequest {
    /// Reason shown to the customer
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
}

/// Query parameters for listing a booking's documents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDocumentsQuery {
    /// Restrict the listing to one document type.
    #[serde(rename = "type")]
    pub document_type: Option<DocumentType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rejection_reason_fails_validation() {
        let request = RejectDocumentRequest {
            reason: String::new(),
        };
        assert!(request.validate().is_err());

        let request = RejectDocumentRequest {
            reason: "receipt is illegible".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn payment_details_convert_to_metadata() {
        let details = PaymentDetailsRequest {
            amount: Some("350.00".to_string()),
            payment_method: Some(PaymentMethod::VoteTransfer),
            payment_date: Some("2025-06-02".to_string()),
            reference_number: Some("VT-2025-0113".to_string()),
        };

        let metadata = details.into_metadata();
        assert_eq!(metadata.amount.as_deref(), Some("350.00"));
        assert_eq!(metadata.payment_method, Some(PaymentMethod::VoteTransfer));
    }

    #[test]
    fn upload_request_deserializes_from_camel_case() {
        let json = r#"{
            "documentType": "payment_receipt",
            "payment": {"amount": "120.00", "paymentMethod": "eft"},
            "file": {
                "storageKey": "receipts/abc",
                "url": "https://files.example.com/receipts/abc",
                "fileName": "receipt.pdf",
                "mimeType": "application/pdf",
                "sizeBytes": 52000
            }
        }"#;

        let request: UploadDocumentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.document_type, DocumentType::PaymentReceipt);
        assert!(request.validate().is_ok());
    }
}
