//! Request bodies and query parameters for the HTTP handlers.

mod document;
mod receipt;
mod settings;

pub use self::document::{
    ListDocumentsQuery, PaymentDetailsRequest, RejectDocumentRequest, UploadDocumentRequest,
    VerifyDocumentRequest,
};
pub use self::receipt::ReceiptListQuery;
pub use self::settings::UpdateSignatureSettingsRequest;
