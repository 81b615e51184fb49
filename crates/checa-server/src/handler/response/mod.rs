//! Response bodies shared by the HTTP handlers.

mod document;
mod error_response;
mod receipt;
mod settings;

pub use self::document::{BookingDocumentView, FileBlobView, VerificationStateView};
pub use self::error_response::ErrorResponse;
pub use self::receipt::ReceiptListResponse;
pub use self::settings::SignatureSettingsView;
