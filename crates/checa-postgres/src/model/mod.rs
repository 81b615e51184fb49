//! Row models mapped onto the database schema.
//!
//! Each table has a read model plus, where the crate writes to it, a `New*`
//! insert model and an update changeset.

mod account;
mod audit_event;
mod booking;
mod booking_document;
mod file_blob;
mod signature_settings;

pub use self::account::Account;
pub use self::audit_event::{AuditEvent, NewAuditEvent};
pub use self::booking::Booking;
pub use self::booking_document::{BookingDocument, NewBookingDocument, SettleBookingDocument};
pub use self::file_blob::{FileBlob, NewFileBlob};
pub use self::signature_settings::{
    SIGNATURE_SETTINGS_ID, SignatureSettings, UpdateSignatureSettings,
};
