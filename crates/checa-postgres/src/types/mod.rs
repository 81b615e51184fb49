//! Shared domain types: enumerations and pure derived state.

mod enums;
mod payment_metadata;
mod verification;

pub use self::enums::{
    AccountRole, AccountStatus, AuditAction, DocumentType, PaymentMethod, VerificationStatus,
};
pub use self::payment_metadata::{PaymentMetadata, parse_payment_metadata};
pub use self::verification::DocumentVerificationState;
