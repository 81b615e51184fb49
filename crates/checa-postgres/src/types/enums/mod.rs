//! Domain enumerations shared across models, queries, and the API layer.

mod account_role;
mod account_status;
mod audit_action;
mod document_type;
mod payment_method;
mod verification_status;

pub use self::account_role::AccountRole;
pub use self::account_status::AccountStatus;
pub use self::audit_action::AuditAction;
pub use self::document_type::DocumentType;
pub use self::payment_method::PaymentMethod;
pub use self::verification_status::VerificationStatus;
