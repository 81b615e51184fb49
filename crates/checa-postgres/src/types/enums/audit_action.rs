//! Audit action enumeration for the audit trail.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Action recorded in the audit trail.
///
/// This enumeration corresponds to the `AUDIT_ACTION` PostgreSQL enum. Every
/// verification or settings mutation emits exactly one of these.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::AuditAction"]
#[strum(serialize_all = "snake_case")]
pub enum AuditAction {
    /// A booking document was verified
    #[db_rename = "document_verified"]
    #[serde(rename = "document_verified")]
    DocumentVerified,

    /// A booking document was rejected
    #[db_rename = "document_rejected"]
    #[serde(rename = "document_rejected")]
    DocumentRejected,

    /// Portal settings were changed
    #[db_rename = "settings_updated"]
    #[serde(rename = "settings_updated")]
    SettingsUpdated,
}
