//! Account role enumeration for authorization checks.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Role assigned to a portal account.
///
/// This enumeration corresponds to the `ACCOUNT_ROLE` PostgreSQL enum.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::AccountRole"]
#[strum(serialize_all = "snake_case")]
pub enum AccountRole {
    /// Regular customer who books services and uploads documents
    #[db_rename = "customer"]
    #[serde(rename = "customer")]
    #[default]
    Customer,

    /// Lab administrator who verifies forms and manages bookings
    #[db_rename = "admin"]
    #[serde(rename = "admin")]
    Admin,

    /// Finance officer who verifies payments
    #[db_rename = "finance"]
    #[serde(rename = "finance")]
    Finance,
}

impl AccountRole {
    /// Returns whether this role may verify or reject booking documents.
    #[inline]
    pub fn can_verify_documents(self) -> bool {
        matches!(self, AccountRole::Admin | AccountRole::Finance)
    }

    /// Returns whether this role may change portal settings.
    #[inline]
    pub fn can_manage_settings(self) -> bool {
        matches!(self, AccountRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_permissions() {
        assert!(AccountRole::Admin.can_verify_documents());
        assert!(AccountRole::Finance.can_verify_documents());
        assert!(!AccountRole::Customer.can_verify_documents());
    }

    #[test]
    fn settings_permissions() {
        assert!(AccountRole::Admin.can_manage_settings());
        assert!(!AccountRole::Finance.can_manage_settings());
        assert!(!AccountRole::Customer.can_manage_settings());
    }
}
