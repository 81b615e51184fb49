//! Account status enumeration.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Lifecycle status of a portal account.
///
/// This enumeration corresponds to the `ACCOUNT_STATUS` PostgreSQL enum.
/// Protected endpoints require an active account regardless of role.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::AccountStatus"]
#[strum(serialize_all = "snake_case")]
pub enum AccountStatus {
    /// Account is in good standing
    #[db_rename = "active"]
    #[serde(rename = "active")]
    #[default]
    Active,

    /// Account is temporarily suspended by an administrator
    #[db_rename = "suspended"]
    #[serde(rename = "suspended")]
    Suspended,

    /// Account was deactivated and cannot be used
    #[db_rename = "deactivated"]
    #[serde(rename = "deactivated")]
    Deactivated,
}

impl AccountStatus {
    /// Returns whether the account may call protected endpoints.
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, AccountStatus::Active)
    }
}
