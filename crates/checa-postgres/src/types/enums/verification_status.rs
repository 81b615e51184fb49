//! Verification status enumeration for the document lifecycle.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines where a booking document sits in the verification lifecycle.
///
/// This enumeration corresponds to the `VERIFICATION_STATUS` PostgreSQL enum.
/// Transitions are monotonic: `pending_verification` moves to `verified` or
/// `rejected` and never leaves either terminal state. A rejected document is
/// replaced by a fresh upload (new row), not reset in place.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::VerificationStatus"]
#[strum(serialize_all = "snake_case")]
pub enum VerificationStatus {
    /// No document of this type has been uploaded yet
    #[db_rename = "pending_upload"]
    #[serde(rename = "pending_upload")]
    #[default]
    PendingUpload,

    /// Uploaded and waiting for an administrator to review it
    #[db_rename = "pending_verification"]
    #[serde(rename = "pending_verification")]
    PendingVerification,

    /// Reviewed and accepted
    #[db_rename = "verified"]
    #[serde(rename = "verified")]
    Verified,

    /// Reviewed and refused; a rejection reason is recorded
    #[db_rename = "rejected"]
    #[serde(rename = "rejected")]
    Rejected,

    /// Not applicable to this booking (e.g. workspace form without a rental)
    #[db_rename = "not_required"]
    #[serde(rename = "not_required")]
    NotRequired,
}

impl VerificationStatus {
    /// Returns whether this status satisfies a download gate.
    ///
    /// `not_required` counts as a pass-through, not a failure.
    #[inline]
    pub fn is_satisfied(self) -> bool {
        matches!(
            self,
            VerificationStatus::Verified | VerificationStatus::NotRequired
        )
    }

    /// Returns whether the document is waiting for an admin decision.
    #[inline]
    pub fn is_pending_verification(self) -> bool {
        matches!(self, VerificationStatus::PendingVerification)
    }

    /// Returns whether this status is terminal for a single document row.
    ///
    /// No transition is defined out of a terminal state; re-uploads create
    /// new rows.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            VerificationStatus::Verified | VerificationStatus::Rejected
        )
    }

    /// Returns whether the document was rejected.
    #[inline]
    pub fn is_rejected(self) -> bool {
        matches!(self, VerificationStatus::Rejected)
    }

    /// Statuses shown in the verification history view.
    pub fn history_statuses() -> &'static [VerificationStatus] {
        &[VerificationStatus::Verified, VerificationStatus::Rejected]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn satisfied_statuses() {
        assert!(VerificationStatus::Verified.is_satisfied());
        assert!(VerificationStatus::NotRequired.is_satisfied());
        assert!(!VerificationStatus::PendingUpload.is_satisfied());
        assert!(!VerificationStatus::PendingVerification.is_satisfied());
        assert!(!VerificationStatus::Rejected.is_satisfied());
    }

    #[test]
    fn terminal_statuses() {
        assert!(VerificationStatus::Verified.is_terminal());
        assert!(VerificationStatus::Rejected.is_terminal());
        assert!(!VerificationStatus::PendingVerification.is_terminal());
        assert!(!VerificationStatus::PendingUpload.is_terminal());
        assert!(!VerificationStatus::NotRequired.is_terminal());
    }

    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&VerificationStatus::PendingVerification).unwrap();
        assert_eq!(json, "\"pending_verification\"");

        let parsed: VerificationStatus = serde_json::from_str("\"not_required\"").unwrap();
        assert_eq!(parsed, VerificationStatus::NotRequired);
    }
}
