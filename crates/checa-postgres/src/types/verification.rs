//! Per-booking verification gates and download eligibility.
//!
//! The gate state is a pure view: it is recomputed from the latest document
//! of each type on every read and never persisted.

use serde::{Deserialize, Serialize};

use crate::types::VerificationStatus;

/// Aggregated verification gates for a single booking.
///
/// Each gate takes the verification status of the most recent document of
/// the relevant type, or [`VerificationStatus::PendingUpload`] when nothing
/// has been uploaded yet. The workspace gate is forced to
/// [`VerificationStatus::NotRequired`] when the booking has no workspace
/// rental component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVerificationState {
    /// Gate on the signed service request form
    pub service_form_signed: VerificationStatus,
    /// Gate on the signed workspace rental form
    pub workspace_form_signed: VerificationStatus,
    /// Gate on the payment receipt
    pub payment_receipt: VerificationStatus,
}

impl DocumentVerificationState {
    /// Builds the gate state from the latest per-type statuses.
    ///
    /// `has_workspace` must reflect the booking's composition; callers are
    /// responsible for determining applicability before reading the
    /// workspace gate.
    pub fn new(
        service_form_signed: Option<VerificationStatus>,
        workspace_form_signed: Option<VerificationStatus>,
        payment_receipt: Option<VerificationStatus>,
        has_workspace: bool,
    ) -> Self {
        let gate = |status: Option<VerificationStatus>| {
            status.unwrap_or(VerificationStatus::PendingUpload)
        };

        Self {
            service_form_signed: gate(service_form_signed),
            workspace_form_signed: if has_workspace {
                gate(workspace_form_signed)
            } else {
                VerificationStatus::NotRequired
            },
            payment_receipt: gate(payment_receipt),
        }
    }

    /// Returns whether results may be downloaded for this booking.
    ///
    /// Results unlock only when every applicable gate is verified;
    /// `not_required` counts as satisfied.
    pub fn downloads_unlocked(&self) -> bool {
        self.service_form_signed.is_satisfied()
            && self.workspace_form_signed.is_satisfied()
            && self.payment_receipt.is_satisfied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_gates_verified_unlocks_downloads() {
        let state = DocumentVerificationState::new(
            Some(VerificationStatus::Verified),
            None,
            Some(VerificationStatus::Verified),
            false,
        );

        assert_eq!(state.workspace_form_signed, VerificationStatus::NotRequired);
        assert!(state.downloads_unlocked());
    }

    #[test]
    fn pending_receipt_locks_downloads() {
        let state = DocumentVerificationState::new(
            Some(VerificationStatus::Verified),
            None,
            Some(VerificationStatus::PendingVerification),
            false,
        );

        assert!(!state.downloads_unlocked());
    }

    #[test]
    fn missing_documents_default_to_pending_upload() {
        let state = DocumentVerificationState::new(None, None, None, true);

        assert_eq!(state.service_form_signed, VerificationStatus::PendingUpload);
        assert_eq!(
            state.workspace_form_signed,
            VerificationStatus::PendingUpload
        );
        assert_eq!(state.payment_receipt, VerificationStatus::PendingUpload);
        assert!(!state.downloads_unlocked());
    }

    #[test]
    fn workspace_gate_applies_when_booking_has_workspace() {
        let state = DocumentVerificationState::new(
            Some(VerificationStatus::Verified),
            Some(VerificationStatus::Rejected),
            Some(VerificationStatus::Verified),
            true,
        );

        assert_eq!(state.workspace_form_signed, VerificationStatus::Rejected);
        assert!(!state.downloads_unlocked());
    }

    #[test]
    fn serializes_with_camel_case_gates() {
        let state = DocumentVerificationState::new(
            Some(VerificationStatus::Verified),
            None,
            Some(VerificationStatus::Verified),
            false,
        );

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["serviceFormSigned"], "verified");
        assert_eq!(json["workspaceFormSigned"], "not_required");
        assert_eq!(json["paymentReceipt"], "verified");
    }
}
