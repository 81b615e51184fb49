//! Audit event model for PostgreSQL database operations.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::audit_events;
use crate::types::AuditAction;

/// Audit event model recording an administrative action.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = audit_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditEvent {
    /// Monotonic event identifier
    pub id: i64,
    /// Account that performed the action
    pub account_id: Uuid,
    /// What happened
    pub action: AuditAction,
    /// Entity kind the action touched, e.g. `booking_document`
    pub entity: String,
    /// Identifier of the touched entity, when applicable
    pub entity_id: Option<Uuid>,
    /// Structured action details
    pub metadata: serde_json::Value,
    /// Timestamp when the event was recorded
    pub created_at: OffsetDateTime,
}

/// New audit event model for insertion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAuditEvent {
    /// Account that performed the action
    pub account_id: Uuid,
    /// What happened
    pub action: AuditAction,
    /// Entity kind the action touched
    pub entity: String,
    /// Identifier of the touched entity, when applicable
    pub entity_id: Option<Uuid>,
    /// Structured action details
    pub metadata: serde_json::Value,
}

impl NewAuditEvent {
    /// Creates a new audit event against a booking document.
    pub fn for_document(account_id: Uuid, action: AuditAction, document_id: Uuid) -> Self {
        Self {
            account_id,
            action,
            entity: "booking_document".to_string(),
            entity_id: Some(document_id),
            metadata: serde_json::Value::Null,
        }
    }

    /// Creates a new audit event against the signature settings singleton.
    pub fn for_settings(account_id: Uuid) -> Self {
        Self {
            account_id,
            action: AuditAction::SettingsUpdated,
            entity: "signature_settings".to_string(),
            entity_id: None,
            metadata: serde_json::Value::Null,
        }
    }

    /// Attaches structured details to the event.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}
