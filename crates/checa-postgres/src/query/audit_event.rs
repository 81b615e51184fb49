//! Audit events repository for the append-only admin action log.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::Pagination;
use crate::model::{AuditEvent, NewAuditEvent};
use crate::{PgClient, PgError, PgResult, schema};

/// Repository for audit event database operations.
///
/// Events are append-only; there is no update or delete path.
pub trait AuditEventRepository {
    /// Records a new audit event.
    fn record_audit_event(
        &self,
        new_event: NewAuditEvent,
    ) -> impl Future<Output = PgResult<AuditEvent>> + Send;

    /// Lists recorded events, newest first.
    fn list_audit_events(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<AuditEvent>>> + Send;

    /// Lists events recorded against a specific entity.
    fn list_entity_audit_events(
        &self,
        entity_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<AuditEvent>>> + Send;
}

impl AuditEventRepository for PgClient {
    async fn record_audit_event(&self, new_event: NewAuditEvent) -> PgResult<AuditEvent> {
        let mut conn = self.get_connection().await?;

        use schema::audit_events;

        let event = diesel::insert_into(audit_events::table)
            .values(&new_event)
            .returning(AuditEvent::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(event)
    }

    async fn list_audit_events(&self, pagination: Pagination) -> PgResult<Vec<AuditEvent>> {
        let mut conn = self.get_connection().await?;

        use schema::audit_events::{self, dsl};

        let events = audit_events::table
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(AuditEvent::as_select())
            .load(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(events)
    }

    async fn list_entity_audit_events(
        &self,
        entity_id: Uuid,
        pagination: Pagination,
    ) -> PgResult<Vec<AuditEvent>> {
        let mut conn = self.get_connection().await?;

        use schema::audit_events::{self, dsl};

        let events = audit_events::table
            .filter(dsl::entity_id.eq(entity_id))
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(AuditEvent::as_select())
            .load(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(events)
    }
}
