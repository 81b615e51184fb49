//! Audit trail worker.
//!
//! Handlers enqueue audit events through [`AuditHandle`] without awaiting
//! the database write; a background task drains the channel and persists
//! them. A failed write is logged and dropped, never surfaced to the
//! request that produced it.

use checa_postgres::PgClient;
use checa_postgres::model::NewAuditEvent;
use checa_postgres::query::AuditEventRepository;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Tracing target for audit worker operations.
const TRACING_TARGET: &str = "checa_server::worker::audit";

/// Fire-and-forget sender half of the audit pipeline.
#[derive(Debug, Clone)]
pub struct AuditHandle {
    tx: mpsc::UnboundedSender<NewAuditEvent>,
}

impl AuditHandle {
    /// Enqueues an event for background persistence.
    ///
    /// Returns immediately; if the worker has shut down the event is logged
    /// and discarded.
    pub fn record(&self, event: NewAuditEvent) {
        if let Err(error) = self.tx.send(event) {
            tracing::warn!(
                target: TRACING_TARGET,
                account_id = %error.0.account_id,
                action = %error.0.action,
                "Audit worker unavailable, dropping event"
            );
        }
    }
}

/// Background task that persists enqueued audit events.
pub struct AuditWorker {
    pg_client: PgClient,
    rx: mpsc::UnboundedReceiver<NewAuditEvent>,
}

impl AuditWorker {
    /// Creates the worker and its paired handle.
    pub fn new(pg_client: PgClient) -> (AuditHandle, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (AuditHandle { tx }, Self { pg_client, rx })
    }

    /// Runs until cancelled, draining any queued events before exiting.
    pub async fn run(mut self, cancel: CancellationToken) {
        tracing::info!(
            target: TRACING_TARGET,
            "Starting audit worker"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(
                        target: TRACING_TARGET,
                        "Audit worker shutdown requested"
                    );
                    break;
                }
                event = self.rx.recv() => {
                    match event {
                        Some(event) => self.persist(event).await,
                        None => break,
                    }
                }
            }
        }

        // Drain whatever was enqueued before cancellation.
        self.rx.close();
        while let Some(event) = self.rx.recv().await {
            self.persist(event).await;
        }

        tracing::info!(
            target: TRACING_TARGET,
            "Audit worker stopped"
        );
    }

    async fn persist(&self, event: NewAuditEvent) {
        let account_id = event.account_id;
        let action = event.action;

        if let Err(error) = self.pg_client.record_audit_event(event).await {
            tracing::error!(
                target: TRACING_TARGET,
                error = %error,
                account_id = %account_id,
                action = %action,
                "Failed to persist audit event"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use checa_postgres::types::AuditAction;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn record_after_worker_is_gone_is_swallowed() {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = AuditHandle { tx };
        drop(rx);

        let event = NewAuditEvent::for_document(
            Uuid::new_v4(),
            AuditAction::DocumentVerified,
            Uuid::new_v4(),
        );

        // Must not panic or block even though nothing will ever drain it.
        handle.record(event);
    }
}
