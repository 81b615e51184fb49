//! Background workers running alongside the HTTP server.

mod audit;

pub use self::audit::{AuditHandle, AuditWorker};
