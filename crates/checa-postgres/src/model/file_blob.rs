//! File blob model for PostgreSQL database operations.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::file_blobs;

/// File blob model describing the stored bytes behind a document.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = file_blobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FileBlob {
    /// Unique blob identifier
    pub id: Uuid,
    /// Document this blob belongs to
    pub document_id: Uuid,
    /// Opaque key in the backing object store
    pub storage_key: String,
    /// Public or signed URL for retrieval
    pub url: String,
    /// Original file name as uploaded
    pub file_name: String,
    /// MIME type as reported on upload
    pub mime_type: String,
    /// File size in bytes
    pub size_bytes: i64,
    /// Timestamp when the blob was stored
    pub created_at: OffsetDateTime,
}

/// New file blob model for insertion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = file_blobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewFileBlob {
    /// Document this blob belongs to
    pub document_id: Uuid,
    /// Opaque key in the backing object store
    pub storage_key: String,
    /// Public or signed URL for retrieval
    pub url: String,
    /// Original file name as uploaded
    pub file_name: String,
    /// MIME type as reported on upload
    pub mime_type: String,
    /// File size in bytes
    pub size_bytes: i64,
}
