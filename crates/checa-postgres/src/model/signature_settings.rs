//! Signature settings model for PostgreSQL database operations.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::signature_settings;

/// Row id of the settings singleton.
pub const SIGNATURE_SETTINGS_ID: i32 = 1;

/// Signature settings model holding the names printed on generated forms.
///
/// A single row (id = [`SIGNATURE_SETTINGS_ID`]) exists at all times.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = signature_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SignatureSettings {
    /// Singleton row identifier
    pub id: i32,
    /// Name of the signing director
    pub director_name: String,
    /// Title of the signing director
    pub director_title: String,
    /// Name of the signing finance officer
    pub finance_name: String,
    /// Title of the signing finance officer
    pub finance_title: String,
    /// Admin account that last changed the settings
    pub updated_by: Option<Uuid>,
    /// Timestamp of the last change
    pub updated_at: OffsetDateTime,
}

/// Update [`SignatureSettings`] model. All fields are optional so partial
/// updates leave the remaining signatories untouched.
#[derive(Debug, Default, Clone, AsChangeset)]
#[diesel(table_name = signature_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateSignatureSettings {
    /// New director name
    pub director_name: Option<String>,
    /// New director title
    pub director_title: Option<String>,
    /// New finance officer name
    pub finance_name: Option<String>,
    /// New finance officer title
    pub finance_title: Option<String>,
    /// Admin account making the change
    pub updated_by: Option<Uuid>,
    /// Change timestamp
    pub updated_at: Option<OffsetDateTime>,
}

impl UpdateSignatureSettings {
    /// Returns whether any signatory field would change.
    pub fn is_noop(&self) -> bool {
        self.director_name.is_none()
            && self.director_title.is_none()
            && self.finance_name.is_none()
            && self.finance_title.is_none()
    }

    /// Stamps the change with the acting admin and the current time.
    pub fn by(mut self, account_id: Uuid) -> Self {
        self.updated_by = Some(account_id);
        self.updated_at = Some(OffsetDateTime::now_utc());
        self
    }
}
