//! Response bodies for signature settings.

use checa_postgres::model::SignatureSettings;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// The current signatories printed on generated forms.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureSettingsView {
    pub director_name: String,
    pub director_title: String,
    pub finance_name: String,
    pub finance_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<SignatureSettings> for SignatureSettingsView {
    fn from(settings: SignatureSettings) -> Self {
        Self {
            director_name: settings.director_name,
            director_title: settings.director_title,
            finance_name: settings.finance_name,
            finance_title: settings.finance_title,
            updated_by: settings.updated_by,
            updated_at: settings.updated_at,
        }
    }
}
