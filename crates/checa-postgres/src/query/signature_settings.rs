//! Signature settings repository for the singleton signatory row.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{SIGNATURE_SETTINGS_ID, SignatureSettings, UpdateSignatureSettings};
use crate::{PgClient, PgError, PgResult, schema};

/// Repository for the signature settings singleton.
///
/// The row is seeded by the migrations; reads and updates address it by the
/// fixed [`SIGNATURE_SETTINGS_ID`].
pub trait SignatureSettingsRepository {
    /// Retrieves the current signature settings.
    fn get_signature_settings(
        &self,
    ) -> impl Future<Output = PgResult<Option<SignatureSettings>>> + Send;

    /// Applies a partial update and returns the resulting settings.
    fn update_signature_settings(
        &self,
        updates: UpdateSignatureSettings,
    ) -> impl Future<Output = PgResult<SignatureSettings>> + Send;
}

impl SignatureSettingsRepository for PgClient {
    async fn get_signature_settings(&self) -> PgResult<Option<SignatureSettings>> {
        let mut conn = self.get_connection().await?;

        use schema::signature_settings::{self, dsl};

        let settings = signature_settings::table
            .filter(dsl::id.eq(SIGNATURE_SETTINGS_ID))
            .select(SignatureSettings::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(settings)
    }

    async fn update_signature_settings(
        &self,
        updates: UpdateSignatureSettings,
    ) -> PgResult<SignatureSettings> {
        let mut conn = self.get_connection().await?;

        use schema::signature_settings::{self, dsl};

        let settings =
            diesel::update(signature_settings::table.filter(dsl::id.eq(SIGNATURE_SETTINGS_ID)))
                .set(&updates)
                .returning(SignatureSettings::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(PgError::from)?;

        Ok(settings)
    }
}
