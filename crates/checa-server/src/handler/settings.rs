//! Handlers for the signature settings singleton.

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use checa_postgres::PgClient;
use checa_postgres::model::{Account, NewAuditEvent, SignatureSettings};
use checa_postgres::query::SignatureSettingsRepository;

use crate::extract::{CurrentAccount, Json, ValidateJson};
use crate::handler::request::UpdateSignatureSettingsRequest;
use crate::handler::response::SignatureSettingsView;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::ServiceState;
use crate::worker::AuditHandle;

/// Tracing target for settings handlers.
const TRACING_TARGET: &str = "checa_server::handler::settings";

/// Loads the singleton row, treating its absence as a deployment fault.
async fn load_settings(pg_client: &PgClient) -> Result<SignatureSettings> {
    pg_client.get_signature_settings().await?.ok_or_else(|| {
        tracing::error!(
            target: TRACING_TARGET,
            "Signature settings row is missing; migrations did not seed it"
        );
        ErrorKind::InternalServerError.into_error()
    })
}

/// Rejects writes from staff without settings management rights.
fn require_settings_manager(account: &Account) -> Result<()> {
    if !account.role.can_manage_settings() {
        return Err(ErrorKind::Forbidden
            .with_details("only administrators can change signatories")
            .into_static());
    }

    Ok(())
}

/// Returns the signatories currently printed on generated forms.
async fn get_settings(
    State(pg_client): State<PgClient>,
) -> Result<Json<SignatureSettingsView>> {
    let settings = load_settings(&pg_client).await?;
    Ok(Json(SignatureSettingsView::from(settings)))
}

/// Replaces all four signatory fields at once.
async fn replace_settings(
    State(pg_client): State<PgClient>,
    State(audit): State<AuditHandle>,
    CurrentAccount(account): CurrentAccount,
    ValidateJson(request): ValidateJson<UpdateSignatureSettingsRequest>,
) -> Result<Json<SignatureSettingsView>> {
    require_settings_manager(&account)?;

    let missing = [
        ("directorName", request.director_name.is_none()),
        ("directorTitle", request.director_title.is_none()),
        ("financeName", request.finance_name.is_none()),
        ("financeTitle", request.finance_title.is_none()),
    ];
    if missing.iter().any(|(_, absent)| *absent) {
        let fields: Vec<&str> = missing
            .iter()
            .filter(|(_, absent)| *absent)
            .map(|(name, _)| *name)
            .collect();
        let details = format!("missing fields: {}", fields.join(", "));
        return Err(Error::from(ErrorKind::BadRequest).with_details(details));
    }

    apply_update(&pg_client, &audit, &account, request).await
}

/// Updates only the signatory fields present in the request.
async fn patch_settings(
    State(pg_client): State<PgClient>,
    State(audit): State<AuditHandle>,
    CurrentAccount(account): CurrentAccount,
    ValidateJson(request): ValidateJson<UpdateSignatureSettingsRequest>,
) -> Result<Json<SignatureSettingsView>> {
    require_settings_manager(&account)?;

    if request.is_noop() {
        let settings = load_settings(&pg_client).await?;
        return Ok(Json(SignatureSettingsView::from(settings)));
    }

    apply_update(&pg_client, &audit, &account, request).await
}

/// Persists the changeset and records the audit trail entry.
async fn apply_update(
    pg_client: &PgClient,
    audit: &AuditHandle,
    account: &Account,
    request: UpdateSignatureSettingsRequest,
) -> Result<Json<SignatureSettingsView>> {
    let changeset = request.into_changeset(account.id);
    let settings = pg_client.update_signature_settings(changeset).await?;

    audit.record(NewAuditEvent::for_settings(account.id));

    tracing::info!(
        target: TRACING_TARGET,
        updated_by = %account.id,
        "Signature settings updated"
    );

    Ok(Json(SignatureSettingsView::from(settings)))
}

/// Returns a [`Router`] with the signature settings routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route(
        "/admin/settings/signatures",
        get(get_settings).put(replace_settings).patch(patch_settings),
    )
}
