//! Request bodies for signature settings endpoints.

use checa_postgres::model::UpdateSignatureSettings;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Body for updating the signatories printed on generated forms.
///
/// Used by both full (`PUT`) and partial (`PATCH`) updates; fields left out
/// of a partial update keep their current values.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSignatureSettingsRequest {
    /// New director name
    #[validate(length(min = 1, max = 120))]
    pub director_name: Option<String>,
    /// New director title
    #[validate(length(min = 1, max = 120))]
    pub director_title: Option<String>,
    /// New finance officer name
    #[validate(length(min = 1, max = 120))]
    pub finance_name: Option<String>,
    /// New finance officer title
    #[validate(length(min = 1, max = 120))]
    pub finance_title: Option<String>,
}

impl UpdateSignatureSettingsRequest {
    /// Returns whether no field carries a value.
    pub fn is_noop(&self) -> bool {
        self.director_name.is_none()
            && self.director_title.is_none()
            && self.finance_name.is_none()
            && self.finance_title.is_none()
    }

    /// Converts the request into a changeset stamped with the acting admin.
    pub fn into_changeset(self, updated_by: Uuid) -> UpdateSignatureSettings {
        UpdateSignatureSettings {
            director_name: self.director_name,
            director_title: self.director_title,
            finance_name: self.finance_name,
            finance_title: self.finance_title,
            ..Default::default()
        }
        .by(updated_by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_is_noop() {
        assert!(UpdateSignatureSettingsRequest::default().is_noop());

        let request = UpdateSignatureSettingsRequest {
            director_name: Some("Prof. Dr. Azlina Harun".to_string()),
            ..Default::default()
        };
        assert!(!request.is_noop());
    }

    #[test]
    fn changeset_is_stamped() {
        let admin = Uuid::new_v4();
        let request = UpdateSignatureSettingsRequest {
            finance_name: Some("Siti Rahmah".to_string()),
            ..Default::default()
        };

        let changeset = request.into_changeset(admin);
        assert_eq!(changeset.updated_by, Some(admin));
        assert!(changeset.updated_at.is_some());
        assert_eq!(changeset.finance_name.as_deref(), Some("Siti Rahmah"));
        assert!(changeset.director_name.is_none());
    }
}
