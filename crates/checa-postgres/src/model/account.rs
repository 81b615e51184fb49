//! Account model for PostgreSQL database operations.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::accounts;
use crate::types::{AccountRole, AccountStatus};

/// Account model representing a portal user.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    /// Unique account identifier
    pub id: Uuid,
    /// Email address used for sign-in and search
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Authorization role
    pub role: AccountRole,
    /// Lifecycle status
    pub status: AccountStatus,
    /// Whether the account belongs to an external (non-university) customer
    pub is_external: bool,
    /// Company name (external customers)
    pub company: Option<String>,
    /// Company branch (external customers)
    pub branch: Option<String>,
    /// Research group (institutional customers)
    pub ikohza: Option<String>,
    /// Faculty (institutional customers)
    pub faculty: Option<String>,
    /// Department (institutional customers)
    pub department: Option<String>,
    /// Timestamp when the account was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the account was last updated
    pub updated_at: OffsetDateTime,
}

impl Account {
    /// Returns the full display name.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let trimmed = name.trim();
        if trimmed.is_empty() {
            self.email.clone()
        } else {
            trimmed.to_string()
        }
    }

    /// Resolves the organization shown next to the account.
    ///
    /// External customers prefer company then branch; institutional users
    /// prefer ikohza, then faculty, then department.
    pub fn organization_display_name(&self) -> Option<&str> {
        let candidates: [&Option<String>; 3] = if self.is_external {
            [&self.company, &self.branch, &None]
        } else {
            [&self.ikohza, &self.faculty, &self.department]
        };

        candidates
            .into_iter()
            .flat_map(|c| c.as_deref())
            .map(str::trim)
            .find(|c| !c.is_empty())
    }

    /// Returns whether this account may call protected endpoints.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "user@example.edu.my".to_string(),
            first_name: "Nurul".to_string(),
            last_name: "Aisyah".to_string(),
            role: AccountRole::Customer,
            status: AccountStatus::Active,
            is_external: false,
            company: None,
            branch: None,
            ikohza: None,
            faculty: None,
            department: None,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn display_name_joins_names() {
        assert_eq!(account().display_name(), "Nurul Aisyah");
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let mut account = account();
        account.first_name = String::new();
        account.last_name = "  ".to_string();
        assert_eq!(account.display_name(), "user@example.edu.my");
    }

    #[test]
    fn external_accounts_prefer_company_then_branch() {
        let mut account = account();
        account.is_external = true;
        account.branch = Some("Johor Branch".to_string());
        assert_eq!(account.organization_display_name(), Some("Johor Branch"));

        account.company = Some("Acme Sdn Bhd".to_string());
        assert_eq!(account.organization_display_name(), Some("Acme Sdn Bhd"));
    }

    #[test]
    fn institutional_accounts_prefer_ikohza_faculty_department() {
        let mut account = account();
        account.department = Some("Chemistry".to_string());
        assert_eq!(account.organization_display_name(), Some("Chemistry"));

        account.faculty = Some("ChEE".to_string());
        assert_eq!(account.organization_display_name(), Some("ChEE"));

        account.ikohza = Some("Advanced Materials".to_string());
        assert_eq!(
            account.organization_display_name(),
            Some("Advanced Materials")
        );
    }

    #[test]
    fn blank_organization_fields_are_skipped() {
        let mut account = account();
        account.ikohza = Some("   ".to_string());
        account.faculty = Some("ChEE".to_string());
        assert_eq!(account.organization_display_name(), Some("ChEE"));
    }
}
