//! Driving port for user administration reads.
//!
//! Inbound adapters use this port to list accounts without seeing password
//! hashes; the summary shape strips credentials before they leave the domain.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{EmailAddress, Error, Role, User};

/// Account view without credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Login mail address.
    #[schema(value_type = String, example = "admin@example.com")]
    pub email: EmailAddress,
    /// Roles granted to the account.
    pub roles: Vec<Role>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            email: user.email().clone(),
            roles: user.roles().to_vec(),
        }
    }
}

/// Domain use-case port for listing accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every account as a credential-free summary.
    async fn list_users(&self) -> Result<Vec<UserSummary>, Error>;
}

/// Fixture query returning a single administrator account.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsersQuery;

#[async_trait]
impl UsersQuery for FixtureUsersQuery {
    async fn list_users(&self) -> Result<Vec<UserSummary>, Error> {
        const FIXTURE_ID: &str = "123e4567-e89b-12d3-a456-426614174000";
        const FIXTURE_EMAIL: &str = "admin@example.com";

        // Parsing only fails if the constants above are edited.
        let id = Uuid::parse_str(FIXTURE_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
        let email = EmailAddress::parse(FIXTURE_EMAIL)
            .map_err(|err| Error::internal(format!("invalid fixture email: {err}")))?;

        Ok(vec![UserSummary {
            id,
            email,
            roles: vec![Role::Admin],
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_query_returns_the_administrator() {
        let users = FixtureUsersQuery.list_users().await.expect("users list");

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email.as_str(), "admin@example.com");
        assert_eq!(users[0].roles, vec![Role::Admin]);
    }

    #[tokio::test]
    async fn summary_drops_credential_material() {
        let user = User::new(
            Uuid::new_v4(),
            EmailAddress::parse("ada@example.com").expect("valid email"),
            "$argon2id$stub".to_owned(),
            vec![Role::Manager],
        );

        let summary = UserSummary::from(&user);
        let json = serde_json::to_value(&summary).expect("serialise summary");

        assert_eq!(json["email"], "ada@example.com");
        assert!(json.get("passwordHash").is_none());
    }
}
