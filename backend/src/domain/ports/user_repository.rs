//! Port for user account persistence.
//!
//! Accounts are not cached and carry no revision: they change rarely and only
//! through the admin surface, so plain create/read/delete suffices.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{EmailAddress, Role, User};

use super::repository_error::RepositoryError;

/// Port for user account storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch an account by its normalised mail address.
    async fn find_by_email(&self, email: &EmailAddress)
    -> Result<Option<User>, RepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    /// Fetch every account with its roles.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Persist a new account with an already-hashed credential.
    ///
    /// Fails with [`RepositoryError::Duplicate`] when the mail address is
    /// already registered.
    async fn insert(
        &self,
        email: &EmailAddress,
        password_hash: &str,
        roles: &[Role],
    ) -> Result<User, RepositoryError>;

    /// Delete an account.
    ///
    /// Returns `false` when no row matched.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

/// Fixture implementation backed by nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_email(
        &self,
        _email: &EmailAddress,
    ) -> Result<Option<User>, RepositoryError> {
        Ok(None)
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(
        &self,
        email: &EmailAddress,
        password_hash: &str,
        roles: &[Role],
    ) -> Result<User, RepositoryError> {
        Ok(User::new(
            Uuid::new_v4(),
            email.clone(),
            password_hash.to_owned(),
            roles.to_vec(),
        ))
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, RepositoryError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_repository_lookups_return_none() {
        let repo = FixtureUserRepository;
        let email = EmailAddress::parse("ada@example.com").expect("valid email");

        assert!(
            repo.find_by_email(&email)
                .await
                .expect("lookup succeeds")
                .is_none()
        );
        assert!(
            repo.find_by_id(Uuid::new_v4())
                .await
                .expect("lookup succeeds")
                .is_none()
        );
        assert!(repo.list().await.expect("list succeeds").is_empty());
    }

    #[tokio::test]
    async fn fixture_repository_insert_echoes_fields() {
        let repo = FixtureUserRepository;
        let email = EmailAddress::parse("ada@example.com").expect("valid email");

        let user = repo
            .insert(&email, "$argon2id$stub", &[Role::Admin])
            .await
            .expect("insert succeeds");

        assert_eq!(user.email(), &email);
        assert_eq!(user.password_hash(), "$argon2id$stub");
        assert_eq!(user.roles(), &[Role::Admin]);
    }
}
