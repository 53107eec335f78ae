//! Driving port for user administration writes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, NewUser, Role};

use super::users_query::UserSummary;

/// Domain use-case port for creating and removing accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Hash the credential and persist a new account.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error when the mail address is already
    /// registered.
    async fn create_user(&self, new_user: NewUser) -> Result<UserSummary, Error>;

    /// Delete an account.
    ///
    /// # Errors
    ///
    /// Returns not-found when no account carries the id.
    async fn delete_user(&self, id: Uuid) -> Result<(), Error>;
}

/// Fixture command that accepts every write without persisting.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsersCommand;

#[async_trait]
impl UsersCommand for FixtureUsersCommand {
    async fn create_user(&self, new_user: NewUser) -> Result<UserSummary, Error> {
        Ok(UserSummary {
            id: Uuid::new_v4(),
            email: new_user.email().clone(),
            roles: new_user.roles().to_vec(),
        })
    }

    async fn delete_user(&self, _id: Uuid) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_command_echoes_created_account() {
        let new_user = NewUser::try_from_parts("ada@example.com", "long enough", vec![Role::Admin])
            .expect("valid new user");

        let summary = FixtureUsersCommand
            .create_user(new_user)
            .await
            .expect("create succeeds");

        assert_eq!(summary.email.as_str(), "ada@example.com");
        assert_eq!(summary.roles, vec![Role::Admin]);
    }
}
