//! Account administration domain service.
//!
//! Implements the user driving ports. Accounts bypass the snapshot cache:
//! the admin surface is low-traffic and credential data has no business
//! sitting in a shared cache.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    CredentialError, CredentialHasher, RepositoryError, UserRepository, UserSummary, UsersCommand,
    UsersQuery,
};
use crate::domain::{Error, NewUser};

/// User administration service implementing the driving ports.
#[derive(Clone)]
pub struct UserAdminService<R, H> {
    repo: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> UserAdminService<R, H> {
    /// Create a new service over the account repository and password hasher.
    pub fn new(repo: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repo, hasher }
    }
}

impl<R, H> UserAdminService<R, H>
where
    R: UserRepository,
    H: CredentialHasher,
{
    fn map_repository_error(error: RepositoryError) -> Error {
        match error {
            RepositoryError::Unavailable { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            RepositoryError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            RepositoryError::ForeignKey { message } => {
                Error::internal(format!("unexpected foreign key failure: {message}"))
            }
            RepositoryError::Duplicate { .. } => {
                Error::invalid_request("a user with this mail address already exists")
            }
        }
    }

    fn map_credential_error(error: CredentialError) -> Error {
        let CredentialError::Hash { message } = error;
        Error::internal(format!("password hashing failed: {message}"))
    }
}

#[async_trait]
impl<R, H> UsersQuery for UserAdminService<R, H>
where
    R: UserRepository,
    H: CredentialHasher,
{
    async fn list_users(&self) -> Result<Vec<UserSummary>, Error> {
        let users = self.repo.list().await.map_err(Self::map_repository_error)?;
        Ok(users.iter().map(UserSummary::from).collect())
    }
}

#[async_trait]
impl<R, H> UsersCommand for UserAdminService<R, H>
where
    R: UserRepository,
    H: CredentialHasher,
{
    async fn create_user(&self, new_user: NewUser) -> Result<UserSummary, Error> {
        let password_hash = self
            .hasher
            .hash_password(new_user.password())
            .map_err(Self::map_credential_error)?;
        let user = self
            .repo
            .insert(new_user.email(), &password_hash, new_user.roles())
            .await
            .map_err(Self::map_repository_error)?;
        Ok(UserSummary::from(&user))
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), Error> {
        let removed = self
            .repo
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if removed {
            Ok(())
        } else {
            Err(Error::not_found(format!("user {id} not found")))
        }
    }
}
