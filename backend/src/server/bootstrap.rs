//! First-run seeding of the administrator account.
//!
//! A fresh deployment has no accounts, so nobody could log in to create one.
//! When bootstrap credentials are configured, startup ensures an
//! administrator with that mail address exists before the server accepts
//! traffic. The step is idempotent: an existing account is left untouched.

use tracing::info;

use crate::config::BootstrapAdmin;
use crate::domain::ports::{CredentialHasher, RepositoryError, UserRepository};
use crate::domain::{Error, NewUser, Role};
use crate::outbound::persistence::{DbPool, DieselUserRepository};
use crate::outbound::security::Argon2CredentialHasher;

/// Ensure the configured administrator account exists.
///
/// # Errors
/// Propagates [`std::io::Error`] when the credentials fail validation or the
/// account store rejects the lookup or insert.
pub async fn seed_bootstrap_admin(pool: &DbPool, admin: &BootstrapAdmin) -> std::io::Result<()> {
    let repo = DieselUserRepository::new(pool.clone());
    seed_admin_account(&repo, &Argon2CredentialHasher, admin)
        .await
        .map_err(|err| std::io::Error::other(format!("bootstrap admin seeding failed: {err}")))
}

async fn seed_admin_account<R, H>(
    repo: &R,
    hasher: &H,
    admin: &BootstrapAdmin,
) -> Result<(), Error>
where
    R: UserRepository,
    H: CredentialHasher,
{
    let new_user = NewUser::try_from_parts(&admin.email, &admin.password, vec![Role::Admin])
        .map_err(|err| Error::invalid_request(format!("bootstrap admin rejected: {err}")))?;

    let existing = repo
        .find_by_email(new_user.email())
        .await
        .map_err(|err| Error::service_unavailable(format!("bootstrap admin lookup: {err}")))?;
    if let Some(account) = existing {
        info!(user_id = %account.id(), "bootstrap admin already present");
        return Ok(());
    }

    let password_hash = hasher
        .hash_password(new_user.password())
        .map_err(|err| Error::internal(format!("bootstrap admin hash: {err}")))?;
    match repo
        .insert(new_user.email(), &password_hash, new_user.roles())
        .await
    {
        Ok(account) => {
            info!(user_id = %account.id(), "seeded bootstrap admin");
            Ok(())
        }
        // Another instance won the insert race between the lookup and here.
        Err(RepositoryError::Duplicate { .. }) => {
            info!("bootstrap admin created concurrently");
            Ok(())
        }
        Err(err) => Err(Error::internal(format!("bootstrap admin insert: {err}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{CredentialError, MockUserRepository};
    use crate::domain::{EmailAddress, ErrorCode, User};
    use rstest::rstest;
    use uuid::Uuid;
    use zeroize::Zeroizing;

    struct StubHasher;

    impl CredentialHasher for StubHasher {
        fn hash_password(&self, _password: &str) -> Result<String, CredentialError> {
            Ok("$argon2id$stub".to_owned())
        }

        fn verify_password(&self, _password: &str, _hash: &str) -> Result<bool, CredentialError> {
            Ok(true)
        }
    }

    fn admin() -> BootstrapAdmin {
        BootstrapAdmin {
            email: "root@example.com".to_owned(),
            password: Zeroizing::new("correct horse".to_owned()),
        }
    }

    fn stored_admin() -> User {
        let email = EmailAddress::parse("root@example.com").expect("valid email");
        User::new(
            Uuid::new_v4(),
            email,
            "$argon2id$stored".to_owned(),
            vec![Role::Admin],
        )
    }

    #[tokio::test]
    async fn existing_accounts_are_left_untouched() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_admin())));
        repo.expect_insert().times(0);

        seed_admin_account(&repo, &StubHasher, &admin())
            .await
            .expect("seeding should be a no-op");
    }

    #[tokio::test]
    async fn missing_accounts_are_created_with_the_admin_role() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(1).returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .withf(|email, hash, roles| {
                email.as_str() == "root@example.com"
                    && hash == "$argon2id$stub"
                    && roles == [Role::Admin]
            })
            .returning(|email, hash, roles| {
                Ok(User::new(
                    Uuid::new_v4(),
                    email.clone(),
                    hash.to_owned(),
                    roles.to_vec(),
                ))
            });

        seed_admin_account(&repo, &StubHasher, &admin())
            .await
            .expect("seeding should create the account");
    }

    #[tokio::test]
    async fn losing_the_insert_race_is_not_an_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(1).returning(|_| Ok(None));
        repo.expect_insert().times(1).returning(|_, _, _| {
            Err(RepositoryError::duplicate("users_email_key"))
        });

        seed_admin_account(&repo, &StubHasher, &admin())
            .await
            .expect("concurrent creation should be tolerated");
    }

    #[rstest]
    #[case::bad_email("not-an-email", "correct horse")]
    #[case::short_password("root@example.com", "short")]
    #[tokio::test]
    async fn invalid_credentials_are_rejected_before_any_io(
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let repo = MockUserRepository::new();

        let err = seed_admin_account(
            &repo,
            &StubHasher,
            &BootstrapAdmin {
                email: email.to_owned(),
                password: Zeroizing::new(password.to_owned()),
            },
        )
        .await
        .expect_err("validation should fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
