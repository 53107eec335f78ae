//! PostgreSQL-backed user account repository.
//!
//! Accounts span two tables: `users` for the identity and credential, and
//! `user_roles` joining to the seeded `roles` rows. Reads load both inside a
//! transaction; inserts resolve role ids first and then write the identity
//! and its role grants atomically.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::AsyncPgConnection;
use diesel_async::RunQueryDsl;
use diesel_async::pooled_connection::bb8::PooledConnection;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use uuid::Uuid;

use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::{EmailAddress, Role, User};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{NewUserRoleRow, NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::{roles, user_roles, users};

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a users row plus its role names into a domain account.
fn row_to_user(row: UserRow, role_names: &[String]) -> Result<User, RepositoryError> {
    let UserRow {
        id,
        email,
        password_hash,
    } = row;

    let email = EmailAddress::parse(&email)
        .map_err(|err| RepositoryError::query(format!("stored email failed validation: {err}")))?;
    let granted = role_names
        .iter()
        .map(|name| {
            name.parse::<Role>().map_err(|err| {
                RepositoryError::query(format!("stored role failed validation: {err}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(User::new(id, email, password_hash, granted))
}

/// Drop duplicate role grants while keeping a stable order.
fn dedupe_roles(granted: &[Role]) -> Vec<Role> {
    let mut unique = granted.to_vec();
    unique.sort_by_key(|role| role.as_str());
    unique.dedup();
    unique
}

/// Resolve the seeded `roles.id` value for each granted role.
async fn resolve_role_ids(
    conn: &mut PooledConnection<'_, AsyncPgConnection>,
    granted: &[Role],
) -> Result<Vec<i32>, RepositoryError> {
    if granted.is_empty() {
        return Ok(Vec::new());
    }

    let names: Vec<&str> = granted.iter().map(Role::as_str).collect();
    let seeded: Vec<(i32, String)> = roles::table
        .filter(roles::name.eq_any(names))
        .select((roles::id, roles::name))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    granted
        .iter()
        .map(|role| {
            seeded
                .iter()
                .find(|(_, name)| name.as_str() == role.as_str())
                .map(|(id, _)| *id)
                .ok_or_else(|| RepositoryError::query(format!("role {role} is not seeded")))
        })
        .collect()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let address = email.as_str().to_owned();

        let loaded = conn
            .transaction(|conn| {
                async move {
                    let user_row: Option<UserRow> = users::table
                        .filter(users::email.eq(address))
                        .select(UserRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(user_row) = user_row else {
                        return Ok(None);
                    };
                    let role_names: Vec<String> = user_roles::table
                        .inner_join(roles::table)
                        .filter(user_roles::user_id.eq(user_row.id))
                        .select(roles::name)
                        .order(roles::name.asc())
                        .load(conn)
                        .await?;
                    Ok(Some((user_row, role_names)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        loaded
            .map(|(row, names)| row_to_user(row, &names))
            .transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let loaded = conn
            .transaction(|conn| {
                async move {
                    let user_row: Option<UserRow> = users::table
                        .filter(users::id.eq(id))
                        .select(UserRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(user_row) = user_row else {
                        return Ok(None);
                    };
                    let role_names: Vec<String> = user_roles::table
                        .inner_join(roles::table)
                        .filter(user_roles::user_id.eq(user_row.id))
                        .select(roles::name)
                        .order(roles::name.asc())
                        .load(conn)
                        .await?;
                    Ok(Some((user_row, role_names)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        loaded
            .map(|(row, names)| row_to_user(row, &names))
            .transpose()
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (user_rows, role_rows) = conn
            .transaction(|conn| {
                async move {
                    let user_rows: Vec<UserRow> = users::table
                        .select(UserRow::as_select())
                        .order(users::email.asc())
                        .load(conn)
                        .await?;
                    let role_rows: Vec<(Uuid, String)> = user_roles::table
                        .inner_join(roles::table)
                        .select((user_roles::user_id, roles::name))
                        .order((user_roles::user_id.asc(), roles::name.asc()))
                        .load(conn)
                        .await?;
                    Ok((user_rows, role_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let mut roles_by_user: HashMap<Uuid, Vec<String>> = HashMap::new();
        for (user_id, name) in role_rows {
            roles_by_user.entry(user_id).or_default().push(name);
        }

        user_rows
            .into_iter()
            .map(|row| {
                let names = roles_by_user.remove(&row.id).unwrap_or_default();
                row_to_user(row, &names)
            })
            .collect()
    }

    async fn insert(
        &self,
        email: &EmailAddress,
        password_hash: &str,
        roles_granted: &[Role],
    ) -> Result<User, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let granted = dedupe_roles(roles_granted);
        let role_ids = resolve_role_ids(&mut conn, &granted).await?;

        let id = Uuid::new_v4();
        let address = email.as_str().to_owned();
        let hash = password_hash.to_owned();
        let role_rows: Vec<NewUserRoleRow> = role_ids
            .into_iter()
            .map(|role_id| NewUserRoleRow {
                user_id: id,
                role_id,
            })
            .collect();

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(users::table)
                    .values(NewUserRow {
                        id,
                        email: &address,
                        password_hash: &hash,
                    })
                    .execute(conn)
                    .await?;
                if !role_rows.is_empty() {
                    diesel::insert_into(user_roles::table)
                        .values(&role_rows)
                        .execute(conn)
                        .await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)?;

        Ok(User::new(id, email.clone(), password_hash.to_owned(), granted))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Role grants cascade with the identity row.
        let affected = diesel::delete(users::table.filter(users::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}
