//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Re-validated reads**: Stored values pass back through the domain
//!   parsers, so rows that stopped satisfying the validation rules surface
//!   as query errors instead of invalid records.
//! - **Guarded writes**: Updates filter on the caller's expected revision
//!   and report conflicts through [`crate::domain::ports::UpdateOutcome`].
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, PoolConfig, DieselVendorRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/vendor_mdm");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselVendorRepository::new(pool);
//! ```

mod diesel_bank_account_repository;
mod diesel_contact_person_repository;
pub(crate) mod diesel_helpers;
mod diesel_user_repository;
mod diesel_vendor_repository;
mod models;
mod pool;
mod row_conversions;
mod schema;

pub use diesel_bank_account_repository::DieselBankAccountRepository;
pub use diesel_contact_person_repository::DieselContactPersonRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_vendor_repository::DieselVendorRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
