//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits for infrastructure concerns:
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **cache**: Redis-backed snapshot cache
//! - **security**: Argon2 password hashing and JWT issuance
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod cache;
pub mod persistence;
pub mod security;
