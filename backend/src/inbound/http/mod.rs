//! HTTP inbound adapter exposing the REST surface.

pub mod auth;
pub mod bank_accounts;
pub mod contact_persons;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;
pub mod vendors;

pub use crate::domain::ApiResult;
