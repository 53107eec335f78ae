//! Driving port for vendor reads.
//!
//! Inbound adapters (HTTP handlers) use this port to serve vendor listings
//! and single-vendor lookups without importing persistence or cache concerns.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, VendorWithChildren};

/// Domain use-case port for reading vendors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VendorsQuery: Send + Sync {
    /// Return every vendor with its children.
    async fn list_vendors(&self) -> Result<Vec<VendorWithChildren>, Error>;

    /// Return a single vendor with its children.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no vendor carries the id.
    async fn get_vendor(&self, id: Uuid) -> Result<VendorWithChildren, Error>;
}

/// Fixture query that sees an empty directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVendorsQuery;

#[async_trait]
impl VendorsQuery for FixtureVendorsQuery {
    async fn list_vendors(&self) -> Result<Vec<VendorWithChildren>, Error> {
        Ok(Vec::new())
    }

    async fn get_vendor(&self, id: Uuid) -> Result<VendorWithChildren, Error> {
        Err(Error::not_found(format!("vendor {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn fixture_query_lists_nothing_and_finds_nothing() {
        let query = FixtureVendorsQuery;

        assert!(query.list_vendors().await.expect("list succeeds").is_empty());

        let err = query
            .get_vendor(Uuid::new_v4())
            .await
            .expect_err("lookup misses");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
