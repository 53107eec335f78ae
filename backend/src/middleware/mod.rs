//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such
//! as trace propagation. Authentication is handled by extractors in the HTTP
//! inbound adapter rather than middleware.

pub mod trace;

pub use trace::Trace;
