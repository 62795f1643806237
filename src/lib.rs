//! Content-management API with a cache-aside access layer.
//!
//! Reads by slug check the cache first and fall back to the document
//! store; writes invalidate the cached entry after the store mutation
//! commits. Listings bypass the cache entirely.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
