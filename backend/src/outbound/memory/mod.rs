//! In-memory adapters for development runs without PostgreSQL and for
//! end-to-end tests.
//!
//! Data lives only as long as the process.

mod credential_store;

pub use credential_store::InMemoryCredentialStore;
