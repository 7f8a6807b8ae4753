//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Connections are pooled with `bb8` through `diesel-async`. Diesel row
//! structs (`models.rs`) and the schema (`schema.rs`) stay private to this
//! module; only domain types cross the boundary.
//!
//! # Example
//!
//! ```ignore
//! use dashboard::outbound::persistence::{DbPool, DieselCredentialStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/dashboard")).await?;
//! let store = DieselCredentialStore::new(pool, Duration::from_secs(5));
//! ```

mod diesel_credential_store;
mod models;
mod pool;
mod schema;

pub use diesel_credential_store::DieselCredentialStore;
pub use pool::{DbPool, PoolConfig, PoolError};
