//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL credential store using Diesel ORM
//! - **memory**: process-local credential store for runs without a database
//! - **security**: Argon2 password hashing
//! - **files**: JSON list stores and profile photo storage
//! - **http**: reqwest clients for the weather, news, events and video feeds
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod files;
pub mod http;
pub mod memory;
pub mod persistence;
pub mod security;
