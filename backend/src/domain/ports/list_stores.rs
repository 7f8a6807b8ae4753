//! Port abstractions for the shopping list and calendar file stores.
//!
//! Every mutation is a read-modify-write that adapters serialise per store,
//! and every mutation returns the full list as stored afterwards.

use async_trait::async_trait;

use crate::domain::lists::{CalendarEvent, EventIdRef, ShoppingItem};

use super::define_port_error;

define_port_error! {
    /// Errors raised by list store adapters.
    pub enum ListStoreError {
        /// Reading or writing the backing file failed.
        Io { message: String } => "list store I/O failed: {message}",
        /// The list could not be encoded for storage.
        Encode { message: String } => "list store encoding failed: {message}",
    }
}

/// Shopping list persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListStore: Send + Sync {
    /// Current items. Missing or unreadable storage reads as empty.
    async fn items(&self) -> Result<Vec<ShoppingItem>, ListStoreError>;

    /// Append an item named `name`.
    async fn add(&self, name: &str) -> Result<Vec<ShoppingItem>, ListStoreError>;

    /// Remove every item.
    async fn reset(&self) -> Result<Vec<ShoppingItem>, ListStoreError>;
}

/// Calendar persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalendarStore: Send + Sync {
    /// Current events. Missing or unreadable storage reads as empty.
    async fn events(&self) -> Result<Vec<CalendarEvent>, ListStoreError>;

    /// Append an event stamped with the current time in milliseconds.
    async fn add(&self, title: &str, date: &str) -> Result<Vec<CalendarEvent>, ListStoreError>;

    /// Remove every event whose id matches `id` by string form.
    async fn delete(&self, id: &EventIdRef) -> Result<Vec<CalendarEvent>, ListStoreError>;
}
