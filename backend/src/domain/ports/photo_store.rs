//! Port abstraction for profile photo storage.

use async_trait::async_trait;

use crate::domain::PhotoUpload;

use super::define_port_error;

define_port_error! {
    /// Errors raised by photo store adapters.
    pub enum PhotoStoreError {
        /// Writing or removing the file failed.
        Io { message: String } => "photo storage failed: {message}",
    }
}

/// Writes uploaded photos under collision-resistant names.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Persist `photo` and return the stored file name.
    async fn save(&self, photo: &PhotoUpload) -> Result<String, PhotoStoreError>;

    /// Delete a previously stored photo.
    async fn remove(&self, stored_name: &str) -> Result<(), PhotoStoreError>;
}

/// Photo store that accepts uploads without writing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePhotoStore;

#[async_trait]
impl PhotoStore for FixturePhotoStore {
    async fn save(&self, photo: &PhotoUpload) -> Result<String, PhotoStoreError> {
        Ok(photo.stored_name(0, 0))
    }

    async fn remove(&self, _stored_name: &str) -> Result<(), PhotoStoreError> {
        Ok(())
    }
}
