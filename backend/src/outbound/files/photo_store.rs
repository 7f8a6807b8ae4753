//! Profile photo storage in the uploads directory.

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::fs::Dir;
use mockable::Clock;
use tracing::debug;

use crate::domain::PhotoUpload;
use crate::domain::ports::{PhotoStore, PhotoStoreError};

use super::atomic::write_new;

/// Attempts at a free name before giving up.
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Writes uploads as `{unix_seconds}_{sanitised_name}`, adding a counter
/// when that name is taken. Existing photos are never replaced.
pub struct FilePhotoStore {
    dir: Arc<Dir>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl FilePhotoStore {
    pub fn new(dir: Arc<Dir>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { dir, clock }
    }
}

fn io_error(err: io::Error) -> PhotoStoreError {
    PhotoStoreError::io(err.to_string())
}

fn save_unique(dir: &Dir, photo: &PhotoUpload, unix_seconds: i64) -> io::Result<String> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let name = photo.stored_name(unix_seconds, attempt);
        match write_new(dir, &name, photo.bytes()) {
            Ok(()) => return Ok(name),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {}
            Err(err) => return Err(err),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free name for {} after {MAX_NAME_ATTEMPTS} attempts", photo.file_name()),
    ))
}

#[async_trait]
impl PhotoStore for FilePhotoStore {
    async fn save(&self, photo: &PhotoUpload) -> Result<String, PhotoStoreError> {
        let unix_seconds = self.clock.utc().timestamp();
        let dir = Arc::clone(&self.dir);
        let photo = photo.clone();
        let stored_name =
            tokio::task::spawn_blocking(move || save_unique(&dir, &photo, unix_seconds))
                .await
                .map_err(|err| PhotoStoreError::io(format!("photo write task failed: {err}")))?
                .map_err(io_error)?;
        debug!(file = %stored_name, "stored profile photo");
        Ok(stored_name)
    }

    async fn remove(&self, stored_name: &str) -> Result<(), PhotoStoreError> {
        let dir = Arc::clone(&self.dir);
        let name = stored_name.to_owned();
        tokio::task::spawn_blocking(move || match dir.remove_file(&name) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        })
        .await
        .map_err(|err| PhotoStoreError::io(format!("photo remove task failed: {err}")))?
        .map_err(io_error)
    }
}
