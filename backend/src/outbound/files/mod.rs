//! Filesystem adapters: JSON list stores and the profile photo store.
//!
//! All access goes through capability-scoped [`cap_std::fs::Dir`] handles, so
//! adapters can only touch entries inside their configured directory.

mod atomic;
mod json_list_store;
mod photo_store;

use std::io;
use std::path::Path;

use cap_std::ambient_authority;
use cap_std::fs::Dir;

pub use json_list_store::{CALENDAR_FILE, FileCalendarStore, FileShoppingListStore, SHOPPING_FILE};
pub use photo_store::FilePhotoStore;

/// Open `path` as a capability directory, creating it if needed.
pub fn open_dir(path: &Path) -> io::Result<Dir> {
    Dir::create_ambient_dir_all(path, ambient_authority())?;
    Dir::open_ambient_dir(path, ambient_authority())
}
