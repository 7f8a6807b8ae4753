//! Atomic file writes via a synced temporary sibling.
//!
//! [`write_atomic`] renames the temporary file over the target, so readers
//! see either the old or the new contents. [`write_new`] hard-links it to a
//! name that must not exist yet, so an existing file is never replaced.

use std::io::{self, Write};
use std::path::{Component, Path};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

fn single_component(name: &str) -> io::Result<&str> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(name),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name:?} is not a plain file name"),
        )),
    }
}

/// Replace `file_name` inside `dir` with `contents`.
///
/// # Errors
///
/// Fails if `file_name` is not a single path component or any I/O step
/// fails; the temporary file is removed on failure.
pub(crate) fn write_atomic(dir: &Dir, file_name: &str, contents: &[u8]) -> io::Result<()> {
    let file_name = single_component(file_name)?;
    let tmp_name = temp_name(file_name);

    if let Err(err) = write_temp(dir, &tmp_name, contents) {
        drop(dir.remove_file(&tmp_name));
        return Err(err);
    }
    if let Err(err) = rename_over(dir, &tmp_name, file_name) {
        drop(dir.remove_file(&tmp_name));
        return Err(err);
    }
    sync_dir(dir);
    Ok(())
}

/// Create `file_name` inside `dir` with `contents`, failing with
/// [`io::ErrorKind::AlreadyExists`] if the name is taken.
///
/// # Errors
///
/// Fails if `file_name` is not a single path component, already exists, or
/// any I/O step fails. The temporary file is always removed.
pub(crate) fn write_new(dir: &Dir, file_name: &str, contents: &[u8]) -> io::Result<()> {
    let file_name = single_component(file_name)?;
    let tmp_name = temp_name(file_name);

    let linked = write_temp(dir, &tmp_name, contents)
        .and_then(|()| dir.hard_link(&tmp_name, dir, file_name));
    drop(dir.remove_file(&tmp_name));
    linked?;
    sync_dir(dir);
    Ok(())
}

fn temp_name(file_name: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(
        ".{file_name}.tmp.{}.{suffix}.{counter}",
        std::process::id()
    )
}

fn sync_dir(dir: &Dir) {
    if dir.open(".").and_then(|parent| parent.sync_all()).is_err() {
        // Directory sync is best effort.
    }
}

fn write_temp(dir: &Dir, tmp_name: &str, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(windows)]
fn rename_over(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_over(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use cap_std::ambient_authority;
    use rstest::rstest;
    use tempfile::TempDir;

    fn scratch() -> (TempDir, Dir) {
        let tmp = TempDir::new().expect("create temp dir");
        let dir = Dir::open_ambient_dir(tmp.path(), ambient_authority()).expect("open temp dir");
        (tmp, dir)
    }

    #[rstest]
    fn replaces_existing_contents_without_leftovers() {
        let (_tmp, dir) = scratch();
        write_atomic(&dir, "list.json", b"[1]").expect("first write");
        write_atomic(&dir, "list.json", b"[1,2]").expect("second write");

        assert_eq!(dir.read_to_string("list.json").expect("read back"), "[1,2]");
        let entries: Vec<String> = dir
            .entries()
            .expect("list entries")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["list.json".to_owned()]);
    }

    #[rstest]
    fn write_new_refuses_to_replace_an_existing_file() {
        let (_tmp, dir) = scratch();
        write_new(&dir, "photo.png", b"first").expect("first write");

        let err = write_new(&dir, "photo.png", b"second").expect_err("name taken");

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(dir.read("photo.png").expect("read back"), b"first");
        let entries = dir.entries().expect("list entries").count();
        assert_eq!(entries, 1, "temporary file is cleaned up");
    }

    #[rstest]
    #[case("../escape.json")]
    #[case("nested/list.json")]
    #[case("")]
    fn rejects_names_with_path_components(#[case] name: &str) {
        let (_tmp, dir) = scratch();
        let err = write_atomic(&dir, name, b"[]").expect_err("path rejected");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
