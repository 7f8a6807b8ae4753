//! Shopping list and calendar stores backed by flat JSON files.
//!
//! Each store owns one file inside a capability directory. Mutations hold a
//! per-store async lock across the whole read-modify-write so concurrent
//! requests cannot lose each other's updates. File I/O runs on the blocking
//! pool. A missing or unparsable file reads as an empty list.

use std::io;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::fs::Dir;
use mockable::Clock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::warn;

use crate::domain::lists::{
    CalendarEvent, EventIdRef, ShoppingItem, append_event, append_item, remove_events,
};
use crate::domain::ports::{CalendarStore, ListStoreError, ShoppingListStore};

use super::atomic::write_atomic;

/// File name used for the shopping list.
pub const SHOPPING_FILE: &str = "shopping_list.json";
/// File name used for calendar events.
pub const CALENDAR_FILE: &str = "calendar.json";

struct JsonFile<T> {
    dir: Arc<Dir>,
    name: &'static str,
    lock: Mutex<()>,
    _items: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned + Send + 'static,
{
    fn new(dir: Arc<Dir>, name: &'static str) -> Self {
        Self {
            dir,
            name,
            lock: Mutex::new(()),
            _items: PhantomData,
        }
    }

    async fn load(&self) -> Result<Vec<T>, ListStoreError> {
        let _guard = self.lock.lock().await;
        let dir = Arc::clone(&self.dir);
        let name = self.name;
        run_blocking(move || read_list(&dir, name)).await
    }

    async fn update<F>(&self, apply: F) -> Result<Vec<T>, ListStoreError>
    where
        F: FnOnce(&mut Vec<T>) + Send + 'static,
    {
        let _guard = self.lock.lock().await;
        let dir = Arc::clone(&self.dir);
        let name = self.name;
        run_blocking(move || {
            let mut items = read_list(&dir, name)?;
            apply(&mut items);
            let encoded = serde_json::to_vec_pretty(&items)
                .map_err(|err| ListStoreError::encode(err.to_string()))?;
            write_atomic(&dir, name, &encoded).map_err(io_error)?;
            Ok(items)
        })
        .await
    }
}

async fn run_blocking<R, F>(task: F) -> Result<R, ListStoreError>
where
    F: FnOnce() -> Result<R, ListStoreError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| ListStoreError::io(format!("list store task failed: {err}")))?
}

fn io_error(err: io::Error) -> ListStoreError {
    ListStoreError::io(err.to_string())
}

fn read_list<T: DeserializeOwned>(dir: &Dir, name: &str) -> Result<Vec<T>, ListStoreError> {
    let raw = match dir.read(name) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(io_error(err)),
    };
    match serde_json::from_slice(&raw) {
        Ok(items) => Ok(items),
        Err(err) => {
            warn!(file = name, error = %err, "discarding unreadable list file");
            Ok(Vec::new())
        }
    }
}

/// Shopping list kept in [`SHOPPING_FILE`].
pub struct FileShoppingListStore {
    file: JsonFile<ShoppingItem>,
}

impl FileShoppingListStore {
    pub fn new(dir: Arc<Dir>) -> Self {
        Self {
            file: JsonFile::new(dir, SHOPPING_FILE),
        }
    }
}

#[async_trait]
impl ShoppingListStore for FileShoppingListStore {
    async fn items(&self) -> Result<Vec<ShoppingItem>, ListStoreError> {
        self.file.load().await
    }

    async fn add(&self, name: &str) -> Result<Vec<ShoppingItem>, ListStoreError> {
        let name = name.to_owned();
        self.file.update(move |items| append_item(items, name)).await
    }

    async fn reset(&self) -> Result<Vec<ShoppingItem>, ListStoreError> {
        self.file.update(Vec::clear).await
    }
}

/// Calendar kept in [`CALENDAR_FILE`], with ids taken from the clock.
pub struct FileCalendarStore {
    file: JsonFile<CalendarEvent>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl FileCalendarStore {
    pub fn new(dir: Arc<Dir>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            file: JsonFile::new(dir, CALENDAR_FILE),
            clock,
        }
    }
}

#[async_trait]
impl CalendarStore for FileCalendarStore {
    async fn events(&self) -> Result<Vec<CalendarEvent>, ListStoreError> {
        self.file.load().await
    }

    async fn add(&self, title: &str, date: &str) -> Result<Vec<CalendarEvent>, ListStoreError> {
        let id = self.clock.utc().timestamp_millis();
        let (title, date) = (title.to_owned(), date.to_owned());
        self.file
            .update(move |events| append_event(events, id, title, date))
            .await
    }

    async fn delete(&self, id: &EventIdRef) -> Result<Vec<CalendarEvent>, ListStoreError> {
        let id = id.clone();
        self.file
            .update(move |events| {
                remove_events(events, &id);
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use cap_std::ambient_authority;
    use chrono::{DateTime, Local, TimeZone, Utc};
    use std::sync::atomic::{AtomicI64, Ordering};
    use rstest::{fixture, rstest};
    use serde_json::json;
    use tempfile::TempDir;

    struct Scratch {
        _tmp: TempDir,
        dir: Arc<Dir>,
    }

    #[fixture]
    fn scratch() -> Scratch {
        let tmp = TempDir::new().expect("create temp dir");
        let dir = Dir::open_ambient_dir(tmp.path(), ambient_authority()).expect("open temp dir");
        Scratch {
            _tmp: tmp,
            dir: Arc::new(dir),
        }
    }

    struct TickingClock {
        next_ms: AtomicI64,
    }

    impl Clock for TickingClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            let ms = self.next_ms.fetch_add(1, Ordering::SeqCst);
            Utc.timestamp_millis_opt(ms)
                .single()
                .expect("valid fixture timestamp")
        }
    }

    fn ticking_clock(start_ms: i64) -> Arc<dyn Clock + Send + Sync> {
        Arc::new(TickingClock {
            next_ms: AtomicI64::new(start_ms),
        })
    }

    #[rstest]
    #[tokio::test]
    async fn missing_file_reads_as_empty(scratch: Scratch) {
        let store = FileShoppingListStore::new(scratch.dir);
        assert!(store.items().await.expect("read").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn corrupt_file_reads_as_empty_and_is_replaced_on_write(scratch: Scratch) {
        scratch
            .dir
            .write(SHOPPING_FILE, b"{not json")
            .expect("seed corrupt file");
        let store = FileShoppingListStore::new(Arc::clone(&scratch.dir));

        assert!(store.items().await.expect("read").is_empty());
        let items = store.add("milk").await.expect("add");

        assert_eq!(items.len(), 1);
        let on_disk = scratch.dir.read_to_string(SHOPPING_FILE).expect("read file");
        let parsed: serde_json::Value = serde_json::from_str(&on_disk).expect("valid json");
        assert_eq!(parsed, json!([{"id": 1, "name": "milk"}]));
    }

    #[rstest]
    #[tokio::test]
    async fn shopping_add_then_reset(scratch: Scratch) {
        let store = FileShoppingListStore::new(scratch.dir);
        store.add("milk").await.expect("add milk");
        let items = store.add("eggs").await.expect("add eggs");
        assert_eq!(
            items.iter().map(|item| item.id).collect::<Vec<_>>(),
            vec![1, 2]
        );

        assert!(store.reset().await.expect("reset").is_empty());
        assert!(store.items().await.expect("read").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_adds_are_all_kept(scratch: Scratch) {
        let store = Arc::new(FileShoppingListStore::new(scratch.dir));
        let tasks: Vec<_> = (0..8)
            .map(|n| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.add(&format!("item {n}")).await })
            })
            .collect();
        for task in tasks {
            task.await.expect("join").expect("add");
        }

        let mut ids: Vec<u64> = store
            .items()
            .await
            .expect("read")
            .iter()
            .map(|item| item.id)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }

    #[rstest]
    #[tokio::test]
    async fn calendar_ids_come_from_clock_and_delete_by_string(scratch: Scratch) {
        let store = FileCalendarStore::new(scratch.dir, ticking_clock(1_700_000_000_000));
        store.add("Dentist", "2026-10-18").await.expect("add");
        let events = store.add("Party", "2026-10-19").await.expect("add");
        assert_eq!(events[0].id, 1_700_000_000_000);
        assert_eq!(events[1].id, 1_700_000_000_001);

        let id = EventIdRef::from_json(&json!("1700000000000")).expect("usable id");
        let remaining = store.delete(&id).await.expect("delete");

        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "Party");
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_unknown_id_keeps_events(scratch: Scratch) {
        let store = FileCalendarStore::new(scratch.dir, ticking_clock(5));
        store.add("Dentist", "2026-10-18").await.expect("add");

        let id = EventIdRef::from_json(&json!(99)).expect("usable id");
        assert_eq!(store.delete(&id).await.expect("delete").len(), 1);
    }
}
