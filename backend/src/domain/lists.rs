//! Shopping list and calendar entries kept in flat JSON files.
//!
//! The mutations here are pure; storage adapters load the current list,
//! apply one of these functions, and write the result back while holding the
//! store's lock.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// One entry on the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShoppingItem {
    /// Position-derived identifier assigned at insertion (`len + 1`).
    pub id: u64,
    pub name: String,
}

/// One calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CalendarEvent {
    /// Insertion time in Unix milliseconds.
    pub id: i64,
    pub title: String,
    /// Free-form date string supplied by the client, usually `YYYY-MM-DD`.
    pub date: String,
}

/// Append `name` to the list.
///
/// Ids are `len + 1` at insertion time; single items are never removed, only
/// the whole list is reset.
pub fn append_item(items: &mut Vec<ShoppingItem>, name: impl Into<String>) {
    let id = items.len() as u64 + 1;
    items.push(ShoppingItem {
        id,
        name: name.into(),
    });
}

/// Append a calendar entry with the supplied millisecond id.
pub fn append_event(
    events: &mut Vec<CalendarEvent>,
    id: i64,
    title: impl Into<String>,
    date: impl Into<String>,
) {
    events.push(CalendarEvent {
        id,
        title: title.into(),
        date: date.into(),
    });
}

/// Remove every event whose id renders to `id` as a string.
///
/// Returns the number of events removed.
pub fn remove_events(events: &mut Vec<CalendarEvent>, id: &EventIdRef) -> usize {
    let before = events.len();
    events.retain(|event| event.id.to_string() != id.as_str());
    before - events.len()
}

/// Calendar id supplied by a client, as either a JSON number or string.
///
/// Matching is by string form, so `1700000000000` and `"1700000000000"`
/// select the same entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventIdRef(String);

impl EventIdRef {
    /// Accept a non-empty string or a non-zero number.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::lists::EventIdRef;
    /// use serde_json::json;
    ///
    /// assert!(EventIdRef::from_json(&json!(42)).is_some());
    /// assert!(EventIdRef::from_json(&json!("")).is_none());
    /// ```
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(raw) if !raw.is_empty() => Some(Self(raw.clone())),
            Value::Number(number) if number.as_f64() != Some(0.0) => {
                Some(Self(number.to_string()))
            }
            _ => None,
        }
    }

    /// String form used for matching.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn event(id: i64) -> CalendarEvent {
        CalendarEvent {
            id,
            title: format!("event {id}"),
            date: "2026-10-18".to_owned(),
        }
    }

    #[rstest]
    fn shopping_ids_follow_list_length() {
        let mut items = Vec::new();
        append_item(&mut items, "milk");
        append_item(&mut items, "eggs");
        let ids: Vec<u64> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[rstest]
    #[case(json!(1_700_000_000_000_i64))]
    #[case(json!("1700000000000"))]
    fn removes_by_string_form(#[case] raw: Value) {
        let mut events = vec![event(1_700_000_000_000), event(1_700_000_000_001)];
        let id = EventIdRef::from_json(&raw).expect("usable id");
        assert_eq!(remove_events(&mut events, &id), 1);
        assert_eq!(events, vec![event(1_700_000_000_001)]);
    }

    #[rstest]
    fn unknown_id_leaves_events_untouched() {
        let mut events = vec![event(5)];
        let id = EventIdRef::from_json(&json!("6")).expect("usable id");
        assert_eq!(remove_events(&mut events, &id), 0);
        assert_eq!(events.len(), 1);
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!(""))]
    #[case(json!(0))]
    #[case(json!(false))]
    #[case(json!([1]))]
    fn unusable_ids_are_rejected(#[case] raw: Value) {
        assert!(EventIdRef::from_json(&raw).is_none());
    }
}
