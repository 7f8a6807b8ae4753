//! Periodic reminder sweep over the calendar and shopping list.
//!
//! Each tick reads both stores and logs the calendar events dated today and
//! the number of pending shopping items. Failures are logged and the sweep
//! carries on at the next tick.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use mockable::Clock;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use super::lists::CalendarEvent;
use super::ports::{CalendarStore, ListStoreError, ShoppingListStore};

/// Result of one sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDigest {
    pub due_today: Vec<CalendarEvent>,
    pub pending_items: usize,
}

/// Background reminder task.
pub struct ReminderSweep {
    calendar: Arc<dyn CalendarStore>,
    shopping: Arc<dyn ShoppingListStore>,
    clock: Arc<dyn Clock + Send + Sync>,
}

fn event_date(event: &CalendarEvent) -> Option<NaiveDate> {
    let day = event.date.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

impl ReminderSweep {
    /// Create a sweep over the given stores, using `clock` for "today".
    pub fn new(
        calendar: Arc<dyn CalendarStore>,
        shopping: Arc<dyn ShoppingListStore>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            calendar,
            shopping,
            clock,
        }
    }

    /// Run a single sweep and log what is due.
    pub async fn sweep(&self) -> Result<ReminderDigest, ListStoreError> {
        let today = self.clock.local().date_naive();
        let due_today: Vec<CalendarEvent> = self
            .calendar
            .events()
            .await?
            .into_iter()
            .filter(|event| event_date(event) == Some(today))
            .collect();
        let pending_items = self.shopping.items().await?.len();

        for event in &due_today {
            info!(event_id = event.id, title = %event.title, "calendar event due today");
        }
        if pending_items > 0 {
            info!(pending_items, "shopping list has pending items");
        }

        Ok(ReminderDigest {
            due_today,
            pending_items,
        })
    }

    /// Sweep every `period` until the task is dropped.
    pub async fn run(self, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if let Err(err) = self.sweep().await {
                error!(error = %err, "reminder sweep failed");
            }
        }
    }
}
