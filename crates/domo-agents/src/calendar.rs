// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calendar event sink.
//!
//! [`LoggingCalendar`] keeps events in memory and logs each addition
//! instead of calling a real calendar service.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::info;

use domo_core::{Result, UserId};

/// One calendar entry as the trip agent stages it.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub title: String,
    pub date: String,
    pub invitees: Vec<String>,
}

/// Destination for calendar events.
#[async_trait]
pub trait Calendar: Send + Sync {
    async fn add_event(&self, user: &UserId, event: CalendarEvent) -> Result<()>;
}

/// Demo calendar backed by an in-memory map, one event list per user.
#[derive(Debug, Default)]
pub struct LoggingCalendar {
    events: DashMap<UserId, Vec<CalendarEvent>>,
}

impl LoggingCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Events added for this user, oldest first.
    pub fn events_for(&self, user: &UserId) -> Vec<CalendarEvent> {
        self.events
            .get(user)
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Calendar for LoggingCalendar {
    async fn add_event(&self, user: &UserId, event: CalendarEvent) -> Result<()> {
        info!(
            user = %user,
            title = %event.title,
            invitees = event.invitees.len(),
            "calendar event added"
        );
        self.events.entry(user.clone()).or_default().push(event);
        Ok(())
    }
}
