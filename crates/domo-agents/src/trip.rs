// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The trip agent: flight and hotel search, directions, bookings, and
//! calendar events.
//!
//! Lookups and bookings go through the [`TravelDesk`] seam; calendar
//! writes go through [`Calendar`]. Side-effecting actions honor the
//! approval flag and never reach the collaborator while it is set.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use domo_core::{Agent, AgentReply, AgentRequest, Capability, ExecutionContext, Result};

use crate::calendar::{Calendar, CalendarEvent};
use crate::travel::{BookingKind, TravelDesk};

const CAPABILITIES: &[Capability] = &[
    Capability {
        action: "search_flights",
        description: "Search for flights between two places",
    },
    Capability {
        action: "search_hotels",
        description: "Search for hotels at a destination",
    },
    Capability {
        action: "get_directions",
        description: "Get directions to a place",
    },
    Capability {
        action: "book_flight",
        description: "Book a flight",
    },
    Capability {
        action: "book_hotel",
        description: "Book a hotel stay",
    },
    Capability {
        action: "calendar_add_event",
        description: "Add an event to the calendar, optionally with invitees",
    },
];

const KEYWORD_RULES: &[(&str, &str)] = &[
    ("book", "book_flight"),
    ("flight", "search_flights"),
    ("hotel", "search_hotels"),
    ("direction", "get_directions"),
    ("calendar", "calendar_add_event"),
    ("invite", "calendar_add_event"),
    ("meeting", "calendar_add_event"),
];

pub struct TripAgent {
    desk: Arc<dyn TravelDesk>,
    calendar: Arc<dyn Calendar>,
}

impl TripAgent {
    pub fn new(desk: Arc<dyn TravelDesk>, calendar: Arc<dyn Calendar>) -> Self {
        Self { desk, calendar }
    }

    async fn search_flights(&self, request: &AgentRequest) -> Result<AgentReply> {
        let origin = str_param(&request.params, "origin").unwrap_or("your city");
        let destination = str_param(&request.params, "destination").unwrap_or("anywhere");
        let date = str_param(&request.params, "date").unwrap_or("the next few days");
        let options = self.desk.search_flights(origin, destination, date).await?;

        let mut lines = vec![format!("Flights from {origin} to {destination} around {date}:")];
        for option in &options {
            lines.push(format!(
                "  {} depart, {}, ${:.0}",
                option.depart, option.routing, option.price.0
            ));
        }
        lines.push("Tell me which one to book.".to_string());
        Ok(AgentReply::text(lines.join("\n")))
    }

    async fn search_hotels(&self, request: &AgentRequest) -> Result<AgentReply> {
        let destination = str_param(&request.params, "destination").unwrap_or("that area");
        let options = self.desk.search_hotels(destination).await?;

        let mut lines = vec![format!("Hotels in {destination}:")];
        for option in &options {
            lines.push(format!(
                "  {}, ${:.0}/night, {}",
                option.name, option.nightly_rate.0, option.note
            ));
        }
        lines.push("Tell me which one to book.".to_string());
        Ok(AgentReply::text(lines.join("\n")))
    }

    async fn get_directions(&self, request: &AgentRequest) -> Result<AgentReply> {
        let destination = str_param(&request.params, "destination")
            .or_else(|| str_param(&request.params, "to"))
            .unwrap_or("your destination");
        let mode = str_param(&request.params, "mode").unwrap_or("driving");
        let route = self.desk.directions(destination, mode).await?;
        Ok(AgentReply::text(format!(
            "Directions to {destination} ({mode}): {route}."
        )))
    }

    async fn book(
        &self,
        kind: BookingKind,
        request: &AgentRequest,
        ctx: &ExecutionContext,
    ) -> Result<AgentReply> {
        let what = str_param(&request.params, "destination")
            .or_else(|| str_param(&request.params, "selection"))
            .unwrap_or("your selection");
        if ctx.approval_required {
            return Ok(AgentReply::text(format!(
                "Booking the {kind} for {what} needs your approval first. Approve it and I'll confirm the reservation."
            )));
        }
        let code = self.desk.book(kind, what).await?;
        Ok(AgentReply::text(format!(
            "Booked the {kind} for {what}. Confirmation code {code}."
        ))
        .with_data(json!({ "confirmation": code })))
    }

    async fn calendar_add_event(
        &self,
        request: &AgentRequest,
        ctx: &ExecutionContext,
    ) -> Result<AgentReply> {
        let title = str_param(&request.params, "title").unwrap_or("New event");
        let date = str_param(&request.params, "date").unwrap_or("the chosen time");
        let invitees = invitee_names(&request.params);
        if ctx.approval_required {
            return Ok(AgentReply::text(format!(
                "Inviting {} to \"{title}\" needs your approval first. Approve it and I'll send the invitations.",
                invitees.join(", ")
            )));
        }

        let event = CalendarEvent {
            title: title.to_string(),
            date: date.to_string(),
            invitees: invitees.clone(),
        };
        self.calendar.add_event(&ctx.user_id, event).await?;

        let mut message = format!("Added \"{title}\" on {date} to your calendar.");
        if !invitees.is_empty() {
            message.push_str(&format!(" Invitations sent to {}.", invitees.join(", ")));
        }
        Ok(AgentReply::text(message))
    }
}

#[async_trait]
impl Agent for TripAgent {
    fn name(&self) -> &str {
        "trip"
    }

    fn capabilities(&self) -> &'static [Capability] {
        CAPABILITIES
    }

    fn keyword_rules(&self) -> &'static [(&'static str, &'static str)] {
        KEYWORD_RULES
    }

    fn default_action(&self) -> &'static str {
        "search_flights"
    }

    async fn handle(&self, request: AgentRequest, ctx: &ExecutionContext) -> Result<AgentReply> {
        match request.action.as_str() {
            "search_flights" => self.search_flights(&request).await,
            "search_hotels" => self.search_hotels(&request).await,
            "get_directions" => self.get_directions(&request).await,
            "book_flight" => self.book(BookingKind::Flight, &request, ctx).await,
            "book_hotel" => self.book(BookingKind::Hotel, &request, ctx).await,
            "calendar_add_event" => self.calendar_add_event(&request, ctx).await,
            _ => Ok(self.capability_summary()),
        }
    }
}

fn str_param<'p>(params: &'p domo_core::ParamMap, key: &str) -> Option<&'p str> {
    params
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn invitee_names(params: &domo_core::ParamMap) -> Vec<String> {
    match params.get("invitees") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => {
            s.split(',').map(|part| part.trim().to_string()).collect()
        }
        _ => Vec::new(),
    }
}
