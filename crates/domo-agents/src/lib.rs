// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain agents for the Domo assistant.
//!
//! Two agents ship today: [`BudgetAgent`] for money and [`TripAgent`] for
//! travel. Both implement the `Agent` trait from `domo-core`, register in an
//! [`AgentRegistry`], and surface their vocabulary through capability and
//! keyword tables so routing never needs agent-specific code.

pub mod budget;
pub mod calendar;
pub mod ledger;
pub mod pinned;
pub mod registry;
pub mod travel;
pub mod trip;

pub use budget::BudgetAgent;
pub use calendar::{Calendar, CalendarEvent, LoggingCalendar};
pub use ledger::{Ledger, MemoryLedger, Transaction};
pub use pinned::{guess_pinned_intent, parse_mode_command, ModeCommand};
pub use registry::AgentRegistry;
pub use travel::{BookingKind, CannedTravelDesk, FlightOption, HotelOption, TravelDesk};
pub use trip::TripAgent;
