// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Travel lookups and bookings behind a seam.
//!
//! [`TravelDesk`] is the trip agent's collaborator for flights, hotels,
//! directions, and bookings. [`CannedTravelDesk`] answers from a fixed
//! local inventory so the assistant can run end-to-end without a live
//! feed.

use async_trait::async_trait;
use uuid::Uuid;

use domo_core::{Amount, Result};

/// What is being booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingKind {
    Flight,
    Hotel,
}

impl std::fmt::Display for BookingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingKind::Flight => write!(f, "flight"),
            BookingKind::Hotel => write!(f, "hotel"),
        }
    }
}

/// One flight search result.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightOption {
    pub depart: String,
    pub routing: String,
    pub price: Amount,
}

/// One hotel search result.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelOption {
    pub name: String,
    pub nightly_rate: Amount,
    pub note: String,
}

/// Flight and hotel inventory plus the booking desk.
#[async_trait]
pub trait TravelDesk: Send + Sync {
    async fn search_flights(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
    ) -> Result<Vec<FlightOption>>;

    async fn search_hotels(&self, destination: &str) -> Result<Vec<HotelOption>>;

    /// A short route description for the given travel mode.
    async fn directions(&self, destination: &str, mode: &str) -> Result<String>;

    /// Commits a booking and returns its confirmation code.
    async fn book(&self, kind: BookingKind, selection: &str) -> Result<String>;
}

/// Demo travel desk with a fixed local inventory.
#[derive(Debug, Default)]
pub struct CannedTravelDesk;

impl CannedTravelDesk {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TravelDesk for CannedTravelDesk {
    async fn search_flights(
        &self,
        _origin: &str,
        _destination: &str,
        _date: &str,
    ) -> Result<Vec<FlightOption>> {
        Ok(vec![
            FlightOption {
                depart: "07:40".to_string(),
                routing: "nonstop".to_string(),
                price: Amount(248.0),
            },
            FlightOption {
                depart: "12:15".to_string(),
                routing: "one stop".to_string(),
                price: Amount(189.0),
            },
            FlightOption {
                depart: "18:05".to_string(),
                routing: "nonstop".to_string(),
                price: Amount(261.0),
            },
        ])
    }

    async fn search_hotels(&self, _destination: &str) -> Result<Vec<HotelOption>> {
        Ok(vec![
            HotelOption {
                name: "The Foundry".to_string(),
                nightly_rate: Amount(142.0),
                note: "walkable center".to_string(),
            },
            HotelOption {
                name: "Hartwell House".to_string(),
                nightly_rate: Amount(118.0),
                note: "free breakfast".to_string(),
            },
            HotelOption {
                name: "Pier & Pine".to_string(),
                nightly_rate: Amount(205.0),
                note: "waterfront".to_string(),
            },
        ])
    }

    async fn directions(&self, _destination: &str, mode: &str) -> Result<String> {
        Ok(match mode {
            "walking" => {
                "take the riverside path, then cut through the old market, about 40 minutes on foot"
                    .to_string()
            }
            "transit" => {
                "the 12 bus runs every 10 minutes from the main square, about 30 minutes"
                    .to_string()
            }
            _ => {
                "head out on the main road and follow signs for the center, about 25 minutes door to door"
                    .to_string()
            }
        })
    }

    async fn book(&self, _kind: BookingKind, _selection: &str) -> Result<String> {
        Ok(Uuid::new_v4().simple().to_string()[..8].to_uppercase())
    }
}
