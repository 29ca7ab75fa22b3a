//! Composition: a house owns its rooms.
//!
//! [`Room`] has no public constructor. Rooms are built with their house,
//! borrowed from it, and dropped with it.

use serde::Serialize;

/// A room inside a [`House`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    name: &'static str,
    area_sqft: u32,
}

impl Room {
    const fn new(name: &'static str, area_sqft: u32) -> Self {
        Self { name, area_sqft }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn area_sqft(&self) -> u32 {
        self.area_sqft
    }
}

/// A house with a fixed floor plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct House {
    address: String,
    rooms: Vec<Room>,
}

impl House {
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            rooms: vec![
                Room::new("Living Room", 300),
                Room::new("Kitchen", 150),
                Room::new("Bedroom", 200),
                Room::new("Bathroom", 50),
            ],
        }
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    #[must_use]
    pub fn total_area(&self) -> u32 {
        self.rooms.iter().map(Room::area_sqft).sum()
    }

    /// One `"Name: N sq ft"` line per room.
    #[must_use]
    pub fn list_rooms(&self) -> Vec<String> {
        self.rooms
            .iter()
            .map(|room| format!("{}: {} sq ft", room.name, room.area_sqft))
            .collect()
    }
}
