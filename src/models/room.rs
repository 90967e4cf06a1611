//! Room model.
//!
//! Rooms are the physical spaces classes are scheduled into. Each room
//! has a type that determines which meeting kinds it can host: lab
//! meetings require lab rooms, lecture meetings accept any
//! non-laboratory space.

use serde::{Deserialize, Serialize};

use super::MeetingKind;

/// A schedulable room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Human-readable name (e.g., "CL-201").
    pub name: String,
    /// Room classification.
    pub room_type: RoomType,
    /// Building the room is located in.
    pub building: String,
}

/// Room type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    /// Standard lecture room.
    Lecture,
    /// Computer or science laboratory.
    Lab,
    /// Small seminar room.
    Seminar,
    /// Large-capacity auditorium.
    Auditorium,
}

impl Room {
    /// Creates a new room.
    pub fn new(id: impl Into<String>, room_type: RoomType) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            room_type,
            building: String::new(),
        }
    }

    /// Creates a lecture room.
    pub fn lecture(id: impl Into<String>) -> Self {
        Self::new(id, RoomType::Lecture)
    }

    /// Creates a laboratory room.
    pub fn lab(id: impl Into<String>) -> Self {
        Self::new(id, RoomType::Lab)
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the building.
    pub fn with_building(mut self, building: impl Into<String>) -> Self {
        self.building = building.into();
        self
    }

    /// Whether this room can host a meeting of the given kind.
    ///
    /// Lab meetings need lab rooms. Lecture meetings fit any room
    /// that is not a laboratory.
    pub fn suits(&self, kind: MeetingKind) -> bool {
        match kind {
            MeetingKind::Lab => self.room_type == RoomType::Lab,
            MeetingKind::Lecture => self.room_type != RoomType::Lab,
        }
    }
}
