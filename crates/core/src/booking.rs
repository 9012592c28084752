//! The in-progress reservation carried between requests, and the stage it has
//! reached in the booking flow.
//!
//! ```text
//! Idle -> SearchSubmitted -> RoomChosen -> Confirmed
//! ```
//!
//! `Idle` is the absence of a draft. Guest details are only written into the
//! draft once they pass validation, immediately before it is persisted.

use serde::{Deserialize, Serialize};

use crate::dates::DateRange;
use crate::forms::GuestDetails;
use crate::types::DbId;

/// Where a visitor is in the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStage {
    /// No draft in the session.
    Idle,
    /// Dates searched, no room picked yet.
    SearchSubmitted,
    /// Room picked; waiting for guest details.
    RoomChosen,
    /// Persisted; waiting for the summary page to consume it.
    Confirmed,
}

impl BookingStage {
    pub fn of(draft: Option<&ReservationDraft>) -> Self {
        draft.map_or(BookingStage::Idle, ReservationDraft::stage)
    }
}

/// The room a draft is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChosenRoom {
    pub id: DbId,
    pub name: String,
}

/// A partially filled reservation held in session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDraft {
    pub dates: DateRange,
    pub room: Option<ChosenRoom>,
    pub guest: GuestDetails,
    pub reservation_id: Option<DbId>,
}

impl ReservationDraft {
    /// A fresh draft right after a date search.
    pub fn new(dates: DateRange) -> Self {
        Self {
            dates,
            room: None,
            guest: GuestDetails::default(),
            reservation_id: None,
        }
    }

    /// A draft with dates and room already known (the "book this room" shortcut).
    pub fn for_room(dates: DateRange, room_id: DbId, room_name: impl Into<String>) -> Self {
        let mut draft = Self::new(dates);
        draft.choose_room(room_id, room_name);
        draft
    }

    pub fn stage(&self) -> BookingStage {
        match (&self.room, self.reservation_id) {
            (_, Some(_)) => BookingStage::Confirmed,
            (Some(_), None) => BookingStage::RoomChosen,
            (None, None) => BookingStage::SearchSubmitted,
        }
    }

    pub fn choose_room(&mut self, room_id: DbId, room_name: impl Into<String>) {
        self.room = Some(ChosenRoom {
            id: room_id,
            name: room_name.into(),
        });
    }

    pub fn room_id(&self) -> Option<DbId> {
        self.room.as_ref().map(|r| r.id)
    }

    /// Record validated guest details and the id the writer assigned.
    pub fn confirm(&mut self, guest: GuestDetails, reservation_id: DbId) {
        self.guest = guest;
        self.reservation_id = Some(reservation_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates() -> DateRange {
        DateRange::parse("2050-01-01", "2050-01-02").unwrap()
    }

    #[test]
    fn no_draft_is_idle() {
        assert_eq!(BookingStage::of(None), BookingStage::Idle);
    }

    #[test]
    fn stages_advance_with_the_draft() {
        let mut draft = ReservationDraft::new(dates());
        assert_eq!(draft.stage(), BookingStage::SearchSubmitted);

        draft.choose_room(1, "General's Quarters");
        assert_eq!(draft.stage(), BookingStage::RoomChosen);
        assert_eq!(draft.room_id(), Some(1));

        let guest = GuestDetails {
            first_name: "Sam".into(),
            last_name: "Smith".into(),
            email: "sam@smith.com".into(),
            phone: String::new(),
        };
        draft.confirm(guest, 42);
        assert_eq!(BookingStage::of(Some(&draft)), BookingStage::Confirmed);
        assert_eq!(draft.guest.first_name, "Sam");
    }

    #[test]
    fn choosing_again_replaces_the_room() {
        let mut draft = ReservationDraft::for_room(dates(), 1, "General's Quarters");
        draft.choose_room(2, "Major's Suite");
        assert_eq!(draft.room.as_ref().map(|r| r.name.as_str()), Some("Major's Suite"));
    }

    #[test]
    fn draft_survives_session_serialization() {
        let draft = ReservationDraft::for_room(dates(), 1, "General's Quarters");
        let json = serde_json::to_value(&draft).unwrap();
        let back: ReservationDraft = serde_json::from_value(json).unwrap();
        assert_eq!(back, draft);
    }
}
