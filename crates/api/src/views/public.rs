//! Visitor-facing pages.

use std::fmt::Write;

use bookings_core::booking::ReservationDraft;
use bookings_core::dates::{format_date, DateRange};
use bookings_core::forms::{FormErrors, GuestDetails};
use bookings_core::types::DbId;
use bookings_db::models::room::Room;

use super::{escape, text_input, View};

pub struct HomePage;

impl View for HomePage {
    fn title(&self) -> String {
        "Home".into()
    }

    fn body(&self, out: &mut String) {
        out.push_str(
            "<h1>Welcome to Fort Smythe Bed and Breakfast</h1>\n\
             <p>Your home away from home, set on the majestic waters of the Atlantic Ocean.</p>\n\
             <p><a class=\"btn\" href=\"/search-availability\">Make Reservation Now</a></p>\n",
        );
    }
}

pub struct AboutPage;

impl View for AboutPage {
    fn title(&self) -> String {
        "About".into()
    }

    fn body(&self, out: &mut String) {
        out.push_str(
            "<h1>About</h1>\n\
             <p>Fort Smythe is a small bed and breakfast with two rooms, run by its owners.</p>\n",
        );
    }
}

pub struct ContactPage;

impl View for ContactPage {
    fn title(&self) -> String {
        "Contact".into()
    }

    fn body(&self, out: &mut String) {
        out.push_str(
            "<h1>Contact</h1>\n\
             <p>Questions about a stay? Write to the owners and we will get back to you.</p>\n",
        );
    }
}

/// Detail page for one of the seeded rooms, with an inline availability check.
pub struct RoomPage {
    pub room_id: DbId,
    pub name: &'static str,
    pub description: &'static str,
}

impl RoomPage {
    pub fn generals_quarters() -> Self {
        Self {
            room_id: 1,
            name: "General's Quarters",
            description: "A spacious room with a view of the harbour and a king size bed.",
        }
    }

    pub fn majors_suite() -> Self {
        Self {
            room_id: 2,
            name: "Major's Suite",
            description: "A quiet suite with a sitting area, a writing desk, and a queen size bed.",
        }
    }
}

impl View for RoomPage {
    fn title(&self) -> String {
        self.name.into()
    }

    fn body(&self, out: &mut String) {
        let _ = write!(
            out,
            "<h1>{name}</h1>\n<p>{description}</p>\n\
             <form id=\"check-availability\" action=\"/search-availability-json\" method=\"post\">\n\
             <input type=\"hidden\" name=\"room_id\" value=\"{room_id}\">\n\
             <label>Arrival <input type=\"date\" name=\"start\" required></label>\n\
             <label>Departure <input type=\"date\" name=\"end\" required></label>\n\
             <button type=\"submit\">Check Availability</button>\n</form>\n\
             <p id=\"availability-result\"></p>\n\
             <script>\n\
             document.getElementById('check-availability').addEventListener('submit', async (e) => {{\n\
               e.preventDefault();\n\
               const res = await fetch(e.target.action, {{method: 'post', body: new URLSearchParams(new FormData(e.target))}});\n\
               const data = await res.json();\n\
               const out = document.getElementById('availability-result');\n\
               if (data.ok) {{\n\
                 const link = document.createElement('a');\n\
                 link.href = '/book-room?' + new URLSearchParams({{id: data.room_id, s: data.start_date, e: data.end_date}});\n\
                 link.textContent = 'Book now!';\n\
                 out.replaceChildren(link);\n\
               }} else {{\n\
                 out.textContent = data.message;\n\
               }}\n\
             }});\n\
             </script>\n",
            name = escape(self.name),
            description = escape(self.description),
            room_id = self.room_id,
        );
    }
}

/// Date search form.
pub struct SearchPage;

impl View for SearchPage {
    fn title(&self) -> String {
        "Search for Availability".into()
    }

    fn body(&self, out: &mut String) {
        out.push_str(
            "<h1>Search for Availability</h1>\n\
             <form action=\"/search-availability\" method=\"post\">\n\
             <label>Starting date <input type=\"date\" name=\"start\" required></label>\n\
             <label>Ending date <input type=\"date\" name=\"end\" required></label>\n\
             <button type=\"submit\">Search Availability</button>\n</form>\n",
        );
    }
}

/// Search results.
pub struct ChooseRoomPage {
    pub dates: DateRange,
    pub rooms: Vec<Room>,
}

impl View for ChooseRoomPage {
    fn title(&self) -> String {
        "Choose a Room".into()
    }

    fn body(&self, out: &mut String) {
        let _ = writeln!(
            out,
            "<h1>Choose a Room</h1>\n<p>Available from {} to {}:</p>\n<ul>",
            format_date(self.dates.start()),
            format_date(self.dates.end())
        );
        for room in &self.rooms {
            let _ = writeln!(
                out,
                "<li><a href=\"/choose-room/{}\">{}</a></li>",
                room.id,
                escape(&room.room_name)
            );
        }
        out.push_str("</ul>\n");
    }
}

/// Guest details form for a chosen room and dates.
pub struct MakeReservationPage {
    pub room_name: String,
    pub dates: DateRange,
    pub guest: GuestDetails,
    pub errors: FormErrors,
}

impl View for MakeReservationPage {
    fn title(&self) -> String {
        "Make Reservation".into()
    }

    fn body(&self, out: &mut String) {
        let _ = write!(
            out,
            "<h1>Make Reservation</h1>\n<p><strong>Reservation Details</strong><br>\n\
             Room: {}<br>\nArrival: {}<br>\nDeparture: {}</p>\n\
             <form action=\"/make-reservation\" method=\"post\" novalidate>\n",
            escape(&self.room_name),
            format_date(self.dates.start()),
            format_date(self.dates.end())
        );
        text_input(out, &self.errors, "first_name", "First Name", "text", &self.guest.first_name);
        text_input(out, &self.errors, "last_name", "Last Name", "text", &self.guest.last_name);
        text_input(out, &self.errors, "email", "Email", "email", &self.guest.email);
        text_input(out, &self.errors, "phone", "Phone", "text", &self.guest.phone);
        out.push_str("<button type=\"submit\">Make Reservation</button>\n</form>\n");
    }
}

/// Confirmation shown once, straight after booking.
pub struct SummaryPage {
    pub draft: ReservationDraft,
}

impl View for SummaryPage {
    fn title(&self) -> String {
        "Reservation Summary".into()
    }

    fn body(&self, out: &mut String) {
        let guest = &self.draft.guest;
        let room = self
            .draft
            .room
            .as_ref()
            .map(|r| r.name.as_str())
            .unwrap_or_default();
        let _ = write!(
            out,
            "<h1>Reservation Summary</h1>\n<table>\n\
             <tr><td>Name:</td><td>{} {}</td></tr>\n\
             <tr><td>Room:</td><td>{}</td></tr>\n\
             <tr><td>Arrival:</td><td>{}</td></tr>\n\
             <tr><td>Departure:</td><td>{}</td></tr>\n\
             <tr><td>Email:</td><td>{}</td></tr>\n\
             <tr><td>Phone:</td><td>{}</td></tr>\n</table>\n",
            escape(&guest.first_name),
            escape(&guest.last_name),
            escape(room),
            format_date(self.draft.dates.start()),
            format_date(self.draft.dates.end()),
            escape(&guest.email),
            escape(&guest.phone)
        );
    }
}
