//! Login and administrator pages.

use std::fmt::Write;

use bookings_core::calendar::{add_block_field, remove_block_field, CalendarMonth, RoomOccupancy};
use bookings_core::dates::format_date;
use bookings_core::forms::{FormErrors, GuestDetails};
use bookings_db::models::reservation::Reservation;
use bookings_db::models::room::Room;

use super::{escape, text_input, View};

pub struct LoginPage {
    pub email: String,
    pub errors: FormErrors,
}

impl View for LoginPage {
    fn title(&self) -> String {
        "Login".into()
    }

    fn body(&self, out: &mut String) {
        out.push_str("<h1>Login</h1>\n<form action=\"/user/login\" method=\"post\" novalidate>\n");
        text_input(out, &self.errors, "email", "Email", "email", &self.email);
        text_input(out, &self.errors, "password", "Password", "password", "");
        out.push_str("<button type=\"submit\">Login</button>\n</form>\n");
    }
}

fn admin_menu(out: &mut String) {
    out.push_str(
        "<aside class=\"admin-menu\">\n<a href=\"/admin/dashboard\">Dashboard</a>\n\
         <a href=\"/admin/reservations-new\">New Reservations</a>\n\
         <a href=\"/admin/reservations-all\">All Reservations</a>\n\
         <a href=\"/admin/reservations-calendar\">Reservation Calendar</a>\n</aside>\n",
    );
}

pub struct DashboardPage;

impl View for DashboardPage {
    fn title(&self) -> String {
        "Dashboard".into()
    }

    fn body(&self, out: &mut String) {
        admin_menu(out);
        out.push_str("<h1>Dashboard</h1>\n<p>Review new reservations and manage room blocks.</p>\n");
    }
}

/// The new or all reservations table.
pub struct ReservationListPage {
    pub heading: &'static str,
    /// Path segment linking rows back to this list (`new` or `all`).
    pub src: &'static str,
    pub reservations: Vec<Reservation>,
}

impl View for ReservationListPage {
    fn title(&self) -> String {
        self.heading.into()
    }

    fn body(&self, out: &mut String) {
        admin_menu(out);
        let _ = writeln!(
            out,
            "<h1>{}</h1>\n<table class=\"reservations\">\n<thead><tr>\
             <th>ID</th><th>Last Name</th><th>Room</th><th>Arrival</th><th>Departure</th>\
             </tr></thead>\n<tbody>",
            escape(self.heading)
        );
        for r in &self.reservations {
            let _ = writeln!(
                out,
                "<tr><td>{id}</td><td><a href=\"/admin/reservations/{src}/{id}\">{last}</a></td>\
                 <td>{room}</td><td>{start}</td><td>{end}</td></tr>",
                id = r.id,
                src = self.src,
                last = escape(&r.last_name),
                room = escape(&r.room_name),
                start = format_date(r.start_date),
                end = format_date(r.end_date),
            );
        }
        out.push_str("</tbody>\n</table>\n");
    }
}

/// One reservation with its editable guest fields.
pub struct ReservationPage {
    pub reservation: Reservation,
    /// Values shown in the form: the stored ones, or the rejected submission.
    pub guest: GuestDetails,
    pub errors: FormErrors,
    pub src: &'static str,
    /// Calendar month to return to when `src` is `cal`.
    pub month: Option<CalendarMonth>,
    /// Where "Cancel" goes.
    pub back: String,
}

impl ReservationPage {
    fn month_fields(&self) -> String {
        self.month
            .map(|m| {
                format!(
                    "<input type=\"hidden\" name=\"y\" value=\"{}\">\n\
                     <input type=\"hidden\" name=\"m\" value=\"{}\">\n",
                    m.year(),
                    m.month()
                )
            })
            .unwrap_or_default()
    }
}

impl View for ReservationPage {
    fn title(&self) -> String {
        format!("Reservation {}", self.reservation.id)
    }

    fn body(&self, out: &mut String) {
        let r = &self.reservation;
        admin_menu(out);
        let _ = write!(
            out,
            "<h1>Reservation {id}</h1>\n<p>Room: {room}<br>\nArrival: {start}<br>\n\
             Departure: {end}<br>\nStatus: {status}</p>\n\
             <form action=\"/admin/reservations/{src}/{id}\" method=\"post\" novalidate>\n{month}",
            id = r.id,
            room = escape(&r.room_name),
            start = format_date(r.start_date),
            end = format_date(r.end_date),
            status = r.status().label(),
            src = self.src,
            month = self.month_fields(),
        );
        text_input(out, &self.errors, "first_name", "First Name", "text", &self.guest.first_name);
        text_input(out, &self.errors, "last_name", "Last Name", "text", &self.guest.last_name);
        text_input(out, &self.errors, "email", "Email", "email", &self.guest.email);
        text_input(out, &self.errors, "phone", "Phone", "text", &self.guest.phone);
        let _ = write!(
            out,
            "<button type=\"submit\">Save</button>\n<a href=\"{back}\">Cancel</a>\n</form>\n",
            back = escape(&self.back),
        );
        if !r.is_processed() {
            let _ = write!(
                out,
                "<form action=\"/admin/process-reservation/{src}/{id}\" method=\"post\">\n{month}\
                 <button type=\"submit\">Mark as Processed</button>\n</form>\n",
                src = self.src,
                id = r.id,
                month = self.month_fields(),
            );
        }
        let _ = write!(
            out,
            "<form action=\"/admin/delete-reservation/{src}/{id}\" method=\"post\">\n{month}\
             <button type=\"submit\">Delete</button>\n</form>\n",
            src = self.src,
            id = r.id,
            month = self.month_fields(),
        );
    }
}

/// Occupancy of one room for the calendar month.
pub struct CalendarRoom {
    pub room: Room,
    pub occupancy: RoomOccupancy,
}

pub struct CalendarPage {
    pub month: CalendarMonth,
    pub rooms: Vec<CalendarRoom>,
}

impl View for CalendarPage {
    fn title(&self) -> String {
        "Reservation Calendar".into()
    }

    fn body(&self, out: &mut String) {
        let (prev, next) = (self.month.previous(), self.month.next());
        admin_menu(out);
        let _ = write!(
            out,
            "<h1>Reservation Calendar</h1>\n<p>\
             <a href=\"/admin/reservations-calendar?y={py}&amp;m={pm}\">&lt;&lt;</a>\n\
             <strong>{label}</strong>\n\
             <a href=\"/admin/reservations-calendar?y={ny}&amp;m={nm}\">&gt;&gt;</a></p>\n\
             <form action=\"/admin/reservations-calendar\" method=\"post\">\n\
             <input type=\"hidden\" name=\"y\" value=\"{y}\">\n\
             <input type=\"hidden\" name=\"m\" value=\"{m}\">\n",
            py = prev.year(),
            pm = prev.month(),
            ny = next.year(),
            nm = next.month(),
            label = escape(&self.month.label()),
            y = self.month.year(),
            m = self.month.month(),
        );

        for entry in &self.rooms {
            let room_id = entry.room.id;
            let _ = write!(
                out,
                "<h2>{}</h2>\n<table class=\"calendar\">\n<tr>",
                escape(&entry.room.room_name)
            );
            for day in self.month.days() {
                let _ = write!(out, "<th>{}</th>", day.format("%-d"));
            }
            out.push_str("</tr>\n<tr>");
            for day in self.month.days() {
                out.push_str("<td>");
                if let Some(reservation_id) = entry.occupancy.reservations.get(&day) {
                    let _ = write!(
                        out,
                        "<a href=\"/admin/reservations/cal/{reservation_id}?y={}&amp;m={}\">R</a>",
                        self.month.year(),
                        self.month.month()
                    );
                } else if entry.occupancy.blocks.contains_key(&day) {
                    let _ = write!(
                        out,
                        "<input type=\"checkbox\" name=\"{}\" checked>",
                        remove_block_field(room_id, day)
                    );
                } else {
                    let _ = write!(
                        out,
                        "<input type=\"checkbox\" name=\"{}\">",
                        add_block_field(room_id, day)
                    );
                }
                out.push_str("</td>");
            }
            out.push_str("</tr>\n</table>\n");
        }
        out.push_str("<button type=\"submit\">Save Changes</button>\n</form>\n");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{NaiveDate, Utc};

    use super::*;

    fn room(id: i64, name: &str) -> Room {
        Room {
            id,
            room_name: name.into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn calendar_renders_reservations_blocks_and_free_days() {
        let day = |d| NaiveDate::from_ymd_opt(2050, 1, d).unwrap();
        let occupancy = RoomOccupancy {
            reservations: BTreeMap::from([(day(2), 7)]),
            blocks: BTreeMap::from([(day(5), 11)]),
        };
        let page = CalendarPage {
            month: CalendarMonth::new(2050, 1).unwrap(),
            rooms: vec![CalendarRoom {
                room: room(1, "General's Quarters"),
                occupancy,
            }],
        };
        let mut html = String::new();
        page.body(&mut html);

        assert!(html.contains("January 2050"));
        assert!(html.contains("/admin/reservations/cal/7?y=2050&amp;m=1"));
        assert!(html.contains("name=\"remove_block_1_2050-01-05\" checked"));
        assert!(html.contains("name=\"add_block_1_2050-01-06\">"));
        assert!(!html.contains("add_block_1_2050-01-02"));
        assert!(html.contains("?y=2049&amp;m=12"));
        assert!(html.contains("?y=2050&amp;m=2"));
    }
}
