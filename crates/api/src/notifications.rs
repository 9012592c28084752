//! Emails sent when a reservation is booked.

use bookings_core::dates::format_date;
use bookings_db::models::reservation::Reservation;
use bookings_mail::MailMessage;

use crate::config::ServerConfig;
use crate::state::AppState;
use crate::views::escape;

/// Confirmation sent to the guest.
pub fn guest_confirmation(config: &ServerConfig, r: &Reservation) -> MailMessage {
    let content = format!(
        "<strong>Reservation Confirmation</strong><br>\n\
         Dear {first}:<br>\n\
         This is to confirm your reservation of {room} from {start} to {end}.",
        first = escape(&r.first_name),
        room = escape(&r.room_name),
        start = format_date(r.start_date),
        end = format_date(r.end_date),
    );
    MailMessage::new(&r.email, &config.mail_from, "Reservation Confirmation", content)
}

/// Notice sent to the property owner.
pub fn owner_notification(config: &ServerConfig, r: &Reservation) -> MailMessage {
    let content = format!(
        "<strong>Reservation Notification</strong><br>\n\
         A reservation has been made for {room} from {start} to {end}.<br>\n\
         Guest: {first} {last} ({email}).",
        room = escape(&r.room_name),
        start = format_date(r.start_date),
        end = format_date(r.end_date),
        first = escape(&r.first_name),
        last = escape(&r.last_name),
        email = escape(&r.email),
    );
    MailMessage::new(&config.owner_email, &config.mail_from, "Reservation Notification", content)
}

/// Queue both booking emails. A full queue drops the message; the booking
/// itself has already succeeded.
pub fn send_booking_emails(state: &AppState, reservation: &Reservation) {
    for message in [
        guest_confirmation(&state.config, reservation),
        owner_notification(&state.config, reservation),
    ] {
        let _ = state.mail.enqueue(message);
    }
}
