pub mod ticket_requests;
pub mod tickets;

use ticketgate_db::models::Event;

pub const EVENT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

pub fn event_summary_html(event: &Event) -> String {
    format!(
        "<p><strong>{}</strong><br>{}<br>{}</p>",
        event.name,
        event.event_date.format(EVENT_DATE_FORMAT),
        event.venue
    )
}
