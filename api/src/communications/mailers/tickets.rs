use crate::communications::mailers::event_summary_html;
use crate::config::Config;
use crate::errors::*;
use crate::utils::communication::{CommAddress, Communication, CommunicationType};
use itertools::Itertools;
use ticketgate_db::models::{Event, Ticket, TicketRequest};

pub fn approval_with_tickets(
    config: &Config,
    request: &TicketRequest,
    event: &Event,
    tickets: &[Ticket],
) -> Result<(), TicketGateError> {
    let source = CommAddress::from(config.communication_default_source_email.clone());
    let destinations = CommAddress::from(request.email.clone());
    let title = format!("{}: Your tickets for {}", config.app_name, event.name);

    let ticket_links = tickets
        .iter()
        .map(|ticket| {
            format!(
                "<li><a href=\"{}/tickets/{}\">Ticket {}</a></li>",
                config.front_end_url, ticket.id, ticket.ticket_code
            )
        })
        .join("\n");
    let body = format!(
        "{}<p>Hi {}, your {} ticket(s) are ready. Present each QR code at the entrance; every code admits one person once.</p><ul>{}</ul>",
        event_summary_html(event),
        request.full_name,
        tickets.len(),
        ticket_links
    );

    Communication::new(CommunicationType::Email, title, Some(body), Some(source), destinations).send(config)
}
