use crate::config::Config;
use crate::errors::*;
use crate::utils::render;
use diesel::pg::PgConnection;
use log::Level::Error;
use ticketgate_db::models::{Event, Ticket, TicketRequest, TokenIssuer, User};
use ticketgate_db::services::{Notification, Notifier};
use ticketgate_db::utils::errors::{DatabaseError, ErrorCode};
use uuid::Uuid;

/// Issues the tickets for an approved request and emails them to the
/// requester. The notification is best-effort: the tickets exist whether or
/// not the email goes out.
pub fn generate_and_deliver(
    request_id: Uuid,
    organizer: &User,
    issuer: &dyn TokenIssuer,
    notifier: &dyn Notifier,
    conn: &PgConnection,
) -> Result<Vec<Ticket>, TicketGateError> {
    let request = TicketRequest::find(request_id, conn)?;
    let event = Event::find(request.event_id, conn)?;
    if event.organizer_id != organizer.id {
        return Err(DatabaseError::new(
            ErrorCode::AccessError,
            Some("User does not have permission to generate tickets for this request"),
        )
        .into());
    }

    let tickets = Ticket::generate_for_request(&request, issuer, conn)?;

    notifier.notify(Notification::ApprovalWithTickets {
        request: &request,
        event: &event,
        tickets: &tickets,
    });

    Ok(tickets)
}

/// Renders the scannable artifact for each ticket in the batch. A ticket
/// whose rendering fails is logged and omitted; one bad ticket never aborts
/// the rest of the batch.
pub fn render_ticket_batch(
    tickets: &[Ticket],
    config: &Config,
    conn: &PgConnection,
) -> Vec<(String, Vec<u8>)> {
    let mut artifacts = Vec::with_capacity(tickets.len());
    for ticket in tickets {
        let rendered = ticket.for_display(conn).map_err(TicketGateError::from).and_then(|display| {
            render::render_ticket_document(&display, &ticket.qr_token, &config.front_end_url, config.qr_image_size)
        });
        match rendered {
            Ok(bytes) => artifacts.push((ticket.ticket_code.clone(), bytes)),
            Err(err) => {
                jlog!(Error, "ticketgate_api::services::ticket_delivery", "Could not render ticket artifact", {
                    "ticket_code": ticket.ticket_code,
                    "error": err.to_string()
                });
            }
        }
    }
    artifacts
}
