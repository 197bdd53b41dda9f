use ticketgate_api::services::scan;
use ticketgate_db::dev::TestProject;
use ticketgate_db::prelude::*;
use ticketgate_db::utils::dates;

#[test]
fn scan_and_validate_grants_entry_once() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    let event = project.create_event().with_organizer(&organizer).finish();
    let ticket = project.create_ticket().with_event(&event).finish();
    let issuer = project.token_issuer();

    let response = scan::scan_and_validate(&ticket.qr_token, &organizer, &issuer, connection);
    assert_eq!(response.status, ScanStatus::Valid);
    assert_eq!(response.message, "Ticket validated - entry granted");
    assert_eq!(response.ticket_code, Some(ticket.ticket_code.clone()));

    // The second presentation of the same token is refused
    let response = scan::scan_and_validate(&ticket.qr_token, &organizer, &issuer, connection);
    assert_eq!(response.status, ScanStatus::Used);
    assert!(response.used_at.is_some());
}

#[test]
fn scan_and_validate_unknown_token() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    let issuer = project.token_issuer();

    let response = scan::scan_and_validate("garbage-token", &organizer, &issuer, connection);
    assert_eq!(response.status, ScanStatus::NotFound);
    assert!(response.ticket_code.is_none());
}

#[test]
fn scan_and_validate_wrong_organizer() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    let other_organizer = project.create_user().with_role(Roles::Organizer).finish();
    let event = project.create_event().with_organizer(&organizer).finish();
    let ticket = project.create_ticket().with_event(&event).finish();

    let response = scan::scan_and_validate(&ticket.qr_token, &other_organizer, &project.token_issuer(), connection);
    assert_eq!(response.status, ScanStatus::Error);
    assert_eq!(response.message, "You do not have permission to validate this ticket");

    // The losing scan did not consume the ticket
    let ticket = Ticket::find(ticket.id, connection).unwrap();
    assert_eq!(ticket.status, TicketStatus::Valid);
}

#[test]
fn scan_and_validate_expired_ticket() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    let event = project.create_event().with_organizer(&organizer).finish();
    let ticket = project.create_ticket().with_event(&event).finish();
    event
        .update(
            EventEditableAttributes {
                event_date: Some(dates::now().add_hours(-2).finish()),
                ..Default::default()
            },
            connection,
        )
        .unwrap();

    let response = scan::scan_and_validate(&ticket.qr_token, &organizer, &project.token_issuer(), connection);
    assert_eq!(response.status, ScanStatus::Expired);
}

#[test]
fn ticket_info_previews_without_consuming() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let event = project.create_event().finish();
    let ticket = project.create_ticket().with_event(&event).finish();

    let response = scan::ticket_info(&ticket.qr_token, connection);
    assert_eq!(response.status, ScanStatus::Valid);

    let ticket = Ticket::find(ticket.id, connection).unwrap();
    assert_eq!(ticket.status, TicketStatus::Valid);

    let response = scan::ticket_info("garbage-token", connection);
    assert_eq!(response.status, ScanStatus::NotFound);
}
