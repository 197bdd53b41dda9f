use crate::test_config;
use ticketgate_api::services::ticket_delivery;
use ticketgate_db::dev::{MockNotifier, TestProject};
use ticketgate_db::prelude::*;

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[test]
fn generate_and_deliver() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    let event = project
        .create_event()
        .with_organizer(&organizer)
        .with_capacity(10)
        .finish();
    let request = project
        .create_ticket_request()
        .with_event(&event)
        .with_quantity(2)
        .finish();
    let request = request.approve(&organizer, None, &NoopNotifier, connection).unwrap();
    let notifier = MockNotifier::new();

    let tickets =
        ticket_delivery::generate_and_deliver(request.id, &organizer, &project.token_issuer(), &notifier, connection)
            .unwrap();

    assert_eq!(tickets.len(), 2);
    assert_eq!(notifier.kinds(), vec!["approval_with_tickets".to_string()]);
}

#[test]
fn generate_and_deliver_requires_owning_organizer() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    let other_organizer = project.create_user().with_role(Roles::Organizer).finish();
    let event = project.create_event().with_organizer(&organizer).finish();
    let request = project.create_ticket_request().with_event(&event).finish();
    let request = request.approve(&organizer, None, &NoopNotifier, connection).unwrap();

    let result = ticket_delivery::generate_and_deliver(
        request.id,
        &other_organizer,
        &project.token_issuer(),
        &MockNotifier::new(),
        connection,
    );
    match result {
        Ok(_) => panic!("Expected access error"),
        Err(e) => assert_eq!(e.database_error().unwrap().error_code, ErrorCode::AccessError),
    }
}

#[test]
fn generate_and_deliver_requires_approval() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    let event = project.create_event().with_organizer(&organizer).finish();
    let request = project.create_ticket_request().with_event(&event).finish();

    let result = ticket_delivery::generate_and_deliver(
        request.id,
        &organizer,
        &project.token_issuer(),
        &MockNotifier::new(),
        connection,
    );
    match result {
        Ok(_) => panic!("Expected business process error"),
        Err(e) => assert_eq!(
            e.database_error().unwrap().error_code,
            ErrorCode::BusinessProcessError
        ),
    }
}

#[test]
fn render_ticket_batch_produces_one_artifact_per_ticket() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    let event = project
        .create_event()
        .with_organizer(&organizer)
        .with_capacity(10)
        .finish();
    let request = project
        .create_ticket_request()
        .with_event(&event)
        .with_quantity(3)
        .finish();
    let request = request.approve(&organizer, None, &NoopNotifier, connection).unwrap();
    let tickets = Ticket::generate_for_request(&request, &project.token_issuer(), connection).unwrap();

    let artifacts = ticket_delivery::render_ticket_batch(&tickets, &test_config(), connection);

    assert_eq!(artifacts.len(), 3);
    for (ticket_code, bytes) in &artifacts {
        assert!(tickets.iter().any(|t| &t.ticket_code == ticket_code));
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }
}
