use ticketgate_db::dev::{MockNotifier, TestProject};
use ticketgate_db::prelude::*;
use ticketgate_db::utils::dates;

#[test]
fn create() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let event = project.create_event().with_capacity(20).finish();
    let notifier = MockNotifier::new();

    let request = TicketRequest::create(
        "Jane Attendee",
        "jane@example.com",
        "+3333333333",
        Some("Three of us are coming".to_string()),
        3,
        event.id,
    )
    .commit(&notifier, connection)
    .unwrap();

    assert_eq!(request.status, TicketRequestStatus::Pending);
    assert_eq!(request.quantity, 3);
    assert_eq!(request.event_id, event.id);
    assert!(request.processed_date.is_none());
    assert!(request.processed_by.is_none());
    assert!(request.can_be_processed());
    assert_eq!(
        notifier.kinds(),
        vec!["new_request".to_string(), "request_confirmation".to_string()]
    );
}

#[test]
fn create_quantity_boundaries() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let event = project.create_event().with_capacity(50).finish();

    // The upper bound is inclusive
    let request = TicketRequest::create("A B", "ok@example.com", "+1", None, 10, event.id)
        .commit(&NoopNotifier, connection)
        .unwrap();
    assert_eq!(request.quantity, 10);

    for quantity in &[0, 11] {
        let result = TicketRequest::create("A B", "bad@example.com", "+1", None, *quantity, event.id)
            .commit(&NoopNotifier, connection);
        match result {
            Ok(_) => panic!("Expected validation error for quantity {}", quantity),
            Err(e) => assert_eq!(e.code, 7200),
        }
    }
}

#[test]
fn create_fails_for_inactive_event() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    let event = project.create_event().with_organizer(&organizer).finish();
    let event = event.cancel(&organizer, connection).unwrap();

    let result = TicketRequest::create("A B", "a@example.com", "+1", None, 1, event.id)
        .commit(&NoopNotifier, connection);
    match result {
        Ok(_) => panic!("Expected business process error"),
        Err(e) => assert_eq!(e.error_code, ErrorCode::BusinessProcessError),
    }
}

#[test]
fn create_fails_for_past_event() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let event = project.create_event().finish();
    let event = event
        .update(
            EventEditableAttributes {
                event_date: Some(dates::now().add_hours(-3).finish()),
                ..Default::default()
            },
            connection,
        )
        .unwrap();

    let result = TicketRequest::create("A B", "a@example.com", "+1", None, 1, event.id)
        .commit(&NoopNotifier, connection);
    match result {
        Ok(_) => panic!("Expected event passed error"),
        Err(e) => assert_eq!(e.error_code, ErrorCode::EventPassedError),
    }
}

#[test]
fn create_fails_when_demand_exceeds_capacity() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let event = project.create_event().with_capacity(5).finish();
    project
        .create_ticket_request()
        .with_event(&event)
        .with_quantity(4)
        .finish();

    // 4 pending + 2 > 5
    let result = TicketRequest::create("A B", "a@example.com", "+1", None, 2, event.id)
        .commit(&NoopNotifier, connection);
    match result {
        Ok(_) => panic!("Expected capacity exceeded error"),
        Err(e) => assert_eq!(e.error_code, ErrorCode::CapacityExceededError),
    }

    // 4 pending + 1 == 5 still fits
    let request = TicketRequest::create("A B", "a@example.com", "+1", None, 1, event.id)
        .commit(&NoopNotifier, connection)
        .unwrap();
    assert_eq!(request.quantity, 1);
}

#[test]
fn approve() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    let event = project
        .create_event()
        .with_organizer(&organizer)
        .with_capacity(5)
        .finish();
    let request = project
        .create_ticket_request()
        .with_event(&event)
        .with_quantity(3)
        .finish();
    let notifier = MockNotifier::new();

    let request = request
        .approve(&organizer, Some("See you there".to_string()), &notifier, connection)
        .unwrap();

    assert_eq!(request.status, TicketRequestStatus::Approved);
    assert_eq!(request.processed_by, Some(organizer.id));
    assert!(request.processed_date.is_some());
    assert_eq!(request.organizer_notes, Some("See you there".to_string()));
    assert!(!request.can_be_processed());
    assert_eq!(notifier.kinds(), vec!["request_approved".to_string()]);
    assert_eq!(TicketRequest::approved_ticket_count(event.id, connection).unwrap(), 3);
    assert_eq!(TicketRequest::pending_ticket_count(event.id, connection).unwrap(), 0);
}

#[test]
fn approve_requires_owning_organizer() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    let other_organizer = project.create_user().with_role(Roles::Organizer).finish();
    let event = project.create_event().with_organizer(&organizer).finish();
    let request = project.create_ticket_request().with_event(&event).finish();

    let result = request.approve(&other_organizer, None, &NoopNotifier, connection);
    match result {
        Ok(_) => panic!("Expected access error"),
        Err(e) => assert_eq!(e.error_code, ErrorCode::AccessError),
    }
}

#[test]
fn approve_fails_once_processed() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    let event = project.create_event().with_organizer(&organizer).finish();
    let request = project.create_ticket_request().with_event(&event).finish();

    let request = request.approve(&organizer, None, &NoopNotifier, connection).unwrap();
    let result = request.approve(&organizer, None, &NoopNotifier, connection);
    match result {
        Ok(_) => panic!("Expected already processed error"),
        Err(e) => assert_eq!(e.error_code, ErrorCode::AlreadyProcessedError),
    }
}

#[test]
fn approve_recheck_blocks_capacity_overflow() {
    // Scenario: capacity 5, two requests for 3. The first is approved, the
    // second passes creation (advisory check on its own sum) but approval
    // must then refuse 3 + 3 > 5.
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    let event = project
        .create_event()
        .with_organizer(&organizer)
        .with_capacity(5)
        .finish();
    let first = project
        .create_ticket_request()
        .with_event(&event)
        .with_quantity(3)
        .finish();
    first.approve(&organizer, None, &NoopNotifier, connection).unwrap();

    let second = TicketRequest::create("A B", "late@example.com", "+1", None, 3, event.id)
        .commit(&NoopNotifier, connection);
    // 3 approved + 3 > 5 is already refused at creation time
    match second {
        Ok(_) => panic!("Expected capacity exceeded error"),
        Err(e) => assert_eq!(e.error_code, ErrorCode::CapacityExceededError),
    }

    // A request created before the first approval hits the re-check instead
    let racing = project
        .create_ticket_request()
        .with_event(&event)
        .with_quantity(2)
        .finish();
    let approved = racing.approve(&organizer, None, &NoopNotifier, connection).unwrap();
    assert_eq!(approved.status, TicketRequestStatus::Approved);

    let overflow = project.create_ticket_request().with_event(&event).finish();
    // 5 approved + 1 > 5
    let result = overflow.approve(&organizer, None, &NoopNotifier, connection);
    match result {
        Ok(_) => panic!("Expected capacity exceeded error"),
        Err(e) => assert_eq!(e.error_code, ErrorCode::CapacityExceededError),
    }
}

#[test]
fn reject() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    let event = project.create_event().with_organizer(&organizer).finish();
    let request = project.create_ticket_request().with_event(&event).finish();
    let notifier = MockNotifier::new();

    let request = request
        .reject(&organizer, Some("Sold out via other channels".to_string()), &notifier, connection)
        .unwrap();

    assert_eq!(request.status, TicketRequestStatus::Rejected);
    assert_eq!(request.processed_by, Some(organizer.id));
    assert_eq!(notifier.kinds(), vec!["request_rejected".to_string()]);
}

#[test]
fn reject_requires_owning_organizer() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    // Any other organizer-role principal is still refused
    let other_organizer = project.create_user().with_role(Roles::Organizer).finish();
    let event = project.create_event().with_organizer(&organizer).finish();
    let request = project.create_ticket_request().with_event(&event).finish();

    let result = request.reject(&other_organizer, None, &NoopNotifier, connection);
    match result {
        Ok(_) => panic!("Expected access error"),
        Err(e) => assert_eq!(e.error_code, ErrorCode::AccessError),
    }
}

#[test]
fn cancel_by_requester_email() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let event = project.create_event().finish();
    let request = project
        .create_ticket_request()
        .with_event(&event)
        .with_email("owner@example.com")
        .finish();
    let notifier = MockNotifier::new();

    // Email comparison ignores case
    let request = request.cancel("OWNER@Example.COM", &notifier, connection).unwrap();
    assert_eq!(request.status, TicketRequestStatus::Cancelled);
    assert_eq!(notifier.kinds(), vec!["request_cancelled".to_string()]);

    // Cancelled requests no longer count against capacity
    assert_eq!(TicketRequest::pending_ticket_count(event.id, connection).unwrap(), 0);
}

#[test]
fn cancel_requires_matching_email() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let request = project.create_ticket_request().with_email("owner@example.com").finish();

    let result = request.cancel("somebody@else.com", &NoopNotifier, connection);
    match result {
        Ok(_) => panic!("Expected access error"),
        Err(e) => assert_eq!(e.error_code, ErrorCode::AccessError),
    }
}

#[test]
fn cancel_fails_once_processed() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    let event = project.create_event().with_organizer(&organizer).finish();
    let request = project
        .create_ticket_request()
        .with_event(&event)
        .with_email("owner@example.com")
        .finish();
    let request = request.reject(&organizer, None, &NoopNotifier, connection).unwrap();

    let result = request.cancel("owner@example.com", &NoopNotifier, connection);
    match result {
        Ok(_) => panic!("Expected already processed error"),
        Err(e) => assert_eq!(e.error_code, ErrorCode::AlreadyProcessedError),
    }
}

#[test]
fn demand_aggregates_sum_by_status() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    let event = project
        .create_event()
        .with_organizer(&organizer)
        .with_capacity(20)
        .finish();

    let approved = project
        .create_ticket_request()
        .with_event(&event)
        .with_quantity(4)
        .finish();
    approved.approve(&organizer, None, &NoopNotifier, connection).unwrap();
    project
        .create_ticket_request()
        .with_event(&event)
        .with_quantity(2)
        .finish();
    project
        .create_ticket_request()
        .with_event(&event)
        .with_quantity(5)
        .finish();

    assert_eq!(TicketRequest::approved_ticket_count(event.id, connection).unwrap(), 4);
    assert_eq!(TicketRequest::pending_ticket_count(event.id, connection).unwrap(), 7);
}

#[test]
fn dashboard_queries() {
    let project = TestProject::new();
    let connection = project.get_connection();
    let organizer = project.create_user().with_role(Roles::Organizer).finish();
    let event = project.create_event().with_organizer(&organizer).finish();
    let first = project
        .create_ticket_request()
        .with_event(&event)
        .with_email("shared@example.com")
        .finish();
    let second = project
        .create_ticket_request()
        .with_event(&event)
        .with_email("shared@example.com")
        .finish();

    let by_event = TicketRequest::find_by_event(event.id, connection).unwrap();
    assert_eq!(by_event.len(), 2);

    let by_email = TicketRequest::find_by_email("shared@example.com", connection).unwrap();
    assert_eq!(by_email.len(), 2);

    let pending = TicketRequest::find_pending_by_organizer(organizer.id, connection).unwrap();
    assert_eq!(pending.len(), 2);
    assert_eq!(TicketRequest::count_pending_by_organizer(organizer.id, connection).unwrap(), 2);

    let recent = TicketRequest::find_recent(connection).unwrap();
    let recent_ids: Vec<_> = recent.iter().map(|r| r.id).collect();
    assert!(recent_ids.contains(&first.id));
    assert!(recent_ids.contains(&second.id));

    let found = TicketRequest::find(first.id, connection).unwrap();
    assert_eq!(found.id, first.id);
}
