use crate::models::{Event, Ticket, TicketRequest, User};

/// Payload handed to the notification dispatcher after a state transition
/// has committed. Each variant carries the already-resolved entities the
/// message needs so implementations do not have to query.
pub enum Notification<'a> {
    NewRequest {
        request: &'a TicketRequest,
        event: &'a Event,
        organizer: &'a User,
    },
    RequestConfirmation {
        request: &'a TicketRequest,
        event: &'a Event,
    },
    RequestApproved {
        request: &'a TicketRequest,
        event: &'a Event,
    },
    RequestRejected {
        request: &'a TicketRequest,
        event: &'a Event,
    },
    RequestCancelled {
        request: &'a TicketRequest,
        event: &'a Event,
        organizer: &'a User,
    },
    ApprovalWithTickets {
        request: &'a TicketRequest,
        event: &'a Event,
        tickets: &'a [Ticket],
    },
}

impl<'a> Notification<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::NewRequest { .. } => "new_request",
            Notification::RequestConfirmation { .. } => "request_confirmation",
            Notification::RequestApproved { .. } => "request_approved",
            Notification::RequestRejected { .. } => "request_rejected",
            Notification::RequestCancelled { .. } => "request_cancelled",
            Notification::ApprovalWithTickets { .. } => "approval_with_tickets",
        }
    }
}

/// Dispatch is fire-and-forget: implementations deliver best-effort and must
/// swallow their own failures, so a notification can never undo or block the
/// domain transition that triggered it.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Used where no delivery is wanted at all.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: Notification) {}
}
