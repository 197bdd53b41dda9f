pub mod mailers;

use crate::config::Config;
use log::Level::Error;
use ticketgate_db::services::{Notification, Notifier};

/// Email-backed notification dispatch. Delivery failures are logged and
/// swallowed here; by the time a notification exists the domain transition
/// it announces has already committed.
pub struct EmailNotifier {
    config: Config,
}

impl EmailNotifier {
    pub fn new(config: Config) -> EmailNotifier {
        EmailNotifier { config }
    }
}

impl Notifier for EmailNotifier {
    fn notify(&self, notification: Notification) {
        let kind = notification.kind();
        let result = match &notification {
            Notification::NewRequest {
                request,
                event,
                organizer,
            } => mailers::ticket_requests::new_request_notification(&self.config, request, event, organizer),
            Notification::RequestConfirmation { request, event } => {
                mailers::ticket_requests::request_confirmation(&self.config, request, event)
            }
            Notification::RequestApproved { request, event } => {
                mailers::ticket_requests::request_approved(&self.config, request, event)
            }
            Notification::RequestRejected { request, event } => {
                mailers::ticket_requests::request_rejected(&self.config, request, event)
            }
            Notification::RequestCancelled {
                request,
                event,
                organizer,
            } => mailers::ticket_requests::request_cancelled(&self.config, request, event, organizer),
            Notification::ApprovalWithTickets {
                request,
                event,
                tickets,
            } => mailers::tickets::approval_with_tickets(&self.config, request, event, tickets),
        };

        if let Err(err) = result {
            jlog!(Error, "ticketgate_api::communications", "Could not deliver notification", {
                "kind": kind,
                "error": err.to_string()
            });
        }
    }
}
