pub use self::application_error::ApplicationError;
pub use self::ticket_gate_error::TicketGateError;

mod application_error;
mod ticket_gate_error;
