pub use self::event_builder::*;
pub use self::ticket_builder::*;
pub use self::ticket_request_builder::*;
pub use self::user_builder::*;

mod event_builder;
mod ticket_builder;
mod ticket_request_builder;
mod user_builder;
