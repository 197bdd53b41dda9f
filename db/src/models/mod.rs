pub use self::auth::*;
pub use self::enums::*;
pub use self::events::*;
pub use self::for_display::*;
pub use self::ticket_requests::*;
pub use self::tickets::*;
pub use self::users::*;

mod auth;
pub mod enums;
mod events;
mod for_display;
mod ticket_requests;
mod tickets;
mod users;
