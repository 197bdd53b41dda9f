pub use self::notifications::*;

pub mod notifications;
