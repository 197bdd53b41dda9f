pub mod connections;

pub use self::connections::*;
