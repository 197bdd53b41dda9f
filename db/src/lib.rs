#[macro_use]
extern crate diesel;
extern crate backtrace;
extern crate chrono;
extern crate dotenv;
extern crate jsonwebtoken;
#[macro_use]
extern crate log;
#[macro_use]
extern crate logging;
extern crate rand;
extern crate uuid;
#[macro_use]
extern crate serde_derive;
extern crate serde;
#[macro_use]
extern crate serde_json;
#[macro_use]
extern crate validator_derive;
extern crate validator;

pub mod db;
pub mod dev;
pub mod models;
pub mod schema;
pub mod services;
pub mod utils;
pub mod validators;

pub mod prelude {
    pub use crate::db::*;
    pub use crate::models::*;
    pub use crate::services::*;
    pub use crate::utils::errors::*;
}
