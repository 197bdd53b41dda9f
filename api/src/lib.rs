extern crate chrono;
extern crate diesel;
extern crate dotenv;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
#[macro_use]
extern crate logging;
extern crate qrcode;
extern crate reqwest;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate serde_json;
extern crate ticketgate_db;
extern crate uuid;

pub mod communications;
pub mod config;
pub mod errors;
pub mod services;
pub mod utils;
