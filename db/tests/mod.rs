// Force these as errors so that they are not lost in the diesel warnings
#![deny(unreachable_patterns)]
#![deny(unused_must_use)]
extern crate diesel;
#[macro_use]
extern crate macros;
extern crate ticketgate_db;
extern crate uuid;

mod unit;
