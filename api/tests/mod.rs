#![deny(unreachable_patterns)]
#![deny(unused_must_use)]
extern crate ticketgate_api;
extern crate ticketgate_db;


use ticketgate_api::config::{Config, Environment};

pub fn test_config() -> Config {
    Config {
        app_name: "TicketGate".to_string(),
        database_url: "postgres://ignored".to_string(),
        domain: "ticketgate.local".to_string(),
        environment: Environment::Test,
        front_end_url: "http://localhost:3000".to_string(),
        token_secret: "test_secret".to_string(),
        token_issuer: "ticketgate-test".to_string(),
        communication_default_source_email: "noreply@ticketgate.local".to_string(),
        resend_api_key: "re_test".to_string(),
        block_external_comms: false,
        qr_image_size: 200,
    }
}
