use dotenv::dotenv;
use std::env;
use ticketgate_db::models::DefaultTokenIssuer;

#[derive(Clone, Debug, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

#[derive(Clone)]
pub struct Config {
    pub app_name: String,
    pub database_url: String,
    pub domain: String,
    pub environment: Environment,
    pub front_end_url: String,
    pub token_secret: String,
    pub token_issuer: String,
    pub communication_default_source_email: String,
    pub resend_api_key: String,
    pub block_external_comms: bool,
    pub qr_image_size: u32,
}

const APP_NAME: &str = "APP_NAME";
const DATABASE_URL: &str = "DATABASE_URL";
const TEST_DATABASE_URL: &str = "TEST_DATABASE_URL";
const DOMAIN: &str = "DOMAIN";
const FRONT_END_URL: &str = "FRONT_END_URL";
const TOKEN_SECRET: &str = "TOKEN_SECRET";
const TOKEN_ISSUER: &str = "TOKEN_ISSUER";
// Blocks all external communications from occurring
const BLOCK_EXTERNAL_COMMS: &str = "BLOCK_EXTERNAL_COMMS";

//Communication settings
const COMMUNICATION_DEFAULT_SOURCE_EMAIL: &str = "COMMUNICATION_DEFAULT_SOURCE_EMAIL";
const RESEND_API_KEY: &str = "RESEND_API_KEY";

const QR_IMAGE_SIZE: &str = "QR_IMAGE_SIZE";

impl Config {
    pub fn new(environment: Environment) -> Self {
        dotenv().ok();

        let app_name = env::var(&APP_NAME).unwrap_or_else(|_| "TicketGate".to_string());

        let database_url = match environment {
            Environment::Test => {
                env::var(&TEST_DATABASE_URL).unwrap_or_else(|_| panic!("{} must be defined.", TEST_DATABASE_URL))
            }
            _ => env::var(&DATABASE_URL).unwrap_or_else(|_| panic!("{} must be defined.", DATABASE_URL)),
        };

        let domain = env::var(&DOMAIN).unwrap_or_else(|_| "ticketgate.local".to_string());

        let front_end_url =
            env::var(&FRONT_END_URL).unwrap_or_else(|_| panic!("{} must be defined.", FRONT_END_URL));

        let token_secret =
            env::var(&TOKEN_SECRET).unwrap_or_else(|_| panic!("{} must be defined.", TOKEN_SECRET));

        let token_issuer =
            env::var(&TOKEN_ISSUER).unwrap_or_else(|_| panic!("{} must be defined.", TOKEN_ISSUER));

        let communication_default_source_email = env::var(&COMMUNICATION_DEFAULT_SOURCE_EMAIL)
            .unwrap_or_else(|_| panic!("{} must be defined.", COMMUNICATION_DEFAULT_SOURCE_EMAIL));

        let resend_api_key = env::var(&RESEND_API_KEY)
            .unwrap_or_else(|_| panic!("{} must be defined.", RESEND_API_KEY));

        let block_external_comms = match env::var(&BLOCK_EXTERNAL_COMMS)
            .unwrap_or_else(|_| "0".to_string())
            .as_str()
        {
            "0" => false,
            _ => true,
        };

        let qr_image_size = env::var(&QR_IMAGE_SIZE)
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .expect("Not a valid integer for QR image size");

        Config {
            app_name,
            database_url,
            domain,
            environment,
            front_end_url,
            token_secret,
            token_issuer,
            communication_default_source_email,
            resend_api_key,
            block_external_comms,
            qr_image_size,
        }
    }

    /// The signing configuration is read once at startup and handed to the
    /// codec here rather than living in ambient state.
    pub fn token_issuer(&self) -> DefaultTokenIssuer {
        DefaultTokenIssuer::new(self.token_secret.clone(), self.token_issuer.clone())
    }
}
