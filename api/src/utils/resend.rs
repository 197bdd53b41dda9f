use crate::errors::*;
use reqwest::blocking::Client;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Serialize)]
struct ResendMessage {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
}

pub fn send_email(
    api_key: &str,
    source_email_address: &str,
    dest_email_addresses: &[String],
    subject: &str,
    html: &str,
) -> Result<(), TicketGateError> {
    let message = ResendMessage {
        from: source_email_address.to_string(),
        to: dest_email_addresses.to_vec(),
        subject: subject.to_string(),
        html: html.to_string(),
    };

    let response = Client::new()
        .post(RESEND_API_URL)
        .bearer_auth(api_key)
        .json(&message)
        .send()?;

    if response.status().is_success() {
        Ok(())
    } else {
        let status = response.status();
        let body = response.text().unwrap_or_default();
        Err(ApplicationError::new(format!("Email API returned {}: {}", status, body)).into())
    }
}
