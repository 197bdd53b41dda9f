use chrono::NaiveDateTime;
use uuid::Uuid;

const TOKEN_VALIDITY_DAYS: i64 = 3650;

/// Claims embedded in a ticket's QR token. The subject is the public ticket
/// code; the expiry is far beyond any event date so the signature, not the
/// timestamp, is what gates a token.
#[derive(Debug, Serialize, Deserialize)]
pub struct QrClaims {
    pub sub: String,
    pub iss: String,
    pub event_id: String,
    pub client_id: String,
    pub issued: i64,
    pub exp: i64,
}

impl QrClaims {
    pub fn new(
        ticket_code: &str,
        event_id: Uuid,
        client_id: Uuid,
        issued_at: NaiveDateTime,
        issuer: String,
    ) -> Self {
        let issued = issued_at.timestamp();
        QrClaims {
            sub: ticket_code.to_string(),
            iss: issuer,
            event_id: event_id.to_hyphenated().to_string(),
            client_id: client_id.to_hyphenated().to_string(),
            issued,
            exp: issued + TOKEN_VALIDITY_DAYS * 24 * 60 * 60,
        }
    }

    pub fn event_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.event_id)
    }

    pub fn client_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.client_id)
    }
}
