use crate::models::QrClaims;
use chrono::NaiveDateTime;
use jsonwebtoken::errors::Error;
use jsonwebtoken::TokenData;
use uuid::Uuid;

/// Seam between the domain and the signing configuration. Issuance mints a
/// token for each new ticket; validation verifies a presented token before
/// the ticket is even looked up.
pub trait TokenIssuer: Send + Sync {
    fn encode(&self, claims: &QrClaims) -> Result<String, Error>;
    fn decode(&self, token: &str) -> Result<TokenData<QrClaims>, Error>;
    fn issue(
        &self,
        ticket_code: &str,
        event_id: Uuid,
        client_id: Uuid,
        issued_at: NaiveDateTime,
    ) -> Result<String, Error>;
}
