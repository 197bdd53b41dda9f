use crate::models::{QrClaims, TokenIssuer};
use chrono::NaiveDateTime;
use jsonwebtoken::{decode, encode, errors, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation};
use uuid::Uuid;

#[derive(Clone)]
pub struct DefaultTokenIssuer {
    pub token_secret: String,
    pub token_issuer: String,
}

impl DefaultTokenIssuer {
    pub fn new(token_secret: String, token_issuer: String) -> Self {
        DefaultTokenIssuer {
            token_secret,
            token_issuer,
        }
    }
}

impl TokenIssuer for DefaultTokenIssuer {
    fn encode(&self, claims: &QrClaims) -> Result<String, errors::Error> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.token_secret.as_bytes()),
        )
    }

    fn decode(&self, token: &str) -> Result<TokenData<QrClaims>, errors::Error> {
        decode::<QrClaims>(
            token,
            &DecodingKey::from_secret(self.token_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
    }

    fn issue(
        &self,
        ticket_code: &str,
        event_id: Uuid,
        client_id: Uuid,
        issued_at: NaiveDateTime,
    ) -> Result<String, errors::Error> {
        let claims = QrClaims::new(ticket_code, event_id, client_id, issued_at, self.token_issuer.clone());
        self.encode(&claims)
    }
}
