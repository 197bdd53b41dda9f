use crate::models::*;
use crate::utils::errors::DatabaseError;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

/// Wire status for the scanner clients. The serialized values are a fixed
/// contract shared with the scanner app and must not change.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanStatus {
    Valid,
    Used,
    Cancelled,
    Expired,
    NotFound,
    Error,
}

impl From<TicketStatus> for ScanStatus {
    fn from(status: TicketStatus) -> Self {
        match status {
            TicketStatus::Valid => ScanStatus::Valid,
            TicketStatus::Used => ScanStatus::Used,
            TicketStatus::Cancelled => ScanStatus::Cancelled,
            TicketStatus::Expired => ScanStatus::Expired,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DisplayTicket {
    pub id: Uuid,
    pub ticket_code: String,
    pub event_name: String,
    pub event_date: NaiveDateTime,
    pub venue: String,
    pub client_name: String,
    pub price_in_cents: i64,
    pub status: TicketStatus,
    pub purchase_date: NaiveDateTime,
}

/// Read-only projection for both the holder view and the scanner preview.
/// Deriving it never mutates the ticket; a stale Valid ticket reports
/// EXPIRED here without the row changing.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TicketValidationInfo {
    pub status: ScanStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_in_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<NaiveDateTime>,
}

impl TicketValidationInfo {
    pub fn not_found() -> TicketValidationInfo {
        TicketValidationInfo {
            status: ScanStatus::NotFound,
            message: "Ticket not found".to_string(),
            ticket_code: None,
            event_name: None,
            event_date: None,
            venue: None,
            client_name: None,
            purchase_date: None,
            price_in_cents: None,
            used_at: None,
            validated_by: None,
            cancelled_at: None,
        }
    }

    pub fn error(message: &str) -> TicketValidationInfo {
        TicketValidationInfo {
            status: ScanStatus::Error,
            message: message.to_string(),
            ..TicketValidationInfo::not_found()
        }
    }
}

impl Ticket {
    pub fn for_display(&self, conn: &PgConnection) -> Result<DisplayTicket, DatabaseError> {
        let event = self.event(conn)?;
        let client = self.client(conn)?;
        Ok(DisplayTicket {
            id: self.id,
            ticket_code: self.ticket_code.clone(),
            event_name: event.name.clone(),
            event_date: event.event_date,
            venue: event.venue.clone(),
            client_name: client.full_name,
            price_in_cents: self.price_in_cents,
            status: self.display_status(&event),
            purchase_date: self.purchase_date,
        })
    }

    pub fn validation_info(qr_token: &str, conn: &PgConnection) -> Result<TicketValidationInfo, DatabaseError> {
        let ticket = match Ticket::find_by_qr_token(qr_token, conn)? {
            Some(ticket) => ticket,
            None => return Ok(TicketValidationInfo::not_found()),
        };

        let event = ticket.event(conn)?;
        let client = ticket.client(conn)?;
        let display_status = ticket.display_status(&event);

        let (status, message) = match display_status {
            TicketStatus::Valid => (ScanStatus::Valid, "Ticket valid - ready to use".to_string()),
            TicketStatus::Used => (ScanStatus::Used, "Ticket has already been used".to_string()),
            TicketStatus::Cancelled => (ScanStatus::Cancelled, "Ticket has been cancelled".to_string()),
            TicketStatus::Expired => (ScanStatus::Expired, "Ticket has expired".to_string()),
        };

        let validated_by = match ticket.validated_by {
            Some(user_id) => Some(User::find(user_id, conn)?.full_name),
            None => None,
        };

        Ok(TicketValidationInfo {
            status,
            message,
            ticket_code: Some(ticket.ticket_code.clone()),
            event_name: Some(event.name.clone()),
            event_date: Some(event.event_date),
            venue: Some(event.venue.clone()),
            client_name: Some(client.full_name),
            purchase_date: Some(ticket.purchase_date),
            price_in_cents: Some(ticket.price_in_cents),
            used_at: ticket.used_at,
            validated_by,
            cancelled_at: ticket.cancelled_at,
        })
    }
}
