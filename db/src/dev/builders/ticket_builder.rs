use crate::dev::builders::*;
use crate::models::*;
use diesel::prelude::*;

pub struct TicketBuilder<'a> {
    event: Option<Event>,
    client: Option<User>,
    connection: &'a PgConnection,
}

impl<'a> TicketBuilder<'a> {
    pub fn new(connection: &PgConnection) -> TicketBuilder {
        TicketBuilder {
            event: None,
            client: None,
            connection,
        }
    }

    pub fn with_event(mut self, event: &Event) -> Self {
        self.event = Some(event.clone());
        self
    }

    pub fn with_client(mut self, client: &User) -> Self {
        self.client = Some(client.clone());
        self
    }

    /// Issues the ticket through the purchase path, so the event ledger is
    /// decremented exactly as in production.
    pub fn finish(&mut self) -> Ticket {
        let event = self
            .event
            .take()
            .unwrap_or_else(|| EventBuilder::new(self.connection).finish());
        let client = self
            .client
            .take()
            .unwrap_or_else(|| UserBuilder::new(self.connection).finish());
        let issuer = DefaultTokenIssuer::new("test_secret".to_string(), "ticketgate-test".to_string());

        Ticket::purchase(event.id, &client, &issuer, self.connection).unwrap()
    }
}
