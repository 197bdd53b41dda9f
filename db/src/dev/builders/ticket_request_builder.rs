use crate::dev::builders::*;
use crate::models::*;
use crate::services::NoopNotifier;
use diesel::prelude::*;
use rand::prelude::*;

pub struct TicketRequestBuilder<'a> {
    full_name: String,
    email: String,
    phone: String,
    quantity: i32,
    event_id: Option<uuid::Uuid>,
    connection: &'a PgConnection,
}

impl<'a> TicketRequestBuilder<'a> {
    pub fn new(connection: &PgConnection) -> TicketRequestBuilder {
        let x: u32 = random();
        TicketRequestBuilder {
            full_name: format!("Requester {}", x),
            email: format!("requester-{}@ticketgate.test", x),
            phone: "+2222222222".to_string(),
            quantity: 1,
            event_id: None,
            connection,
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn with_quantity(mut self, quantity: i32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_event(mut self, event: &Event) -> Self {
        self.event_id = Some(event.id);
        self
    }

    pub fn finish(&mut self) -> TicketRequest {
        let event_id = self
            .event_id
            .unwrap_or_else(|| EventBuilder::new(self.connection).finish().id);

        TicketRequest::create(
            &self.full_name,
            &self.email,
            &self.phone,
            Some("Looking forward to it".to_string()),
            self.quantity,
            event_id,
        )
        .commit(&NoopNotifier, self.connection)
        .unwrap()
    }
}
