use crate::dev::builders::*;
use crate::models::*;
use crate::utils::dates;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use rand::prelude::*;

pub struct EventBuilder<'a> {
    name: String,
    venue: String,
    event_date: Option<NaiveDateTime>,
    capacity: i32,
    price_in_cents: i64,
    organizer_id: Option<uuid::Uuid>,
    connection: &'a PgConnection,
}

impl<'a> EventBuilder<'a> {
    pub fn new(connection: &PgConnection) -> EventBuilder {
        let x: u16 = random();
        EventBuilder {
            name: format!("Event {}", x),
            venue: format!("Venue {}", x),
            event_date: None,
            capacity: 100,
            price_in_cents: 5000,
            organizer_id: None,
            connection,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_event_date(mut self, date: NaiveDateTime) -> Self {
        self.event_date = Some(date);
        self
    }

    pub fn with_capacity(mut self, capacity: i32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_price(mut self, price_in_cents: i64) -> Self {
        self.price_in_cents = price_in_cents;
        self
    }

    pub fn with_organizer(mut self, organizer: &User) -> Self {
        self.organizer_id = Some(organizer.id);
        self
    }

    pub fn finish(&mut self) -> Event {
        let organizer_id = self
            .organizer_id
            .unwrap_or_else(|| UserBuilder::new(self.connection).with_role(Roles::Organizer).finish().id);

        Event::create(
            &self.name,
            "An event used in tests",
            &self.venue,
            self.event_date.unwrap_or_else(|| dates::now().add_days(30).finish()),
            self.capacity,
            self.price_in_cents,
            organizer_id,
        )
        .commit(self.connection)
        .unwrap()
    }
}
