use crate::models::*;
use crate::schema::{events, tickets};
use crate::utils::errors::*;
use crate::validators::{self, append_validation_error};
use chrono::NaiveDateTime;
use chrono::Utc;
use diesel;
use diesel::dsl::{exists, select};
use diesel::expression::dsl;
use diesel::prelude::*;
use log::Level::Debug;
use uuid::Uuid;
use validator::Validate;

#[derive(Associations, Clone, Debug, Deserialize, Identifiable, PartialEq, Queryable, Serialize)]
#[belongs_to(User, foreign_key = "organizer_id")]
#[table_name = "events"]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub venue: String,
    pub event_date: NaiveDateTime,
    pub capacity: i32,
    pub price_in_cents: i64,
    pub available_tickets: i32,
    pub status: EventStatus,
    pub organizer_id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Deserialize, Insertable, Serialize, Validate)]
#[table_name = "events"]
pub struct NewEvent {
    #[validate(length(min = "3", max = "100", message = "Name must be between 3 and 100 characters long"))]
    pub name: String,
    #[validate(length(min = "1", message = "Description is required"))]
    pub description: String,
    #[validate(length(min = "1", message = "Venue is required"))]
    pub venue: String,
    pub event_date: NaiveDateTime,
    pub capacity: i32,
    pub price_in_cents: i64,
    pub organizer_id: Uuid,
    #[serde(default = "NewEvent::default_status", skip_deserializing)]
    pub status: EventStatus,
}

#[derive(AsChangeset, Default, Deserialize, Serialize, Validate)]
#[table_name = "events"]
pub struct EventEditableAttributes {
    #[validate(length(min = "3", max = "100", message = "Name must be between 3 and 100 characters long"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub event_date: Option<NaiveDateTime>,
    pub price_in_cents: Option<i64>,
    #[serde(skip_deserializing)]
    pub capacity: Option<i32>,
}

impl NewEvent {
    pub fn commit(&self, conn: &PgConnection) -> Result<Event, DatabaseError> {
        self.validate()?;
        let mut validation_errors = append_validation_error(
            Ok(()),
            "event_date",
            validators::date_in_future(
                self.event_date,
                "event_date_in_past",
                "Event date must be in the future",
            ),
        );
        validation_errors = append_validation_error(
            validation_errors,
            "capacity",
            validators::validate_greater_than_or_equal(
                self.capacity,
                1,
                "capacity_too_small",
                "Capacity must be at least 1",
            ),
        );
        validation_errors = append_validation_error(
            validation_errors,
            "price_in_cents",
            validators::validate_greater_than_or_equal(
                self.price_in_cents,
                0,
                "price_negative",
                "Price must be zero or more",
            ),
        );
        validation_errors?;

        // Available tickets start out equal to capacity; from here on the
        // column only moves through reserve_ticket / release_ticket.
        diesel::insert_into(events::table)
            .values((self, events::available_tickets.eq(self.capacity)))
            .get_result(conn)
            .to_db_error(ErrorCode::InsertError, "Could not create new event")
    }

    pub fn default_status() -> EventStatus {
        EventStatus::Active
    }
}

impl Event {
    pub fn create(
        name: &str,
        description: &str,
        venue: &str,
        event_date: NaiveDateTime,
        capacity: i32,
        price_in_cents: i64,
        organizer_id: Uuid,
    ) -> NewEvent {
        NewEvent {
            name: name.to_string(),
            description: description.to_string(),
            venue: venue.to_string(),
            event_date,
            capacity,
            price_in_cents,
            organizer_id,
            status: NewEvent::default_status(),
        }
    }

    pub fn find(id: Uuid, conn: &PgConnection) -> Result<Event, DatabaseError> {
        events::table
            .find(id)
            .first::<Event>(conn)
            .to_db_error(ErrorCode::QueryError, "Unable to load event")
    }

    pub fn find_by_organizer(organizer_id: Uuid, conn: &PgConnection) -> Result<Vec<Event>, DatabaseError> {
        events::table
            .filter(events::organizer_id.eq(organizer_id))
            .order_by(events::event_date.desc())
            .load(conn)
            .to_db_error(ErrorCode::QueryError, "Unable to load events for organizer")
    }

    pub fn find_upcoming(conn: &PgConnection) -> Result<Vec<Event>, DatabaseError> {
        events::table
            .filter(events::status.eq(EventStatus::Active))
            .filter(events::event_date.gt(dsl::now))
            .order_by(events::event_date.asc())
            .load(conn)
            .to_db_error(ErrorCode::QueryError, "Unable to load upcoming events")
    }

    pub fn find_available(conn: &PgConnection) -> Result<Vec<Event>, DatabaseError> {
        events::table
            .filter(events::status.eq(EventStatus::Active))
            .filter(events::event_date.gt(dsl::now))
            .filter(events::available_tickets.gt(0))
            .order_by(events::event_date.asc())
            .load(conn)
            .to_db_error(ErrorCode::QueryError, "Unable to load available events")
    }

    /// Edits to a cancelled or finished event are refused. A capacity change
    /// moves available_tickets by the same delta and cannot drop capacity
    /// below the tickets already sold through the ledger.
    pub fn update(&self, attributes: EventEditableAttributes, conn: &PgConnection) -> Result<Event, DatabaseError> {
        attributes.validate()?;
        conn.transaction(|| {
            let event: Event = events::table
                .find(self.id)
                .for_update()
                .first(conn)
                .to_db_error(ErrorCode::QueryError, "Unable to load event for update")?;

            if event.event_date < Utc::now().naive_utc() {
                return DatabaseError::event_passed("Cannot update an event that has already taken place");
            }
            if event.status == EventStatus::Cancelled {
                return DatabaseError::business_process_error("Cannot update a cancelled event");
            }

            let mut available_tickets = event.available_tickets;
            if let Some(new_capacity) = attributes.capacity {
                let sold = event.capacity - event.available_tickets;
                if new_capacity < sold {
                    return DatabaseError::business_process_error(
                        "Capacity cannot be reduced below the number of tickets already sold",
                    );
                }
                available_tickets = new_capacity - sold;
            }

            diesel::update(&event)
                .set((
                    &attributes,
                    events::available_tickets.eq(available_tickets),
                    events::updated_at.eq(dsl::now),
                ))
                .get_result(conn)
                .to_db_error(ErrorCode::UpdateError, "Could not update event")
        })
    }

    pub fn cancel(&self, organizer: &User, conn: &PgConnection) -> Result<Event, DatabaseError> {
        if self.organizer_id != organizer.id {
            return DatabaseError::forbidden("User does not have permission to cancel this event");
        }
        if self.event_date < Utc::now().naive_utc() {
            return DatabaseError::event_passed("Cannot cancel an event that has already taken place");
        }

        diesel::update(self)
            .set((
                events::status.eq(EventStatus::Cancelled),
                events::updated_at.eq(dsl::now),
            ))
            .get_result(conn)
            .to_db_error(ErrorCode::UpdateError, "Could not cancel event")
    }

    /// An event that has issued tickets through either channel is never
    /// physically deleted.
    pub fn destroy(self, organizer: &User, conn: &PgConnection) -> Result<(), DatabaseError> {
        if self.organizer_id != organizer.id {
            return DatabaseError::forbidden("User does not have permission to delete this event");
        }

        let has_tickets: bool = select(exists(tickets::table.filter(tickets::event_id.eq(self.id))))
            .get_result(conn)
            .to_db_error(ErrorCode::QueryError, "Could not check for issued tickets")?;
        if has_tickets || self.available_tickets < self.capacity {
            return DatabaseError::business_process_error("Cannot delete an event with issued tickets");
        }

        diesel::delete(&self)
            .execute(conn)
            .to_db_error(ErrorCode::DeleteError, "Could not delete event")?;
        Ok(())
    }

    /// Takes one unit of capacity. The decrement and its guard run as a
    /// single statement so two concurrent purchases can never both take the
    /// last ticket. Returns false when the event is sold out; the caller
    /// must abort the enclosing operation.
    pub fn reserve_ticket(event_id: Uuid, conn: &PgConnection) -> Result<bool, DatabaseError> {
        let rows = diesel::update(
            events::table
                .filter(events::id.eq(event_id))
                .filter(events::available_tickets.gt(0)),
        )
        .set((
            events::available_tickets.eq(events::available_tickets - 1),
            events::updated_at.eq(dsl::now),
        ))
        .execute(conn)
        .to_db_error(ErrorCode::UpdateError, "Could not reserve a ticket for event")?;

        if rows == 0 {
            jlog!(Debug, "Could not reserve ticket, event is sold out", { "event_id": event_id });
        }

        Ok(rows == 1)
    }

    /// Returns one unit of capacity, clamped so a double release can never
    /// push available_tickets past capacity.
    pub fn release_ticket(event_id: Uuid, conn: &PgConnection) -> Result<(), DatabaseError> {
        diesel::update(
            events::table
                .filter(events::id.eq(event_id))
                .filter(events::available_tickets.lt(events::capacity)),
        )
        .set((
            events::available_tickets.eq(events::available_tickets + 1),
            events::updated_at.eq(dsl::now),
        ))
        .execute(conn)
        .to_db_error(ErrorCode::UpdateError, "Could not release a ticket for event")?;
        Ok(())
    }

    pub fn has_available_tickets(&self) -> bool {
        self.available_tickets > 0
    }

    pub fn sold_ticket_count(&self) -> i32 {
        self.capacity - self.available_tickets
    }

    pub fn organizer(&self, conn: &PgConnection) -> Result<User, DatabaseError> {
        User::find(self.organizer_id, conn)
    }
}
