use crate::models::*;
use crate::schema::{events, ticket_requests};
use crate::services::{Notification, Notifier};
use crate::utils::errors::*;
use crate::validators::{self, append_validation_error};
use chrono::NaiveDateTime;
use chrono::Utc;
use diesel;
use diesel::dsl::sum;
use diesel::expression::dsl;
use diesel::prelude::*;
use uuid::Uuid;
use validator::Validate;

pub const MAX_TICKETS_PER_REQUEST: i32 = 10;

#[derive(Associations, Clone, Debug, Deserialize, Identifiable, PartialEq, Queryable, Serialize)]
#[belongs_to(Event)]
#[table_name = "ticket_requests"]
pub struct TicketRequest {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    pub quantity: i32,
    pub event_id: Uuid,
    pub status: TicketRequestStatus,
    pub request_date: NaiveDateTime,
    pub processed_date: Option<NaiveDateTime>,
    pub processed_by: Option<Uuid>,
    pub organizer_notes: Option<String>,
    pub preferred_contact_method: PreferredContactMethod,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Deserialize, Insertable, Serialize, Validate)]
#[table_name = "ticket_requests"]
pub struct NewTicketRequest {
    #[validate(length(min = "1", message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = "1", message = "Phone is required"))]
    pub phone: String,
    pub message: Option<String>,
    pub quantity: i32,
    pub event_id: Uuid,
    #[serde(default = "NewTicketRequest::default_status", skip_deserializing)]
    pub status: TicketRequestStatus,
    #[serde(default = "NewTicketRequest::default_contact_method")]
    pub preferred_contact_method: PreferredContactMethod,
}

impl NewTicketRequest {
    /// Persists a public ticket request after checking the event can still
    /// take it. The demand check sums approved and pending quantities across
    /// the event's requests; it is advisory under concurrent submissions and
    /// is re-checked when the organizer approves.
    pub fn commit(&self, notifier: &dyn Notifier, conn: &PgConnection) -> Result<TicketRequest, DatabaseError> {
        self.validate()?;
        let mut validation_errors = append_validation_error(
            Ok(()),
            "quantity",
            validators::validate_greater_than_or_equal(
                self.quantity,
                1,
                "quantity_too_small",
                "At least 1 ticket must be requested",
            ),
        );
        validation_errors = append_validation_error(
            validation_errors,
            "quantity",
            validators::validate_less_than_or_equal(
                self.quantity,
                MAX_TICKETS_PER_REQUEST,
                "quantity_too_large",
                "No more than 10 tickets may be requested at once",
            ),
        );
        validation_errors?;

        let event = Event::find(self.event_id, conn)?;
        if event.status != EventStatus::Active {
            return DatabaseError::business_process_error("Event is not open for ticket requests");
        }
        if event.event_date < Utc::now().naive_utc() {
            return DatabaseError::event_passed("Event has already taken place");
        }

        let approved = TicketRequest::approved_ticket_count(event.id, conn)?;
        let pending = TicketRequest::pending_ticket_count(event.id, conn)?;
        if approved + pending + i64::from(self.quantity) > i64::from(event.capacity) {
            return DatabaseError::capacity_exceeded("Not enough capacity available for the requested quantity");
        }

        let request: TicketRequest = diesel::insert_into(ticket_requests::table)
            .values(self)
            .get_result(conn)
            .to_db_error(ErrorCode::InsertError, "Could not create ticket request")?;

        let organizer = event.organizer(conn)?;
        notifier.notify(Notification::NewRequest {
            request: &request,
            event: &event,
            organizer: &organizer,
        });
        notifier.notify(Notification::RequestConfirmation {
            request: &request,
            event: &event,
        });

        Ok(request)
    }

    pub fn default_status() -> TicketRequestStatus {
        TicketRequestStatus::Pending
    }

    pub fn default_contact_method() -> PreferredContactMethod {
        PreferredContactMethod::Email
    }
}

impl TicketRequest {
    pub fn create(
        full_name: &str,
        email: &str,
        phone: &str,
        message: Option<String>,
        quantity: i32,
        event_id: Uuid,
    ) -> NewTicketRequest {
        NewTicketRequest {
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            message,
            quantity,
            event_id,
            status: NewTicketRequest::default_status(),
            preferred_contact_method: NewTicketRequest::default_contact_method(),
        }
    }

    pub fn find(id: Uuid, conn: &PgConnection) -> Result<TicketRequest, DatabaseError> {
        ticket_requests::table
            .find(id)
            .first::<TicketRequest>(conn)
            .to_db_error(ErrorCode::QueryError, "Unable to load ticket request")
    }

    /// Approval re-checks demand against capacity while holding a lock on
    /// the event row, so two organizers approving concurrently cannot
    /// overshoot it between the sum and the status flip.
    pub fn approve(
        &self,
        organizer: &User,
        notes: Option<String>,
        notifier: &dyn Notifier,
        conn: &PgConnection,
    ) -> Result<TicketRequest, DatabaseError> {
        let event = Event::find(self.event_id, conn)?;
        if event.organizer_id != organizer.id {
            return DatabaseError::forbidden("User does not have permission to process this request");
        }

        let request = conn.transaction::<TicketRequest, DatabaseError, _>(|| {
            let event: Event = events::table
                .find(self.event_id)
                .for_update()
                .first(conn)
                .to_db_error(ErrorCode::QueryError, "Unable to load event for approval")?;

            let approved = TicketRequest::approved_ticket_count(event.id, conn)?;
            if approved + i64::from(self.quantity) > i64::from(event.capacity) {
                return DatabaseError::capacity_exceeded("Not enough capacity available to approve this request");
            }

            self.process(TicketRequestStatus::Approved, organizer, notes, conn)
        })?;

        notifier.notify(Notification::RequestApproved {
            request: &request,
            event: &event,
        });

        Ok(request)
    }

    pub fn reject(
        &self,
        organizer: &User,
        notes: Option<String>,
        notifier: &dyn Notifier,
        conn: &PgConnection,
    ) -> Result<TicketRequest, DatabaseError> {
        let event = Event::find(self.event_id, conn)?;
        if event.organizer_id != organizer.id {
            return DatabaseError::forbidden("User does not have permission to process this request");
        }

        let request = self.process(TicketRequestStatus::Rejected, organizer, notes, conn)?;

        notifier.notify(Notification::RequestRejected {
            request: &request,
            event: &event,
        });

        Ok(request)
    }

    /// Requester-side cancellation, keyed by the email the request was made
    /// with since requesters may not be registered users.
    pub fn cancel(
        &self,
        caller_email: &str,
        notifier: &dyn Notifier,
        conn: &PgConnection,
    ) -> Result<TicketRequest, DatabaseError> {
        if !self.email.eq_ignore_ascii_case(caller_email) {
            return DatabaseError::forbidden("User does not have permission to cancel this request");
        }

        let request: TicketRequest = match diesel::update(
            ticket_requests::table
                .filter(ticket_requests::id.eq(self.id))
                .filter(ticket_requests::status.eq(TicketRequestStatus::Pending)),
        )
        .set((
            ticket_requests::status.eq(TicketRequestStatus::Cancelled),
            ticket_requests::updated_at.eq(dsl::now),
        ))
        .get_result(conn)
        .to_db_error(ErrorCode::UpdateError, "Could not cancel ticket request")
        .optional()?
        {
            Some(request) => request,
            None => return DatabaseError::already_processed("Request has already been processed and cannot be cancelled"),
        };

        let event = Event::find(request.event_id, conn)?;
        let organizer = event.organizer(conn)?;
        notifier.notify(Notification::RequestCancelled {
            request: &request,
            event: &event,
            organizer: &organizer,
        });

        Ok(request)
    }

    /// Single guarded update out of Pending; zero affected rows means the
    /// request reached a terminal state first.
    fn process(
        &self,
        status: TicketRequestStatus,
        organizer: &User,
        notes: Option<String>,
        conn: &PgConnection,
    ) -> Result<TicketRequest, DatabaseError> {
        diesel::update(
            ticket_requests::table
                .filter(ticket_requests::id.eq(self.id))
                .filter(ticket_requests::status.eq(TicketRequestStatus::Pending)),
        )
        .set((
            ticket_requests::status.eq(status),
            ticket_requests::processed_date.eq(dsl::now),
            ticket_requests::processed_by.eq(organizer.id),
            ticket_requests::organizer_notes.eq(notes),
            ticket_requests::updated_at.eq(dsl::now),
        ))
        .get_result(conn)
        .to_db_error(ErrorCode::UpdateError, "Could not process ticket request")
        .optional()?
        .map(Ok)
        .unwrap_or_else(|| DatabaseError::already_processed("Request has already been processed"))
    }

    pub fn can_be_processed(&self) -> bool {
        self.status == TicketRequestStatus::Pending
    }

    pub fn approved_ticket_count(event_id: Uuid, conn: &PgConnection) -> Result<i64, DatabaseError> {
        TicketRequest::quantity_sum(event_id, TicketRequestStatus::Approved, conn)
    }

    pub fn pending_ticket_count(event_id: Uuid, conn: &PgConnection) -> Result<i64, DatabaseError> {
        TicketRequest::quantity_sum(event_id, TicketRequestStatus::Pending, conn)
    }

    fn quantity_sum(
        event_id: Uuid,
        status: TicketRequestStatus,
        conn: &PgConnection,
    ) -> Result<i64, DatabaseError> {
        let total: Option<i64> = ticket_requests::table
            .filter(ticket_requests::event_id.eq(event_id))
            .filter(ticket_requests::status.eq(status))
            .select(sum(ticket_requests::quantity))
            .first(conn)
            .to_db_error(ErrorCode::QueryError, "Unable to sum requested ticket quantities")?;
        Ok(total.unwrap_or(0))
    }

    pub fn find_by_event(event_id: Uuid, conn: &PgConnection) -> Result<Vec<TicketRequest>, DatabaseError> {
        ticket_requests::table
            .filter(ticket_requests::event_id.eq(event_id))
            .order_by(ticket_requests::request_date.desc())
            .load(conn)
            .to_db_error(ErrorCode::QueryError, "Unable to load ticket requests for event")
    }

    pub fn find_by_email(email: &str, conn: &PgConnection) -> Result<Vec<TicketRequest>, DatabaseError> {
        ticket_requests::table
            .filter(ticket_requests::email.eq(email))
            .order_by(ticket_requests::request_date.desc())
            .load(conn)
            .to_db_error(ErrorCode::QueryError, "Unable to load ticket requests for email")
    }

    pub fn find_pending_by_organizer(
        organizer_id: Uuid,
        conn: &PgConnection,
    ) -> Result<Vec<TicketRequest>, DatabaseError> {
        ticket_requests::table
            .inner_join(events::table)
            .filter(events::organizer_id.eq(organizer_id))
            .filter(ticket_requests::status.eq(TicketRequestStatus::Pending))
            .order_by(ticket_requests::request_date.desc())
            .select(ticket_requests::all_columns)
            .load(conn)
            .to_db_error(ErrorCode::QueryError, "Unable to load pending ticket requests for organizer")
    }

    pub fn count_pending_by_organizer(organizer_id: Uuid, conn: &PgConnection) -> Result<i64, DatabaseError> {
        ticket_requests::table
            .inner_join(events::table)
            .filter(events::organizer_id.eq(organizer_id))
            .filter(ticket_requests::status.eq(TicketRequestStatus::Pending))
            .count()
            .get_result(conn)
            .to_db_error(ErrorCode::QueryError, "Unable to count pending ticket requests for organizer")
    }

    pub fn find_recent(conn: &PgConnection) -> Result<Vec<TicketRequest>, DatabaseError> {
        let since = Utc::now().naive_utc() - chrono::Duration::hours(24);
        ticket_requests::table
            .filter(ticket_requests::request_date.gt(since))
            .order_by(ticket_requests::request_date.desc())
            .load(conn)
            .to_db_error(ErrorCode::QueryError, "Unable to load recent ticket requests")
    }
}
