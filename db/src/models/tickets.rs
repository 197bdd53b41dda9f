use crate::models::*;
use crate::schema::tickets;
use crate::utils::errors::*;
use chrono::NaiveDateTime;
use chrono::{Duration, Utc};
use diesel;
use diesel::expression::dsl;
use diesel::prelude::*;
use log::Level::Debug;
use uuid::Uuid;

/// Grace period after the event start during which a ticket can still be
/// scanned at the door.
const ENTRY_GRACE_PERIOD_HOURS: i64 = 1;

#[derive(Associations, Clone, Debug, Deserialize, Identifiable, PartialEq, Queryable, Serialize)]
#[belongs_to(Event)]
#[belongs_to(User, foreign_key = "client_id")]
#[table_name = "tickets"]
pub struct Ticket {
    pub id: Uuid,
    pub ticket_code: String,
    pub qr_token: String,
    pub event_id: Uuid,
    pub client_id: Uuid,
    pub price_in_cents: i64,
    pub status: TicketStatus,
    pub purchase_date: NaiveDateTime,
    pub used_at: Option<NaiveDateTime>,
    pub cancelled_at: Option<NaiveDateTime>,
    pub validated_by: Option<Uuid>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Insertable, Serialize)]
#[table_name = "tickets"]
pub struct NewTicket {
    pub ticket_code: String,
    pub qr_token: String,
    pub event_id: Uuid,
    pub client_id: Uuid,
    pub price_in_cents: i64,
    pub status: TicketStatus,
}

impl NewTicket {
    fn build(event: &Event, client_id: Uuid, issuer: &dyn TokenIssuer) -> Result<NewTicket, DatabaseError> {
        let ticket_code = Uuid::new_v4().to_string();
        let qr_token = issuer.issue(&ticket_code, event.id, client_id, Utc::now().naive_utc())?;
        Ok(NewTicket {
            ticket_code,
            qr_token,
            event_id: event.id,
            client_id,
            price_in_cents: event.price_in_cents,
            status: TicketStatus::Valid,
        })
    }

    fn commit(&self, conn: &PgConnection) -> Result<Ticket, DatabaseError> {
        diesel::insert_into(tickets::table)
            .values(self)
            .get_result(conn)
            .to_db_error(ErrorCode::InsertError, "Could not create ticket")
    }
}

impl Ticket {
    /// Direct purchase path. Takes one unit from the event's capacity ledger
    /// before the ticket row exists; if anything after the reservation
    /// fails, the unit is released again before the error surfaces, since
    /// token minting is not transactional with the reservation.
    pub fn purchase(
        event_id: Uuid,
        client: &User,
        issuer: &dyn TokenIssuer,
        conn: &PgConnection,
    ) -> Result<Ticket, DatabaseError> {
        let event = Event::find(event_id, conn)?;
        if event.status != EventStatus::Active {
            return DatabaseError::business_process_error("Event is not open for sales");
        }
        if event.event_date < Utc::now().naive_utc() {
            return DatabaseError::event_passed("Event has already taken place");
        }
        if !event.has_available_tickets() {
            return DatabaseError::sold_out("No tickets available for event");
        }

        if !Event::reserve_ticket(event.id, conn)? {
            return DatabaseError::sold_out("No tickets available for event");
        }

        let result = NewTicket::build(&event, client.id, issuer).and_then(|new_ticket| new_ticket.commit(conn));
        match result {
            Ok(ticket) => Ok(ticket),
            Err(err) => {
                // Compensate the reservation so the failed purchase does not
                // leak capacity.
                if let Err(release_err) = Event::release_ticket(event.id, conn) {
                    jlog!(Debug, "Could not release reserved ticket after failed purchase", {
                        "event_id": event.id,
                        "error": release_err.to_string()
                    });
                }
                Err(err)
            }
        }
    }

    /// Issues one ticket per requested unit for an approved request. The
    /// requester's email resolves to a client identity idempotently, but
    /// every call issues a fresh batch; callers are expected to invoke this
    /// once per approval. The capacity ledger is not touched: arbitration
    /// already accounted this demand against capacity.
    pub fn generate_for_request(
        request: &TicketRequest,
        issuer: &dyn TokenIssuer,
        conn: &PgConnection,
    ) -> Result<Vec<Ticket>, DatabaseError> {
        if request.status != TicketRequestStatus::Approved {
            return DatabaseError::business_process_error("Tickets can only be generated for approved requests");
        }

        let event = Event::find(request.event_id, conn)?;
        conn.transaction(|| {
            let client = User::find_or_create_guest(
                &request.full_name,
                &request.email,
                Some(request.phone.clone()),
                conn,
            )?;

            let mut generated = Vec::with_capacity(request.quantity as usize);
            for _ in 0..request.quantity {
                let ticket = NewTicket::build(&event, client.id, issuer)?.commit(conn)?;
                generated.push(ticket);
            }
            Ok(generated)
        })
    }

    pub fn find(id: Uuid, conn: &PgConnection) -> Result<Ticket, DatabaseError> {
        tickets::table
            .find(id)
            .first::<Ticket>(conn)
            .to_db_error(ErrorCode::QueryError, "Unable to load ticket")
    }

    pub fn find_by_ticket_code(ticket_code: &str, conn: &PgConnection) -> Result<Option<Ticket>, DatabaseError> {
        tickets::table
            .filter(tickets::ticket_code.eq(ticket_code))
            .first::<Ticket>(conn)
            .to_db_error(ErrorCode::QueryError, "Unable to load ticket by code")
            .optional()
    }

    /// Tickets resolve by the stored token value; the signature was already
    /// checked by the caller so a forged token can only miss.
    pub fn find_by_qr_token(qr_token: &str, conn: &PgConnection) -> Result<Option<Ticket>, DatabaseError> {
        tickets::table
            .filter(tickets::qr_token.eq(qr_token))
            .first::<Ticket>(conn)
            .to_db_error(ErrorCode::QueryError, "Unable to load ticket by token")
            .optional()
    }

    pub fn find_by_client(client_id: Uuid, conn: &PgConnection) -> Result<Vec<Ticket>, DatabaseError> {
        tickets::table
            .filter(tickets::client_id.eq(client_id))
            .order_by(tickets::purchase_date.desc())
            .load(conn)
            .to_db_error(ErrorCode::QueryError, "Unable to load tickets for client")
    }

    pub fn find_by_event(event_id: Uuid, conn: &PgConnection) -> Result<Vec<Ticket>, DatabaseError> {
        tickets::table
            .filter(tickets::event_id.eq(event_id))
            .order_by(tickets::purchase_date.desc())
            .load(conn)
            .to_db_error(ErrorCode::QueryError, "Unable to load tickets for event")
    }

    /// Entry scan. Exactly-once: the Valid -> Used flip is a single guarded
    /// update, so of two concurrent scans one wins and the other observes
    /// the terminal state it lost to. A ticket presented more than the grace
    /// period after the event start is lazily moved to Expired here; this is
    /// the only path that persists Expired.
    pub fn validate(
        qr_token: &str,
        validator: &User,
        issuer: &dyn TokenIssuer,
        conn: &PgConnection,
    ) -> Result<Ticket, DatabaseError> {
        // Fail closed: a token that does not verify is treated exactly like
        // a token that does not exist.
        if let Err(err) = issuer.decode(qr_token) {
            jlog!(Debug, "Rejected ticket token that did not verify", { "error": err.to_string() });
            return DatabaseError::no_results("Ticket not found");
        }

        let ticket = match Ticket::find_by_qr_token(qr_token, conn)? {
            Some(ticket) => ticket,
            None => return DatabaseError::no_results("Ticket not found"),
        };

        let event = Event::find(ticket.event_id, conn)?;
        if event.organizer_id != validator.id {
            return DatabaseError::forbidden("User does not have permission to validate this ticket");
        }

        match ticket.status {
            TicketStatus::Valid => (),
            TicketStatus::Used => {
                return DatabaseError::already_used(&format!(
                    "Ticket has already been used at {}",
                    ticket.used_at.map(|d| d.to_string()).unwrap_or_default()
                ));
            }
            TicketStatus::Cancelled => return DatabaseError::ticket_cancelled("Ticket has been cancelled"),
            TicketStatus::Expired => return DatabaseError::ticket_expired("Ticket has expired"),
        }

        if event.event_date + Duration::hours(ENTRY_GRACE_PERIOD_HOURS) < Utc::now().naive_utc() {
            ticket.transition(TicketStatus::Valid, TicketStatus::Expired, conn)?;
            return DatabaseError::ticket_expired("Ticket has expired");
        }

        let used: Option<Ticket> = diesel::update(
            tickets::table
                .filter(tickets::id.eq(ticket.id))
                .filter(tickets::status.eq(TicketStatus::Valid)),
        )
        .set((
            tickets::status.eq(TicketStatus::Used),
            tickets::used_at.eq(dsl::now),
            tickets::validated_by.eq(validator.id),
            tickets::updated_at.eq(dsl::now),
        ))
        .get_result(conn)
        .to_db_error(ErrorCode::UpdateError, "Could not mark ticket as used")
        .optional()?;

        match used {
            Some(ticket) => Ok(ticket),
            // Lost the race; report the state the winner left behind.
            None => {
                let ticket = Ticket::find(ticket.id, conn)?;
                match ticket.status {
                    TicketStatus::Used => DatabaseError::already_used(&format!(
                        "Ticket has already been used at {}",
                        ticket.used_at.map(|d| d.to_string()).unwrap_or_default()
                    )),
                    TicketStatus::Cancelled => DatabaseError::ticket_cancelled("Ticket has been cancelled"),
                    TicketStatus::Expired => DatabaseError::ticket_expired("Ticket has expired"),
                    TicketStatus::Valid => {
                        DatabaseError::concurrency_error("Ticket could not be validated, please retry")
                    }
                }
            }
        }
    }

    /// Cancellation by the ticket holder or the event's organizer. Releases
    /// the held capacity unit back into the ledger; the release is clamped,
    /// so request-issued tickets that never took a ledger unit cannot push
    /// availability past capacity.
    pub fn cancel(&self, user: &User, conn: &PgConnection) -> Result<Ticket, DatabaseError> {
        let event = Event::find(self.event_id, conn)?;
        let is_owner = self.client_id == user.id;
        let is_organizer = event.organizer_id == user.id;
        if !is_owner && !is_organizer {
            return DatabaseError::forbidden("User does not have permission to cancel this ticket");
        }

        if self.status == TicketStatus::Used {
            return DatabaseError::already_used("Cannot cancel a ticket that has already been used");
        }
        if event.event_date < Utc::now().naive_utc() {
            return DatabaseError::event_passed("Cannot cancel a ticket for an event that has already taken place");
        }

        conn.transaction(|| {
            let cancelled: Option<Ticket> = diesel::update(
                tickets::table
                    .filter(tickets::id.eq(self.id))
                    .filter(tickets::status.eq(TicketStatus::Valid)),
            )
            .set((
                tickets::status.eq(TicketStatus::Cancelled),
                tickets::cancelled_at.eq(dsl::now),
                tickets::updated_at.eq(dsl::now),
            ))
            .get_result(conn)
            .to_db_error(ErrorCode::UpdateError, "Could not cancel ticket")
            .optional()?;

            let cancelled = match cancelled {
                Some(ticket) => ticket,
                None => {
                    let current = Ticket::find(self.id, conn)?;
                    return match current.status {
                        TicketStatus::Used => {
                            DatabaseError::already_used("Cannot cancel a ticket that has already been used")
                        }
                        _ => DatabaseError::ticket_cancelled("Ticket is no longer valid"),
                    };
                }
            };

            Event::release_ticket(self.event_id, conn)?;
            Ok(cancelled)
        })
    }

    fn transition(&self, from: TicketStatus, to: TicketStatus, conn: &PgConnection) -> Result<usize, DatabaseError> {
        diesel::update(
            tickets::table
                .filter(tickets::id.eq(self.id))
                .filter(tickets::status.eq(from)),
        )
        .set((tickets::status.eq(to), tickets::updated_at.eq(dsl::now)))
        .execute(conn)
        .to_db_error(ErrorCode::UpdateError, "Could not update ticket status")
    }

    pub fn event(&self, conn: &PgConnection) -> Result<Event, DatabaseError> {
        Event::find(self.event_id, conn)
    }

    pub fn client(&self, conn: &PgConnection) -> Result<User, DatabaseError> {
        User::find(self.client_id, conn)
    }

    /// Display status, deriving Expired on the fly for stale Valid tickets
    /// without persisting the transition.
    pub fn display_status(&self, event: &Event) -> TicketStatus {
        if self.status == TicketStatus::Valid
            && event.event_date + Duration::hours(ENTRY_GRACE_PERIOD_HOURS) < Utc::now().naive_utc()
        {
            TicketStatus::Expired
        } else {
            self.status
        }
    }
}
