use crate::db::connections::{Connectable, DatabaseConnection};
use crate::dev::builders::*;
use crate::models::DefaultTokenIssuer;
use diesel::{Connection, PgConnection};
use dotenv::dotenv;
use std::env;

pub struct TestProject {
    pub connection: DatabaseConnection,
}

#[allow(dead_code)]
impl TestProject {
    /// Opens a connection to TEST_DATABASE_URL inside a test transaction
    /// that is rolled back when the project is dropped.
    pub fn new() -> Self {
        let connection = TestProject::establish_connection();
        connection
            .get_connection()
            .begin_test_transaction()
            .expect("Could not start testing transaction");
        TestProject { connection }
    }

    /// Commits its writes. Needed by concurrency tests where several
    /// connections must observe the same rows; such tests clean up after
    /// themselves.
    pub fn new_without_rollback() -> Self {
        TestProject {
            connection: TestProject::establish_connection(),
        }
    }

    pub fn establish_connection() -> DatabaseConnection {
        dotenv().ok();
        let conn_str = env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be defined.");
        DatabaseConnection::new(&conn_str).expect("Could not get access to test database")
    }

    pub fn token_issuer(&self) -> DefaultTokenIssuer {
        DefaultTokenIssuer::new("test_secret".to_string(), "ticketgate-test".to_string())
    }

    pub fn create_event(&self) -> EventBuilder {
        EventBuilder::new(self.get_connection())
    }

    pub fn create_ticket(&self) -> TicketBuilder {
        TicketBuilder::new(self.get_connection())
    }

    pub fn create_ticket_request(&self) -> TicketRequestBuilder {
        TicketRequestBuilder::new(self.get_connection())
    }

    pub fn create_user(&self) -> UserBuilder {
        UserBuilder::new(self.get_connection())
    }

    pub fn get_connection(&self) -> &PgConnection {
        self.connection.get_connection()
    }
}
