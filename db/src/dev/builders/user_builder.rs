use crate::models::*;
use diesel::prelude::*;
use rand::prelude::*;

pub struct UserBuilder<'a> {
    full_name: String,
    email: String,
    phone: Option<String>,
    role: Roles,
    connection: &'a PgConnection,
}

impl<'a> UserBuilder<'a> {
    pub fn new(connection: &PgConnection) -> UserBuilder {
        let x: u32 = random();
        UserBuilder {
            full_name: format!("Test User {}", x),
            email: format!("test-{}@ticketgate.test", x),
            phone: Some("+1111111111".to_string()),
            role: Roles::Client,
            connection,
        }
    }

    pub fn with_full_name(mut self, full_name: &str) -> Self {
        self.full_name = full_name.to_string();
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn with_role(mut self, role: Roles) -> Self {
        self.role = role;
        self
    }

    pub fn finish(&self) -> User {
        User::create(&self.full_name, &self.email, self.phone.clone(), self.role)
            .commit(self.connection)
            .unwrap()
    }
}
