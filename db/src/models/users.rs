use crate::models::*;
use crate::schema::users;
use crate::utils::errors::{ConvertToDatabaseError, DatabaseError, ErrorCode, Optional};
use chrono::NaiveDateTime;
use diesel;
use diesel::prelude::*;
use uuid::Uuid;
use validator::Validate;

#[derive(Insertable, Clone, Debug, PartialEq, Validate)]
#[table_name = "users"]
pub struct NewUser {
    pub full_name: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    pub phone: Option<String>,
    pub role: Roles,
}

#[derive(Clone, Debug, Deserialize, Identifiable, PartialEq, Queryable, Serialize)]
#[table_name = "users"]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Roles,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewUser {
    pub fn commit(&self, conn: &PgConnection) -> Result<User, DatabaseError> {
        self.validate()?;
        diesel::insert_into(users::table)
            .values(self)
            .get_result(conn)
            .to_db_error(ErrorCode::InsertError, "Could not create new user")
    }
}

impl User {
    pub fn create(full_name: &str, email: &str, phone: Option<String>, role: Roles) -> NewUser {
        NewUser {
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone,
            role,
        }
    }

    pub fn find(id: Uuid, conn: &PgConnection) -> Result<User, DatabaseError> {
        users::table
            .find(id)
            .first::<User>(conn)
            .to_db_error(ErrorCode::QueryError, "Error loading user")
    }

    pub fn find_by_email(email: &str, conn: &PgConnection) -> Result<Option<User>, DatabaseError> {
        users::table
            .filter(users::email.eq(email))
            .first::<User>(conn)
            .to_db_error(ErrorCode::QueryError, "Error loading user by email")
            .optional()
    }

    /// Resolves a requester email to a client identity, creating one when it
    /// does not exist yet. A concurrent insert of the same email loses the
    /// unique index race and falls back to the existing row, so repeated
    /// calls always resolve to the same user id.
    pub fn find_or_create_guest(
        full_name: &str,
        email: &str,
        phone: Option<String>,
        conn: &PgConnection,
    ) -> Result<User, DatabaseError> {
        if let Some(user) = User::find_by_email(email, conn)? {
            return Ok(user);
        }

        match User::create(full_name, email, phone, Roles::Client).commit(conn) {
            Ok(user) => Ok(user),
            Err(ref e) if e.error_code == ErrorCode::DuplicateKeyError => {
                User::find_by_email(email, conn)?
                    .map(Ok)
                    .unwrap_or_else(|| DatabaseError::no_results("Could not resolve client for email"))
            }
            Err(e) => Err(e),
        }
    }

    pub fn is_organizer(&self) -> bool {
        self.role == Roles::Organizer
    }
}
