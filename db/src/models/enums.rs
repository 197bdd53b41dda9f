use crate::utils::errors::EnumParseError;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

macro_rules! string_enum {
    ($name:ident [$($value:ident),+]) => {
        #[derive(AsExpression, FromSqlRow, Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
        #[sql_type = "Text"]
        pub enum $name {
            $(
                $value,
            )*
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
                let s = match self {
                    $(
                        $name::$value => stringify!($value),
                    )*
                };
                write!(f, "{}", s)
            }
        }

        impl FromStr for $name {
            type Err = EnumParseError;

            fn from_str(s: &str) -> Result<$name, Self::Err> {
                match s {
                    $(
                        stringify!($value) => Ok($name::$value),
                    )*
                    _ => Err(EnumParseError {
                        message: "Could not parse value".to_string(),
                        enum_type: stringify!($name).to_string(),
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl ToSql<Text, Pg> for $name {
            fn to_sql<W: Write>(&self, out: &mut Output<W, Pg>) -> serialize::Result {
                <String as ToSql<Text, Pg>>::to_sql(&self.to_string(), out)
            }
        }

        impl FromSql<Text, Pg> for $name {
            fn from_sql(bytes: Option<&[u8]>) -> deserialize::Result<Self> {
                let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
                Ok(s.parse::<$name>()?)
            }
        }
    }
}

string_enum! { EventStatus [Active, Cancelled, Completed] }
string_enum! { PreferredContactMethod [Email, Whatsapp, Phone] }
string_enum! { Roles [Organizer, Client] }
string_enum! { TicketRequestStatus [Pending, Approved, Rejected, Cancelled] }
string_enum! { TicketStatus [Valid, Used, Cancelled, Expired] }
