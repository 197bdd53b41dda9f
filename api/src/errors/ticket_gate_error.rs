use crate::errors::ApplicationError;
use diesel::result::Error as DieselError;
use serde_json::Error as SerdeError;
use std::error::Error;
use std::fmt;
use ticketgate_db::utils::errors::{DatabaseError, EnumParseError};

/// Aggregates every error source in the service layer behind one type so
/// orchestration code can use `?` throughout.
#[derive(Debug)]
pub struct TicketGateError(Box<dyn Error + Send + Sync>);

macro_rules! error_conversion {
    ($e: ty) => {
        impl From<$e> for TicketGateError {
            fn from(e: $e) -> Self {
                TicketGateError(Box::new(e))
            }
        }
    };
}

error_conversion!(ApplicationError);
error_conversion!(DatabaseError);
error_conversion!(DieselError);
error_conversion!(EnumParseError);
error_conversion!(SerdeError);
error_conversion!(image::ImageError);
error_conversion!(qrcode::types::QrError);
error_conversion!(reqwest::Error);
error_conversion!(std::io::Error);
error_conversion!(uuid::Error);

impl fmt::Display for TicketGateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0.to_string())
    }
}

impl Error for TicketGateError {}

impl TicketGateError {
    pub fn new(inner: Box<dyn Error + Send + Sync>) -> TicketGateError {
        TicketGateError(inner)
    }

    pub fn into_inner(&self) -> &(dyn Error + Send + Sync) {
        self.0.as_ref()
    }

    /// The wrapped DatabaseError, when the source was the domain layer.
    pub fn database_error(&self) -> Option<&DatabaseError> {
        self.0.downcast_ref::<DatabaseError>()
    }
}
