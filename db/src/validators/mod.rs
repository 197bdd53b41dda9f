mod number_validators;

pub use self::number_validators::*;

use chrono::NaiveDateTime;
use chrono::Utc;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

pub fn create_validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut validation_error = ValidationError::new(code);
    validation_error.message = Some(Cow::from(message));
    validation_error
}

pub fn append_validation_error(
    validation_errors: Result<(), ValidationErrors>,
    field: &'static str,
    validation_error: Result<(), ValidationError>,
) -> Result<(), ValidationErrors> {
    if let Err(validation_error) = validation_error {
        let mut validation_errors = match validation_errors {
            Ok(_) => ValidationErrors::new(),
            Err(validation_errors) => validation_errors,
        };
        validation_errors.add(field, validation_error);
        Err(validation_errors)
    } else {
        validation_errors
    }
}

pub fn date_in_future(
    date: NaiveDateTime,
    code: &'static str,
    message: &'static str,
) -> Result<(), ValidationError> {
    if date <= Utc::now().naive_utc() {
        let mut validation_error = create_validation_error(code, message);
        validation_error.add_param(Cow::from("date"), &date.to_string());
        return Err(validation_error);
    }
    Ok(())
}
