use thiserror::Error;

use crate::model::api::FieldErrorDto;

/// One or more request fields failed validation.
///
/// Results in a 400 Bad Request with `error: "Validation failed"` and the
/// list of failing fields in `details`.
#[derive(Error, Debug, Default)]
#[error("Validation failed")]
pub struct ValidationError {
    pub details: Vec<FieldErrorDto>,
}

impl ValidationError {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::default();
        err.push(field, message);
        err
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.details.push(FieldErrorDto {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    /// Returns `Ok(())` when no rule failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}
