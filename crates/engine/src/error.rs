//! The module contains the errors the engine can produce and the classifier
//! that attributes each of them to exactly one kind.
//!
//! The kinds are:
//!
//! - [`FieldValidation`] detected before any mutation, returned as data.
//! - [`Persistence`] detected after a mutation attempt, flattened to a message.
//! - [`Authentication`] raised by the sign-in collaborator only, see
//!   [`SignInError::kind`](crate::SignInError::kind).
//! - [`Unclassified`] anything else; always propagated.
//!
//!  [`FieldValidation`]: ErrorKind::FieldValidation
//!  [`Persistence`]: ErrorKind::Persistence
//!  [`Authentication`]: ErrorKind::Authentication
//!  [`Unclassified`]: ErrorKind::Unclassified
use sea_orm::DbErr;
use thiserror::Error;

use crate::schema::FieldErrors;

/// Failures raised by an [`InvoiceStore`](crate::InvoiceStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid fields: {0}")]
    Validation(FieldErrors),
    #[error(transparent)]
    Persistence(#[from] StoreError),
    #[error("engine is missing its {0}")]
    MissingCollaborator(&'static str),
}

impl From<DbErr> for EngineError {
    fn from(value: DbErr) -> Self {
        Self::Persistence(StoreError::Database(value))
    }
}

impl From<FieldErrors> for EngineError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

/// The four disjoint error kinds of the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    FieldValidation,
    Persistence,
    Authentication,
    Unclassified,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::FieldValidation,
            Self::Persistence(_) => ErrorKind::Persistence,
            Self::MissingCollaborator(_) => ErrorKind::Unclassified,
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Persistence(a), Self::Persistence(b)) => a.to_string() == b.to_string(),
            (Self::MissingCollaborator(a), Self::MissingCollaborator(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;

    #[test]
    fn every_variant_has_exactly_one_kind() {
        let mut errors = FieldErrors::default();
        errors.push(Field::Amount, "enter an amount greater than $0.");

        assert_eq!(
            EngineError::Validation(errors).kind(),
            ErrorKind::FieldValidation
        );
        assert_eq!(
            EngineError::from(StoreError::Backend("down".to_string())).kind(),
            ErrorKind::Persistence
        );
        assert_eq!(
            EngineError::from(DbErr::Custom("boom".to_string())).kind(),
            ErrorKind::Persistence
        );
        assert_eq!(
            EngineError::MissingCollaborator("store").kind(),
            ErrorKind::Unclassified
        );
    }

    #[test]
    fn database_errors_stay_persistence_errors() {
        let err: EngineError = DbErr::RecordNotUpdated.into();
        assert!(matches!(
            err,
            EngineError::Persistence(StoreError::Database(DbErr::RecordNotUpdated))
        ));
    }
}
