//! Invoice mutation engine.
//!
//! Untrusted form input goes through [`validate_invoice_form`], the
//! [`Engine`] persists it through an [`InvoiceStore`], classifies whatever went
//! wrong, and on success invalidates the listing view and returns a
//! [`NavigationIntent`]. Sign-in is a separate flow, see [`authenticate`].

pub use auth::{
    AuthError, AuthErrorKind, AuthOutcome, BoxError, CREDENTIALS_PROVIDER, CredentialsProvider,
    INVALID_CREDENTIALS, SOMETHING_WENT_WRONG, SignIn, SignInError, authenticate, hash_password,
    verify_password,
};
pub use cache::{NavigationIntent, ViewCache};
pub use clock::{Clock, ZonedClock};
pub use error::{EngineError, ErrorKind, StoreError};
pub use form::FormData;
pub use invoices::{Invoice, InvoiceChanges, InvoiceStatus, NewInvoice};
pub use money::{MoneyCents, ParseMoneyError};
pub use ops::{Engine, EngineBuilder, INVOICES_VIEW};
pub use outcome::{ActionOutcome, ActionState, Mutation};
pub use schema::{Field, FieldErrors, InvoiceInput, validate_invoice_form};
pub use store::{InvoiceStore, ResultStore, SeaOrmInvoiceStore};

mod auth;
mod cache;
mod clock;
mod error;
mod form;
pub mod invoices;
mod money;
mod ops;
mod outcome;
mod schema;
mod store;
pub mod users;

pub type ResultEngine<T> = Result<T, EngineError>;
