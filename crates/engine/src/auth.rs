//! Sign-in.
//!
//! [`authenticate`] wraps a [`SignIn`] collaborator and turns its typed
//! failures into the message the login form shows. Only authentication errors
//! are translated; anything else the collaborator raises is handed back
//! untouched for the caller to treat as fatal.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, QueryFilter, prelude::*};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{self, SaltString, rand_core::OsRng},
};
use thiserror::Error;

use crate::{ErrorKind, FormData, NavigationIntent, users};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Provider name the login form signs in with.
pub const CREDENTIALS_PROVIDER: &str = "credentials";

pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong.";

const MIN_PASSWORD_LEN: usize = 6;

/// Discriminator carried by an [`AuthError`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// The submitted credentials did not match a user.
    CredentialsSignin,
    /// Any other failure the provider classified as an authentication error.
    Other(String),
}

impl AuthErrorKind {
    pub fn from_type(value: &str) -> Self {
        match value {
            "CredentialsSignin" => Self::CredentialsSignin,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::CredentialsSignin => "CredentialsSignin",
            Self::Other(other) => other,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("authentication failed: {}", .kind.as_str())]
pub struct AuthError {
    kind: AuthErrorKind,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> &AuthErrorKind {
        &self.kind
    }
}

#[derive(Error, Debug)]
pub enum SignInError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{0}")]
    Unclassified(BoxError),
}

impl SignInError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Auth(_) => ErrorKind::Authentication,
            Self::Unclassified(_) => ErrorKind::Unclassified,
        }
    }
}

/// The credential-verification collaborator.
#[async_trait]
pub trait SignIn: Send + Sync {
    /// Verify `form` with `provider`. On success the collaborator may ask the
    /// caller to navigate somewhere.
    async fn sign_in(
        &self,
        provider: &str,
        form: &FormData,
    ) -> Result<Option<NavigationIntent>, SignInError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    SignedIn(Option<NavigationIntent>),
    Rejected(&'static str),
}

/// Sign in with the credentials provider.
///
/// Returns [`AuthOutcome::Rejected`] with [`INVALID_CREDENTIALS`] for a
/// `CredentialsSignin` failure and [`SOMETHING_WENT_WRONG`] for any other
/// authentication error. Unclassified errors come back as `Err` unchanged.
pub async fn authenticate(signer: &dyn SignIn, form: &FormData) -> Result<AuthOutcome, BoxError> {
    let err = match signer.sign_in(CREDENTIALS_PROVIDER, form).await {
        Ok(next) => return Ok(AuthOutcome::SignedIn(next)),
        Err(err) => err,
    };
    tracing::info!(kind = ?err.kind(), "sign-in failed: {err}");

    match err {
        SignInError::Auth(err) => {
            let message = match err.kind() {
                AuthErrorKind::CredentialsSignin => INVALID_CREDENTIALS,
                AuthErrorKind::Other(_) => SOMETHING_WENT_WRONG,
            };
            Ok(AuthOutcome::Rejected(message))
        }
        SignInError::Unclassified(err) => Err(err),
    }
}

/// Argon2id PHC string stored in `users.password`, with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check `password` against a PHC string produced by [`hash_password`].
///
/// A stored value that is not a PHC string never verifies.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            tracing::warn!("unreadable password hash in users table: {err}");
            false
        }
    }
}

/// The `"credentials"` provider: email + password checked against `users`.
#[derive(Clone, Debug)]
pub struct CredentialsProvider {
    database: DatabaseConnection,
    redirect_to: String,
}

impl CredentialsProvider {
    pub fn new(database: DatabaseConnection) -> Self {
        Self {
            database,
            redirect_to: "/dashboard".to_string(),
        }
    }

    /// Where a successful sign-in sends the user.
    #[must_use]
    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = path.into();
        self
    }
}

#[async_trait]
impl SignIn for CredentialsProvider {
    async fn sign_in(
        &self,
        provider: &str,
        form: &FormData,
    ) -> Result<Option<NavigationIntent>, SignInError> {
        if provider != CREDENTIALS_PROVIDER {
            return Err(SignInError::Unclassified(
                format!("unknown sign-in provider {provider:?}").into(),
            ));
        }

        let rejected = || AuthError::new(AuthErrorKind::CredentialsSignin);

        let email = form
            .get("email")
            .map(str::trim)
            .filter(|email| email.contains('@'));
        let password = form
            .get("password")
            .filter(|password| password.chars().count() >= MIN_PASSWORD_LEN);
        let (Some(email), Some(password)) = (email, password) else {
            return Err(rejected().into());
        };

        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await
            .map_err(|err| {
                tracing::error!("failed to look up user: {err}");
                AuthError::new(AuthErrorKind::Other("CallbackRouteError".to_string()))
            })?;

        match user {
            Some(user) if verify_password(password, &user.password) => {
                tracing::debug!("user {} signed in", user.id);
                Ok(Some(NavigationIntent::to(self.redirect_to.as_str())))
            }
            _ => Err(rejected().into()),
        }
    }
}
