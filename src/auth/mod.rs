use async_trait::async_trait;
use sensitive::Sensitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::{Credentials, CredentialsError};

mod stub;

pub use stub::StubAuth;

/// Capability interface to the external system that verifies
/// credentials and issues sessions.
///
/// The crate makes no further assumptions about the backend: no
/// retries, no timeouts, no cancellation. One call, one settlement.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;
    async fn sign_up(&self, credentials: &Credentials) -> Result<Session, AuthError>;
}

/// Proof of a completed authentication, as issued by the provider.
///
/// The token is opaque to this crate; what it unlocks is between the
/// hosting application and its backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Session {
    token: Sensitive<String>,
}

impl Session {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: Sensitive::new(token.into()) }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        self.token.as_str()
    }
}

/// What produced an [`AuthError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// The provider rejected or failed the request.
    Provider,
    /// The submission never left the form.
    InvalidForm,
    /// A submission was attempted while another one was in flight.
    InFlight,
}

/// The one error surfaced on the form's banner.
///
/// Providers are trusted to phrase messages so they can be shown to
/// the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthError {
    kind: AuthErrorKind,
    message: String,
}

impl AuthError {
    #[must_use]
    pub fn provider(message: impl Into<String>) -> Self {
        Self { kind: AuthErrorKind::Provider, message: message.into() }
    }

    pub(crate) fn in_flight() -> Self {
        Self {
            kind: AuthErrorKind::InFlight,
            message: "Another submission is already in flight".into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> AuthErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<CredentialsError> for AuthError {
    fn from(source: CredentialsError) -> Self {
        Self { kind: AuthErrorKind::InvalidForm, message: source.to_string() }
    }
}
