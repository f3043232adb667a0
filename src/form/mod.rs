use sensitive::Sensitive;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

use crate::auth::{AuthError, AuthProvider, Session};
use crate::strength::{self, StrengthLevel};

mod credentials;

pub use credentials::{Credentials, CredentialsError};

/// Which face of the form is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    #[default]
    SignIn,
    SignUp,
}

impl FormMode {
    #[must_use]
    pub const fn is_sign_up(self) -> bool {
        matches!(self, Self::SignUp)
    }
}

/// Owns the sign-in/sign-up form state and drives submissions through
/// the injected provider.
///
/// The provider arrives at construction time; the form never reaches
/// into ambient configuration to find one. At most one submission is
/// in flight at a time, and [`AuthForm::submit`] calls made while one
/// is pending are rejected without touching the form.
pub struct AuthForm {
    provider: Arc<dyn AuthProvider>,
    mode: FormMode,
    loading: bool,
    error: Option<String>,
    email: String,
    username: String,
    password: String,
    show_password: bool,
}

impl Debug for AuthForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthForm")
            .field("mode", &self.mode)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl AuthForm {
    #[must_use]
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self {
            provider,
            mode: FormMode::SignIn,
            loading: false,
            error: None,
            email: String::new(),
            username: String::new(),
            password: String::new(),
            show_password: false,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: FormMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message currently shown on the error banner, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn password_visible(&self) -> bool {
        self.show_password
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
    }

    pub fn set_username(&mut self, value: impl Into<String>) {
        self.username = value.into();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
    }

    /// Strength of the password as currently typed.
    ///
    /// Recomputed from the live value on every call; the form never
    /// stores a level that could go stale.
    #[must_use]
    pub fn strength(&self) -> StrengthLevel {
        strength::classify(&self.password)
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Flips to the given face. Whatever error the previous face was
    /// showing no longer applies, so the banner is cleared.
    pub fn set_mode(&mut self, mode: FormMode) {
        self.mode = mode;
        self.error = None;
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(match self.mode {
            FormMode::SignIn => FormMode::SignUp,
            FormMode::SignUp => FormMode::SignIn,
        });
    }

    /// Credentials as they would be submitted right now. The username
    /// only rides along while registering.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: Sensitive::new(self.email.clone()),
            password: Sensitive::new(self.password.clone()),
            username: self
                .mode
                .is_sign_up()
                .then(|| Sensitive::new(self.username.clone())),
        }
    }

    /// Submits the form to the provider.
    ///
    /// Clears the banner, validates, dispatches to the provider for
    /// the current mode, and settles back to idle either way. A failed
    /// attempt leaves its message on the banner until the next
    /// submission or mode switch replaces it.
    #[tracing::instrument(skip(self), name = "form.submit", fields(mode = ?self.mode))]
    pub async fn submit(&mut self) -> Result<Session, AuthError> {
        if self.loading {
            // The submit control is disabled while a request is in
            // flight; a second call must leave the form untouched.
            return Err(AuthError::in_flight());
        }

        self.error = None;

        let credentials = self.credentials();
        if let Err(source) = credentials.validate(self.mode) {
            let error = AuthError::from(source);
            self.error = Some(error.message().to_owned());
            return Err(error);
        }

        self.loading = true;
        let result = match self.mode {
            FormMode::SignIn => self.provider.sign_in(&credentials).await,
            FormMode::SignUp => self.provider.sign_up(&credentials).await,
        };
        self.loading = false;

        match result {
            Ok(session) => {
                tracing::debug!("authentication settled");
                Ok(session)
            }
            Err(error) => {
                tracing::warn!(%error, "authentication failed");
                self.error = Some(error.message().to_owned());
                Err(error)
            }
        }
    }
}
