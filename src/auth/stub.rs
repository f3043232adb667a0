use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{AuthError, AuthProvider, Session};
use crate::config;
use crate::form::Credentials;

/// Provider stand-in that settles after an artificial delay.
///
/// Useful while the real backend is not wired up yet: submissions are
/// answered by a timer behind the [`AuthProvider`] seam, with the
/// delay and the outcome injectable instead of hard-coded.
pub struct StubAuth {
    delay: Duration,
    outcome: Outcome,
    calls: AtomicUsize,
}

enum Outcome {
    Issue(String),
    Fail(String),
    Stall,
}

impl StubAuth {
    /// Delay applied when none is given. Long enough that a hosted
    /// form visibly passes through its submitting state.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

    /// Settles successfully with a session carrying `token`.
    #[must_use]
    pub fn issuing(token: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Issue(token.into()))
    }

    /// Settles with a provider error carrying `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Fail(message.into()))
    }

    /// Never settles. Useful to observe a form stuck in its
    /// submitting state.
    #[must_use]
    pub fn stalled() -> Self {
        Self::with_outcome(Outcome::Stall)
    }

    /// Wires a stub from the provider configuration: sessions carry
    /// the configured `initial_token`, or an anonymous token when
    /// none is set.
    #[must_use]
    pub fn from_config(config: &config::Provider) -> Self {
        let token = config
            .initial_token
            .as_ref()
            .map_or("anonymous", sensitive::Sensitive::as_str);
        Self::issuing(token)
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// How many submissions reached this provider.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self { delay: Self::DEFAULT_DELAY, outcome, calls: AtomicUsize::new(0) }
    }

    async fn settle(&self) -> Result<Session, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Outcome::Issue(token) => {
                tokio::time::sleep(self.delay).await;
                Ok(Session::new(token.clone()))
            }
            Outcome::Fail(message) => {
                tokio::time::sleep(self.delay).await;
                Err(AuthError::provider(message.clone()))
            }
            Outcome::Stall => futures::future::pending().await,
        }
    }
}

#[async_trait]
impl AuthProvider for StubAuth {
    async fn sign_in(&self, _credentials: &Credentials) -> Result<Session, AuthError> {
        self.settle().await
    }

    async fn sign_up(&self, _credentials: &Credentials) -> Result<Session, AuthError> {
        self.settle().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthErrorKind;
    use sensitive::Sensitive;

    fn credentials() -> Credentials {
        Credentials {
            email: Sensitive::new("alice@example.com".into()),
            password: Sensitive::new("Abcdefg1!".into()),
            username: None,
        }
    }

    #[tokio::test]
    async fn test_issues_configured_token() {
        let stub = StubAuth::issuing("stub-token").with_delay(Duration::ZERO);
        let session = stub.sign_in(&credentials()).await.unwrap();
        assert_eq!(session.token(), "stub-token");
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_fails_with_verbatim_message() {
        let stub = StubAuth::failing("No account for that e-mail.").with_delay(Duration::ZERO);
        let error = stub.sign_up(&credentials()).await.unwrap_err();
        assert_eq!(error.kind(), AuthErrorKind::Provider);
        assert_eq!(error.message(), "No account for that e-mail.");
    }

    #[tokio::test]
    async fn test_stalled_never_settles() {
        let stub = StubAuth::stalled();
        let creds = credentials();
        let pending = stub.sign_in(&creds);
        let result = tokio::time::timeout(Duration::from_millis(10), pending).await;
        assert!(result.is_err(), "expected the submission to stay pending");
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_from_config_prefers_initial_token() {
        let config = config::Provider {
            project_id: "anteroom-dev".into(),
            api_key: Sensitive::new("not-a-real-key".into()),
            initial_token: Some(Sensitive::new("bootstrap".into())),
        };
        let stub = StubAuth::from_config(&config).with_delay(Duration::ZERO);
        let session = stub.sign_in(&credentials()).await.unwrap();
        assert_eq!(session.token(), "bootstrap");

        let anonymous = config::Provider { initial_token: None, ..config };
        let stub = StubAuth::from_config(&anonymous).with_delay(Duration::ZERO);
        let session = stub.sign_in(&credentials()).await.unwrap();
        assert_eq!(session.token(), "anonymous");
    }
}
