use sensitive::Sensitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::FormMode;
use crate::util::validation::{self, is_valid_email, is_valid_username};

/// Input gathered from the form, ready to hand to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Credentials {
    pub email: Sensitive<String>,
    pub password: Sensitive<String>,
    /// Only carried while registering; sign-in submissions leave it
    /// out entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<Sensitive<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    #[error("An e-mail address and a password are required")]
    MissingFields,
    #[error("Invalid e-mail address")]
    InvalidEmail,
    #[error("Invalid username")]
    InvalidUsername,
    #[error("A username is required to create an account")]
    MissingUsername,
    #[error("Usernames are only accepted when creating an account")]
    UnexpectedUsername,
    #[error("Passwords must not start or end with spaces")]
    PasswordEdgeWhitespace,
    #[error("Passwords must be at least {} characters", validation::PASSWORD_MIN)]
    PasswordTooShort,
    #[error("Passwords must not be too big")]
    PasswordTooLong,
}

impl Credentials {
    /// Checks the credentials against the rules of the given mode.
    ///
    /// Registration gets the full treatment. Sign-in only requires the
    /// fields to be present: the account may predate today's password
    /// rules, and rejecting it locally would lock its owner out.
    pub fn validate(&self, mode: FormMode) -> Result<(), CredentialsError> {
        if self.email.as_str().is_empty() || self.password.as_str().is_empty() {
            return Err(CredentialsError::MissingFields);
        }

        match (mode, self.username.as_ref()) {
            (FormMode::SignUp, None) => return Err(CredentialsError::MissingUsername),
            (FormMode::SignIn, Some(..)) => return Err(CredentialsError::UnexpectedUsername),
            (FormMode::SignUp, Some(username)) if !is_valid_username(username.as_str()) => {
                return Err(CredentialsError::InvalidUsername);
            }
            _ => {}
        }

        if matches!(mode, FormMode::SignIn) {
            return Ok(());
        }

        if !is_valid_email(self.email.as_str()) {
            return Err(CredentialsError::InvalidEmail);
        }

        let password = self.password.as_str();
        if password.trim().len() != password.len() {
            Err(CredentialsError::PasswordEdgeWhitespace)
        } else if password.len() < validation::PASSWORD_MIN {
            Err(CredentialsError::PasswordTooShort)
        } else if password.len() > validation::PASSWORD_MAX {
            Err(CredentialsError::PasswordTooLong)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: &str, username: Option<&str>, password: &str) -> Credentials {
        Credentials {
            email: Sensitive::new(email.to_string()),
            password: Sensitive::new(password.to_string()),
            username: username.map(|name| Sensitive::new(name.to_string())),
        }
    }

    #[track_caller]
    fn must_fail(credentials: &Credentials, mode: FormMode, expected: &CredentialsError) {
        assert_eq!(credentials.validate(mode).as_ref(), Err(expected));
    }

    #[test]
    fn test_password_rules_on_signup() {
        static INVALID_PASSWORDS: &[&str] = &[
            "\thelloworld",
            "    hello",
            "world    ",
            "2short",
            concat!(
                "thisistoolongpleasedontactuallydothisathomeotherwiseyoulldiefromtypingtoomuch",
                "imeanitdoyouknowaboutrsi?nope,ok.12345678901234567890"
            ),
        ];

        for password in INVALID_PASSWORDS {
            let form = signup("alice@example.com", Some("alice"), password);
            assert!(
                form.validate(FormMode::SignUp).is_err(),
                "expected to fail but passed (password = {password:?})"
            );
        }

        let form = signup("alice@example.com", Some("alice"), "long enough already");
        assert!(form.validate(FormMode::SignUp).is_ok());
    }

    #[test]
    fn test_username_presence_follows_mode() {
        let without = signup("alice@example.com", None, "long enough already");
        must_fail(&without, FormMode::SignUp, &CredentialsError::MissingUsername);

        let with = signup("alice@example.com", Some("alice"), "long enough already");
        must_fail(&with, FormMode::SignIn, &CredentialsError::UnexpectedUsername);

        let form = signup("alice@example.com", Some("not a name"), "long enough already");
        must_fail(&form, FormMode::SignUp, &CredentialsError::InvalidUsername);
    }

    #[test]
    fn test_signin_stays_lax() {
        // Presence is all a sign-in can honestly check.
        let form = signup("whoever", None, "abc");
        assert!(form.validate(FormMode::SignIn).is_ok());

        let form = signup("", None, "abc");
        must_fail(&form, FormMode::SignIn, &CredentialsError::MissingFields);

        let form = signup("whoever", None, "");
        must_fail(&form, FormMode::SignIn, &CredentialsError::MissingFields);
    }

    #[test]
    fn test_email_syntax_on_signup() {
        let form = signup("not-an-address", Some("alice"), "long enough already");
        must_fail(&form, FormMode::SignUp, &CredentialsError::InvalidEmail);
    }

    #[test]
    fn test_username_never_serialized_when_absent() {
        let form = signup("alice@example.com", None, "long enough already");
        let json = serde_json::to_value(&form).unwrap();
        assert!(json.get("username").is_none());
    }
}
