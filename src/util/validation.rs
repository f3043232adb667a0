use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$")
        .expect("compile email regex")
});

const USERNAME_MIN: usize = 2;
const USERNAME_MAX: usize = 30;
static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*[A-Za-z0-9]$").expect("compile username regex")
});

pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 128;

/// Validates email syntax the pragmatic way: one `@`, a dotted host
/// name, nothing exotic. Deliverability is for the provider to judge.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email) && email.len() <= 254
}

/// Usernames are 2 up to 30 characters of alphanumerics with `.`, `-`
/// and `_` allowed in the middle but not at either edge.
#[must_use]
pub fn is_valid_username(name: &str) -> bool {
    (USERNAME_MIN..=USERNAME_MAX).contains(&name.len()) && USERNAME_REGEX.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, is_valid_username};

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("gush@gmail.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));

        assert!(!is_valid_email("nada_neutho"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("gush@"));
    }

    #[test]
    fn test_is_valid_username() {
        assert!(is_valid_username("memothelemo"));
        assert!(is_valid_username("mark.robes"));
        assert!(is_valid_username("salmon-ella"));
        assert!(is_valid_username("crossword_puzzle"));
        assert!(is_valid_username("slime_lover.123"));
        assert!(is_valid_username("2pac"));

        assert!(!is_valid_username("x"));
        assert!(!is_valid_username("_apple"));
        assert!(!is_valid_username("overlover_underscore_"));
        assert!(!is_valid_username("pretty ugly"));
        assert!(!is_valid_username("left-pad-the-name-until-it-no-longer-fits"));
    }
}
