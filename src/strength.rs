use serde::{Deserialize, Serialize};

/// Discrete password quality classification, shown next to the
/// password input while registering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

impl StrengthLevel {
    /// Label suitable for strength meters and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }
}

impl std::fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Scores a password from 0 to 4, one point per satisfied rule:
/// at least 8 characters, an ASCII uppercase letter, an ASCII digit,
/// and a character outside the ASCII alphanumerics.
#[must_use]
pub fn score(password: &str) -> u8 {
    let mut score = 0;
    if password.chars().count() >= 8 {
        score += 1;
    }
    if password.chars().any(|ch| ch.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|ch| ch.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|ch| !ch.is_ascii_alphanumeric()) {
        score += 1;
    }
    score
}

/// Maps a password to its [`StrengthLevel`].
///
/// Total over arbitrary input; call it again whenever the password
/// changes, there is nothing worth caching at O(len).
#[must_use]
pub fn classify(password: &str) -> StrengthLevel {
    match score(password) {
        0 | 1 => StrengthLevel::Weak,
        2 | 3 => StrengthLevel::Medium,
        _ => StrengthLevel::Strong,
    }
}
