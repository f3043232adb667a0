use error_stack::{Report, Result};
use sensitive::Sensitive;
use serde::Deserialize;

use super::ParseError;

/// Provider bootstrap settings.
///
/// Loaded once at startup, validated, and handed to whichever
/// [`AuthProvider`](crate::auth::AuthProvider) gets built from them.
/// Nothing in this crate reads ambient globals for provider setup.
#[derive(Debug, Clone, Deserialize)]
pub struct Provider {
    pub project_id: String,
    pub api_key: Sensitive<String>,
    /// Token to adopt on startup instead of starting anonymously.
    #[serde(default)]
    pub initial_token: Option<Sensitive<String>>,
}

impl Provider {
    pub fn load() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();

        let config = Self::figment()
            .extract::<Self>()
            .map_err(|e| attach_figment_error(Report::new(ParseError), e))?;

        config.validate()?;
        Ok(config)
    }
}

impl Provider {
    const DEFAULT_CONFIG_FILE: &str = "anteroom.toml";

    const API_KEY_MIN: usize = 8;
    const API_KEY_MAX: usize = 128;

    /// Default [`figment::Figment`] used to load provider
    /// configuration. Split out so tests can extract inside a
    /// [`figment::Jail`].
    pub(crate) fn figment() -> figment::Figment {
        use figment::{
            providers::{Env, Format, Toml},
            Figment,
        };

        Figment::new()
            .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
            .merge(Env::prefixed("ANTEROOM_"))
            // Environment variable aliases
            .merge(Env::raw().map(|v| match v.as_str() {
                "AUTH_API_KEY" => "api_key".into(),
                "AUTH_TOKEN" => "initial_token".into(),
                _ => v.into(),
            }))
    }

    fn validate(&self) -> Result<(), ParseError> {
        let mut messages = Vec::new();
        if self.project_id.trim().is_empty() {
            messages.push("project_id: must not be empty");
        }

        let api_key_len = self.api_key.as_str().len();
        if !(Self::API_KEY_MIN..=Self::API_KEY_MAX).contains(&api_key_len) {
            messages.push("api_key: must be within 8 up to 128 characters");
        }

        if messages.is_empty() {
            return Ok(());
        }

        let mut report = Report::new(ParseError);
        for message in messages {
            report = report.attach_printable(message);
        }
        Err(report)
    }
}

// Dissect figment's error so the report names the key and the source
// that failed to parse.
fn attach_figment_error(report: Report<ParseError>, e: figment::Error) -> Report<ParseError> {
    let mut this = report.attach_printable(format!("{}", e.kind));

    if let (Some(profile), Some(md)) = (&e.profile, &e.metadata) {
        if !e.path.is_empty() {
            let key = md.interpolate(profile, &e.path);
            this = this.attach_printable(format!("for key {key:?}"));
        }
    }

    if let Some(md) = &e.metadata {
        if let Some(source) = &md.source {
            this = this.attach_printable(format!("in {source} {}", md.name));
        } else {
            this = this.attach_printable(format!("in {}", md.name));
        }
    }

    this
}
