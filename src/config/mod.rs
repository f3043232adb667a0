use thiserror::Error;

mod provider;

pub use provider::Provider;

#[derive(Debug, Error)]
#[error("Failed to load provider configuration")]
pub struct ParseError;
