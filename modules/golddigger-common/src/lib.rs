pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, ScoringVariant};
pub use error::{ConfigError, DigestError};
pub use types::*;
