use std::fmt;
use std::path::PathBuf;

use moneygrid_core::ValidationError;

#[derive(Debug)]
pub enum ConfigError {
    /// Reading or writing the backing file failed.
    Io { path: PathBuf, source: std::io::Error },
    /// Stored text is not JSON.
    Parse(serde_json::Error),
    /// Stored JSON is not a valid settings object.
    Invalid(ValidationError),
    /// Settings could not be encoded.
    Serialize(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Parse(e) => write!(f, "settings are not valid JSON: {e}"),
            Self::Invalid(e) => write!(f, "{e}"),
            Self::Serialize(e) => write!(f, "cannot encode settings: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) | Self::Serialize(e) => Some(e),
            Self::Invalid(e) => Some(e),
        }
    }
}

impl From<ValidationError> for ConfigError {
    fn from(e: ValidationError) -> Self {
        Self::Invalid(e)
    }
}
