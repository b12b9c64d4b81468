// Settings storage backends
// A store holds one string: the JSON-encoded settings.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Key-value slot for the persisted settings text.
pub trait SettingsStore {
    /// Stored text, or `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<String>, ConfigError>;

    fn save(&mut self, contents: &str) -> Result<(), ConfigError>;
}

/// Settings kept in a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location, see [`FileStore::default_path`].
    pub fn open_default() -> Self {
        Self::new(Self::default_path())
    }

    /// `<config dir>/moneygrid/settings.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("moneygrid")
            .join("settings.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ConfigError {
        ConfigError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SettingsStore for FileStore {
    fn load(&self) -> Result<Option<String>, ConfigError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&mut self, contents: &str) -> Result<(), ConfigError> {
        // Ensure directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, contents).map_err(|e| self.io_error(e))
    }
}

/// In-process store, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, ConfigError> {
        Ok(self.contents.clone())
    }

    fn save(&mut self, contents: &str) -> Result<(), ConfigError> {
        self.contents = Some(contents.to_string());
        Ok(())
    }
}
