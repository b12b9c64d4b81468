// Configuration loading

pub mod error;
pub mod settings;
pub mod store;

pub use error::ConfigError;
pub use settings::{load_settings, read_settings, save_settings};
pub use store::{FileStore, MemoryStore, SettingsStore};
