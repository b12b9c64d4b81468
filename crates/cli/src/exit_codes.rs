//! CLI Exit Code Registry
//!
//! Single source of truth for `mgrid` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | Success                                             |
//! | 1    | General error (terminal failure, unspecified)       |
//! | 2    | Usage error (bad arguments, wrong terminal)         |
//! | 3    | Settings rejected by the edit rules                 |
//! | 4    | Settings storage could not be read or written       |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use moneygrid_config::ConfigError;
use moneygrid_core::FormErrors;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, or an interactive command without a terminal.
pub const EXIT_USAGE: u8 = 2;

/// One or more fields failed the edit rules; nothing was saved.
pub const EXIT_SETTINGS_REJECTED: u8 = 3;

/// The settings store failed (I/O, encoding).
pub const EXIT_STORAGE: u8 = 4;

/// Error carried out of a command: what to print, and how to exit.
#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    /// Extra lines printed after the message (per-field errors).
    pub details: Vec<String>,
}

impl CliError {
    pub fn new(code: u8, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn print(&self) {
        eprintln!("error: {}", self.message);
        for line in &self.details {
            eprintln!("  {}", line);
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::new(EXIT_STORAGE, err.to_string())
    }
}

impl From<FormErrors> for CliError {
    fn from(errors: FormErrors) -> Self {
        Self {
            code: EXIT_SETTINGS_REJECTED,
            message: "settings rejected, nothing saved".to_string(),
            details: errors
                .iter()
                .map(|(field, err)| format!("{}: {}", field.label(), err))
                .collect(),
        }
    }
}
