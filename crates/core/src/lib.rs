// Money grid core
// Settings in, classified cells out. No I/O in this crate.

pub mod board;
pub mod cell;
pub mod classify;
pub mod form;
pub mod settings;

pub use board::Board;
pub use cell::{Cell, CellCounts, Grid};
pub use classify::classify;
pub use form::{FieldError, FormErrors, SettingsForm};
pub use settings::{
    build_settings, Settings, SettingsField, ValidationError, ValidationReason,
    MAX_COLUMNS_COUNT, MAX_ROWS_COUNT,
};
