// Grid settings
// Persisted as a JSON object with five camelCase fields.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upper bound for `rowsCount`.
pub const MAX_ROWS_COUNT: u64 = 50;

/// Upper bound for `columnsCount`.
pub const MAX_COLUMNS_COUNT: u64 = 50;

/// One of the five persisted settings fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingsField {
    CellWeight,
    RowsCount,
    ColumnsCount,
    Has,
    ToSpend,
}

impl SettingsField {
    /// All fields, in validation order.
    pub const ALL: [SettingsField; 5] = [
        SettingsField::CellWeight,
        SettingsField::RowsCount,
        SettingsField::ColumnsCount,
        SettingsField::Has,
        SettingsField::ToSpend,
    ];

    /// Key used in the persisted JSON object
    pub fn key(&self) -> &'static str {
        match self {
            Self::CellWeight => "cellWeight",
            Self::RowsCount => "rowsCount",
            Self::ColumnsCount => "columnsCount",
            Self::Has => "has",
            Self::ToSpend => "toSpend",
        }
    }

    /// Human-facing label for editing surfaces
    pub fn label(&self) -> &'static str {
        match self {
            Self::CellWeight => "Cell Weight",
            Self::RowsCount => "Rows Count",
            Self::ColumnsCount => "Columns Count",
            Self::Has => "Has",
            Self::ToSpend => "To Spend",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::CellWeight => 0,
            Self::RowsCount => 1,
            Self::ColumnsCount => 2,
            Self::Has => 3,
            Self::ToSpend => 4,
        }
    }
}

impl fmt::Display for SettingsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Why a settings value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    /// The input was not a JSON object.
    NotAnObject,
    /// The field was absent.
    Missing,
    /// The field was present but not a JSON number.
    NotANumber,
    /// The number had a fractional part.
    NotAnInteger,
    /// The number was below zero.
    Negative,
    /// A grid dimension exceeded its configured maximum.
    AboveMaximum { max: u64 },
    /// An amount exceeded `cellWeight * rowsCount * columnsCount`.
    ExceedsCapacity { capacity: u64 },
}

/// Rejection of an untrusted settings value.
///
/// `received` is the offending value rendered as text; `undefined` when the
/// field was missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    field: Option<SettingsField>,
    received: String,
    reason: ValidationReason,
}

impl ValidationError {
    fn new(field: SettingsField, received: impl Into<String>, reason: ValidationReason) -> Self {
        Self {
            field: Some(field),
            received: received.into(),
            reason,
        }
    }

    /// The offending field, `None` when the whole value was not an object.
    pub fn field(&self) -> Option<SettingsField> {
        self.field
    }

    pub fn received(&self) -> &str {
        &self.received
    }

    pub fn reason(&self) -> ValidationReason {
        self.reason
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(field) = self.field else {
            return write!(f, "Invalid Settings value");
        };
        write!(f, "Invalid value of Settings.{}: '{}'", field, self.received)?;
        if let ValidationReason::ExceedsCapacity { capacity } = self.reason {
            write!(f, ", it should be less than max value of '{}'", capacity)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Validated grid settings.
///
/// Every construction path enforces the same rules: counts within their
/// maxima, `has` and `to_spend` within the grid capacity. There are no
/// setters; build a new value instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct Settings {
    cell_weight: u64,
    rows_count: u64,
    columns_count: u64,
    has: u64,
    to_spend: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_weight: 50,
            rows_count: 10,
            columns_count: 20,
            has: 0,
            to_spend: 0,
        }
    }
}

impl Settings {
    pub fn new(
        cell_weight: u64,
        rows_count: u64,
        columns_count: u64,
        has: u64,
        to_spend: u64,
    ) -> Result<Self, ValidationError> {
        check_count(SettingsField::RowsCount, rows_count, MAX_ROWS_COUNT)?;
        check_count(SettingsField::ColumnsCount, columns_count, MAX_COLUMNS_COUNT)?;
        let capacity = capacity_of(cell_weight, rows_count, columns_count);
        check_amount(SettingsField::Has, has, capacity)?;
        check_amount(SettingsField::ToSpend, to_spend, capacity)?;
        Ok(Self {
            cell_weight,
            rows_count,
            columns_count,
            has,
            to_spend,
        })
    }

    pub fn cell_weight(&self) -> u64 {
        self.cell_weight
    }

    pub fn rows_count(&self) -> u64 {
        self.rows_count
    }

    pub fn columns_count(&self) -> u64 {
        self.columns_count
    }

    pub fn has(&self) -> u64 {
        self.has
    }

    pub fn to_spend(&self) -> u64 {
        self.to_spend
    }

    /// Total money the grid can represent.
    pub fn capacity(&self) -> u64 {
        capacity_of(self.cell_weight, self.rows_count, self.columns_count)
    }

    /// Value of a field by name
    pub fn get(&self, field: SettingsField) -> u64 {
        match field {
            SettingsField::CellWeight => self.cell_weight,
            SettingsField::RowsCount => self.rows_count,
            SettingsField::ColumnsCount => self.columns_count,
            SettingsField::Has => self.has,
            SettingsField::ToSpend => self.to_spend,
        }
    }
}

impl TryFrom<Value> for Settings {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        build_settings(&value)
    }
}

/// Validate an untrusted value, typically parsed from storage.
///
/// Fields are checked in [`SettingsField::ALL`] order and the first failure
/// is reported. Nothing is clamped or coerced.
pub fn build_settings(data: &Value) -> Result<Settings, ValidationError> {
    let Value::Object(obj) = data else {
        return Err(ValidationError {
            field: None,
            received: render(data),
            reason: ValidationReason::NotAnObject,
        });
    };

    let cell_weight = read_integer(obj, SettingsField::CellWeight)?;
    let rows_count = read_integer(obj, SettingsField::RowsCount)?;
    check_count(SettingsField::RowsCount, rows_count, MAX_ROWS_COUNT)?;
    let columns_count = read_integer(obj, SettingsField::ColumnsCount)?;
    check_count(SettingsField::ColumnsCount, columns_count, MAX_COLUMNS_COUNT)?;

    let capacity = capacity_of(cell_weight, rows_count, columns_count);

    let has = read_integer(obj, SettingsField::Has)?;
    check_amount(SettingsField::Has, has, capacity)?;
    let to_spend = read_integer(obj, SettingsField::ToSpend)?;
    check_amount(SettingsField::ToSpend, to_spend, capacity)?;

    Ok(Settings {
        cell_weight,
        rows_count,
        columns_count,
        has,
        to_spend,
    })
}

// Saturates: a capacity past u64::MAX can't be exceeded by any u64 amount.
fn capacity_of(cell_weight: u64, rows_count: u64, columns_count: u64) -> u64 {
    cell_weight
        .saturating_mul(rows_count)
        .saturating_mul(columns_count)
}

fn check_count(field: SettingsField, value: u64, max: u64) -> Result<(), ValidationError> {
    if value > max {
        return Err(ValidationError::new(
            field,
            value.to_string(),
            ValidationReason::AboveMaximum { max },
        ));
    }
    Ok(())
}

fn check_amount(field: SettingsField, value: u64, capacity: u64) -> Result<(), ValidationError> {
    if value > capacity {
        return Err(ValidationError::new(
            field,
            value.to_string(),
            ValidationReason::ExceedsCapacity { capacity },
        ));
    }
    Ok(())
}

fn read_integer(obj: &Map<String, Value>, field: SettingsField) -> Result<u64, ValidationError> {
    let Some(value) = obj.get(field.key()) else {
        return Err(ValidationError::new(field, "undefined", ValidationReason::Missing));
    };
    let reject = |reason| Err(ValidationError::new(field, render(value), reason));

    let Value::Number(n) = value else {
        return reject(ValidationReason::NotANumber);
    };
    if let Some(v) = n.as_u64() {
        return Ok(v);
    }
    if n.is_i64() {
        // Integral but not representable as u64
        return reject(ValidationReason::Negative);
    }

    // Floats: 3.0 is an integer, 3.5 is not
    match n.as_f64() {
        Some(f) if !f.is_finite() || f.fract() != 0.0 => reject(ValidationReason::NotAnInteger),
        Some(f) if f < 0.0 => reject(ValidationReason::Negative),
        Some(f) if f < u64::MAX as f64 => Ok(f as u64),
        Some(_) => reject(ValidationReason::AboveMaximum { max: u64::MAX }),
        None => reject(ValidationReason::NotANumber),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
