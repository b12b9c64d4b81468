//! Settings edit form.
//!
//! Holds the raw text of the five inputs and applies the per-field rules an
//! editing surface shows to the user. These are stricter than
//! [`build_settings`](crate::settings::build_settings): the grid fields must be
//! at least 1, and blank amounts mean 0.

use std::fmt;

use crate::settings::{
    Settings, SettingsField, ValidationError, ValidationReason, MAX_COLUMNS_COUNT, MAX_ROWS_COUNT,
};

/// Why one form input is invalid. Display text is the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    NotANumber,
    BelowMin(u64),
    AboveMax(u64),
    NotInteger,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "Value required"),
            Self::NotANumber => write!(f, "Value must be a number"),
            Self::BelowMin(min) => write!(f, "Value must be greater than or equal to {min}"),
            Self::AboveMax(max) => write!(f, "Value must be less than or equal to {max}"),
            Self::NotInteger => write!(f, "Value must be a valid integer"),
        }
    }
}

impl From<&ValidationError> for FieldError {
    fn from(err: &ValidationError) -> Self {
        match err.reason() {
            ValidationReason::NotAnObject | ValidationReason::Missing => Self::Required,
            ValidationReason::NotANumber => Self::NotANumber,
            ValidationReason::NotAnInteger => Self::NotInteger,
            ValidationReason::Negative => Self::BelowMin(0),
            ValidationReason::AboveMaximum { max } => Self::AboveMax(max),
            ValidationReason::ExceedsCapacity { capacity } => Self::AboveMax(capacity),
        }
    }
}

/// Every failing field of a rejected submit, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<(SettingsField, FieldError)>,
}

impl FormErrors {
    pub fn get(&self, field: SettingsField) -> Option<FieldError> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, e)| *e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SettingsField, FieldError)> + '_ {
        self.errors.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, err)) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field.label(), err)?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

struct Rule {
    required: bool,
    min: u64,
    max: Option<u64>,
}

/// Raw text inputs for the five settings fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    inputs: [String; 5],
}

impl SettingsForm {
    /// Form pre-filled with the current settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            inputs: SettingsField::ALL.map(|field| settings.get(field).to_string()),
        }
    }

    pub fn value(&self, field: SettingsField) -> &str {
        &self.inputs[field.index()]
    }

    pub fn set(&mut self, field: SettingsField, text: impl Into<String>) {
        self.inputs[field.index()] = text.into();
    }

    pub fn push_char(&mut self, field: SettingsField, ch: char) {
        self.inputs[field.index()].push(ch);
    }

    pub fn pop_char(&mut self, field: SettingsField) {
        self.inputs[field.index()].pop();
    }

    /// Current error for one field, if any.
    pub fn field_error(&self, field: SettingsField) -> Option<FieldError> {
        self.parse_field(field, self.capacity()).err()
    }

    /// Validate all fields and build settings, or report every failing field.
    pub fn submit(&self) -> Result<Settings, FormErrors> {
        let capacity = self.capacity();
        let mut values = [0u64; 5];
        let mut errors = Vec::new();
        for field in SettingsField::ALL {
            match self.parse_field(field, capacity) {
                Ok(v) => values[field.index()] = v,
                Err(e) => errors.push((field, e)),
            }
        }
        if !errors.is_empty() {
            return Err(FormErrors { errors });
        }

        let [cell_weight, rows_count, columns_count, has, to_spend] = values;
        Settings::new(cell_weight, rows_count, columns_count, has, to_spend).map_err(|err| {
            let field = err.field().unwrap_or(SettingsField::CellWeight);
            FormErrors {
                errors: vec![(field, FieldError::from(&err))],
            }
        })
    }

    // Amount bounds only apply once the grid fields are all valid.
    fn capacity(&self) -> Option<u64> {
        let cell_weight = self.parse_field(SettingsField::CellWeight, None).ok()?;
        let rows_count = self.parse_field(SettingsField::RowsCount, None).ok()?;
        let columns_count = self.parse_field(SettingsField::ColumnsCount, None).ok()?;
        Some(
            cell_weight
                .saturating_mul(rows_count)
                .saturating_mul(columns_count),
        )
    }

    fn rule(field: SettingsField, capacity: Option<u64>) -> Rule {
        match field {
            SettingsField::CellWeight => Rule { required: true, min: 1, max: None },
            SettingsField::RowsCount => Rule { required: true, min: 1, max: Some(MAX_ROWS_COUNT) },
            SettingsField::ColumnsCount => Rule { required: true, min: 1, max: Some(MAX_COLUMNS_COUNT) },
            SettingsField::Has | SettingsField::ToSpend => Rule { required: false, min: 0, max: capacity },
        }
    }

    fn parse_field(&self, field: SettingsField, capacity: Option<u64>) -> Result<u64, FieldError> {
        let rule = Self::rule(field, capacity);
        let text = self.value(field).trim();

        if text.is_empty() {
            return if rule.required { Err(FieldError::Required) } else { Ok(0) };
        }

        if let Ok(v) = text.parse::<u64>() {
            if v < rule.min {
                return Err(FieldError::BelowMin(rule.min));
            }
            if let Some(max) = rule.max.filter(|max| v > *max) {
                return Err(FieldError::AboveMax(max));
            }
            return Ok(v);
        }

        // Negative, fractional, exponent or out-of-range input
        let v: f64 = text.parse().map_err(|_| FieldError::NotANumber)?;
        if !v.is_finite() {
            return Err(FieldError::NotANumber);
        }
        if v < rule.min as f64 {
            return Err(FieldError::BelowMin(rule.min));
        }
        let max = rule.max.unwrap_or(u64::MAX);
        // u64::MAX as f64 rounds up to 2^64, which no u64 can hold
        if v > max as f64 || v >= u64::MAX as f64 {
            return Err(FieldError::AboveMax(max));
        }
        if v.fract() != 0.0 {
            return Err(FieldError::NotInteger);
        }
        Ok(v as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(values: [&str; 5]) -> SettingsForm {
        let mut form = SettingsForm::from_settings(&Settings::default());
        for (field, text) in SettingsField::ALL.into_iter().zip(values) {
            form.set(field, text);
        }
        form
    }

    #[test]
    fn prefilled_from_settings() {
        let settings = Settings::new(25, 4, 8, 300, 120).unwrap();
        let form = SettingsForm::from_settings(&settings);
        assert_eq!(form.value(SettingsField::CellWeight), "25");
        assert_eq!(form.value(SettingsField::ToSpend), "120");
        assert_eq!(form.submit().unwrap(), settings);
    }

    #[test]
    fn blank_amounts_default_to_zero() {
        let settings = form(["50", "1", "4", "", " "]).submit().unwrap();
        assert_eq!((settings.has(), settings.to_spend()), (0, 0));
    }

    #[test]
    fn grid_fields_are_required() {
        let errors = form(["", "", "", "0", "0"]).submit().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(SettingsField::CellWeight), Some(FieldError::Required));
        assert_eq!(errors.get(SettingsField::RowsCount), Some(FieldError::Required));
        assert_eq!(errors.get(SettingsField::ColumnsCount), Some(FieldError::Required));
        assert_eq!(errors.get(SettingsField::Has), None);
    }

    #[test]
    fn grid_fields_must_be_positive() {
        let errors = form(["0", "0", "51", "0", "0"]).submit().unwrap_err();
        assert_eq!(errors.get(SettingsField::CellWeight), Some(FieldError::BelowMin(1)));
        assert_eq!(errors.get(SettingsField::RowsCount), Some(FieldError::BelowMin(1)));
        assert_eq!(errors.get(SettingsField::ColumnsCount), Some(FieldError::AboveMax(50)));
    }

    #[test]
    fn amounts_bounded_by_capacity() {
        let f = form(["50", "1", "4", "201", "200"]);
        assert_eq!(f.field_error(SettingsField::Has), Some(FieldError::AboveMax(200)));
        assert_eq!(f.field_error(SettingsField::ToSpend), None);
        assert_eq!(
            f.submit().unwrap_err().to_string(),
            "Has: Value must be less than or equal to 200"
        );
    }

    #[test]
    fn amounts_unbounded_while_grid_invalid() {
        let f = form(["50", "", "4", "999999", "0"]);
        assert_eq!(f.field_error(SettingsField::Has), None);
        assert!(f.submit().is_err());
    }

    #[test]
    fn error_precedence() {
        // min before integer
        assert_eq!(form(["-1.5", "1", "1", "0", "0"]).field_error(SettingsField::CellWeight), Some(FieldError::BelowMin(1)));
        // max before integer
        assert_eq!(form(["50", "50.5", "1", "0", "0"]).field_error(SettingsField::RowsCount), Some(FieldError::AboveMax(50)));
        assert_eq!(form(["50", "2.5", "1", "0", "0"]).field_error(SettingsField::RowsCount), Some(FieldError::NotInteger));
        assert_eq!(form(["abc", "1", "1", "0", "0"]).field_error(SettingsField::CellWeight), Some(FieldError::NotANumber));
        assert_eq!(form(["50", "1", "1", "-3", "0"]).field_error(SettingsField::Has), Some(FieldError::BelowMin(0)));
    }

    #[test]
    fn accepts_integral_decimals() {
        let settings = form(["50.0", "1", "4", "1e2", "0"]).submit().unwrap();
        assert_eq!(settings.cell_weight(), 50);
        assert_eq!(settings.has(), 100);
    }

    #[test]
    fn rejects_values_past_u64() {
        let f = form(["18446744073709551616", "1", "1", "0", "0"]);
        assert_eq!(f.field_error(SettingsField::CellWeight), Some(FieldError::AboveMax(u64::MAX)));
        assert!(f.submit().is_err());

        let max = u64::MAX.to_string();
        let f = form([max.as_str(), "1", "1", "18446744073709551616", "0"]);
        assert_eq!(f.field_error(SettingsField::Has), Some(FieldError::AboveMax(u64::MAX)));
        let errors = f.submit().unwrap_err();
        assert_eq!(errors.get(SettingsField::Has), Some(FieldError::AboveMax(u64::MAX)));
    }

    #[test]
    fn typing_edits_one_field() {
        let mut f = form(["50", "1", "4", "1", "0"]);
        f.push_char(SettingsField::Has, '2');
        f.push_char(SettingsField::Has, '0');
        assert_eq!(f.value(SettingsField::Has), "120");
        f.pop_char(SettingsField::Has);
        assert_eq!(f.value(SettingsField::Has), "12");
    }

    #[test]
    fn messages() {
        assert_eq!(FieldError::Required.to_string(), "Value required");
        assert_eq!(FieldError::BelowMin(1).to_string(), "Value must be greater than or equal to 1");
        assert_eq!(FieldError::AboveMax(50).to_string(), "Value must be less than or equal to 50");
        assert_eq!(FieldError::NotInteger.to_string(), "Value must be a valid integer");
    }
}
