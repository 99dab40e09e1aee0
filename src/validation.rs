//! # Input Validation
//!
//! Field-level checks applied to request payloads before anything is
//! persisted. Checks accumulate into [`ValidationErrors`] so a client sees
//! every problem with a payload in one response.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Battery vendors the service accepts.
pub const ACCEPTED_VENDORS: [&str; 2] = ["Tesla", "KATL"];

/// Message returned for a vendor outside [`ACCEPTED_VENDORS`].
pub const VENDOR_MESSAGE: &str = "Vendor must be either \"Tesla\" or \"KATL\".";

/// Field path to the list of problems found on that field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem on `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Fold errors from a nested payload under `prefix` (e.g. `battery.vendor`).
    pub fn merge_nested(&mut self, prefix: &str, nested: ValidationErrors) {
        for (field, messages) in nested.fields {
            self.fields
                .entry(format!("{prefix}.{field}"))
                .or_default()
                .extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    /// Whether any problem was recorded on `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// One-line `field: message; field: message` rendering.
    pub fn summary(&self) -> String {
        self.fields
            .iter()
            .flat_map(|(field, messages)| {
                messages
                    .iter()
                    .map(move |message| format!("{field}: {message}"))
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

/// Require a non-blank string no longer than `max_len` characters.
pub fn check_text(errors: &mut ValidationErrors, field: &str, value: &str, max_len: usize) {
    if value.trim().is_empty() {
        errors.add(field, "Field may not be blank.");
    } else if value.chars().count() > max_len {
        errors.add(field, format!("Longer than maximum length {max_len}."));
    }
}

/// Require a finite value `>= 0`.
pub fn check_non_negative(errors: &mut ValidationErrors, field: &str, value: f64) {
    if !value.is_finite() {
        errors.add(field, "Not a valid number.");
    } else if value < 0.0 {
        errors.add(field, "Must be greater than or equal to 0.");
    }
}

/// Require a finite value inside `[min, max]`.
pub fn check_range(errors: &mut ValidationErrors, field: &str, value: f64, min: f64, max: f64) {
    if !value.is_finite() {
        errors.add(field, "Not a valid number.");
    } else if value < min || value > max {
        errors.add(
            field,
            format!("Must be greater than or equal to {min} and less than or equal to {max}."),
        );
    }
}

/// Require the vendor to be one of [`ACCEPTED_VENDORS`].
pub fn check_vendor(errors: &mut ValidationErrors, field: &str, vendor: &str) {
    if !ACCEPTED_VENDORS.contains(&vendor) {
        errors.add(field, VENDOR_MESSAGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_failing_field() {
        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "name", "  ", 100);
        check_non_negative(&mut errors, "load_kwh", -5.0);
        check_range(&mut errors, "soc", 101.0, 0.0, 100.0);

        assert_eq!(errors.fields().len(), 3);
        assert!(errors.has_field("name"));
        assert!(errors.has_field("load_kwh"));
        assert!(errors.has_field("soc"));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let mut errors = ValidationErrors::new();
        check_range(&mut errors, "soc", 0.0, 0.0, 100.0);
        check_range(&mut errors, "soc", 100.0, 0.0, 100.0);
        check_non_negative(&mut errors, "load_kwh", 0.0);
        assert!(errors.is_empty());

        check_range(&mut errors, "soc", -1.0, 0.0, 100.0);
        assert!(errors.has_field("soc"));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let mut errors = ValidationErrors::new();
        check_non_negative(&mut errors, "capacity_kwh", f64::NAN);
        check_range(&mut errors, "soc", f64::INFINITY, 0.0, 100.0);
        assert_eq!(errors.fields().len(), 2);
    }

    #[test]
    fn vendor_must_be_accepted() {
        let mut errors = ValidationErrors::new();
        check_vendor(&mut errors, "vendor", "Tesla");
        check_vendor(&mut errors, "vendor", "KATL");
        assert!(errors.is_empty());

        check_vendor(&mut errors, "vendor", "tesla");
        assert_eq!(errors.fields()["vendor"], vec![VENDOR_MESSAGE.to_string()]);
    }

    #[test]
    fn text_length_counts_characters() {
        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "name", &"é".repeat(100), 100);
        assert!(errors.is_empty());

        check_text(&mut errors, "name", &"é".repeat(101), 100);
        assert!(errors.has_field("name"));
    }

    #[test]
    fn nested_errors_are_prefixed() {
        let mut nested = ValidationErrors::new();
        nested.add("units", "Must be greater than or equal to 0.");

        let mut errors = ValidationErrors::new();
        errors.merge_nested("production_units[1]", nested);

        assert!(errors.has_field("production_units[1].units"));
        assert_eq!(
            errors.summary(),
            "production_units[1].units: Must be greater than or equal to 0."
        );
    }
}
