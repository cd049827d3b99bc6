//! Field constraint checks and violation aggregation.
//!
//! Drafts run every field through a [`Validator`]. Each field reports at most
//! one violation (its first failing rule) and the whole set is returned as a
//! [`ValidationFailed`] value, never just the first failure.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::{Map, Value};

use crate::domain::Error;

/// Message shown when a name-like field contains digits or punctuation.
pub const NAME_PATTERN_MESSAGE: &str = "Please use a name without numbers or specials";
/// Message shown when an email address is malformed.
pub const EMAIL_FORMAT_MESSAGE: &str = "The email address must be in the format of name@domain.com";
/// Message shown when a phone number is malformed.
pub const PHONE_FORMAT_MESSAGE: &str = "Please use a phone number in the format (212) 555-1234";

const REQUIRED_MESSAGE: &str = "may not be null";
const EMPTY_MESSAGE: &str = "may not be empty";

/// Outcome of a single rule applied to one field.
pub(crate) type Rule = Result<(), String>;

/// One violated constraint on a named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    field: &'static str,
    message: String,
}

impl ConstraintViolation {
    /// Field path the violation applies to, in wire (camelCase) form.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Human-readable description of the violation.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Every constraint violation found on one entity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} failed validation on {} field(s)", violations.len())]
pub struct ValidationFailed {
    entity: &'static str,
    violations: Vec<ConstraintViolation>,
}

impl ValidationFailed {
    /// Entity name the violations were raised against.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Violations in field declaration order.
    pub fn violations(&self) -> &[ConstraintViolation] {
        &self.violations
    }

    /// Names of the violated fields, in declaration order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(ConstraintViolation::field).collect()
    }

    /// Merge another entity's violations after this one's.
    pub(crate) fn extend(mut self, other: Self) -> Self {
        self.violations.extend(other.violations);
        self
    }

    /// Field to message map used as error details.
    pub fn to_details(&self) -> Value {
        let map: Map<String, Value> = self
            .violations
            .iter()
            .map(|v| (v.field.to_owned(), Value::String(v.message.clone())))
            .collect();
        Value::Object(map)
    }
}

impl From<ValidationFailed> for Error {
    fn from(value: ValidationFailed) -> Self {
        Self::validation_failed("Bad Request").with_details(value.to_details())
    }
}

/// Collects the first failing rule of every checked field.
#[derive(Debug, Default)]
pub(crate) struct Validator {
    violations: Vec<ConstraintViolation>,
}

impl Validator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Run the rules for `field`, recording the first failure.
    pub(crate) fn check(&mut self, field: &'static str, rules: impl FnOnce() -> Rule) {
        if let Err(message) = rules() {
            self.violations.push(ConstraintViolation { field, message });
        }
    }

    /// Check a required value, recording a violation when it is absent.
    pub(crate) fn required<T>(
        &mut self,
        field: &'static str,
        value: Option<T>,
        rules: impl FnOnce(&T) -> Rule,
    ) -> Option<T> {
        match value {
            Some(inner) => {
                self.check(field, || rules(&inner));
                Some(inner)
            }
            None => {
                self.violations.push(ConstraintViolation {
                    field,
                    message: REQUIRED_MESSAGE.to_owned(),
                });
                None
            }
        }
    }

    /// Finish the pass, building the validated value when nothing failed.
    ///
    /// `build` only returns `None` when a [`Validator::required`] value was
    /// absent, which has already been recorded as a violation.
    pub(crate) fn finish<T>(
        self,
        entity: &'static str,
        build: impl FnOnce() -> Option<T>,
    ) -> Result<T, ValidationFailed> {
        let failed = ValidationFailed {
            entity,
            violations: self.violations,
        };
        if failed.violations.is_empty() {
            build().ok_or(failed)
        } else {
            Err(failed)
        }
    }
}

pub(crate) fn not_empty(value: &str) -> Rule {
    if value.trim().is_empty() {
        return Err(EMPTY_MESSAGE.to_owned());
    }
    Ok(())
}

pub(crate) fn length_within(value: &str, min: usize, max: usize) -> Rule {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(format!("size must be between {min} and {max}"));
    }
    Ok(())
}

pub(crate) fn matches(value: &str, pattern: &Regex, message: &str) -> Rule {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(message.to_owned())
    }
}

/// Dates must fall strictly before `today`.
pub(crate) fn in_past(value: NaiveDate, today: NaiveDate, message: &str) -> Rule {
    if value < today {
        Ok(())
    } else {
        Err(message.to_owned())
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern)
        .unwrap_or_else(|error| panic!("pattern {pattern} failed to compile: {error}"))
}

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static CODE_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

/// Letters, hyphens and apostrophes only.
pub(crate) fn name_regex() -> &'static Regex {
    NAME_RE.get_or_init(|| compile(r"^[A-Za-z\-']+$"))
}

/// Letters and digits only.
pub(crate) fn alphanumeric_regex() -> &'static Regex {
    CODE_RE.get_or_init(|| compile(r"^[0-9A-Za-z]+$"))
}

pub(crate) fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| compile(r"^[^@\s]+@[^@\s]+\.[^@\s]+$"))
}

/// North American style: `(212) 555-1234`.
pub(crate) fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| compile(r"^\([2-9][0-8][0-9]\)\s?[0-9]{3}-[0-9]{4}$"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("O'Brien", true)]
    #[case("Smith-Jones", true)]
    #[case("R2D2", false)]
    #[case("Ann Marie", false)]
    #[case("", false)]
    fn name_pattern(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(name_regex().is_match(value), ok);
    }

    #[rstest]
    #[case("(212) 555-1234", true)]
    #[case("(212)555-1234", true)]
    #[case("(112) 555-1234", false)]
    #[case("(291) 555-1234", false)]
    #[case("212-555-1234", false)]
    fn phone_pattern(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(phone_regex().is_match(value), ok);
    }

    #[rstest]
    #[case("jane@mailinator.com", true)]
    #[case("jane@localhost", false)]
    #[case("jane.mailinator.com", false)]
    fn email_pattern(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(email_regex().is_match(value), ok);
    }

    #[rstest]
    fn validator_reports_first_failure_per_field_in_order() {
        let mut validator = Validator::new();
        validator.check("firstName", || {
            not_empty("")?;
            length_within("", 1, 25)
        });
        validator.check("lastName", || not_empty("Doe"));
        validator.check("email", || matches("nope", email_regex(), EMAIL_FORMAT_MESSAGE));

        let failed = validator.finish("Customer", || Some(())).expect_err("two fields fail");
        assert_eq!(failed.fields(), vec!["firstName", "email"]);
        assert_eq!(failed.violations()[0].message(), "may not be empty");
        assert_eq!(failed.entity(), "Customer");
    }

    #[rstest]
    fn required_records_missing_values() {
        let mut validator = Validator::new();
        let date: Option<NaiveDate> = None;
        let seen = validator.required("birthDate", date, |_| Ok(()));
        assert!(seen.is_none());

        let failed = validator.finish("Customer", || seen).expect_err("missing date");
        assert_eq!(failed.violations()[0].message(), "may not be null");
    }

    #[rstest]
    fn in_past_excludes_today() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
        let yesterday = today.pred_opt().expect("valid date");
        assert!(in_past(yesterday, today, "past").is_ok());
        assert_eq!(in_past(today, today, "past"), Err("past".to_owned()));
    }

    #[rstest]
    fn converts_into_validation_error_with_field_map() {
        let mut validator = Validator::new();
        validator.check("flightNumber", || length_within("TOOLONG", 1, 5));
        let failed = validator.finish("Flight", || Some(())).expect_err("too long");

        let error = Error::from(failed);
        assert_eq!(error.code(), crate::domain::ErrorCode::ValidationFailed);
        assert_eq!(
            error.details().and_then(|d| d.get("flightNumber")).and_then(Value::as_str),
            Some("size must be between 1 and 5")
        );
    }
}
