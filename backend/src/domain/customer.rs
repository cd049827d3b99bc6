//! Customer aggregate and its field constraints.

use chrono::NaiveDate;

use crate::domain::CustomerId;
use crate::domain::validation::{
    EMAIL_FORMAT_MESSAGE, NAME_PATTERN_MESSAGE, PHONE_FORMAT_MESSAGE, Rule, ValidationFailed,
    Validator, email_regex, in_past, length_within, matches, name_regex, not_empty, phone_regex,
};

/// Message shown when a birth date is today or later.
pub const BIRTH_DATE_MESSAGE: &str =
    "Birthdates can not be in the future. Please choose one from the past";

/// Maximum length of a first or last name.
pub const NAME_MAX_LEN: usize = 25;

/// Unvalidated customer fields as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birth_date: Option<NaiveDate>,
}

/// Customer fields that passed validation and are ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birth_date: NaiveDate,
}

/// A persisted customer.
///
/// Customers are listed by last name, then first name, then identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birth_date: NaiveDate,
}

pub(crate) fn person_name(value: &str) -> Rule {
    not_empty(value)?;
    length_within(value, 1, NAME_MAX_LEN)?;
    matches(value, name_regex(), NAME_PATTERN_MESSAGE)
}

impl CustomerDraft {
    /// Check every field against `today`, collecting all violations.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use travel_backend::domain::CustomerDraft;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let failed = CustomerDraft::default().validate(today).unwrap_err();
    /// assert_eq!(
    ///     failed.fields(),
    ///     vec!["firstName", "lastName", "email", "phoneNumber", "birthDate"]
    /// );
    /// ```
    pub fn validate(self, today: NaiveDate) -> Result<NewCustomer, ValidationFailed> {
        let mut validator = Validator::new();
        validator.check("firstName", || person_name(&self.first_name));
        validator.check("lastName", || person_name(&self.last_name));
        validator.check("email", || {
            not_empty(&self.email)?;
            matches(&self.email, email_regex(), EMAIL_FORMAT_MESSAGE)
        });
        validator.check("phoneNumber", || {
            not_empty(&self.phone_number)?;
            matches(&self.phone_number, phone_regex(), PHONE_FORMAT_MESSAGE)
        });
        let birth_date = validator.required("birthDate", self.birth_date, |date| {
            in_past(*date, today, BIRTH_DATE_MESSAGE)
        });

        validator.finish("Customer", || {
            Some(NewCustomer {
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
                phone_number: self.phone_number,
                birth_date: birth_date?,
            })
        })
    }
}

impl NewCustomer {
    /// Attach a store identity.
    pub fn with_id(self, id: CustomerId) -> Customer {
        Customer {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            birth_date: self.birth_date,
        }
    }
}

impl Customer {
    /// Natural listing key.
    pub(crate) fn sort_key(&self) -> (&str, &str, CustomerId) {
        (&self.last_name, &self.first_name, self.id)
    }
}
