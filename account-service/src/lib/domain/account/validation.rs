//! Field-level input policy.
//!
//! Every entry point runs all of its checks and collects every violation.
//! Violations stay structured until they are rendered: reasons of one field
//! are joined with `","` after `"<field>: "`, and fields with `", "`.
//!
//! Login checks are deliberately looser than registration checks: a login
//! phone number only has to be a non-empty integer, and a login password
//! only has to be non-empty.

use std::fmt;

use unicode_properties::GeneralCategory;
use unicode_properties::GeneralCategoryGroup;
use unicode_properties::UnicodeGeneralCategory;

use crate::domain::account::models::LoginRequest;
use crate::domain::account::models::RegisterRequest;
use crate::domain::account::models::UpdateProfileRequest;

pub const PHONE_NUMBER_MIN_LENGTH: usize = 10;
pub const PHONE_NUMBER_MAX_LENGTH: usize = 13;
pub const COUNTRY_CODE: &str = "+62";

pub const FULL_NAME_MIN_LENGTH: usize = 3;
pub const FULL_NAME_MAX_LENGTH: usize = 60;

pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 64;

const NOT_A_PHONE_NUMBER: &str = "not a phone number";
const PHONE_NUMBER_LENGTH: &str = "must be at minimum 10 characters and maximum 13 characters";
const INVALID_COUNTRY_CODE: &str = "country code is not valid";
const FULL_NAME_LENGTH: &str = "must be at minimum 3 characters and maximum 60 characters";
const PASSWORD_LENGTH: &str = "must be at minimum 6 characters and maximum 64 characters";
const PASSWORD_COMPOSITION: &str =
    "must contain at least 1 capital characters, 1 number, and 1 special character";
const EMPTY: &str = "can't be empty";

/// Input field a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PhoneNumber,
    FullName,
    Password,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::PhoneNumber => "phone_number",
            Field::FullName => "full_name",
            Field::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: Field,
    pub reason: &'static str,
}

/// Ordered collection of violations; empty means the input is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field, reason: &'static str) {
        self.0.push(FieldViolation { field, reason });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// Reasons recorded for one field, in check order.
    pub fn reasons_for(&self, field: Field) -> Vec<&'static str> {
        self.0
            .iter()
            .filter(|v| v.field == field)
            .map(|v| v.reason)
            .collect()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<Field> = Vec::new();
        for violation in &self.0 {
            if !fields.contains(&violation.field) {
                fields.push(violation.field);
            }
        }

        let rendered: Vec<String> = fields
            .into_iter()
            .map(|field| format!("{}: {}", field, self.reasons_for(field).join(",")))
            .collect();

        f.write_str(&rendered.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

pub fn validate_registration(request: &RegisterRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_phone_number(&request.phone_number, &mut errors);
    check_full_name(&request.full_name, &mut errors);
    check_password(&request.password, &mut errors);
    errors.into_result()
}

pub fn validate_login(request: &LoginRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_login_phone_number(&request.phone_number, &mut errors);
    check_login_password(&request.password, &mut errors);
    errors.into_result()
}

pub fn validate_profile_update(request: &UpdateProfileRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_phone_number(&request.phone_number, &mut errors);
    check_full_name(&request.full_name, &mut errors);
    errors.into_result()
}

fn check_phone_number(phone_number: &str, errors: &mut ValidationErrors) {
    let length = phone_number.len();

    // The first character is the `+` of the country code.
    if length > 1 {
        let numeric = phone_number.get(1..).map(|rest| rest.parse::<i64>().is_ok());
        if numeric != Some(true) {
            errors.push(Field::PhoneNumber, NOT_A_PHONE_NUMBER);
        }
    }

    if !(PHONE_NUMBER_MIN_LENGTH..=PHONE_NUMBER_MAX_LENGTH).contains(&length) {
        errors.push(Field::PhoneNumber, PHONE_NUMBER_LENGTH);
    }

    if length > 3 && phone_number.get(..3) != Some(COUNTRY_CODE) {
        errors.push(Field::PhoneNumber, INVALID_COUNTRY_CODE);
    }
}

fn check_full_name(full_name: &str, errors: &mut ValidationErrors) {
    if !(FULL_NAME_MIN_LENGTH..=FULL_NAME_MAX_LENGTH).contains(&full_name.len()) {
        errors.push(Field::FullName, FULL_NAME_LENGTH);
    }
}

fn check_password(password: &str, errors: &mut ValidationErrors) {
    if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&password.len()) {
        errors.push(Field::Password, PASSWORD_LENGTH);
    }

    let mut number = false;
    let mut upper = false;
    let mut special = false;
    for c in password.chars() {
        match c.general_category_group() {
            GeneralCategoryGroup::Number => number = true,
            GeneralCategoryGroup::Letter
                if c.general_category() == GeneralCategory::UppercaseLetter =>
            {
                upper = true
            }
            GeneralCategoryGroup::Punctuation | GeneralCategoryGroup::Symbol => special = true,
            _ => {}
        }
    }

    if !(number && upper && special) {
        errors.push(Field::Password, PASSWORD_COMPOSITION);
    }
}

fn check_login_phone_number(phone_number: &str, errors: &mut ValidationErrors) {
    if phone_number.is_empty() {
        errors.push(Field::PhoneNumber, EMPTY);
    }

    if phone_number.parse::<i64>().is_err() {
        errors.push(Field::PhoneNumber, NOT_A_PHONE_NUMBER);
    }
}

fn check_login_password(password: &str, errors: &mut ValidationErrors) {
    if password.is_empty() {
        errors.push(Field::Password, EMPTY);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn register(full_name: &str, phone_number: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            full_name: full_name.to_string(),
            phone_number: phone_number.to_string(),
            password: password.to_string(),
        }
    }

    fn login(phone_number: &str, password: &str) -> LoginRequest {
        LoginRequest {
            phone_number: phone_number.to_string(),
            password: password.to_string(),
        }
    }

    fn update(full_name: &str, phone_number: &str) -> UpdateProfileRequest {
        UpdateProfileRequest {
            full_name: full_name.to_string(),
            phone_number: phone_number.to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        let request = register("sadam 2", "+622342342322", "AAAAAAAAA1a^1");
        assert_eq!(validate_registration(&request), Ok(()));
    }

    #[test]
    fn test_empty_registration_reports_every_field() {
        let errors = validate_registration(&register("", "", "A")).unwrap_err();

        assert_eq!(
            errors.reasons_for(Field::PhoneNumber),
            vec![PHONE_NUMBER_LENGTH]
        );
        assert_eq!(errors.reasons_for(Field::FullName), vec![FULL_NAME_LENGTH]);
        assert_eq!(
            errors.reasons_for(Field::Password),
            vec![PASSWORD_LENGTH, PASSWORD_COMPOSITION]
        );
        assert_eq!(
            errors.to_string(),
            "phone_number: must be at minimum 10 characters and maximum 13 characters, \
             full_name: must be at minimum 3 characters and maximum 60 characters, \
             password: must be at minimum 6 characters and maximum 64 characters,\
             must contain at least 1 capital characters, 1 number, and 1 special character"
        );
    }

    #[test]
    fn test_phone_number_violations_accumulate() {
        let errors = validate_registration(&register("sadam", "abc", "AAAAAAAAA1a^1")).unwrap_err();

        assert_eq!(
            errors.to_string(),
            "phone_number: not a phone number,must be at minimum 10 characters and maximum 13 characters"
        );
    }

    #[test]
    fn test_phone_number_country_code() {
        let errors =
            validate_registration(&register("sadam", "+652342342322", "AAAAAAAAA1a^1")).unwrap_err();

        assert_eq!(
            errors.reasons_for(Field::PhoneNumber),
            vec![INVALID_COUNTRY_CODE]
        );
    }

    #[test]
    fn test_phone_number_length_bounds() {
        let ok_min = validate_registration(&register("sadam", "+621234567", "AAAAAAAAA1a^1"));
        let ok_max = validate_registration(&register("sadam", "+621234567890", "AAAAAAAAA1a^1"));
        let too_long =
            validate_registration(&register("sadam", "+6212345678901", "AAAAAAAAA1a^1"));

        assert_eq!(ok_min, Ok(()));
        assert_eq!(ok_max, Ok(()));
        assert_eq!(
            too_long.unwrap_err().reasons_for(Field::PhoneNumber),
            vec![PHONE_NUMBER_LENGTH]
        );
    }

    #[test]
    fn test_multibyte_phone_number_does_not_panic() {
        let errors = validate_registration(&register("sadam", "é62345678901", "AAAAAAAAA1a^1"))
            .unwrap_err();

        assert!(errors
            .reasons_for(Field::PhoneNumber)
            .contains(&NOT_A_PHONE_NUMBER));
    }

    #[test]
    fn test_full_name_bounds() {
        let long_name = "a".repeat(61);

        assert_eq!(
            validate_profile_update(&update("abc", "+622342342322")),
            Ok(())
        );
        assert!(validate_profile_update(&update("ab", "+622342342322")).is_err());
        assert!(validate_profile_update(&update(&long_name, "+622342342322")).is_err());
    }

    #[test]
    fn test_password_composition() {
        let missing_symbol = validate_registration(&register("sadam", "+622342342322", "Abcdef1"));
        let missing_upper = validate_registration(&register("sadam", "+622342342322", "abcdef1!"));
        let missing_digit = validate_registration(&register("sadam", "+622342342322", "Abcdef!!"));
        let complete = validate_registration(&register("sadam", "+622342342322", "Abcdef1!"));

        for result in [missing_symbol, missing_upper, missing_digit] {
            assert_eq!(
                result.unwrap_err().reasons_for(Field::Password),
                vec![PASSWORD_COMPOSITION]
            );
        }
        assert_eq!(complete, Ok(()));
    }

    #[test]
    fn test_password_non_ascii_symbol_counts_as_special() {
        let result = validate_registration(&register("sadam", "+622342342322", "Abcdef1€"));
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_password_invisible_characters_are_not_special() {
        // Zero-width space, soft hyphen, combining acute accent.
        for password in ["Abcdef1\u{200B}", "Abcdef1\u{AD}", "Abcdef1\u{301}"] {
            let result = validate_registration(&register("sadam", "+622342342322", password));
            assert_eq!(
                result.unwrap_err().reasons_for(Field::Password),
                vec![PASSWORD_COMPOSITION],
                "{:?}",
                password
            );
        }
    }

    #[test]
    fn test_password_circled_letter_is_symbol_not_capital() {
        let missing_upper =
            validate_registration(&register("sadam", "+622342342322", "abcdef1\u{24B6}"));
        assert_eq!(
            missing_upper.unwrap_err().reasons_for(Field::Password),
            vec![PASSWORD_COMPOSITION]
        );

        let complete =
            validate_registration(&register("sadam", "+622342342322", "Abcdef1\u{24B6}"));
        assert_eq!(complete, Ok(()));
    }

    #[test]
    fn test_login_accepts_what_registration_rejects() {
        let phone_number = "123";

        assert_eq!(validate_login(&login(phone_number, "x")), Ok(()));
        assert!(validate_registration(&register("sadam", phone_number, "AAAAAAAAA1a^1")).is_err());
    }

    #[test]
    fn test_login_empty_fields() {
        let errors = validate_login(&login("", "")).unwrap_err();

        assert_eq!(
            errors.to_string(),
            "phone_number: can't be empty,not a phone number, password: can't be empty"
        );
    }

    #[test]
    fn test_login_non_numeric_phone() {
        let errors = validate_login(&login("phone", "secret")).unwrap_err();
        assert_eq!(errors.to_string(), "phone_number: not a phone number");
    }

    #[test]
    fn test_profile_update_ignores_password() {
        let errors = validate_profile_update(&update("", "")).unwrap_err();

        assert!(errors.reasons_for(Field::Password).is_empty());
        assert_eq!(errors.violations().len(), 2);
    }
}
