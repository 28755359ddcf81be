//! Field validation for the intake form.
//!
//! Rules run in a fixed order and stop at the first failure, so the form
//! only ever shows one message:
//!
//! 1. first name non-empty
//! 2. last name non-empty
//! 3. national ID is 7 or 8 digits
//! 4. phone uses digits, `+`, `()`, `-` and spaces, 6 to 20 chars
//! 5. birth date is today or earlier
//! 6. grade is a number >= 1
//! 7. education level is one of the offered options
//! 8. gender is one of the offered options

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use super::messages;
use crate::models::{EducationLevel, FormField, FormInput, Gender, GradeLevel, PatientRecord};

/// Date format produced by a date input.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

const NATIONAL_ID_MIN_DIGITS: usize = 7;
const NATIONAL_ID_MAX_DIGITS: usize = 8;
const PHONE_MIN_CHARS: usize = 6;
const PHONE_MAX_CHARS: usize = 20;

/// First failed rule. `Display` yields the message shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{}", messages::FIRST_NAME_EMPTY)]
    FirstNameEmpty,

    #[error("{}", messages::LAST_NAME_EMPTY)]
    LastNameEmpty,

    #[error("{}", messages::NATIONAL_ID_INVALID)]
    NationalIdInvalid,

    #[error("{}", messages::PHONE_INVALID)]
    PhoneInvalid,

    #[error("{}", messages::BIRTH_DATE_NOT_PAST)]
    BirthDateNotPast,

    #[error("{}", messages::GRADE_INVALID)]
    GradeInvalid,

    #[error("{}", messages::EDUCATION_LEVEL_INVALID)]
    EducationLevelInvalid,

    #[error("{}", messages::GENDER_INVALID)]
    GenderInvalid,
}

impl ValidationError {
    /// Field the rule checks.
    pub fn field(self) -> FormField {
        match self {
            ValidationError::FirstNameEmpty => FormField::FirstName,
            ValidationError::LastNameEmpty => FormField::LastName,
            ValidationError::NationalIdInvalid => FormField::NationalId,
            ValidationError::PhoneInvalid => FormField::Phone,
            ValidationError::BirthDateNotPast => FormField::BirthDate,
            ValidationError::GradeInvalid => FormField::GradeLevel,
            ValidationError::EducationLevelInvalid => FormField::EducationLevel,
            ValidationError::GenderInvalid => FormField::Gender,
        }
    }
}

/// Trimmed and typed form values that passed every rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedIntake {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub consult_reason: String,
    pub grade_level: GradeLevel,
    pub education_level: EducationLevel,
    pub gender: Gender,
}

impl ValidatedIntake {
    /// Build the record, stamping its creation time.
    pub fn into_record(self, created_at: DateTime<Utc>) -> PatientRecord {
        PatientRecord {
            first_name: self.first_name,
            last_name: self.last_name,
            national_id: self.national_id,
            phone: self.phone,
            birth_date: self.birth_date,
            consult_reason: self.consult_reason,
            grade_level: self.grade_level,
            education_level: self.education_level,
            gender: self.gender,
            created_at,
        }
    }
}

/// Check `input` against every rule; `today` bounds the birth date.
pub fn validate(input: &FormInput, today: NaiveDate) -> Result<ValidatedIntake, ValidationError> {
    let first_name = input.first_name.trim();
    if first_name.is_empty() {
        return Err(ValidationError::FirstNameEmpty);
    }

    let last_name = input.last_name.trim();
    if last_name.is_empty() {
        return Err(ValidationError::LastNameEmpty);
    }

    let national_id = input.national_id.trim();
    if !is_valid_national_id(national_id) {
        return Err(ValidationError::NationalIdInvalid);
    }

    let phone = input.phone.trim();
    if !is_valid_phone(phone) {
        return Err(ValidationError::PhoneInvalid);
    }

    let birth_date = parse_birth_date(&input.birth_date)
        .filter(|date| *date <= today)
        .ok_or(ValidationError::BirthDateNotPast)?;

    let grade_level = parse_grade_level(&input.grade_level).ok_or(ValidationError::GradeInvalid)?;

    let education_level = EducationLevel::from_label(input.education_level.trim())
        .ok_or(ValidationError::EducationLevelInvalid)?;

    let gender = Gender::from_label(input.gender.trim()).ok_or(ValidationError::GenderInvalid)?;

    Ok(ValidatedIntake {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        national_id: national_id.to_string(),
        phone: phone.to_string(),
        birth_date,
        consult_reason: input.consult_reason.trim().to_string(),
        grade_level,
        education_level,
        gender,
    })
}

/// 7 or 8 ASCII digits, nothing else.
pub fn is_valid_national_id(s: &str) -> bool {
    (NATIONAL_ID_MIN_DIGITS..=NATIONAL_ID_MAX_DIGITS).contains(&s.len())
        && s.bytes().all(|b| b.is_ascii_digit())
}

/// 6 to 20 characters drawn from digits, `+`, `(`, `)`, `-` and whitespace.
pub fn is_valid_phone(s: &str) -> bool {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | '(' | ')' | '-') || c.is_whitespace();
    let len = s.chars().count();
    (PHONE_MIN_CHARS..=PHONE_MAX_CHARS).contains(&len) && s.chars().all(allowed)
}

fn parse_birth_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), INPUT_DATE_FORMAT).ok()
}

fn parse_grade_level(s: &str) -> Option<GradeLevel> {
    s.trim().parse::<f64>().ok().and_then(GradeLevel::new)
}
