//! Raw form input as handed over by the presentation layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Named fields of the intake form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FirstName,
    LastName,
    NationalId,
    Phone,
    BirthDate,
    ConsultReason,
    GradeLevel,
    EducationLevel,
    Gender,
}

impl FormField {
    /// The `name` attribute of the form control.
    pub fn name(self) -> &'static str {
        match self {
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::NationalId => "nationalId",
            FormField::Phone => "phone",
            FormField::BirthDate => "birthDate",
            FormField::ConsultReason => "consultReason",
            FormField::GradeLevel => "gradeLevel",
            FormField::EducationLevel => "educationLevel",
            FormField::Gender => "gender",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Untrimmed field values exactly as typed or selected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInput {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub phone: String,
    /// `YYYY-MM-DD`, as produced by a date input
    pub birth_date: String,
    pub consult_reason: String,
    pub grade_level: String,
    pub education_level: String,
    pub gender: String,
}
