//! Patient record models.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::levels::{EducationLevel, Gender};

/// Date format used by the roster table (es-AR).
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// A stored intake record, keyed by national ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub first_name: String,
    pub last_name: String,
    /// DNI, 7 or 8 ASCII digits; unique within the store
    pub national_id: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    /// Free text, may be empty
    pub consult_reason: String,
    pub grade_level: GradeLevel,
    pub education_level: EducationLevel,
    pub gender: Gender,
    /// Set once when the record is built
    pub created_at: DateTime<Utc>,
}

impl PatientRecord {
    /// "Last, First" as shown in the roster.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    /// Birth date in the roster's locale format.
    pub fn birth_date_display(&self) -> String {
        self.birth_date.format(DISPLAY_DATE_FORMAT).to_string()
    }
}

/// School grade or course, a number >= 1.
///
/// Whole values are written to storage as JSON integers so that a stored
/// collection serializes back to the same text.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct GradeLevel(f64);

impl GradeLevel {
    pub const MIN: f64 = 1.0;

    /// Returns `None` for non-finite values or values below [`GradeLevel::MIN`].
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= Self::MIN).then_some(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    fn is_whole(self) -> bool {
        self.0.fract() == 0.0 && self.0 <= i64::MAX as f64
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for GradeLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for GradeLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        GradeLevel::new(value)
            .ok_or_else(|| serde::de::Error::custom(format!("grade level {} is below 1", value)))
    }
}
