//! Closed value sets offered by the intake form selects.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Education level of the patient.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EducationLevel {
    Inicial,
    Primario,
    Secundario,
    Terciario,
    Universitario,
}

impl EducationLevel {
    /// All levels, in the order the form lists them.
    pub const ALL: [EducationLevel; 5] = [
        EducationLevel::Inicial,
        EducationLevel::Primario,
        EducationLevel::Secundario,
        EducationLevel::Terciario,
        EducationLevel::Universitario,
    ];

    /// Label shown in the form and stored in the record.
    pub fn label(self) -> &'static str {
        match self {
            EducationLevel::Inicial => "Inicial",
            EducationLevel::Primario => "Primario",
            EducationLevel::Secundario => "Secundario",
            EducationLevel::Terciario => "Terciario",
            EducationLevel::Universitario => "Universitario",
        }
    }

    /// Exact, case-sensitive match against a form value.
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "Inicial" => Some(EducationLevel::Inicial),
            "Primario" => Some(EducationLevel::Primario),
            "Secundario" => Some(EducationLevel::Secundario),
            "Terciario" => Some(EducationLevel::Terciario),
            "Universitario" => Some(EducationLevel::Universitario),
            _ => None,
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gender as declared on the form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    Femenino,
    Masculino,
    #[serde(rename = "Prefiere no decir")]
    PrefiereNoDecir,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Femenino, Gender::Masculino, Gender::PrefiereNoDecir];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Femenino => "Femenino",
            Gender::Masculino => "Masculino",
            Gender::PrefiereNoDecir => "Prefiere no decir",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "Femenino" => Some(Gender::Femenino),
            "Masculino" => Some(Gender::Masculino),
            "Prefiere no decir" => Some(Gender::PrefiereNoDecir),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for level in EducationLevel::ALL {
            assert_eq!(EducationLevel::from_label(level.label()), Some(level));
        }
        for gender in Gender::ALL {
            assert_eq!(Gender::from_label(gender.label()), Some(gender));
        }
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert_eq!(EducationLevel::from_label("primario"), None);
        assert_eq!(Gender::from_label("prefiere no decir"), None);
        assert_eq!(Gender::from_label(""), None);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Gender::PrefiereNoDecir).unwrap();
        assert_eq!(json, "\"Prefiere no decir\"");

        let level: EducationLevel = serde_json::from_str("\"Terciario\"").unwrap();
        assert_eq!(level, EducationLevel::Terciario);

        assert!(serde_json::from_str::<Gender>("\"Otro\"").is_err());
    }
}
