//! Roster table projection.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::messages;
use crate::models::PatientRecord;

/// Column headings, in display order.
pub const COLUMNS: [&str; 7] = [
    "Apellido y nombre",
    "DNI",
    "Teléfono",
    "Fecha de nacimiento",
    "Grado/Curso",
    "Nivel educativo",
    "Género",
];

/// One rendered table row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableRow {
    /// "Last, First"
    pub full_name: String,
    pub national_id: String,
    pub phone: String,
    /// dd/mm/yyyy
    pub birth_date: String,
    pub grade_level: String,
    pub education_level: String,
    pub gender: String,
    /// Accessible label of the row's delete action
    pub delete_label: String,
}

impl TableRow {
    pub fn from_record(record: &PatientRecord) -> Self {
        let full_name = record.display_name();
        Self {
            delete_label: messages::delete_label(&full_name),
            full_name,
            national_id: record.national_id.clone(),
            phone: record.phone.clone(),
            birth_date: record.birth_date_display(),
            grade_level: record.grade_level.to_string(),
            education_level: record.education_level.to_string(),
            gender: record.gender.to_string(),
        }
    }

    /// Cell texts in [`COLUMNS`] order.
    pub fn cells(&self) -> [&str; 7] {
        [
            self.full_name.as_str(),
            self.national_id.as_str(),
            self.phone.as_str(),
            self.birth_date.as_str(),
            self.grade_level.as_str(),
            self.education_level.as_str(),
            self.gender.as_str(),
        ]
    }

    /// Key carried by the row's delete action.
    pub fn delete_key(&self) -> &str {
        &self.national_id
    }
}

impl fmt::Display for TableRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cells().join(" | "))
    }
}

/// What the table should show after an action.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableView {
    /// False hides both the table and its heading
    pub visible: bool,
    pub rows: Vec<TableRow>,
}

impl TableView {
    pub fn from_records(records: &[PatientRecord]) -> Self {
        let rows = project_rows(records);
        Self {
            visible: !rows.is_empty(),
            rows,
        }
    }
}

/// Records to rows, preserving stored order.
pub fn project_rows(records: &[PatientRecord]) -> Vec<TableRow> {
    records.iter().map(TableRow::from_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationLevel, Gender, GradeLevel};
    use chrono::NaiveDate;

    fn make_record(first: &str, last: &str, national_id: &str) -> PatientRecord {
        PatientRecord {
            first_name: first.into(),
            last_name: last.into(),
            national_id: national_id.into(),
            phone: "11-2233-4455".into(),
            birth_date: NaiveDate::from_ymd_opt(2010, 5, 1).unwrap(),
            consult_reason: String::new(),
            grade_level: GradeLevel::new(5.0).unwrap(),
            education_level: EducationLevel::Primario,
            gender: Gender::Femenino,
            created_at: "2024-03-01T12:30:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_row_text() {
        let row = TableRow::from_record(&make_record("Ana", "Diaz", "12345678"));
        assert_eq!(
            row.to_string(),
            "Diaz, Ana | 12345678 | 11-2233-4455 | 01/05/2010 | 5 | Primario | Femenino"
        );
        assert_eq!(row.delete_key(), "12345678");
        assert_eq!(row.delete_label, "Eliminar a Diaz, Ana");
    }

    #[test]
    fn test_empty_table_hidden() {
        let view = TableView::from_records(&[]);
        assert!(!view.visible);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_rows_keep_stored_order() {
        let records = vec![
            make_record("Ana", "Diaz", "12345678"),
            make_record("Juan", "Alvarez", "7654321"),
        ];
        let view = TableView::from_records(&records);
        assert!(view.visible);
        assert_eq!(view.rows[0].national_id, "12345678");
        assert_eq!(view.rows[1].full_name, "Alvarez, Juan");
    }

    #[test]
    fn test_fractional_grade() {
        let mut record = make_record("Ana", "Diaz", "12345678");
        record.grade_level = GradeLevel::new(2.5).unwrap();
        assert_eq!(TableRow::from_record(&record).grade_level, "2.5");
    }
}
