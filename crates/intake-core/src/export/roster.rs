//! Roster export for handing the intake list to other systems.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::PatientRecord;
use crate::store::{KeyValueStorage, RecordStore, StoreResult};

const CSV_HEADER: &str = "national_id,last_name,first_name,phone,birth_date,consult_reason,grade_level,education_level,gender,created_at\n";

/// Snapshot of the stored collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterExport {
    /// Export timestamp
    pub exported_at: DateTime<Utc>,
    /// Number of patients exported
    pub total_patients: usize,
    pub patients: Vec<PatientRecord>,
}

impl RosterExport {
    pub fn from_records(records: Vec<PatientRecord>) -> Self {
        Self {
            exported_at: Utc::now(),
            total_patients: records.len(),
            patients: records,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(CSV_HEADER);

        for p in &self.patients {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{}\n",
                escape_csv(&p.national_id),
                escape_csv(&p.last_name),
                escape_csv(&p.first_name),
                escape_csv(&p.phone),
                p.birth_date,
                escape_csv(&p.consult_reason),
                p.grade_level,
                p.education_level,
                p.gender,
                p.created_at.to_rfc3339(),
            ));
        }

        csv
    }
}

/// Roster exporter.
pub struct RosterExporter<'a, S> {
    store: &'a RecordStore<S>,
}

impl<'a, S: KeyValueStorage> RosterExporter<'a, S> {
    pub fn new(store: &'a RecordStore<S>) -> Self {
        Self { store }
    }

    /// Export every stored patient.
    pub fn export_all(&self) -> StoreResult<RosterExport> {
        Ok(RosterExport::from_records(self.store.load()?))
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
