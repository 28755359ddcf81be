//! Patient Intake Core Library
//!
//! Local-first patient intake: a form's fields are validated, stored as one
//! collection in a key-value slot, and projected into the roster table.
//!
//! # Architecture
//!
//! ```text
//!   Form fields (host UI)
//!          │
//!          ▼
//!   Validator (fixed rule order, first failure wins)
//!          │
//!          ▼
//!   Uniqueness check on national ID (DNI)
//!          │
//!          ▼
//!   ┌──────────────────────────────────────┐
//!   │            Record Store              │
//!   │  slot "pacientes" = JSON array       │
//!   │  load → mutate → save (whole list)   │
//!   └──────────────────┬───────────────────┘
//!                      │
//!            ┌─────────┴─────────┐
//!            ▼                   ▼
//!      Roster Table         Roster Export
//!      (rows + delete)      (JSON / CSV)
//! ```
//!
//! # Modules
//!
//! - [`db`]: SQLite database holding the key-value slots
//! - [`store`]: Storage trait, in-memory backend, record store
//! - [`models`]: Domain types (PatientRecord, FormInput, enumerated sets)
//! - [`intake`]: Validator, controller, table projection, messages
//! - [`export`]: Roster export
//! - [`config`]: Storage configuration

pub mod config;
pub mod db;
pub mod export;
pub mod intake;
pub mod logging;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use config::IntakeConfig;
pub use db::Database;
pub use intake::{
    validate, Confirm, IntakeController, Rejection, RemovalOutcome, SubmitOutcome, TableRow,
    TableView, ValidationError,
};
pub use logging::init_logging;
pub use models::{EducationLevel, FormField, FormInput, Gender, GradeLevel, PatientRecord};
pub use store::{KeyValueStorage, MemoryStorage, RecordStore, StoreError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Mutex;
use std::sync::Arc;

use export::RosterExporter;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum IntakeError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupt data: {0}")]
    CorruptData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl From<db::DbError> for IntakeError {
    fn from(e: db::DbError) -> Self {
        IntakeError::DatabaseError(e.to_string())
    }
}

impl From<StoreError> for IntakeError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Database(e) => e.into(),
            e @ StoreError::CorruptData { .. } => IntakeError::CorruptData(e.to_string()),
            StoreError::Serialization(e) => e.into(),
        }
    }
}

impl From<serde_json::Error> for IntakeError {
    fn from(e: serde_json::Error) -> Self {
        IntakeError::SerializationError(e.to_string())
    }
}

impl From<config::ConfigError> for IntakeError {
    fn from(e: config::ConfigError) -> Self {
        IntakeError::InvalidConfig(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for IntakeError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        IntakeError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create an intake database at the given path.
#[uniffi::export]
pub fn open_intake(path: String) -> Result<Arc<PatientIntake>, IntakeError> {
    PatientIntake::open(&IntakeConfig::with_database(path))
}

/// Create an in-memory intake (for testing).
#[uniffi::export]
pub fn open_intake_in_memory() -> Result<Arc<PatientIntake>, IntakeError> {
    PatientIntake::open(&IntakeConfig::default())
}

/// Open an intake from a JSON config (`storage_key`, `database_path`).
#[uniffi::export]
pub fn open_intake_with_config(config_json: String) -> Result<Arc<PatientIntake>, IntakeError> {
    let config = IntakeConfig::from_json_str(&config_json)?;
    PatientIntake::open(&config)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Confirmation dialog provided by the host.
#[uniffi::export(callback_interface)]
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: String) -> bool;
}

/// Thread-safe intake controller for FFI.
#[derive(uniffi::Object)]
pub struct PatientIntake {
    controller: Mutex<IntakeController<Database>>,
}

impl PatientIntake {
    fn open(config: &IntakeConfig) -> Result<Arc<Self>, IntakeError> {
        config.validate()?;
        let db = match &config.database_path {
            Some(path) => Database::open(path)?,
            None => Database::open_in_memory()?,
        };
        let store = RecordStore::with_key(db, config.storage_key.clone());
        Ok(Arc::new(Self {
            controller: Mutex::new(IntakeController::new(store)),
        }))
    }
}

#[uniffi::export]
impl PatientIntake {
    /// Validate and store a form submission.
    pub fn submit(&self, input: FfiFormInput) -> Result<FfiSubmitOutcome, IntakeError> {
        let mut controller = self.controller.lock()?;
        let outcome = controller.submit(&input.into())?;
        Ok(outcome.into())
    }

    /// Delete the patient with `national_id` if the host confirms.
    pub fn delete_record(
        &self,
        national_id: String,
        prompt: Box<dyn ConfirmPrompt>,
    ) -> Result<FfiRemovalOutcome, IntakeError> {
        let mut controller = self.controller.lock()?;
        let outcome = controller
            .delete_record(&national_id, &mut |message: &str| prompt.confirm(message.to_string()))?;
        Ok(outcome.into())
    }

    /// Delete every patient if the host confirms.
    pub fn clear_all(&self, prompt: Box<dyn ConfirmPrompt>) -> Result<FfiRemovalOutcome, IntakeError> {
        let mut controller = self.controller.lock()?;
        let outcome =
            controller.clear_all(&mut |message: &str| prompt.confirm(message.to_string()))?;
        Ok(outcome.into())
    }

    /// Current roster table.
    pub fn render_table(&self) -> Result<FfiTableView, IntakeError> {
        let controller = self.controller.lock()?;
        Ok(controller.render_table()?.into())
    }

    /// All stored patients.
    pub fn list_records(&self) -> Result<Vec<FfiPatientRecord>, IntakeError> {
        let controller = self.controller.lock()?;
        let records = controller.records()?;
        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    /// Replace unreadable stored data with an empty roster.
    pub fn reset_store(&self) -> Result<FfiTableView, IntakeError> {
        let mut controller = self.controller.lock()?;
        Ok(controller.reset_store()?.into())
    }

    /// Export the roster as JSON.
    pub fn export_roster_json(&self) -> Result<String, IntakeError> {
        let controller = self.controller.lock()?;
        let export = RosterExporter::new(controller.store()).export_all()?;
        Ok(export.to_json()?)
    }

    /// Export the roster as CSV.
    pub fn export_roster_csv(&self) -> Result<String, IntakeError> {
        let controller = self.controller.lock()?;
        let export = RosterExporter::new(controller.store()).export_all()?;
        Ok(export.to_csv())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe form input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFormInput {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub phone: String,
    pub birth_date: String,
    pub consult_reason: String,
    pub grade_level: String,
    pub education_level: String,
    pub gender: String,
}

impl From<FfiFormInput> for FormInput {
    fn from(input: FfiFormInput) -> Self {
        FormInput {
            first_name: input.first_name,
            last_name: input.last_name,
            national_id: input.national_id,
            phone: input.phone,
            birth_date: input.birth_date,
            consult_reason: input.consult_reason,
            grade_level: input.grade_level,
            education_level: input.education_level,
            gender: input.gender,
        }
    }
}

/// FFI-safe submission result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSubmitOutcome {
    pub accepted: bool,
    pub message: String,
    pub reset_form: bool,
    /// Field to focus after the action
    pub focus_field: Option<String>,
    /// Field that caused a rejection
    pub error_field: Option<String>,
    /// Re-rendered table, present when the roster changed
    pub table: Option<FfiTableView>,
}

impl From<SubmitOutcome> for FfiSubmitOutcome {
    fn from(outcome: SubmitOutcome) -> Self {
        let message = outcome.message();
        let reset_form = outcome.reset_form();
        let focus_field = outcome.focus().map(|f| f.name().to_string());
        match outcome {
            SubmitOutcome::Accepted { table, .. } => Self {
                accepted: true,
                message,
                reset_form,
                focus_field,
                error_field: None,
                table: Some(table.into()),
            },
            SubmitOutcome::Rejected(rejection) => Self {
                accepted: false,
                message,
                reset_form,
                focus_field,
                error_field: Some(rejection.field().name().to_string()),
                table: None,
            },
        }
    }
}

/// FFI-safe removal result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRemovalOutcome {
    pub confirmed: bool,
    pub removed: u32,
    pub table: Option<FfiTableView>,
}

impl From<RemovalOutcome> for FfiRemovalOutcome {
    fn from(outcome: RemovalOutcome) -> Self {
        match outcome {
            RemovalOutcome::Declined => Self {
                confirmed: false,
                removed: 0,
                table: None,
            },
            RemovalOutcome::Removed { count, table } => Self {
                confirmed: true,
                removed: count as u32,
                table: Some(table.into()),
            },
        }
    }
}

/// FFI-safe table.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTableView {
    pub visible: bool,
    pub rows: Vec<FfiTableRow>,
}

impl From<TableView> for FfiTableView {
    fn from(view: TableView) -> Self {
        Self {
            visible: view.visible,
            rows: view.rows.into_iter().map(|r| r.into()).collect(),
        }
    }
}

/// FFI-safe table row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTableRow {
    pub full_name: String,
    pub national_id: String,
    pub phone: String,
    pub birth_date: String,
    pub grade_level: String,
    pub education_level: String,
    pub gender: String,
    pub delete_label: String,
}

impl From<TableRow> for FfiTableRow {
    fn from(row: TableRow) -> Self {
        Self {
            full_name: row.full_name,
            national_id: row.national_id,
            phone: row.phone,
            birth_date: row.birth_date,
            grade_level: row.grade_level,
            education_level: row.education_level,
            gender: row.gender,
            delete_label: row.delete_label,
        }
    }
}

/// FFI-safe patient record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientRecord {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub phone: String,
    /// ISO date (YYYY-MM-DD)
    pub birth_date: String,
    pub consult_reason: String,
    pub grade_level: f64,
    pub education_level: String,
    pub gender: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

impl From<PatientRecord> for FfiPatientRecord {
    fn from(record: PatientRecord) -> Self {
        Self {
            birth_date: record.birth_date.to_string(),
            grade_level: record.grade_level.value(),
            education_level: record.education_level.to_string(),
            gender: record.gender.to_string(),
            created_at: record.created_at.to_rfc3339(),
            first_name: record.first_name,
            last_name: record.last_name,
            national_id: record.national_id,
            phone: record.phone,
            consult_reason: record.consult_reason,
        }
    }
}
