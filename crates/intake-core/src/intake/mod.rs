//! Intake form controller.
//!
//! Flow: Form → Validation → Uniqueness check → Record Store → Table
//!
//! Every action returns what the presentation layer must show next. Rejected
//! submissions, declined confirmations and unknown IDs never touch storage.

pub mod messages;
mod table;
mod validator;

pub use table::*;
pub use validator::*;

use chrono::{DateTime, Local, Utc};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{FormField, FormInput, PatientRecord};
use crate::store::{KeyValueStorage, RecordStore, StoreResult};

/// Blocking yes/no question put to the user.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Why a submission was not stored.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("{}", messages::DUPLICATE_NATIONAL_ID)]
    DuplicateNationalId { national_id: String },
}

impl Rejection {
    /// Field to flag in the form.
    pub fn field(&self) -> FormField {
        match self {
            Rejection::Invalid(e) => e.field(),
            Rejection::DuplicateNationalId { .. } => FormField::NationalId,
        }
    }
}

/// Result of a form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Record stored; the form should be cleared and the first field focused.
    Accepted {
        record: PatientRecord,
        table: TableView,
    },
    /// Nothing stored; show the message and keep the form as is.
    Rejected(Rejection),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted { .. })
    }

    /// Status line text.
    pub fn message(&self) -> String {
        match self {
            SubmitOutcome::Accepted { .. } => messages::PATIENT_SAVED.to_string(),
            SubmitOutcome::Rejected(rejection) => rejection.to_string(),
        }
    }

    /// Whether the form fields should be cleared.
    pub fn reset_form(&self) -> bool {
        self.is_accepted()
    }

    /// Field to focus next, if any.
    pub fn focus(&self) -> Option<FormField> {
        match self {
            SubmitOutcome::Accepted { .. } => Some(FormField::FirstName),
            SubmitOutcome::Rejected(_) => None,
        }
    }
}

/// Result of a confirmed-removal action.
#[derive(Debug, Clone, PartialEq)]
pub enum RemovalOutcome {
    /// User said no; nothing changed and nothing needs re-rendering.
    Declined,
    Removed { count: usize, table: TableView },
}

/// Controller owning the record store for the lifetime of the form.
pub struct IntakeController<S> {
    store: RecordStore<S>,
}

impl<S: KeyValueStorage> IntakeController<S> {
    pub fn new(store: RecordStore<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    pub fn into_store(self) -> RecordStore<S> {
        self.store
    }

    /// Handle a form submission using the current time.
    pub fn submit(&mut self, input: &FormInput) -> StoreResult<SubmitOutcome> {
        self.submit_at(input, Local::now())
    }

    /// Handle a form submission as of `now`; its local date is "today".
    pub fn submit_at(
        &mut self,
        input: &FormInput,
        now: DateTime<Local>,
    ) -> StoreResult<SubmitOutcome> {
        let intake = match validate(input, now.date_naive()) {
            Ok(intake) => intake,
            Err(e) => {
                debug!(field = %e.field(), reason = %e, "submission failed validation");
                return Ok(SubmitOutcome::Rejected(e.into()));
            }
        };

        let record = intake.into_record(now.with_timezone(&Utc));
        let mut records = self.store.load()?;

        if records.iter().any(|p| p.national_id == record.national_id) {
            info!(national_id = %record.national_id, "duplicate national ID rejected");
            return Ok(SubmitOutcome::Rejected(Rejection::DuplicateNationalId {
                national_id: record.national_id,
            }));
        }

        records.push(record.clone());
        self.store.save(&records)?;
        info!(national_id = %record.national_id, count = records.len(), "patient saved");

        Ok(SubmitOutcome::Accepted {
            record,
            table: TableView::from_records(&records),
        })
    }

    /// Delete every record with `national_id`, after confirmation.
    pub fn delete_record(
        &mut self,
        national_id: &str,
        confirm: &mut impl Confirm,
    ) -> StoreResult<RemovalOutcome> {
        if !confirm.confirm(&messages::delete_prompt(national_id)) {
            debug!(national_id, "delete declined");
            return Ok(RemovalOutcome::Declined);
        }

        let mut records = self.store.load()?;
        let before = records.len();
        records.retain(|p| p.national_id != national_id);
        let count = before - records.len();

        if count > 0 {
            self.store.save(&records)?;
            info!(national_id, remaining = records.len(), "patient deleted");
        } else {
            debug!(national_id, "no patient with that national ID");
        }

        Ok(RemovalOutcome::Removed {
            count,
            table: TableView::from_records(&records),
        })
    }

    /// Remove the whole collection, after confirmation.
    pub fn clear_all(&mut self, confirm: &mut impl Confirm) -> StoreResult<RemovalOutcome> {
        if !confirm.confirm(messages::CLEAR_ALL_PROMPT) {
            debug!("clear all declined");
            return Ok(RemovalOutcome::Declined);
        }

        // A corrupt slot still counts as nothing to report; it is dropped all the same.
        let count = self.store.load().map(|r| r.len()).unwrap_or(0);
        self.store.clear()?;
        info!(count, "all patients deleted");

        Ok(RemovalOutcome::Removed {
            count,
            table: TableView::default(),
        })
    }

    /// Current table contents.
    pub fn render_table(&self) -> StoreResult<TableView> {
        let records = self.store.load()?;
        Ok(TableView::from_records(&records))
    }

    /// Current stored collection.
    pub fn records(&self) -> StoreResult<Vec<PatientRecord>> {
        self.store.load()
    }

    /// Discard the stored collection, readable or not.
    pub fn reset_store(&mut self) -> StoreResult<TableView> {
        self.store.reset()?;
        Ok(TableView::default())
    }
}
