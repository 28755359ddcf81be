//! Domain models for the patient intake system.

mod form;
mod levels;
mod patient;

pub use form::*;
pub use levels::*;
pub use patient::*;
