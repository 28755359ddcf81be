//! Export module for roster data.

mod roster;

pub use roster::*;
