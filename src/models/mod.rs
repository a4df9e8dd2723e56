//! Typed records for the three source tables and supporting types.
//!
//! The CSV loader produces these structs once at startup; every engine stage
//! reads them through shared references and never mutates them.

pub mod claim;
pub mod clock;
pub mod encounter;
pub mod patient;

pub use claim::Claim;
pub use clock::{Clock, FixedClock, SystemClock};
pub use encounter::{Encounter, EncounterClass};
pub use patient::{Gender, Patient};
