//! Core types for the derivation engine.

pub mod consultation;
pub mod letter;
pub mod report;

pub use consultation::{Consultation, Profile, FALLBACK_YEAR};
pub use letter::{letters_to_string, Letter, Nature};
pub use report::{
    Analysis, Comparison, Dominance, Entrances, ExternalFactors, LineId, LineValue, Lines,
    Report, Status,
};
