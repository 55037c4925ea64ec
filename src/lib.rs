//! # jafr-engine
//!
//! Deterministic abjad letter-and-number derivation.
//!
//! The engine takes a natural-language question plus biographical,
//! calendrical and astrological parameters and derives, through a fixed
//! sequence of fifteen named lines, a final symbolic answer and an
//! interpretive analysis.
//!
//! ## Core Contract
//!
//! 1. Every stage is a pure function over prior stages and immutable
//!    lookup tables
//! 2. Same consultation + same profile → identical report fingerprint
//! 3. Table lookup misses resolve to documented defaults, never errors
//!
//! ## Architecture
//!
//! ```text
//! Consultation → Entrances → Line 1..15 → Interpretation → Report
//!                     ↑            ↑
//!                 Constants   External Factors
//! ```
//!
//! Rendering, persistence UI and export mechanics are host concerns; the
//! engine consumes a plain parameter set and an injected [`Constants`]
//! provider, and produces a plain [`Report`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod canonical;
pub mod constants;
pub mod engine;
pub mod error;
pub mod factors;
pub mod pipeline;
pub mod types;

// Re-exports
pub use constants::{Constants, ModulusFamily, FALLBACK_LETTER};
pub use engine::{JafrEngine, StateSnapshot, STATE_SCHEMA_VERSION};
pub use error::EngineError;
pub use factors::external_factors;
pub use types::{
    letters_to_string, Analysis, Comparison, Consultation, Dominance, Entrances,
    ExternalFactors, Letter, LineId, LineValue, Lines, Nature, Profile, Report, Status,
    FALLBACK_YEAR,
};
pub use canonical::{canonical_hash, canonical_hash_hex, question_hash, to_canonical_bytes};
