//! The fifteen-stage line derivation.
//!
//! [`lines`] holds the classic stages, [`entrances`] the four aggregate
//! entrances, and [`weighted`] the positional-weighting profile.

pub mod entrances;
pub mod lines;
pub mod weighted;

pub use entrances::entrances;
pub use lines::{
    adjacent_ratio_line, base_line, complement_line, digit_relettering, fusion_line,
    mirror_line, pairwise_ratio_line, power_substitution, refinement_line, rotate_left,
    zigzag_interleave, BASE_LINE_LEN,
};
