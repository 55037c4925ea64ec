//! External factor aggregation: temporal, astrological and name-derived
//! values folded into letters for the fusion stage.

use tracing::warn;

use crate::constants::Constants;
use crate::types::{Consultation, ExternalFactors, FALLBACK_YEAR};

/// Aggregate the four external factors for a consultation.
///
/// The time, astro and name factors each reduce to a digital root before
/// spelling; the combined factor spells the unreduced sum of the three
/// reduced values. Unresolved table keys contribute 0.
pub fn external_factors(constants: &Constants, consultation: &Consultation) -> ExternalFactors {
    let time = time_value(constants, consultation);
    let astro = astro_value(constants, consultation);
    let name = name_value(constants, consultation);

    ExternalFactors {
        time: constants.number_to_letters(time),
        astro: constants.number_to_letters(astro),
        name: constants.number_to_letters(name),
        combined: constants.number_to_letters(time + astro + name),
    }
}

fn time_value(constants: &Constants, consultation: &Consultation) -> u32 {
    let day = constants.day_value(&consultation.day);
    if day == 0 && !consultation.day.is_empty() {
        warn!(day = %consultation.day, "unresolved day name, contributing 0");
    }

    let month = constants.month_index(&consultation.month);
    if month == 0 && !consultation.month.is_empty() {
        warn!(month = %consultation.month, "unresolved month name, contributing 0");
    }

    let year = if consultation.year > 0 {
        consultation.year as u32
    } else {
        FALLBACK_YEAR as u32
    };

    constants.digital_root(day + month * 50 + year)
}

fn astro_value(constants: &Constants, consultation: &Consultation) -> u32 {
    let rising = constants.zodiac_value(&consultation.rising_sign);
    let moon = constants.zodiac_value(&consultation.moon_sign);
    let mansion = constants.mansion_value(&consultation.moon_mansion);
    if mansion == 0 && !consultation.moon_mansion.is_empty() {
        warn!(mansion = %consultation.moon_mansion, "unresolved lunar mansion, contributing 0");
    }
    constants.digital_root(rising + moon + mansion)
}

fn name_value(constants: &Constants, consultation: &Consultation) -> u32 {
    let mut value: u32 = constants
        .text_to_letters(&consultation.asker_name)
        .iter()
        .map(|&l| constants.gross_value(l))
        .sum();
    if let Some(mother) = &consultation.mother_name {
        value += constants
            .text_to_letters(mother)
            .iter()
            .map(|&l| constants.gross_value(l))
            .sum::<u32>();
    }
    constants.digital_root(value)
}
