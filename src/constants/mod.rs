//! Immutable constants provider: lookup tables and table-driven functions.
//!
//! A single [`Constants`] value is built once and injected into the engine
//! at construction; there is no ambient/global table state. All methods are
//! pure and side-effect-free.
//!
//! ## Lookup-miss policy
//!
//! Table queries that find no matching entry are never fatal. Each query
//! resolves a miss with a documented default: the fallback letter ا for
//! inverse numeral lookups, value 0 for calendrical/astrological keys, or
//! pass-through of the original letter at the call site.

mod tables;

use std::collections::HashMap;

use regex_lite::Regex;

use crate::types::{Letter, Nature};
use tables::{ALPHABET, DAYS, MANSIONS, MONTHS, RATIO, ZODIAC};

/// The letter returned when an inverse numeral lookup has no match.
pub const FALLBACK_LETTER: char = 'ا';

/// One of the six modulus-reduction families.
///
/// Each family reduces a positive integer into [1, M] by repeated
/// subtraction of its modulus; an exact multiple of M reduces to M itself,
/// never 0. The declaration order is the canonical enumeration order used
/// for tie-breaks in power substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ModulusFamily {
    /// M = 4.
    Elemental,
    /// M = 7.
    Planetary,
    /// M = 9.
    Celestial,
    /// M = 12.
    Zodiacal,
    /// M = 28.
    Lunar,
    /// M = 30.
    Gradient,
}

impl ModulusFamily {
    /// All six families in canonical enumeration order.
    pub const ALL: [ModulusFamily; 6] = [
        ModulusFamily::Elemental,
        ModulusFamily::Planetary,
        ModulusFamily::Celestial,
        ModulusFamily::Zodiacal,
        ModulusFamily::Lunar,
        ModulusFamily::Gradient,
    ];

    /// The modulus M of this family.
    pub fn modulus(&self) -> u32 {
        match self {
            Self::Elemental => 4,
            Self::Planetary => 7,
            Self::Celestial => 9,
            Self::Zodiacal => 12,
            Self::Lunar => 28,
            Self::Gradient => 30,
        }
    }
}

impl std::fmt::Display for ModulusFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Elemental => write!(f, "elemental"),
            Self::Planetary => write!(f, "planetary"),
            Self::Celestial => write!(f, "celestial"),
            Self::Zodiacal => write!(f, "zodiacal"),
            Self::Lunar => write!(f, "lunar"),
            Self::Gradient => write!(f, "gradient"),
        }
    }
}

/// Immutable lookup tables and pure table-driven functions.
///
/// Inverse maps are precomputed at construction; ties in inverse lookups
/// are broken by the fixed abjadi ordering of the forward table.
#[derive(Debug, Clone)]
pub struct Constants {
    /// Letter → 0-based abjadi position.
    position: HashMap<char, usize>,
    /// Compact value (1–28) → letter, by abjadi position.
    compact_inverse: [char; 28],
    /// Nature → its seven letters in abjadi order.
    nature_circles: [[Letter; 7]; 4],
    /// Combining marks and tatweel stripped during normalization.
    diacritics: Regex,
}

impl Constants {
    /// Build the provider, precomputing every inverse map.
    pub fn new() -> Self {
        let mut position = HashMap::with_capacity(28);
        let mut compact_inverse = [FALLBACK_LETTER; 28];
        for (i, (c, _)) in ALPHABET.iter().enumerate() {
            position.insert(*c, i);
            compact_inverse[i] = *c;
        }

        let mut circles: [Vec<Letter>; 4] = Default::default();
        for (i, (c, _)) in ALPHABET.iter().enumerate() {
            circles[i % 4].push(Letter::new(*c));
        }
        let nature_circles = circles.map(|v| {
            let mut arr = [Letter::new(FALLBACK_LETTER); 7];
            arr.copy_from_slice(&v);
            arr
        });

        // Harakat, tanween, superscript alef and tatweel.
        let diacritics = Regex::new("[\u{0640}\u{064B}-\u{0655}\u{0670}]")
            .expect("diacritics pattern is valid");

        Self {
            position,
            compact_inverse,
            nature_circles,
            diacritics,
        }
    }

    /// Whether `c` is a letter of the fixed alphabet.
    pub fn is_letter(&self, c: char) -> bool {
        self.position.contains_key(&c)
    }

    /// Gross (hisab-al-jumal) numeral value of a letter.
    ///
    /// Letters outside the alphabet value to 0.
    pub fn gross_value(&self, letter: Letter) -> u32 {
        self.position
            .get(&letter.as_char())
            .map(|&i| ALPHABET[i].1)
            .unwrap_or(0)
    }

    /// Compact numeral value (1–28) of a letter, by abjadi position.
    ///
    /// Letters outside the alphabet value to 0.
    pub fn compact_value(&self, letter: Letter) -> u32 {
        self.position
            .get(&letter.as_char())
            .map(|&i| i as u32 + 1)
            .unwrap_or(0)
    }

    /// Nature class of a letter. Defaults to fire for letters outside the
    /// alphabet (never produced by normalization).
    pub fn nature(&self, letter: Letter) -> Nature {
        self.position
            .get(&letter.as_char())
            .map(|&i| Nature::from_position(i))
            .unwrap_or(Nature::Fire)
    }

    /// Mirror letter: abjadi position `i` pairs with position `27 - i`.
    ///
    /// Returns `None` for letters outside the alphabet; callers fall back
    /// to the original letter.
    pub fn mirror(&self, letter: Letter) -> Option<Letter> {
        self.position
            .get(&letter.as_char())
            .map(|&i| Letter::new(ALPHABET[27 - i].0))
    }

    /// First letter, in abjadi order, whose compact value equals `n`.
    pub fn find_letter_for_compact(&self, n: u32) -> Option<Letter> {
        if (1..=28).contains(&n) {
            Some(Letter::new(self.compact_inverse[n as usize - 1]))
        } else {
            None
        }
    }

    /// Letter whose compact value equals `n`, or the fallback letter ا.
    pub fn letter_for_compact(&self, n: u32) -> Letter {
        self.find_letter_for_compact(n)
            .unwrap_or(Letter::new(FALLBACK_LETTER))
    }

    /// Repeated digit-summation of `n` until a single digit remains.
    ///
    /// Idempotent; maps 0 to 0 and every positive integer into [1, 9].
    pub fn digital_root(&self, n: u32) -> u32 {
        let mut n = n;
        while n > 9 {
            let mut sum = 0;
            let mut rest = n;
            while rest > 0 {
                sum += rest % 10;
                rest /= 10;
            }
            n = sum;
        }
        n
    }

    /// Reduce `n` into [1, M] for the given family.
    ///
    /// Repeatedly subtracts M until the result lies in [1, M]; an exact
    /// multiple of M reduces to M itself, never 0. 0 reduces to M.
    pub fn reduce(&self, family: ModulusFamily, n: u32) -> u32 {
        let m = family.modulus();
        if n == 0 {
            return m;
        }
        (n - 1) % m + 1
    }

    /// Ratio table value for a pair of single digits.
    ///
    /// Total over [1,9] × [1,9]; out-of-range input is a programming error.
    pub fn ratio(&self, a: u32, b: u32) -> u32 {
        debug_assert!((1..=9).contains(&a) && (1..=9).contains(&b));
        RATIO[a as usize - 1][b as usize - 1] as u32
    }

    /// Normalize text into the ordered letter sequence.
    ///
    /// Strips diacritics and tatweel, folds orthographic variants into
    /// their canonical alphabet letter (hamza/alef forms → ا, ؤ → و,
    /// ئ and ى → ي, ة → ه), and drops every character outside the
    /// alphabet.
    pub fn text_to_letters(&self, text: &str) -> Vec<Letter> {
        let stripped = self.diacritics.replace_all(text, "");
        stripped
            .chars()
            .filter_map(|c| {
                let folded = match c {
                    'أ' | 'إ' | 'آ' | 'ٱ' | 'ء' => 'ا',
                    'ؤ' => 'و',
                    'ئ' | 'ى' => 'ي',
                    'ة' => 'ه',
                    other => other,
                };
                self.is_letter(folded).then(|| Letter::new(folded))
            })
            .collect()
    }

    /// Spell a number as letters by greedy abjad decomposition,
    /// largest denomination first. 0 spells as the empty sequence.
    pub fn number_to_letters(&self, n: u32) -> Vec<Letter> {
        let mut letters = Vec::new();
        let mut remaining = n;
        for (c, value) in ALPHABET.iter().rev() {
            while remaining >= *value {
                letters.push(Letter::new(*c));
                remaining -= *value;
            }
        }
        letters
    }

    /// Time bucket of a weekday name, 0 if unresolved.
    pub fn day_value(&self, day: &str) -> u32 {
        DAYS.iter().find(|(d, _)| *d == day).map(|(_, v)| *v).unwrap_or(0)
    }

    /// 1-based index of a month name, 0 if unresolved.
    pub fn month_index(&self, month: &str) -> u32 {
        MONTHS
            .iter()
            .find(|(m, _)| *m == month)
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }

    /// Table value of a zodiac sign name, 0 if unresolved.
    pub fn zodiac_value(&self, sign: &str) -> u32 {
        ZODIAC
            .iter()
            .find(|(s, _)| *s == sign)
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }

    /// Table value of a lunar mansion name, 0 if unresolved.
    pub fn mansion_value(&self, mansion: &str) -> u32 {
        MANSIONS
            .iter()
            .find(|(m, _)| *m == mansion)
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }

    /// The seven letters of a nature, in abjadi order.
    pub fn nature_circle(&self, nature: Nature) -> &[Letter; 7] {
        let idx = Nature::ALL.iter().position(|n| *n == nature).unwrap_or(0);
        &self.nature_circles[idx]
    }

    /// Power circle for a modulus family and starting letter: the abjadi
    /// walk from the start letter stepping by the family modulus, back to
    /// the start. `None` if the start letter is outside the alphabet.
    pub fn power_circle(&self, family: ModulusFamily, start: Letter) -> Option<Vec<Letter>> {
        let start_idx = *self.position.get(&start.as_char())?;
        let step = family.modulus() as usize;
        let mut circle = Vec::new();
        let mut i = start_idx;
        loop {
            circle.push(Letter::new(ALPHABET[i].0));
            i = (i + step) % 28;
            if i == start_idx {
                break;
            }
        }
        Some(circle)
    }
}

impl Default for Constants {
    fn default() -> Self {
        Self::new()
    }
}
