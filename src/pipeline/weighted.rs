//! The positional-weighting derivation profile.
//!
//! A parameter-compatible variant of the entrances, base-line synthesis,
//! ratio computation, power substitution and decimation analysis. Indexes
//! weight their values, the base line is built from multiplier
//! decomposition and power circles instead of entrance digits, and power
//! substitution scores the six candidates on three criteria instead of
//! raw proximity. Selected through [`crate::types::Profile::Weighted`];
//! the classic derivation stays the wired default.

use std::collections::BTreeSet;

use crate::constants::{Constants, ModulusFamily, FALLBACK_LETTER};
use crate::error::EngineError;
use crate::types::{Entrances, Letter, Nature};

use crate::analysis::lexicon::DIVINE_NAMES;

/// Positional weight table for ratio computation; position is the
/// 1-based pair index, wrapped over the table.
pub const POSITION_WEIGHTS: [f64; 10] = [1.0, 1.2, 1.4, 1.6, 1.8, 2.0, 1.8, 1.6, 1.4, 1.2];

/// Number of decimation levels produced by the weighted analysis.
pub const DECIMATION_LEVELS: usize = 6;

/// Multiplier denominations for weighted base-line synthesis, with the
/// letter each denomination spells.
const MULTIPLIERS: [(u32, char); 4] = [(7, 'ز'), (13, 'م'), (19, 'ق'), (28, 'غ')];

/// Weighted entrances: gross values are multiplied by their 1-based
/// position, the medium sum cycles 1–4 positional weights, and the two
/// reduced entrances pass through repeated reduction rounds.
///
/// Also returns the per-letter digit roots, which the weighted base-line
/// synthesis consumes.
pub fn entrances(
    constants: &Constants,
    letters: &[Letter],
) -> Result<(Entrances, Vec<u32>), EngineError> {
    if letters.is_empty() {
        return Err(EngineError::InvalidState(
            "question must be normalized into letters before computing entrances".to_string(),
        ));
    }

    let values: Vec<u32> = letters.iter().map(|&l| constants.gross_value(l)).collect();
    let reduced: Vec<u32> = values.iter().map(|&v| constants.digital_root(v)).collect();

    let gross = values
        .iter()
        .enumerate()
        .map(|(i, &v)| v * (i as u32 + 1))
        .sum();

    let mut medium_gross = gross;
    while medium_gross > 9 {
        medium_gross = constants.digital_root(medium_gross);
        medium_gross = constants.reduce(ModulusFamily::Celestial, medium_gross);
    }

    let medium_sum = reduced
        .iter()
        .enumerate()
        .map(|(i, &v)| v * (i as u32 % 4 + 1))
        .sum();

    let mut small = medium_sum;
    for _ in 0..3 {
        small = constants.digital_root(small);
        small = constants.reduce(ModulusFamily::Elemental, small);
    }

    Ok((
        Entrances {
            gross,
            medium_gross,
            medium_sum,
            small,
        },
        reduced,
    ))
}

/// Weighted base-line synthesis: multiplier decomposition of the two
/// gross entrances, power-circle re-lettering of the reduced values, and
/// the halved-and-swapped question letters, rotated right three times
/// and adjusted to 16 letters by mutation padding.
pub fn base_line(
    constants: &Constants,
    entrances: &Entrances,
    reduced: &[u32],
    question: &[Letter],
) -> Vec<Letter> {
    let mut line = Vec::new();
    line.extend(multiplier_letters(constants, entrances.gross));
    line.extend(multiplier_letters(constants, entrances.medium_gross));
    line.extend(circle_letters(constants, reduced));
    line.extend(arrange_question(question));

    let line = rotate_right(line, 3);
    adjust_length(constants, line, super::lines::BASE_LINE_LEN)
}

/// Spell a number through the multiplier denominations, remainder via
/// plain abjad decomposition. Each consumed denomination repeats its
/// letter `count mod 9` times, minimum one.
fn multiplier_letters(constants: &Constants, n: u32) -> Vec<Letter> {
    let mut out = Vec::new();
    let mut remaining = n;
    for (mult, ch) in MULTIPLIERS {
        let count = remaining / mult;
        if count > 0 {
            let reps = match count % 9 {
                0 => 1,
                r => r,
            };
            out.extend(std::iter::repeat(Letter::new(ch)).take(reps as usize));
            remaining %= mult;
        }
    }
    if remaining > 0 {
        out.extend(constants.number_to_letters(remaining));
    }
    out
}

/// Re-letter reduced values through the elemental/planetary/celestial
/// power circles anchored at the fallback letter.
fn circle_letters(constants: &Constants, reduced: &[u32]) -> Vec<Letter> {
    let anchor = Letter::new(FALLBACK_LETTER);
    let circles = [
        ModulusFamily::Elemental,
        ModulusFamily::Planetary,
        ModulusFamily::Celestial,
    ]
    .map(|family| {
        constants
            .power_circle(family, anchor)
            .expect("fallback letter is in the alphabet")
    });

    reduced
        .iter()
        .map(|&v| {
            let circle = &circles[(v % 3) as usize];
            circle[v as usize % circle.len()]
        })
        .collect()
}

/// Question letters, halved and swapped when longer than four letters.
fn arrange_question(question: &[Letter]) -> Vec<Letter> {
    if question.len() <= 4 {
        return question.to_vec();
    }
    let mid = question.len() / 2;
    let mut arranged = question[mid..].to_vec();
    arranged.extend_from_slice(&question[..mid]);
    arranged
}

/// Rotate right: each pass moves the last letter to the front.
fn rotate_right(mut line: Vec<Letter>, times: usize) -> Vec<Letter> {
    for _ in 0..times {
        if let Some(last) = line.pop() {
            line.insert(0, last);
        }
    }
    line
}

/// Pad a short line by spelling `(gross(last) mod 9) + 1` until the
/// target is reached, then truncate.
fn adjust_length(constants: &Constants, mut line: Vec<Letter>, target: usize) -> Vec<Letter> {
    if line.len() >= target {
        line.truncate(target);
        return line;
    }
    debug_assert!(!line.is_empty(), "cannot pad an empty line");
    while line.len() < target {
        let last = *line.last().expect("line is non-empty");
        let value = match constants.gross_value(last) {
            0 => 1,
            v => v,
        };
        line.extend(constants.number_to_letters(value % 9 + 1));
    }
    line.truncate(target);
    line
}

/// Weighted adjacent-pair ratios: the table ratio of each digit pair,
/// scaled by the positional weight and normalized back into [1, 81].
pub fn ratio_line(constants: &Constants, line: &[Letter]) -> Vec<u32> {
    let digits: Vec<u32> = line
        .iter()
        .map(|&l| constants.digital_root(constants.gross_value(l)))
        .collect();
    digits
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let basic = constants.ratio(pair[0], pair[1]);
            let weight = POSITION_WEIGHTS[(i + 1) % POSITION_WEIGHTS.len()];
            let weighted = (basic as f64 * weight).round() as u32;
            normalize_ratio(constants, weighted)
        })
        .collect()
}

fn normalize_ratio(constants: &Constants, mut value: u32) -> u32 {
    while value > 81 {
        value = constants.digital_root(value);
    }
    if value == 0 {
        9
    } else {
        value
    }
}

/// Weighted power substitution: every candidate is scored on three
/// criteria (closest to the original value: 3 points; the nature's
/// preferred family: 2 points; closest to the candidate mean: 1 point).
/// The highest total wins, ties resolving toward the later family in
/// enumeration order. The winning value re-letters by compact lookup,
/// keeping the original letter on a miss.
pub fn power_substitution(constants: &Constants, line: &[Letter]) -> Vec<Letter> {
    line.iter()
        .map(|&letter| {
            let value = constants.gross_value(letter);
            let candidates: Vec<(ModulusFamily, u32)> = ModulusFamily::ALL
                .iter()
                .map(|&f| (f, constants.reduce(f, value)))
                .collect();

            let proximity = candidates
                .iter()
                .min_by_key(|(_, v)| v.abs_diff(value))
                .map(|(f, _)| *f)
                .expect("six candidates");

            let affinity = preferred_family(constants.nature(letter));

            let mean = candidates.iter().map(|(_, v)| *v as f64).sum::<f64>()
                / candidates.len() as f64;
            let balance = candidates
                .iter()
                .fold(None::<(ModulusFamily, f64)>, |best, &(f, v)| {
                    let distance = (v as f64 - mean).abs();
                    match best {
                        Some((_, d)) if d <= distance => best,
                        _ => Some((f, distance)),
                    }
                })
                .map(|(f, _)| f)
                .expect("six candidates");

            let mut winner = candidates[0];
            let mut winner_score = -1i32;
            for &(family, candidate) in &candidates {
                let mut score = 0;
                if family == proximity {
                    score += 3;
                }
                if family == affinity {
                    score += 2;
                }
                if family == balance {
                    score += 1;
                }
                if score >= winner_score {
                    winner = (family, candidate);
                    winner_score = score;
                }
            }

            constants.find_letter_for_compact(winner.1).unwrap_or(letter)
        })
        .collect()
}

/// The first preferred family of each nature's affinity list.
fn preferred_family(nature: Nature) -> ModulusFamily {
    match nature {
        Nature::Fire => ModulusFamily::Elemental,
        Nature::Air => ModulusFamily::Planetary,
        Nature::Water => ModulusFamily::Lunar,
        Nature::Earth => ModulusFamily::Elemental,
    }
}

/// One level of the weighted decimation analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct DecimationLevel {
    /// 1-based level number.
    pub level: usize,
    /// The stride subsequence of the answer line.
    pub text: String,
    /// Count of distinct letters in the subsequence.
    pub distinct_letters: usize,
    /// Gross-value sum of the subsequence.
    pub gross_value: u32,
    /// Letter tally per nature, in table order.
    pub nature_balance: [u32; 4],
    /// Divine-name words contained in the subsequence.
    pub matched_words: Vec<String>,
    /// Level interpretation phrase.
    pub interpretation: String,
}

impl DecimationLevel {
    /// One-line summary for report listings.
    pub fn summary(&self) -> String {
        format!("{} ({})", self.text, self.interpretation)
    }
}

/// The weighted decimation analysis: stride subsequences of the answer
/// line with per-level metrics and interpretations.
pub fn decimation_levels(constants: &Constants, answer: &[Letter]) -> Vec<DecimationLevel> {
    (1..=DECIMATION_LEVELS)
        .map(|level| {
            let pattern = level_pattern(level, answer.len());
            let letters: Vec<Letter> = pattern.iter().filter_map(|&i| answer.get(i).copied()).collect();
            analyze_level(constants, level, &letters)
        })
        .collect()
}

/// Index pattern for a level: stride `level` from index 0 for levels one
/// through six, Fibonacci indices beyond.
fn level_pattern(level: usize, len: usize) -> Vec<usize> {
    if (1..=6).contains(&level) {
        return (0..len).step_by(level).collect();
    }
    let mut pattern = Vec::new();
    let (mut a, mut b) = (0usize, 1usize);
    while a < len {
        pattern.push(a);
        let next = a + b;
        a = b;
        b = next;
    }
    pattern
}

fn analyze_level(constants: &Constants, level: usize, letters: &[Letter]) -> DecimationLevel {
    let text: String = letters.iter().map(Letter::as_char).collect();
    let distinct_letters = letters.iter().collect::<BTreeSet<_>>().len();
    let gross_value = letters.iter().map(|&l| constants.gross_value(l)).sum();

    let mut nature_balance = [0u32; 4];
    for &l in letters {
        let idx = Nature::ALL
            .iter()
            .position(|n| *n == constants.nature(l))
            .unwrap_or(0);
        nature_balance[idx] += 1;
    }

    let matched_words: Vec<String> = DIVINE_NAMES
        .iter()
        .filter(|w| text.contains(*w))
        .map(|w| w.to_string())
        .collect();

    let mut interpretation = level_phrase(level).to_string();
    if !matched_words.is_empty() {
        interpretation.push_str(&format!(" - يحتوي على: {}", matched_words.join(", ")));
    }
    // nature_balance indexes: [fire, air, water, earth]
    if nature_balance[0] > nature_balance[3] * 2 {
        interpretation.push_str(" - الطاقة نارية تحتاج إلى تهدئة");
    }

    DecimationLevel {
        level,
        text,
        distinct_letters,
        gross_value,
        nature_balance,
        matched_words,
        interpretation,
    }
}

fn level_phrase(level: usize) -> &'static str {
    match level {
        1 => "المستوى الأساسي - جوهر الأمر",
        2 => "المستوى الثنائي - التوازن والازدواج",
        3 => "المستوى الثلاثي - التكامل والثبات",
        4 => "المستوى الرباعي - الاستقرار والأركان",
        5 => "المستوى الخماسي - الديناميكية والتغير",
        6 => "المستوى السداسي - الكمال والانسجام",
        _ => "مستوى ممتد",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::letters_to_string;

    fn constants() -> Constants {
        Constants::new()
    }

    #[test]
    fn test_weighted_entrances_position_dependence() {
        let c = constants();
        // Same multiset of letters, different order, different gross.
        let ab = c.text_to_letters("اب");
        let ba = c.text_to_letters("با");
        let (e1, _) = entrances(&c, &ab).unwrap();
        let (e2, _) = entrances(&c, &ba).unwrap();
        // ا=1, ب=2: 1*1 + 2*2 = 5 vs 2*1 + 1*2 = 4.
        assert_eq!(e1.gross, 5);
        assert_eq!(e2.gross, 4);
        assert!((1..=9).contains(&e1.medium_gross));
        assert!((1..=4).contains(&e1.small));
    }

    #[test]
    fn test_weighted_entrances_rejects_empty_question() {
        let c = constants();
        assert!(matches!(
            entrances(&c, &[]),
            Err(EngineError::InvalidState(_))
        ));
    }

    #[test]
    fn test_multiplier_letters() {
        let c = constants();
        // 7 → one ز and no remainder.
        assert_eq!(letters_to_string(&multiplier_letters(&c, 7)), "ز");
        // 16 = 2×7 + 2: زز then ب.
        assert_eq!(letters_to_string(&multiplier_letters(&c, 16)), "ززب");
        // 5 is below every denomination: plain decomposition.
        assert_eq!(letters_to_string(&multiplier_letters(&c, 5)), "ه");
    }

    #[test]
    fn test_weighted_base_line_is_16_letters() {
        let c = constants();
        for text in ["هل أنجح", "ب", "هل أنجح في هذا العام الطويل"] {
            let q = c.text_to_letters(text);
            let (e, reduced) = entrances(&c, &q).unwrap();
            let base = base_line(&c, &e, &reduced, &q);
            assert_eq!(base.len(), 16, "question {text:?}");
        }
    }

    #[test]
    fn test_rotate_right() {
        let line: Vec<Letter> = "ابج".chars().map(Letter::new).collect();
        assert_eq!(letters_to_string(&rotate_right(line, 1)), "جاب");
    }

    #[test]
    fn test_arrange_question_halves_and_swaps() {
        let q: Vec<Letter> = "ابجده".chars().map(Letter::new).collect();
        assert_eq!(letters_to_string(&arrange_question(&q)), "جدهاب");
        let short: Vec<Letter> = "اب".chars().map(Letter::new).collect();
        assert_eq!(letters_to_string(&arrange_question(&short)), "اب");
    }

    #[test]
    fn test_weighted_ratio_line_range() {
        let c = constants();
        let line: Vec<Letter> = "ابجدهوزحطي".chars().map(Letter::new).collect();
        let ratios = ratio_line(&c, &line);
        assert_eq!(ratios.len(), line.len() - 1);
        assert!(ratios.iter().all(|r| (1..=81).contains(r)));
    }

    #[test]
    fn test_weighted_ratio_weights_positions() {
        let c = constants();
        // Identical digit pairs at different positions scale differently.
        let line: Vec<Letter> = "ببب".chars().map(Letter::new).collect();
        let ratios = ratio_line(&c, &line);
        // ratio(2,2) = 4; weights 1.2 then 1.4 → 5 then 6.
        assert_eq!(ratios, vec![5, 6]);
    }

    #[test]
    fn test_weighted_power_substitution_is_deterministic() {
        let c = constants();
        let line: Vec<Letter> = "قرشتث".chars().map(Letter::new).collect();
        assert_eq!(power_substitution(&c, &line), power_substitution(&c, &line));
    }

    #[test]
    fn test_decimation_levels_strides() {
        let c = constants();
        let answer: Vec<Letter> = "ابجدهوزحطي".chars().map(Letter::new).collect();
        let levels = decimation_levels(&c, &answer);
        assert_eq!(levels.len(), DECIMATION_LEVELS);
        assert_eq!(levels[0].text, "ابجدهوزحطي");
        assert_eq!(levels[1].text, "اجهزط");
        assert_eq!(levels[2].text, "ادزي");
        assert!(!levels[0].interpretation.is_empty());
        assert_eq!(levels[0].gross_value, 1 + 2 + 3 + 4 + 5 + 6 + 7 + 8 + 9 + 10);
    }

    #[test]
    fn test_level_pattern_fibonacci_beyond_six() {
        let pattern = level_pattern(7, 10);
        assert_eq!(pattern, vec![0, 1, 1, 2, 3, 5, 8]);
    }
}
