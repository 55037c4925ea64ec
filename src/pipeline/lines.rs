//! The classic fifteen-stage line derivation.
//!
//! Every stage is a pure function over strictly earlier stages and the
//! constants tables. The orchestrator calls them in fixed order; a stage
//! invoked out of order is a programming error, not a recoverable
//! condition, so preconditions here are expressed through the argument
//! lists rather than runtime state checks.

use crate::constants::{Constants, ModulusFamily};
use crate::types::{Entrances, Letter};

/// Target length of the base line.
pub const BASE_LINE_LEN: usize = 16;

/// Minimum letter count before question letters are prepended.
const MIN_SYNTHESIZED_LEN: usize = 8;

/// Stage 1: synthesize the base line from the entrance digits.
///
/// The decimal digits of the four entrances are spelled into letters
/// (nonzero digits only); if fewer than 8 letters result, leading
/// question letters are prepended. The line is then forced to exactly
/// 16 letters: truncated if longer, self-concatenated and truncated if
/// shorter.
pub fn base_line(
    constants: &Constants,
    entrances: &Entrances,
    question: &[Letter],
) -> Vec<Letter> {
    let digits: String = [
        entrances.gross,
        entrances.medium_gross,
        entrances.medium_sum,
        entrances.small,
    ]
    .iter()
    .map(u32::to_string)
    .collect();

    let mut letters: Vec<Letter> = Vec::new();
    for ch in digits.chars() {
        let digit = ch.to_digit(10).unwrap_or(0);
        if digit > 0 {
            letters.extend(constants.number_to_letters(digit));
        }
    }

    if letters.len() < MIN_SYNTHESIZED_LEN {
        let mut prefixed: Vec<Letter> = question
            .iter()
            .take(MIN_SYNTHESIZED_LEN - letters.len())
            .copied()
            .collect();
        prefixed.extend(letters);
        letters = prefixed;
    }

    force_length(letters, BASE_LINE_LEN)
}

/// Force a non-empty letter sequence to an exact length by truncation or
/// self-concatenation.
pub(crate) fn force_length(mut letters: Vec<Letter>, target: usize) -> Vec<Letter> {
    debug_assert!(!letters.is_empty(), "cannot stretch an empty line");
    if letters.len() > target {
        letters.truncate(target);
    } else {
        while letters.len() < target {
            let copy = letters.clone();
            letters.extend(copy);
        }
        letters.truncate(target);
    }
    letters
}

/// Stage 2 (and 14): mirror every letter, falling back to the original
/// letter where no mirror is defined.
pub fn mirror_line(constants: &Constants, line: &[Letter]) -> Vec<Letter> {
    line.iter()
        .map(|&l| constants.mirror(l).unwrap_or(l))
        .collect()
}

/// Stages 3 and 4: ratio of each adjacent letter pair, with each letter
/// reduced to the digital root of its gross value. Length is
/// `|line| - 1`.
pub fn adjacent_ratio_line(constants: &Constants, line: &[Letter]) -> Vec<u32> {
    let digits: Vec<u32> = line
        .iter()
        .map(|&l| constants.digital_root(constants.gross_value(l)))
        .collect();
    digits
        .windows(2)
        .map(|pair| constants.ratio(pair[0], pair[1]))
        .collect()
}

/// Stages 5, 8 and 9: element-wise combination of two numeric lines.
/// Equal values sum; unequal values take the absolute difference. Zips
/// over the shorter line.
pub fn complement_line(a: &[u32], b: &[u32]) -> Vec<u32> {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| if x == y { x + y } else { x.abs_diff(y) })
        .collect()
}

/// Stage 6: ratio of the base and mirror letters at each index, both
/// reduced to digits.
pub fn pairwise_ratio_line(constants: &Constants, a: &[Letter], b: &[Letter]) -> Vec<u32> {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let dx = constants.digital_root(constants.gross_value(x));
            let dy = constants.digital_root(constants.gross_value(y));
            constants.ratio(dx, dy)
        })
        .collect()
}

/// Stage 7: left-rotation by one position (first element moved to the
/// end).
pub fn rotate_left(values: &[u32]) -> Vec<u32> {
    if values.is_empty() {
        return Vec::new();
    }
    let mut rotated: Vec<u32> = values[1..].to_vec();
    rotated.push(values[0]);
    rotated
}

/// Stage 10: re-letter each complement value. Values up to 28 look up
/// their compact letter directly; larger values (or a direct miss) pass
/// through the celestial reduction first.
pub fn digit_relettering(constants: &Constants, values: &[u32]) -> Vec<Letter> {
    values
        .iter()
        .map(|&n| {
            let direct = if n <= 28 {
                constants.find_letter_for_compact(n)
            } else {
                None
            };
            direct.unwrap_or_else(|| {
                constants.letter_for_compact(constants.reduce(ModulusFamily::Celestial, n))
            })
        })
        .collect()
}

/// Stage 11: power substitution. Each letter's gross value is reduced by
/// all six modulus families; the candidate numerically closest to the
/// original value wins, ties broken by family enumeration order. The
/// winning value is re-lettered by compact lookup, keeping the original
/// letter when no compact letter matches.
pub fn power_substitution(constants: &Constants, line: &[Letter]) -> Vec<Letter> {
    line.iter()
        .map(|&letter| {
            let value = constants.gross_value(letter);
            let best = best_reduction(constants, value);
            constants.find_letter_for_compact(best).unwrap_or(letter)
        })
        .collect()
}

/// The six-family reduction candidate closest to the original value;
/// first family wins ties.
pub(crate) fn best_reduction(constants: &Constants, value: u32) -> u32 {
    let mut best = constants.reduce(ModulusFamily::ALL[0], value);
    for family in &ModulusFamily::ALL[1..] {
        let candidate = constants.reduce(*family, value);
        if candidate.abs_diff(value) < best.abs_diff(value) {
            best = candidate;
        }
    }
    best
}

/// Stage 12: fuse the base, mirror and power-substitution lines with the
/// combined external-factor letters. Every letter is reduced to the
/// digital root of its gross value and re-lettered by compact lookup
/// (fallback letter on a miss).
pub fn fusion_line(
    constants: &Constants,
    base: &[Letter],
    mirror: &[Letter],
    power: &[Letter],
    combined_factor: &[Letter],
) -> Vec<Letter> {
    base.iter()
        .chain(mirror.iter())
        .chain(power.iter())
        .chain(combined_factor.iter())
        .map(|&l| {
            let digit = constants.digital_root(constants.gross_value(l));
            constants.letter_for_compact(digit)
        })
        .collect()
}

/// Stage 13: refinement. Each fusion letter combines an abjad distance
/// (celestial reduction of its gross value) with a table distance (its
/// position within its nature circle, mod 4, plus one; 1 when absent),
/// taken mod 9 with 0 mapping to 9, then re-letters by compact lookup
/// (keeping the original letter on a miss).
pub fn refinement_line(constants: &Constants, fusion: &[Letter]) -> Vec<Letter> {
    fusion
        .iter()
        .map(|&letter| {
            let abjad_distance =
                constants.reduce(ModulusFamily::Celestial, constants.gross_value(letter));
            let circle = constants.nature_circle(constants.nature(letter));
            let table_distance = circle
                .iter()
                .position(|&l| l == letter)
                .map(|i| (i % 4) as u32 + 1)
                .unwrap_or(1);
            let combined = match (abjad_distance + table_distance) % 9 {
                0 => 9,
                n => n,
            };
            constants.find_letter_for_compact(combined).unwrap_or(letter)
        })
        .collect()
}

/// Stage 15: zig-zag interleave. Starting from the tail, alternately
/// take one letter from the tail end and one from the head end,
/// shrinking the window, until all letters are consumed. The result is
/// a permutation of the input.
pub fn zigzag_interleave(line: &[Letter]) -> Vec<Letter> {
    let len = line.len();
    let mut out = Vec::with_capacity(len);
    let mut start = 0usize;
    let mut end = len;
    for i in 0..len {
        if i % 2 == 0 {
            end -= 1;
            out.push(line[end]);
        } else {
            out.push(line[start]);
            start += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::entrances::entrances;
    use crate::types::letters_to_string;

    fn constants() -> Constants {
        Constants::new()
    }

    fn question(c: &Constants, text: &str) -> Vec<Letter> {
        c.text_to_letters(text)
    }

    #[test]
    fn test_base_line_is_always_16_letters() {
        let c = constants();
        for text in ["هل أنجح", "ب", "هل أنجح في هذا العام الطويل جداً"] {
            let q = question(&c, text);
            let e = entrances(&c, &q).unwrap();
            let base = base_line(&c, &e, &q);
            assert_eq!(base.len(), BASE_LINE_LEN, "question {text:?}");
        }
    }

    #[test]
    fn test_short_synthesis_prepends_question_letters() {
        let c = constants();
        // A single letter question gives few entrance digits, so the line
        // must borrow its leading letters from the question.
        let q = question(&c, "ب");
        let e = entrances(&c, &q).unwrap();
        let base = base_line(&c, &e, &q);
        assert_eq!(base[0], Letter::new('ب'));
    }

    #[test]
    fn test_force_length_doubles_then_truncates() {
        let line: Vec<Letter> = "ابج".chars().map(Letter::new).collect();
        let forced = force_length(line, 8);
        assert_eq!(letters_to_string(&forced), "ابجابجاب");
    }

    #[test]
    fn test_mirror_line_falls_back_to_original() {
        let c = constants();
        let line = vec![Letter::new('ا'), Letter::new('x')];
        let mirrored = mirror_line(&c, &line);
        assert_eq!(mirrored[0], Letter::new('غ'));
        assert_eq!(mirrored[1], Letter::new('x'));
    }

    #[test]
    fn test_adjacent_ratio_line_length() {
        let c = constants();
        let q = question(&c, "هل أنجح");
        let e = entrances(&c, &q).unwrap();
        let base = base_line(&c, &e, &q);
        let ratios = adjacent_ratio_line(&c, &base);
        assert_eq!(ratios.len(), base.len() - 1);
        assert!(ratios.iter().all(|r| (1..=9).contains(r)));
    }

    #[test]
    fn test_complement_sums_equal_values() {
        assert_eq!(complement_line(&[5, 3, 7], &[5, 9, 7]), vec![10, 6, 14]);
    }

    #[test]
    fn test_complement_zips_shorter_line() {
        assert_eq!(complement_line(&[1, 2], &[1, 2, 3, 4]), vec![2, 4]);
    }

    #[test]
    fn test_rotate_left() {
        assert_eq!(rotate_left(&[1, 2, 3]), vec![2, 3, 1]);
        assert_eq!(rotate_left(&[]), Vec::<u32>::new());
    }

    #[test]
    fn test_digit_relettering_direct_and_reduced() {
        let c = constants();
        // 3 → ج directly; 30 → celestial 3 → ج as well.
        let line = digit_relettering(&c, &[3, 30]);
        assert_eq!(letters_to_string(&line), "جج");
        // 28 → غ directly, no reduction.
        let line = digit_relettering(&c, &[28]);
        assert_eq!(letters_to_string(&line), "غ");
    }

    #[test]
    fn test_best_reduction_prefers_closest_then_first_family() {
        let c = constants();
        // For 10 the candidates are [2, 3, 1, 10, 10, 10]; zodiacal hits
        // the value exactly and lunar/gradient tie behind it.
        assert_eq!(best_reduction(&c, 10), 10);
        // For 5 every family returns 5 except elemental (1); the first
        // exact candidate wins.
        assert_eq!(best_reduction(&c, 5), 5);
    }

    #[test]
    fn test_power_substitution_keeps_letter_on_missing_compact() {
        let c = constants();
        // ل has gross 30; the gradient family keeps it at 30, which has
        // no compact letter, so the original letter survives.
        let line = power_substitution(&c, &[Letter::new('ل')]);
        assert_eq!(line, vec![Letter::new('ل')]);
    }

    #[test]
    fn test_fusion_line_length_is_sum_of_parts() {
        let c = constants();
        let base: Vec<Letter> = "ابجدابجدابجدابجد".chars().map(Letter::new).collect();
        let mirror = mirror_line(&c, &base);
        let power: Vec<Letter> = "هوز".chars().map(Letter::new).collect();
        let combined: Vec<Letter> = "كج".chars().map(Letter::new).collect();
        let fusion = fusion_line(&c, &base, &mirror, &power, &combined);
        assert_eq!(fusion.len(), 16 + 16 + 3 + 2);
    }

    #[test]
    fn test_refinement_values_stay_in_digit_range() {
        let c = constants();
        let fusion: Vec<Letter> = "اهطمفشذبويق".chars().map(Letter::new).collect();
        let refined = refinement_line(&c, &fusion);
        for l in &refined {
            let compact = c.compact_value(*l);
            assert!((1..=9).contains(&compact), "{l} has compact {compact}");
        }
    }

    #[test]
    fn test_zigzag_is_a_permutation() {
        let line: Vec<Letter> = "ابجده".chars().map(Letter::new).collect();
        let answer = zigzag_interleave(&line);
        assert_eq!(letters_to_string(&answer), "هادبج");
        let mut sorted_in = line.clone();
        let mut sorted_out = answer.clone();
        sorted_in.sort();
        sorted_out.sort();
        assert_eq!(sorted_in, sorted_out);
    }

    #[test]
    fn test_zigzag_empty_input() {
        assert!(zigzag_interleave(&[]).is_empty());
    }
}
