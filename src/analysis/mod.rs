//! Interpretation engine: lexical matching, decimation analysis,
//! nature-balance scoring and pairwise comparison.

pub mod lexicon;

use crate::constants::Constants;
use crate::types::{Comparison, Dominance, Letter, Nature};

use lexicon::{
    COMMON_WORDS, GENERIC_REFLECTION, NATURE_ADVICE, STAGE_1_MEANINGS, STAGE_2_MEANINGS,
    STAGE_3_MEANINGS, WORD_MEANINGS,
};

/// Greedy lexical pass over the answer line.
///
/// Letters accumulate until the running substring (two letters or more)
/// matches a dictionary word by containment in either direction; matched
/// words map to canned phrases. Returns the empty string when nothing
/// maps, which sends the caller to the decimation fallback.
pub fn lexical_interpretation(answer: &[Letter]) -> String {
    let mut out = String::new();
    for word in split_into_words(answer) {
        if word.chars().count() >= 2 {
            if let Some(meaning) = word_meaning(&word) {
                out.push_str(meaning);
                out.push(' ');
            }
        }
    }
    out.trim_end().to_string()
}

fn split_into_words(answer: &[Letter]) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut count = 0usize;
    for l in answer {
        current.push(l.as_char());
        count += 1;
        if count >= 2 && is_possible_word(&current) {
            words.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn is_possible_word(candidate: &str) -> bool {
    COMMON_WORDS
        .iter()
        .any(|w| w.contains(candidate) || candidate.contains(w))
}

fn word_meaning(word: &str) -> Option<&'static str> {
    WORD_MEANINGS
        .iter()
        .find(|(k, _)| *k == word)
        .map(|(_, v)| *v)
}

/// Classic decimation: for each step count k = 1..min(6, len), the
/// subsequence taking every (k+1)-th letter starting at offset k.
pub fn decimate(answer: &[Letter]) -> Vec<String> {
    let len = answer.len();
    (0..len.min(6))
        .map(|i| {
            answer
                .iter()
                .skip(i)
                .step_by(i + 1)
                .map(Letter::as_char)
                .collect()
        })
        .collect()
}

/// Score the decimation subsequences against the per-stage keyword
/// dictionaries, concatenating every match tagged with its stage
/// number. Emits the generic reflection message when nothing matches.
pub fn decimation_interpretation(levels: &[String]) -> String {
    let mut out = String::new();
    for (i, segment) in levels.iter().enumerate() {
        if segment.chars().count() >= 3 {
            if let Some(meaning) = stage_meaning(segment, i + 1) {
                out.push_str(&format!("(المرحلة {}: {}) ", i + 1, meaning));
            }
        }
    }
    if out.is_empty() {
        GENERIC_REFLECTION.to_string()
    } else {
        out.trim_end().to_string()
    }
}

fn stage_meaning(segment: &str, stage: usize) -> Option<&'static str> {
    let dict: &[(&str, &str)] = match stage {
        1 => &STAGE_1_MEANINGS,
        2 => &STAGE_2_MEANINGS,
        3 => &STAGE_3_MEANINGS,
        _ => return None,
    };
    dict.iter()
        .find(|(k, _)| segment.contains(k))
        .map(|(_, v)| *v)
}

/// Nature-balance scoring: tally nature membership over the given
/// letters and return the advisory phrase of the majority class. Ties
/// resolve toward the later class in table order.
pub fn nature_recommendations<'a, I>(constants: &Constants, letters: I) -> String
where
    I: IntoIterator<Item = &'a Letter>,
{
    let mut counts = [0u32; 4];
    for &l in letters {
        let idx = Nature::ALL
            .iter()
            .position(|n| *n == constants.nature(l))
            .unwrap_or(0);
        counts[idx] += 1;
    }
    let mut majority = 0usize;
    for i in 1..counts.len() {
        if counts[i] >= counts[majority] {
            majority = i;
        }
    }
    NATURE_ADVICE[majority].to_string()
}

/// Pairwise numeral comparison between two derived letter sequences.
///
/// Sums gross values per side, classifies dominance into four bands by
/// difference over sum, and appends a parity note.
pub fn compare(constants: &Constants, left: &[Letter], right: &[Letter]) -> Comparison {
    let left_value: u32 = left.iter().map(|&l| constants.gross_value(l)).sum();
    let right_value: u32 = right.iter().map(|&l| constants.gross_value(l)).sum();

    let difference = left_value.abs_diff(right_value);
    let larger = left_value.max(right_value);
    let smaller = left_value.min(right_value);
    let ratio = if smaller == 0 {
        if larger == 0 {
            1.0
        } else {
            larger as f64
        }
    } else {
        larger as f64 / smaller as f64
    };

    let sum = left_value + right_value;
    let fraction = if sum == 0 {
        0.0
    } else {
        difference as f64 / sum as f64
    };
    let dominance = if fraction < 0.10 {
        Dominance::NearEqual
    } else if fraction < 0.30 {
        Dominance::SlightEdge
    } else if fraction < 0.50 {
        Dominance::ClearEdge
    } else {
        Dominance::LargeEdge
    };

    let parity = if left_value % 2 == right_value % 2 {
        if left_value % 2 == 0 {
            " - كلا الطرفين زوجيان"
        } else {
            " - كلا الطرفين فرديان"
        }
    } else {
        " - أحدهما زوجي والآخر فردي"
    };

    Comparison {
        left_value,
        right_value,
        difference,
        ratio,
        dominance,
        verdict: format!("{}{}", dominance.phrase(), parity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(text: &str) -> Vec<Letter> {
        text.chars().map(Letter::new).collect()
    }

    #[test]
    fn test_lexical_interpretation_matches_exact_word() {
        // فتح never triggers an early cut, so the whole accumulator
        // reaches the meanings table as one word.
        let interpretation = lexical_interpretation(&letters("فتح"));
        assert_eq!(interpretation, "الفتح والنصر");
    }

    #[test]
    fn test_lexical_pass_cuts_on_containment() {
        // نو is contained in النور, so the accumulator is cut after two
        // letters and the fragment has no exact meaning.
        let interpretation = lexical_interpretation(&letters("نور"));
        assert!(interpretation.is_empty());
    }

    #[test]
    fn test_lexical_interpretation_empty_on_no_match() {
        let interpretation = lexical_interpretation(&letters("ضظغضظغ"));
        assert!(interpretation.is_empty());
    }

    #[test]
    fn test_decimate_strides() {
        let levels = decimate(&letters("ابجدهوزح"));
        assert_eq!(levels.len(), 6);
        // Offset 0, step 1: everything.
        assert_eq!(levels[0], "ابجدهوزح");
        // Offset 1, step 2: indices 1, 3, 5, 7.
        assert_eq!(levels[1], "بدوح");
        // Offset 2, step 3: indices 2, 5.
        assert_eq!(levels[2], "جو");
    }

    #[test]
    fn test_decimate_short_input() {
        assert_eq!(decimate(&letters("اب")).len(), 2);
        assert!(decimate(&[]).is_empty());
    }

    #[test]
    fn test_decimation_interpretation_tags_stages() {
        let levels = vec!["خير معنا".to_string(), "صبر".to_string()];
        let text = decimation_interpretation(&levels);
        assert!(text.contains("المرحلة 1"));
        assert!(text.contains("الخير حاضر"));
        // Stage 2 segment matches but has the stage-2 dictionary.
        assert!(text.contains("الصبر مطلوب"));
    }

    #[test]
    fn test_decimation_interpretation_generic_fallback() {
        let levels = vec!["ضضض".to_string()];
        assert_eq!(
            decimation_interpretation(&levels),
            lexicon::GENERIC_REFLECTION
        );
    }

    #[test]
    fn test_nature_recommendations_majority() {
        let c = Constants::new();
        // All fire letters.
        let advice = nature_recommendations(&c, &letters("اهطم"));
        assert_eq!(advice, NATURE_ADVICE[0]);
        // All earth letters.
        let advice = nature_recommendations(&c, &letters("دحلع"));
        assert_eq!(advice, NATURE_ADVICE[3]);
    }

    #[test]
    fn test_compare_equal_sums_near_equal() {
        let c = Constants::new();
        let comparison = compare(&c, &letters("اب"), &letters("ج"));
        assert_eq!(comparison.left_value, 3);
        assert_eq!(comparison.right_value, 3);
        assert_eq!(comparison.difference, 0);
        assert_eq!(comparison.ratio, 1.0);
        assert_eq!(comparison.dominance, Dominance::NearEqual);
        assert!(comparison.verdict.contains("فرديان"));
    }

    #[test]
    fn test_compare_large_edge_and_parity() {
        let c = Constants::new();
        // غ = 1000 vs ا = 1: difference / sum well over one half.
        let comparison = compare(&c, &letters("غ"), &letters("ا"));
        assert_eq!(comparison.dominance, Dominance::LargeEdge);
        assert!(comparison.verdict.contains("أحدهما زوجي والآخر فردي"));
    }

    #[test]
    fn test_compare_bands() {
        let c = Constants::new();
        // 10 vs 12: diff 2, sum 22, fraction ≈ 0.09 → near equal.
        let comparison = compare(&c, &letters("ي"), &letters("يب"));
        assert_eq!(comparison.dominance, Dominance::NearEqual);
        // 10 vs 20: diff 10, sum 30, fraction ≈ 0.33 → clear edge.
        let comparison = compare(&c, &letters("ي"), &letters("ك"));
        assert_eq!(comparison.dominance, Dominance::ClearEdge);
    }
}
