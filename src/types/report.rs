//! Report types: entrances, the fifteen named lines, external factors,
//! analysis, and the assembled calculation report.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Letter;

/// The four aggregate entrances derived from the question letters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrances {
    /// Sum of gross values of all question letters.
    pub gross: u32,
    /// Digital root of the gross entrance.
    pub medium_gross: u32,
    /// Sum of the digital roots of each letter's gross value.
    pub medium_sum: u32,
    /// Digital root of the medium sum.
    pub small: u32,
}

/// Identifier of one of the fifteen derivation lines, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineId {
    /// Line 1: the 16-letter base line.
    Base,
    /// Line 2: mirror of the base line.
    Mirror,
    /// Line 3: adjacent-pair ratios of the base line.
    BaseRatio,
    /// Line 4: adjacent-pair ratios of the mirror line.
    MirrorRatio,
    /// Line 5: first complement (lines 3 and 4 combined).
    Complement1,
    /// Line 6: pairwise base–mirror ratios, first pass.
    BaseMirrorRatio1,
    /// Line 7: pairwise base–mirror ratios, rotated pass.
    BaseMirrorRatio2,
    /// Line 8: second complement (lines 6 and 7 combined).
    Complement2,
    /// Line 9: complement of the two complements.
    ComplementOfComplements,
    /// Line 10: the complement values re-lettered.
    DigitRelettering,
    /// Line 11: power substitution over line 10.
    PowerSubstitution,
    /// Line 12: fusion with the external factors.
    Fusion,
    /// Line 13: refinement of the fusion line.
    Refinement,
    /// Line 14: mirror of the refinement line.
    RefinementMirror,
    /// Line 15: the zig-zag answer line.
    Answer,
}

impl LineId {
    /// All fifteen line identifiers in pipeline order.
    pub const ALL: [LineId; 15] = [
        LineId::Base,
        LineId::Mirror,
        LineId::BaseRatio,
        LineId::MirrorRatio,
        LineId::Complement1,
        LineId::BaseMirrorRatio1,
        LineId::BaseMirrorRatio2,
        LineId::Complement2,
        LineId::ComplementOfComplements,
        LineId::DigitRelettering,
        LineId::PowerSubstitution,
        LineId::Fusion,
        LineId::Refinement,
        LineId::RefinementMirror,
        LineId::Answer,
    ];

    /// 1-based position of the line in the pipeline.
    pub fn number(&self) -> usize {
        Self::ALL.iter().position(|l| l == self).unwrap_or(0) + 1
    }

    /// Traditional title of the line, for report listings.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Base => "سطر الأساس",
            Self::Mirror => "سطر النظيرة",
            Self::BaseRatio => "حاصل نسبة الأساس",
            Self::MirrorRatio => "حاصل نسبة النظيرة",
            Self::Complement1 => "سطر التتمة الأولى",
            Self::BaseMirrorRatio1 => "حاصل نسبة الأساس والنظيرة الأولى",
            Self::BaseMirrorRatio2 => "حاصل نسبة الأساس والنظيرة الثانية",
            Self::Complement2 => "سطر التتمة الثانية",
            Self::ComplementOfComplements => "سطر تتمة التتمتين",
            Self::DigitRelettering => "سطر حاصل الأعداد",
            Self::PowerSubstitution => "سطر القوى",
            Self::Fusion => "سطر الحاصل",
            Self::Refinement => "سطر المستحصلة الشريفة",
            Self::RefinementMirror => "سطر نظير المستحصلة",
            Self::Answer => "سطر الجواب",
        }
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Base => "base",
            Self::Mirror => "mirror",
            Self::BaseRatio => "base_ratio",
            Self::MirrorRatio => "mirror_ratio",
            Self::Complement1 => "complement_1",
            Self::BaseMirrorRatio1 => "base_mirror_ratio_1",
            Self::BaseMirrorRatio2 => "base_mirror_ratio_2",
            Self::Complement2 => "complement_2",
            Self::ComplementOfComplements => "complement_of_complements",
            Self::DigitRelettering => "digit_relettering",
            Self::PowerSubstitution => "power_substitution",
            Self::Fusion => "fusion",
            Self::Refinement => "refinement",
            Self::RefinementMirror => "refinement_mirror",
            Self::Answer => "answer",
        };
        write!(f, "{name}")
    }
}

/// A borrowed view of one line's content: letters or small integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineValue<'a> {
    /// A letter line.
    Letters(&'a [Letter]),
    /// A numeric (ratio/complement) line.
    Numbers(&'a [u32]),
}

impl fmt::Display for LineValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Letters(letters) => {
                for l in *letters {
                    write!(f, "{l}")?;
                }
                Ok(())
            }
            Self::Numbers(values) => {
                let joined: Vec<String> = values.iter().map(u32::to_string).collect();
                write!(f, "{}", joined.join(" "))
            }
        }
    }
}

/// The fifteen named lines, in pipeline order.
///
/// Every line is a pure function of the lines, entrances and tables
/// computed strictly before it; no line is ever recomputed once set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lines {
    /// Line 1, always exactly 16 letters.
    pub base: Vec<Letter>,
    /// Line 2.
    pub mirror: Vec<Letter>,
    /// Line 3, length `|base| - 1`.
    pub base_ratio: Vec<u32>,
    /// Line 4, length `|mirror| - 1`.
    pub mirror_ratio: Vec<u32>,
    /// Line 5.
    pub complement_1: Vec<u32>,
    /// Line 6.
    pub base_mirror_ratio_1: Vec<u32>,
    /// Line 7: line 6 rotated left by one.
    pub base_mirror_ratio_2: Vec<u32>,
    /// Line 8.
    pub complement_2: Vec<u32>,
    /// Line 9.
    pub complement_of_complements: Vec<u32>,
    /// Line 10.
    pub digit_relettering: Vec<Letter>,
    /// Line 11.
    pub power_substitution: Vec<Letter>,
    /// Line 12.
    pub fusion: Vec<Letter>,
    /// Line 13.
    pub refinement: Vec<Letter>,
    /// Line 14.
    pub refinement_mirror: Vec<Letter>,
    /// Line 15: a permutation of line 14.
    pub answer: Vec<Letter>,
}

impl Lines {
    /// Borrowed view of a line by identifier.
    pub fn get(&self, id: LineId) -> LineValue<'_> {
        match id {
            LineId::Base => LineValue::Letters(&self.base),
            LineId::Mirror => LineValue::Letters(&self.mirror),
            LineId::BaseRatio => LineValue::Numbers(&self.base_ratio),
            LineId::MirrorRatio => LineValue::Numbers(&self.mirror_ratio),
            LineId::Complement1 => LineValue::Numbers(&self.complement_1),
            LineId::BaseMirrorRatio1 => LineValue::Numbers(&self.base_mirror_ratio_1),
            LineId::BaseMirrorRatio2 => LineValue::Numbers(&self.base_mirror_ratio_2),
            LineId::Complement2 => LineValue::Numbers(&self.complement_2),
            LineId::ComplementOfComplements => {
                LineValue::Numbers(&self.complement_of_complements)
            }
            LineId::DigitRelettering => LineValue::Letters(&self.digit_relettering),
            LineId::PowerSubstitution => LineValue::Letters(&self.power_substitution),
            LineId::Fusion => LineValue::Letters(&self.fusion),
            LineId::Refinement => LineValue::Letters(&self.refinement),
            LineId::RefinementMirror => LineValue::Letters(&self.refinement_mirror),
            LineId::Answer => LineValue::Letters(&self.answer),
        }
    }

    /// All lines with their identifiers, in pipeline order.
    pub fn entries(&self) -> impl Iterator<Item = (LineId, LineValue<'_>)> {
        LineId::ALL.iter().map(move |&id| (id, self.get(id)))
    }
}

/// The four external factors, each folded into letters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalFactors {
    /// Temporal factor (day bucket + month index × 50 + year, reduced).
    pub time: Vec<Letter>,
    /// Astrological factor (rising + moon sign + mansion, reduced).
    pub astro: Vec<Letter>,
    /// Name factor (asker + mother gross sums, reduced).
    pub name: Vec<Letter>,
    /// Unreduced sum of the three numeric factors, spelled directly.
    pub combined: Vec<Letter>,
}

/// Dominance band of a pairwise comparison, by difference over sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dominance {
    /// Difference below 10% of the sum.
    NearEqual,
    /// Difference below 30% of the sum.
    SlightEdge,
    /// Difference below 50% of the sum.
    ClearEdge,
    /// Difference at or above 50% of the sum.
    LargeEdge,
}

impl Dominance {
    /// Advisory phrase for the band.
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::NearEqual => "التوازن قريب جداً - الأمر متساوٍ",
            Self::SlightEdge => "تفوق طفيف - يحتاج إلى جهد إضافي",
            Self::ClearEdge => "تفوق واضح - الميزة لطرف",
            Self::LargeEdge => "تفوق كبير - الغلبة واضحة",
        }
    }
}

/// Numeral-sum comparison between two derived letter sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Gross-value sum of the first sequence.
    pub left_value: u32,
    /// Gross-value sum of the second sequence.
    pub right_value: u32,
    /// Absolute difference of the two sums.
    pub difference: u32,
    /// Larger sum over smaller sum (1 when equal).
    pub ratio: f64,
    /// Dominance band by difference over sum.
    pub dominance: Dominance,
    /// Band phrase plus the parity note.
    pub verdict: String,
}

/// Interpretive analysis of the answer line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Matched-word phrases, or the decimation fallback text.
    pub interpretation_text: String,
    /// The decimation subsequences (or weighted level summaries).
    pub decomposition_levels: Vec<String>,
    /// Advisory phrase from the nature-balance tally.
    pub recommendations: String,
    /// Base-line vs answer-line comparison.
    pub comparison: Option<Comparison>,
}

/// Engine status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Fresh context, no run started.
    #[default]
    Ready,
    /// A run is in flight.
    Processing,
    /// The last run completed; the context is read-only.
    Completed,
    /// The last run aborted.
    Error,
}

impl Status {
    /// Parse status from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ready" => Some(Self::Ready),
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// The assembled calculation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Whether the run completed.
    pub success: bool,
    /// Final interpreted answer text (falls back to the answer line).
    pub answer: String,
    /// SHA-256 of the normalized question text.
    pub question_hash: String,
    /// The four entrances.
    pub entrances: Entrances,
    /// The fifteen named lines.
    pub lines: Lines,
    /// The four external factors.
    pub external_factors: ExternalFactors,
    /// Interpretive analysis.
    pub analysis: Analysis,
    /// Elapsed wall-clock milliseconds for the run.
    pub duration_ms: u64,
}

impl Report {
    /// Canonical fingerprint of the report for replay verification.
    ///
    /// Two runs over the same inputs and profile must produce identical
    /// fingerprints. The duration is excluded: it is the one
    /// non-deterministic field.
    pub fn fingerprint(&self) -> String {
        let mut stable = self.clone();
        stable.duration_ms = 0;
        crate::canonical::canonical_hash_hex(&stable)
    }
}
