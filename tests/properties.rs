//! Property tests for the table contracts and pipeline invariants.

use proptest::prelude::*;

use jafr_engine::pipeline::{zigzag_interleave, BASE_LINE_LEN};
use jafr_engine::{Constants, Consultation, JafrEngine, Letter, ModulusFamily, Profile};

const ALPHABET: &str = "ابجدهوزحطيكلمنسعفصقرشتثخذضظغ";

fn alphabet_letter() -> impl Strategy<Value = char> {
    proptest::sample::select(ALPHABET.chars().collect::<Vec<char>>())
}

fn question() -> impl Strategy<Value = String> {
    proptest::collection::vec(alphabet_letter(), 1..40)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_base_line_is_always_16_letters(q in question()) {
        let c = Constants::new();
        let letters = c.text_to_letters(&q);
        let entrances = jafr_engine::pipeline::entrances(&c, &letters).unwrap();
        let base = jafr_engine::pipeline::base_line(&c, &entrances, &letters);
        prop_assert_eq!(base.len(), BASE_LINE_LEN);
    }

    #[test]
    fn prop_weighted_base_line_is_always_16_letters(q in question()) {
        let c = Constants::new();
        let letters = c.text_to_letters(&q);
        let (entrances, reduced) =
            jafr_engine::pipeline::weighted::entrances(&c, &letters).unwrap();
        let base = jafr_engine::pipeline::weighted::base_line(&c, &entrances, &reduced, &letters);
        prop_assert_eq!(base.len(), BASE_LINE_LEN);
    }

    #[test]
    fn prop_reduced_entrances_are_single_digits(q in question()) {
        let c = Constants::new();
        let letters = c.text_to_letters(&q);
        let e = jafr_engine::pipeline::entrances(&c, &letters).unwrap();
        prop_assert!((1..=9).contains(&e.medium_gross));
        prop_assert!((1..=9).contains(&e.small));
    }

    #[test]
    fn prop_reduce_stays_in_range_and_multiples_map_to_modulus(n in 1u32..1_000_000) {
        let c = Constants::new();
        for family in ModulusFamily::ALL {
            let m = family.modulus();
            let r = c.reduce(family, n);
            prop_assert!((1..=m).contains(&r));
            if n % m == 0 {
                prop_assert_eq!(r, m);
            }
        }
    }

    #[test]
    fn prop_digital_root_is_idempotent(n in 0u32..10_000_000) {
        let c = Constants::new();
        let r = c.digital_root(n);
        prop_assert_eq!(c.digital_root(r), r);
        if n > 0 {
            prop_assert!((1..=9).contains(&r));
        }
    }

    #[test]
    fn prop_zigzag_is_a_permutation(chars in proptest::collection::vec(alphabet_letter(), 0..64)) {
        let line: Vec<Letter> = chars.into_iter().map(Letter::new).collect();
        let out = zigzag_interleave(&line);
        prop_assert_eq!(out.len(), line.len());
        let mut sorted_in = line.clone();
        let mut sorted_out = out.clone();
        sorted_in.sort();
        sorted_out.sort();
        prop_assert_eq!(sorted_in, sorted_out);
    }

    #[test]
    fn prop_full_run_invariants(q in question()) {
        for profile in [Profile::Classic, Profile::Weighted] {
            let mut engine = JafrEngine::with_profile(Constants::new(), profile);
            engine.set_consultation(Consultation {
                question: q.clone(),
                ..Consultation::default()
            });
            let report = engine.run().unwrap();
            prop_assert_eq!(report.lines.base.len(), BASE_LINE_LEN);
            prop_assert_eq!(report.lines.answer.len(), report.lines.refinement_mirror.len());
            let mut answer = report.lines.answer.clone();
            let mut source = report.lines.refinement_mirror.clone();
            answer.sort();
            source.sort();
            prop_assert_eq!(answer, source);
        }
    }

    #[test]
    fn prop_export_import_round_trips(q in question()) {
        let mut engine = JafrEngine::new(Constants::new());
        engine.set_question(&q);
        let fingerprint = engine.run().unwrap().fingerprint();

        let value = serde_json::to_value(engine.export_state()).unwrap();
        let mut restored = JafrEngine::new(Constants::new());
        restored.import_state(value).unwrap();
        prop_assert_eq!(restored.report().unwrap().fingerprint(), fingerprint);
    }
}

#[test]
fn ratio_table_is_total_over_digit_pairs() {
    let c = Constants::new();
    for a in 1..=9 {
        for b in 1..=9 {
            let r = c.ratio(a, b);
            assert!((1..=9).contains(&r), "ratio({a}, {b}) = {r}");
        }
    }
}
