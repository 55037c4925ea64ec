//! Performance benchmarks for the derivation pipeline.
//!
//! Run with: `cargo bench --bench pipeline`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use jafr_engine::{Constants, Consultation, JafrEngine, Profile};

fn reference_consultation(question: &str) -> Consultation {
    Consultation {
        question: question.to_string(),
        asker_name: "محمد".to_string(),
        mother_name: Some("زينب".to_string()),
        day: "الجمعة".to_string(),
        month: "رجب".to_string(),
        year: 1446,
        rising_sign: "الحمل".to_string(),
        moon_sign: "السرطان".to_string(),
        moon_mansion: "الثريا".to_string(),
        hour_lord: "المشتري".to_string(),
    }
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_run");

    for profile in [Profile::Classic, Profile::Weighted] {
        group.bench_with_input(
            BenchmarkId::new("profile", profile),
            &profile,
            |b, &profile| {
                b.iter(|| {
                    let mut engine = JafrEngine::with_profile(Constants::new(), profile);
                    engine.set_consultation(reference_consultation("هل أنجح في هذا العام"));
                    let report = engine.run().unwrap();
                    black_box(report.fingerprint())
                })
            },
        );
    }

    group.finish();
}

fn bench_power_substitution(c: &mut Criterion) {
    let constants = Constants::new();
    let line = constants.text_to_letters("هل انجح في هذا العام وما الذي ينتظرني");

    c.bench_function("power_substitution_classic", |b| {
        b.iter(|| jafr_engine::pipeline::power_substitution(&constants, black_box(&line)))
    });

    c.bench_function("power_substitution_weighted", |b| {
        b.iter(|| {
            jafr_engine::pipeline::weighted::power_substitution(&constants, black_box(&line))
        })
    });
}

criterion_group!(benches, bench_full_run, bench_power_substitution);
criterion_main!(benches);
