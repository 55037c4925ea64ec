//! The orchestrator: sequences every stage in fixed dependency order,
//! reports per-stage progress, assembles the final report, and owns
//! reset and state export/import.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use crate::analysis;
use crate::canonical::question_hash;
use crate::constants::Constants;
use crate::error::EngineError;
use crate::factors::external_factors;
use crate::pipeline::{self, weighted};
use crate::types::{
    letters_to_string, Analysis, Consultation, Entrances, Letter, Lines, Profile, Report,
    Status,
};

/// Schema version for exported state snapshots.
/// Increment on breaking changes to any snapshot type.
pub const STATE_SCHEMA_VERSION: &str = "1.0.0";

/// Plain structural snapshot of a calculation session.
///
/// `import(export(engine))` must restore an equivalent session
/// field-for-field; the export timestamp is metadata and excluded from
/// that equivalence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Snapshot schema version.
    pub schema_version: String,
    /// The input parameter set.
    pub consultation: Consultation,
    /// The derivation profile.
    pub profile: Profile,
    /// Session status at export time.
    pub status: Status,
    /// The assembled report, if a run completed.
    pub report: Option<Report>,
    /// When the snapshot was taken.
    pub exported_at: DateTime<Utc>,
}

/// The derivation engine.
///
/// Owns one calculation session: the injected constants, the selected
/// profile, the consultation inputs, the status and the last report.
/// Every stage is a pure function over earlier stages, so a run is fully
/// deterministic for a given consultation and profile.
pub struct JafrEngine {
    constants: Constants,
    profile: Profile,
    consultation: Consultation,
    status: Status,
    report: Option<Report>,
}

impl JafrEngine {
    /// Create an engine with the classic profile.
    pub fn new(constants: Constants) -> Self {
        Self::with_profile(constants, Profile::Classic)
    }

    /// Create an engine with an explicit profile.
    pub fn with_profile(constants: Constants, profile: Profile) -> Self {
        Self {
            constants,
            profile,
            consultation: Consultation::default(),
            status: Status::Ready,
            report: None,
        }
    }

    /// Replace the whole consultation record.
    pub fn set_consultation(&mut self, consultation: Consultation) {
        self.consultation = consultation;
    }

    /// Set the question text.
    pub fn set_question(&mut self, question: &str) {
        self.consultation.question = question.to_string();
    }

    /// Set the asker and optional mother name.
    pub fn set_personal_info(&mut self, name: &str, mother_name: Option<&str>) {
        self.consultation.asker_name = name.to_string();
        self.consultation.mother_name = mother_name.map(str::to_string);
    }

    /// Set the temporal parameters.
    pub fn set_time_factors(&mut self, day: &str, month: &str, year: i32) {
        self.consultation.day = day.to_string();
        self.consultation.month = month.to_string();
        self.consultation.year = year;
    }

    /// Set the astrological parameters.
    pub fn set_astro_factors(
        &mut self,
        rising_sign: &str,
        moon_sign: &str,
        moon_mansion: &str,
        hour_lord: &str,
    ) {
        self.consultation.rising_sign = rising_sign.to_string();
        self.consultation.moon_sign = moon_sign.to_string();
        self.consultation.moon_mansion = moon_mansion.to_string();
        self.consultation.hour_lord = hour_lord.to_string();
    }

    /// Current status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Selected profile.
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// The consultation record.
    pub fn consultation(&self) -> &Consultation {
        &self.consultation
    }

    /// The last completed report, if any.
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Run the full derivation without progress reporting.
    pub fn run(&mut self) -> Result<&Report, EngineError> {
        self.run_with_progress(|_, _| {})
    }

    /// Run the full derivation, invoking `progress(percent, message)`
    /// between stages.
    ///
    /// On failure the status is set to `error` and the previous report,
    /// if any, is discarded.
    pub fn run_with_progress<F>(&mut self, mut progress: F) -> Result<&Report, EngineError>
    where
        F: FnMut(u8, &str),
    {
        self.status = Status::Processing;
        self.report = None;
        let started = Instant::now();

        match self.derive(&mut progress, started) {
            Ok(report) => {
                info!(
                    profile = %self.profile,
                    duration_ms = report.duration_ms,
                    fingerprint = %report.fingerprint(),
                    "derivation completed"
                );
                self.status = Status::Completed;
                self.report = Some(report);
                Ok(self.report.as_ref().expect("report was just stored"))
            }
            Err(e) => {
                self.status = Status::Error;
                Err(e)
            }
        }
    }

    fn derive<F>(&self, progress: &mut F, started: Instant) -> Result<Report, EngineError>
    where
        F: FnMut(u8, &str),
    {
        let constants = &self.constants;
        let question = constants.text_to_letters(&self.consultation.question);

        progress(5, "processing question");
        let (entrances, reduced) = self.compute_entrances(&question)?;
        debug!(gross = entrances.gross, small = entrances.small, "entrances computed");

        progress(10, "synthesizing base line");
        let base = match self.profile {
            Profile::Classic => pipeline::base_line(constants, &entrances, &question),
            Profile::Weighted => weighted::base_line(constants, &entrances, &reduced, &question),
        };

        progress(15, "mirroring base line");
        let mirror = pipeline::mirror_line(constants, &base);

        progress(20, "computing base ratios");
        let base_ratio = self.ratio_line(&base);

        progress(25, "computing mirror ratios");
        let mirror_ratio = self.ratio_line(&mirror);

        progress(30, "first complement");
        let complement_1 = pipeline::complement_line(&base_ratio, &mirror_ratio);

        progress(35, "base-mirror ratios");
        let base_mirror_ratio_1 = pipeline::pairwise_ratio_line(constants, &base, &mirror);

        progress(40, "rotating ratio pass");
        let base_mirror_ratio_2 = pipeline::rotate_left(&base_mirror_ratio_1);

        progress(45, "second complement");
        let complement_2 =
            pipeline::complement_line(&base_mirror_ratio_1, &base_mirror_ratio_2);

        progress(50, "complement of complements");
        let complement_of_complements =
            pipeline::complement_line(&complement_1, &complement_2);

        progress(55, "re-lettering complement values");
        let digit_relettering =
            pipeline::digit_relettering(constants, &complement_of_complements);

        progress(60, "power substitution");
        let power_substitution = match self.profile {
            Profile::Classic => pipeline::power_substitution(constants, &digit_relettering),
            Profile::Weighted => weighted::power_substitution(constants, &digit_relettering),
        };

        progress(65, "aggregating external factors");
        let factors = external_factors(constants, &self.consultation);

        progress(70, "fusing external factors");
        let fusion = pipeline::fusion_line(
            constants,
            &base,
            &mirror,
            &power_substitution,
            &factors.combined,
        );

        progress(75, "refining fusion line");
        let refinement = pipeline::refinement_line(constants, &fusion);

        progress(80, "mirroring refinement line");
        let refinement_mirror = pipeline::mirror_line(constants, &refinement);

        progress(85, "interleaving answer line");
        let answer = pipeline::zigzag_interleave(&refinement_mirror);

        progress(90, "analyzing answer");
        let analysis = self.analyze(&base, &mirror, &power_substitution, &answer);

        progress(95, "finalizing report");
        let answer_text = if analysis.interpretation_text.is_empty() {
            letters_to_string(&answer)
        } else {
            analysis.interpretation_text.clone()
        };

        let lines = Lines {
            base,
            mirror,
            base_ratio,
            mirror_ratio,
            complement_1,
            base_mirror_ratio_1,
            base_mirror_ratio_2,
            complement_2,
            complement_of_complements,
            digit_relettering,
            power_substitution,
            fusion,
            refinement,
            refinement_mirror,
            answer,
        };

        let report = Report {
            success: true,
            answer: answer_text,
            question_hash: question_hash(&self.consultation.question),
            entrances,
            lines,
            external_factors: factors,
            analysis,
            duration_ms: started.elapsed().as_millis() as u64,
        };

        progress(100, "completed");
        Ok(report)
    }

    fn compute_entrances(
        &self,
        question: &[Letter],
    ) -> Result<(Entrances, Vec<u32>), EngineError> {
        match self.profile {
            Profile::Classic => {
                let entrances = pipeline::entrances(&self.constants, question)?;
                Ok((entrances, Vec::new()))
            }
            Profile::Weighted => weighted::entrances(&self.constants, question),
        }
    }

    fn ratio_line(&self, line: &[Letter]) -> Vec<u32> {
        match self.profile {
            Profile::Classic => pipeline::adjacent_ratio_line(&self.constants, line),
            Profile::Weighted => weighted::ratio_line(&self.constants, line),
        }
    }

    fn analyze(
        &self,
        base: &[Letter],
        mirror: &[Letter],
        power: &[Letter],
        answer: &[Letter],
    ) -> Analysis {
        let lexical = analysis::lexical_interpretation(answer);

        let (decomposition_levels, fallback) = match self.profile {
            Profile::Classic => {
                let levels = analysis::decimate(answer);
                let fallback = analysis::decimation_interpretation(&levels);
                (levels, fallback)
            }
            Profile::Weighted => {
                let levels = weighted::decimation_levels(&self.constants, answer);
                let texts: Vec<String> = levels.iter().map(|l| l.text.clone()).collect();
                let fallback = analysis::decimation_interpretation(&texts);
                (levels.iter().map(|l| l.summary()).collect(), fallback)
            }
        };

        let interpretation_text = if lexical.is_empty() { fallback } else { lexical };

        let recommendations = analysis::nature_recommendations(
            &self.constants,
            base.iter().chain(mirror.iter()).chain(power.iter()),
        );

        let comparison = Some(analysis::compare(&self.constants, base, answer));

        Analysis {
            interpretation_text,
            decomposition_levels,
            recommendations,
            comparison,
        }
    }

    /// Clear all session state back to initial values. The constants and
    /// profile survive.
    pub fn reset(&mut self) {
        self.consultation = Consultation::default();
        self.status = Status::Ready;
        self.report = None;
    }

    /// Export the session as a plain structural snapshot.
    pub fn export_state(&self) -> StateSnapshot {
        StateSnapshot {
            schema_version: STATE_SCHEMA_VERSION.to_string(),
            consultation: self.consultation.clone(),
            profile: self.profile,
            status: self.status,
            report: self.report.clone(),
            exported_at: Utc::now(),
        }
    }

    /// Restore a session from a snapshot value.
    ///
    /// Fails with `InvalidArgument` if the value is not a structured
    /// record or does not deserialize as a snapshot; the session is left
    /// untouched on failure.
    pub fn import_state(&mut self, value: serde_json::Value) -> Result<(), EngineError> {
        if !value.is_object() {
            return Err(EngineError::InvalidArgument(
                "import value is not a structured record".to_string(),
            ));
        }
        let snapshot: StateSnapshot = serde_json::from_value(value)
            .map_err(|e| EngineError::InvalidArgument(format!("malformed snapshot: {e}")))?;

        self.consultation = snapshot.consultation;
        self.profile = snapshot.profile;
        self.status = snapshot.status;
        self.report = snapshot.report;
        Ok(())
    }
}
