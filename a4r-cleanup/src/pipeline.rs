// SPDX-FileCopyrightText: 2026 Contributors to the Allegro4r project.
// SPDX-License-Identifier: Apache-2.0

//! The cleanup pass: an ordered correction sequence over one document.

use tracing::{debug, warn};

use crate::{Correction, Document, Error, Result, allegro_corrections};

/// What to do when a required correction matches zero times.
///
/// A zero match means the generator's output no longer has the shape a
/// correction was written against, typically after a generator upgrade or
/// a header change. Shipping the binding anyway would silently reintroduce
/// the defect the correction repairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Fail the run, naming every unmatched required correction. All
    /// corrections are still applied first, so one run reports the full
    /// set of misses.
    Strict,
    /// Log a warning per miss and keep the remaining corrections' output.
    Lenient,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        MatchPolicy::Strict
    }
}

/// Outcome of a single correction within one cleanup run.
#[derive(Debug, Clone)]
pub struct CorrectionOutcome {
    /// Human-readable description of the correction.
    pub label: String,
    /// How many times the correction matched and rewrote the document.
    pub matches: usize,
    /// Whether zero matches is an error under [`MatchPolicy::Strict`].
    pub required: bool,
}

/// Per-correction match accounting for one cleanup run.
#[derive(Debug, Clone, Default)]
pub struct CleanupReport {
    /// One entry per correction, in application order.
    pub outcomes: Vec<CorrectionOutcome>,
}

impl CleanupReport {
    /// Labels of required corrections that matched zero times.
    pub fn unmatched_required(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.required && outcome.matches == 0)
            .map(|outcome| outcome.label.clone())
            .collect()
    }

    /// Total number of rewrites across all corrections.
    pub fn total_matches(&self) -> usize {
        self.outcomes.iter().map(|outcome| outcome.matches).sum()
    }
}

/// An ordered cleanup pass over generated binding source.
///
/// The pass is pure text processing: [`Cleanup::run`] borrows the input,
/// returns the corrected text, and touches nothing else. Running the same
/// pass twice is safe in the sense that no marker is ever stacked; under
/// the default [`MatchPolicy::Strict`] the second run fails instead,
/// because already-corrected text no longer matches the required
/// corrections.
///
/// # Examples
///
/// ```
/// use a4r_cleanup::{Cleanup, Correction};
///
/// # fn main() -> Result<(), a4r_cleanup::Error> {
/// let cleanup = Cleanup::new(vec![Correction::FlattenLibraryList]);
/// let (fixed, report) = cleanup.run(r#"ffi_lib ["allegro", "allegro_font"]"#)?;
/// assert_eq!(fixed, r#"ffi_lib "allegro", "allegro_font""#);
/// assert!(report.unmatched_required().is_empty());
/// # Ok(())
/// # }
/// ```
pub struct Cleanup {
    corrections: Vec<Correction>,
    policy: MatchPolicy,
}

impl Cleanup {
    /// Creates a pass over the given corrections with the default
    /// (strict) match policy.
    pub fn new(corrections: Vec<Correction>) -> Self {
        Self {
            corrections,
            policy: MatchPolicy::default(),
        }
    }

    /// The standard pass for the Allegro 5 binding, applying
    /// [`allegro_corrections`] in order.
    pub fn allegro() -> Self {
        Self::new(allegro_corrections())
    }

    /// Replaces the match policy.
    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Applies every correction, in order, exactly once over `text`.
    ///
    /// # Returns
    ///
    /// The corrected text and a [`CleanupReport`] with per-correction
    /// match counts. The corrected text joins lines with `\n` and carries
    /// no trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unmatched`] when the policy is
    /// [`MatchPolicy::Strict`] and at least one required correction
    /// matched zero times. The error lists every unmatched correction,
    /// not just the first.
    pub fn run(&self, text: &str) -> Result<(String, CleanupReport)> {
        let mut document = Document::new(text);
        let mut report = CleanupReport::default();
        for correction in &self.corrections {
            let matches = correction.apply(&mut document);
            let label = correction.label();
            debug!("Correction \"{}\" matched {} time(s).", label, matches);
            if matches == 0 && correction.required() {
                warn!("Correction \"{}\" did not match the generated source.", label);
            }
            report.outcomes.push(CorrectionOutcome {
                label,
                matches,
                required: correction.required(),
            });
        }
        let unmatched = report.unmatched_required();
        if self.policy == MatchPolicy::Strict && !unmatched.is_empty() {
            return Err(Error::Unmatched(unmatched));
        }
        Ok((document.render(), report))
    }
}
