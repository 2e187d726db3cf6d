// SPDX-FileCopyrightText: 2026 Contributors to the Allegro4r project.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end generation: generate, clean up, write back.

use a4r_cleanup::{Cleanup, CleanupReport};
use tracing::info;

use crate::{
    error::{Error, Result},
    generator::BindingGenerator,
    manifest::Manifest,
};

/// Runs one full generation: raw binding source from `generator`, the
/// cleanup pass over it, and an overwrite of the manifest's output path.
///
/// The output file is only written after the whole transformation has
/// succeeded, so a failing generator or an unmatched required correction
/// never leaves a half-corrected binding behind.
///
/// # Returns
///
/// The cleanup pass's [`CleanupReport`], for callers that want to log or
/// inspect the per-correction match counts.
///
/// # Errors
///
/// Propagates generator failures, [`Error::Cleanup`] when the pass
/// rejects the generated source, and [`Error::WriteOutput`] when the
/// corrected binding cannot be written.
///
/// # Examples
///
/// ```no_run
/// use a4r_cleanup::Cleanup;
/// use a4r_gen::{DEFAULT_OUTPUT, FfiGen, Manifest, run_generation};
///
/// # fn main() -> Result<(), a4r_gen::Error> {
/// let manifest = Manifest::allegro(DEFAULT_OUTPUT);
/// let report = run_generation(&FfiGen::new(), &manifest, &Cleanup::allegro())?;
/// println!("{} correction(s) applied", report.total_matches());
/// # Ok(())
/// # }
/// ```
pub fn run_generation(
    generator: &dyn BindingGenerator,
    manifest: &Manifest,
    cleanup: &Cleanup,
) -> Result<CleanupReport> {
    let raw = generator.generate(manifest)?;
    info!("Cleaning up \"{}\".", manifest.output.display());
    let (corrected, report) = cleanup.run(&raw)?;
    info!("Writing \"{}\".", manifest.output.display());
    std::fs::write(&manifest.output, corrected).map_err(|source| Error::WriteOutput {
        path: manifest.output.clone(),
        source,
    })?;
    Ok(report)
}
