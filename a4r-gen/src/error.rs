// SPDX-FileCopyrightText: 2026 Contributors to the Allegro4r project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for the generator driver.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Convenience result type using [`Error`] as the error variant.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while driving a generation run.
///
/// Nothing here is recovered locally: the tool is a one-shot developer
/// step, so every variant propagates to the entry point and fails the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An external program could not be started or communicated with.
    #[error("Failed to run \"{program}\": {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// An external program ran but reported failure.
    #[error("\"{program}\" exited with {status}: {stderr}")]
    External {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// An external program produced output that is not valid UTF-8.
    #[error("Output of \"{program}\" is not valid UTF-8")]
    NonUtf8Output { program: String },

    /// The generator reported success but its output file is unreadable.
    #[error("Failed to read generated binding \"{}\": {source}", .path.display())]
    ReadOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The corrected binding could not be written back.
    #[error("Failed to write corrected binding \"{}\": {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest could not be encoded for the generator driver.
    #[error("Failed to encode the generation manifest: {0}")]
    EncodeManifest(#[from] serde_json::Error),

    /// The cleanup pass rejected the generated source.
    #[error("Cleaning up the generated binding failed: {0}")]
    Cleanup(#[from] a4r_cleanup::Error),

    /// A generic error for failures without a more specific variant.
    #[error("{0}")]
    Other(String),
}
