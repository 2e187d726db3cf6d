// SPDX-FileCopyrightText: 2026 Contributors to the Allegro4r project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for the cleanup pass.

/// Convenience result type using [`Error`] as the error variant.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while cleaning up generated binding source.
///
/// The cleanup pass is pure text processing, so the only failure mode is a
/// required correction that found nothing to correct: the generator's output
/// no longer has the shape the correction was written against, and applying
/// the pipeline anyway would silently ship a binding with a known defect.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or more required corrections matched zero times under the strict
    /// match policy. Carries the labels of every unmatched correction.
    #[error("Required corrections did not match the generated source: {}", .0.join("; "))]
    Unmatched(Vec<String>),
}
