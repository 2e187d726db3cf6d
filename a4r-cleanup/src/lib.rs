// SPDX-FileCopyrightText: 2026 Contributors to the Allegro4r project.
// SPDX-License-Identifier: Apache-2.0

//! # a4r-cleanup
//!
//! Post-generation repair of the Allegro4r binding source.
//!
//! The Ruby binding shipped by Allegro4r is produced by the external
//! `ffi_gen` header-introspection generator. That generator has a known,
//! finite list of defects for the Allegro 5 headers: an array where the
//! binding runtime expects flat arguments, type tokens it cannot express,
//! embedded event-union fields that must be read by reference, and a few
//! declarations with the wrong return type or missing call options. This
//! crate applies those repairs as an ordered sequence of typed
//! [`Correction`]s over a line-oriented [`Document`].
//!
//! ```text
//! raw generated source ──► Cleanup::run ──► corrected source + CleanupReport
//! ```
//!
//! The pass is pure (text in, text out), every correction reports its
//! match count, and under the default [`MatchPolicy::Strict`] a required
//! correction that matches nothing fails the run instead of shipping a
//! binding with a known defect still in it.
//!
//! ## Examples
//!
//! ```
//! use a4r_cleanup::{Cleanup, MatchPolicy};
//!
//! let cleanup = Cleanup::allegro().with_policy(MatchPolicy::Lenient);
//! let (fixed, report) = cleanup.run("module Allegro4r::API\nend")?;
//! assert_eq!(fixed, "module Allegro4r::API\nend");
//! assert!(!report.unmatched_required().is_empty());
//! # Ok::<(), a4r_cleanup::Error>(())
//! ```

mod document;
mod error;
mod pipeline;
mod rules;

pub use document::Document;
pub use error::{Error, Result};
pub use pipeline::{Cleanup, CleanupReport, CorrectionOutcome, MatchPolicy};
pub use rules::{Correction, allegro_corrections};
