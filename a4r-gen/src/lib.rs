// SPDX-FileCopyrightText: 2026 Contributors to the Allegro4r project.
// SPDX-License-Identifier: Apache-2.0

//! # a4r-gen
//!
//! Generator driver producing `lib/allegro4r/api.rb`, the Ruby FFI
//! binding to the Allegro 5 game library, in two steps:
//!
//! 1. drive the external `ffi_gen` generator over the Allegro headers
//!    (a `ruby` subprocess, with compiler flags from `llvm-config`), then
//! 2. run the [`a4r_cleanup`] pass over the raw output to repair the
//!    known generator defects, writing the corrected binding back in
//!    place.
//!
//! ```text
//! Manifest ──► FfiGen (llvm-config, ruby + ffi_gen) ──► raw source
//!                                                           │
//!                    corrected binding ◄── write ◄── Cleanup::run
//! ```
//!
//! The binary entry point takes no arguments: everything a run needs is
//! the standard [`Manifest`] plus the standard correction set. Failures
//! (missing toolchain, generator errors, unmatched required corrections,
//! unwritable output) propagate to the entry point and exit non-zero.

mod error;
mod generator;
mod manifest;
mod run;

pub use error::{Error, Result};
pub use generator::{BindingGenerator, DEFAULT_LLVM_CONFIG, DEFAULT_RUBY, FFI_GEN_DRIVER, FfiGen};
pub use manifest::{DEFAULT_OUTPUT, Manifest};
pub use run::run_generation;
