// SPDX-FileCopyrightText: 2026 Contributors to the Allegro4r project.
// SPDX-License-Identifier: Apache-2.0

//! Invocation of the external `ffi_gen` binding generator.
//!
//! `ffi_gen` is a Ruby library, so the production implementation shells
//! out to `ruby` with an embedded driver script, feeding it the JSON
//! manifest on stdin. The [`BindingGenerator`] trait keeps that process
//! boundary narrow: everything downstream of it is pure text processing
//! and testable with canned source.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    manifest::Manifest,
};

/// Driver script handed to `ruby -e`.
///
/// It reads the JSON manifest from stdin, applies the two generator
/// tweaks the binding depends on, and calls `FFIGen.generate`, which
/// writes the raw binding to the manifest's output path. The `fetch` keys
/// in the script and [`Manifest`]'s field names are the same wire
/// contract.
pub const FFI_GEN_DRIVER: &str = include_str!("ffi_gen_driver.rb");

/// Program name used to start the Ruby interpreter.
pub const DEFAULT_RUBY: &str = "ruby";

/// Program name used to query compiler flags for header introspection.
pub const DEFAULT_LLVM_CONFIG: &str = "llvm-config";

/// Produces raw generated binding source for a manifest.
///
/// The production implementation is [`FfiGen`]; tests substitute canned
/// source to exercise the pipeline without a Ruby toolchain installed.
pub trait BindingGenerator {
    /// Runs the generator and returns the raw binding source it produced.
    fn generate(&self, manifest: &Manifest) -> Result<String>;
}

/// The production generator: `llvm-config` for compiler flags, `ruby`
/// plus the `ffi_gen` gem for the binding itself.
///
/// # Examples
///
/// ```no_run
/// use a4r_gen::{BindingGenerator, FfiGen, Manifest};
///
/// # fn main() -> Result<(), a4r_gen::Error> {
/// let raw = FfiGen::new().generate(&Manifest::allegro("lib/allegro4r/api.rb"))?;
/// println!("{} bytes of generated binding", raw.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FfiGen {
    /// Ruby interpreter to run the driver script with.
    pub ruby: String,
    /// Compiler-configuration tool to query flags from.
    pub llvm_config: String,
}

impl Default for FfiGen {
    fn default() -> Self {
        FfiGen {
            ruby: DEFAULT_RUBY.to_string(),
            llvm_config: DEFAULT_LLVM_CONFIG.to_string(),
        }
    }
}

impl FfiGen {
    /// Creates a generator using the default program names, resolved
    /// through `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queries `llvm-config --cflags` and splits its output into
    /// individual flags.
    fn query_cflags(&self) -> Result<Vec<String>> {
        let output = Command::new(&self.llvm_config)
            .arg("--cflags")
            .output()
            .map_err(|source| Error::Spawn {
                program: self.llvm_config.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(Error::External {
                program: self.llvm_config.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let stdout = String::from_utf8(output.stdout).map_err(|_| Error::NonUtf8Output {
            program: self.llvm_config.clone(),
        })?;
        Ok(stdout.split_whitespace().map(|flag| flag.to_string()).collect())
    }

    /// Runs the driver script with the manifest on its stdin.
    ///
    /// The driver's stdout is passed through, so generator progress stays
    /// visible; stderr is captured into the error on failure.
    fn run_driver(&self, manifest: &Manifest) -> Result<()> {
        let encoded = serde_json::to_string(manifest)?;
        let mut child = Command::new(&self.ruby)
            .args(["-e", FFI_GEN_DRIVER])
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::Spawn {
                program: self.ruby.clone(),
                source,
            })?;
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Other("driver stdin was not piped".to_string()))?;
        stdin
            .write_all(encoded.as_bytes())
            .map_err(|source| Error::Spawn {
                program: self.ruby.clone(),
                source,
            })?;
        // Close stdin so the driver sees end of input.
        drop(stdin);
        let output = child.wait_with_output().map_err(|source| Error::Spawn {
            program: self.ruby.clone(),
            source,
        })?;
        if !output.status.success() {
            return Err(Error::External {
                program: self.ruby.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl BindingGenerator for FfiGen {
    fn generate(&self, manifest: &Manifest) -> Result<String> {
        let cflags = self.query_cflags()?;
        debug!(
            "Resolved {} compiler flag(s) via \"{}\".",
            cflags.len(),
            self.llvm_config
        );
        let manifest = Manifest {
            cflags,
            ..manifest.clone()
        };
        info!(
            "Generating {} from {} header(s).",
            manifest.module_name,
            manifest.headers.len()
        );
        self.run_driver(&manifest)?;
        std::fs::read_to_string(&manifest.output).map_err(|source| Error::ReadOutput {
            path: manifest.output.clone(),
            source,
        })
    }
}
