// SPDX-FileCopyrightText: 2026 Contributors to the Allegro4r project.
// SPDX-License-Identifier: Apache-2.0

//! Argumentless entry point: regenerate and clean up the Allegro4r
//! binding in place. Run it from the repository root.

use std::process::ExitCode;

use a4r_cleanup::Cleanup;
use a4r_gen::{DEFAULT_OUTPUT, FfiGen, Manifest, run_generation};
use tracing::{error, info};

/// Initializes logging to stdout, honoring `RUST_LOG`.
fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
}

fn main() -> ExitCode {
    setup_logging();
    let manifest = Manifest::allegro(DEFAULT_OUTPUT);
    match run_generation(&FfiGen::new(), &manifest, &Cleanup::allegro()) {
        Ok(report) => {
            info!(
                "Applied {} correction(s) to \"{}\".",
                report.total_matches(),
                manifest.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
