// SPDX-FileCopyrightText: 2026 Contributors to the Allegro4r project.
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the generation driver.
//!
//! The external `ruby`/`llvm-config` toolchain is replaced with canned
//! generators, so these tests cover the plumbing around it: cleanup
//! wiring, write-after-transform ordering, and the JSON wire contract
//! between the manifest and the embedded driver script.

use std::path::PathBuf;

use a4r_cleanup::{Cleanup, Correction};
use a4r_gen::{
    BindingGenerator, DEFAULT_OUTPUT, Error, FFI_GEN_DRIVER, FfiGen, Manifest, run_generation,
};

/// Ensures logging is initialized only once across all tests.
static LOG_ONCE: std::sync::Once = std::sync::Once::new();

fn setup() {
    LOG_ONCE.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::builder()
                    .with_default_directive(tracing::level_filters::LevelFilter::DEBUG.into())
                    .from_env_lossy(),
            )
            .init();
    });
}

/// RAII guard creating a unique output directory under the system temp
/// dir and removing it on drop, keeping parallel tests isolated.
struct OutputDirGuard {
    dir: PathBuf,
}

impl OutputDirGuard {
    fn new(test: &str) -> Self {
        let dir =
            std::env::temp_dir().join(format!("a4r_gen_tests_{}_{}", test, uuid::Uuid::new_v4()));
        std::fs::create_dir_all(dir.as_path()).unwrap_or_else(|_| {
            panic!("Failed to create test output directory \"{}\".", dir.display())
        });
        Self { dir }
    }

    fn output(&self) -> PathBuf {
        self.dir.join("api.rb")
    }
}

impl Drop for OutputDirGuard {
    fn drop(&mut self) {
        std::fs::remove_dir_all(self.dir.as_path()).unwrap_or_else(|_| {
            panic!("Failed to remove test output directory \"{}\".", self.dir.display())
        });
    }
}

/// Generator returning fixed source, standing in for `ffi_gen`.
struct CannedGenerator(&'static str);

impl BindingGenerator for CannedGenerator {
    fn generate(&self, _manifest: &Manifest) -> a4r_gen::Result<String> {
        Ok(self.0.to_string())
    }
}

/// Generator that always fails, standing in for a broken toolchain.
struct FailingGenerator;

impl BindingGenerator for FailingGenerator {
    fn generate(&self, _manifest: &Manifest) -> a4r_gen::Result<String> {
        Err(Error::Other("header introspection failed".to_string()))
    }
}

const RAW_FRAGMENT: &str = r#"module Allegro4r::API
  ffi_lib ["allegro", "allegro_font"]
  attach_function :al_run_main, :al_run_main, [:int, :pointer, :pointer], :int
end"#;

#[test]
fn generation_writes_the_corrected_binding() {
    setup();
    let guard = OutputDirGuard::new("writes");
    let manifest = Manifest::allegro(guard.output());
    let cleanup = Cleanup::new(vec![
        Correction::TrimTrailingWhitespace,
        Correction::FlattenLibraryList,
        Correction::AppendOption {
            function: "al_run_main",
            option: ":blocking => true",
        },
    ]);

    let report = run_generation(&CannedGenerator(RAW_FRAGMENT), &manifest, &cleanup).unwrap();
    assert!(report.unmatched_required().is_empty());

    let written = std::fs::read_to_string(guard.output()).unwrap();
    assert!(written.contains(r#"ffi_lib "allegro", "allegro_font""#));
    assert!(written.contains(":int, :blocking => true"));
    assert!(!written.contains("ffi_lib ["));
}

#[test]
fn a_failing_generator_leaves_no_output_behind() {
    setup();
    let guard = OutputDirGuard::new("generator_failure");
    let manifest = Manifest::allegro(guard.output());

    let result = run_generation(&FailingGenerator, &manifest, &Cleanup::allegro());
    assert!(matches!(result, Err(Error::Other(_))));
    assert!(!guard.output().exists());
}

#[test]
fn an_unmatched_correction_leaves_no_output_behind() {
    setup();
    let guard = OutputDirGuard::new("strict_miss");
    let manifest = Manifest::allegro(guard.output());
    let cleanup = Cleanup::new(vec![Correction::FlattenLibraryList]);

    let generator = CannedGenerator("module Allegro4r::API\nend");
    let result = run_generation(&generator, &manifest, &cleanup);
    assert!(matches!(result, Err(Error::Cleanup(_))));
    assert!(!guard.output().exists());
}

#[test]
fn generation_overwrites_a_previous_binding() {
    setup();
    let guard = OutputDirGuard::new("overwrite");
    std::fs::write(guard.output(), "stale contents").unwrap();
    let manifest = Manifest::allegro(guard.output());
    let cleanup = Cleanup::new(vec![Correction::FlattenLibraryList]);

    run_generation(&CannedGenerator(RAW_FRAGMENT), &manifest, &cleanup).unwrap();

    let written = std::fs::read_to_string(guard.output()).unwrap();
    assert!(!written.contains("stale contents"));
    assert!(written.contains(r#"ffi_lib "allegro", "allegro_font""#));
}

#[test]
fn a_missing_tool_maps_to_a_spawn_error() {
    setup();
    let generator = FfiGen {
        llvm_config: "/nonexistent/llvm-config".to_string(),
        ..FfiGen::new()
    };

    let err = generator.generate(&Manifest::allegro("api.rb")).unwrap_err();
    match err {
        Error::Spawn { program, .. } => assert_eq!(program, "/nonexistent/llvm-config"),
        other => panic!("expected a spawn failure, got {other}"),
    }
}

#[test]
fn a_failing_tool_maps_to_an_exit_error() {
    setup();
    // `false` exits non-zero without output, standing in for a broken
    // llvm-config installation.
    let generator = FfiGen {
        llvm_config: "false".to_string(),
        ..FfiGen::new()
    };

    let err = generator.generate(&Manifest::allegro("api.rb")).unwrap_err();
    match err {
        Error::External { program, status, .. } => {
            assert_eq!(program, "false");
            assert!(!status.success());
        }
        other => panic!("expected an exit-status failure, got {other}"),
    }
}

#[cfg(unix)]
#[test]
fn non_utf8_tool_output_is_rejected() {
    use std::os::unix::fs::PermissionsExt;

    setup();
    let guard = OutputDirGuard::new("non_utf8");

    // A stand-in tool whose output is not valid UTF-8.
    let tool = guard.dir.join("fake-llvm-config");
    std::fs::write(&tool, "#!/bin/sh\nprintf '\\377'\n").unwrap();
    let mut permissions = std::fs::metadata(&tool).unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&tool, permissions).unwrap();

    let generator = FfiGen {
        llvm_config: tool.display().to_string(),
        ..FfiGen::new()
    };
    let err = generator.generate(&Manifest::allegro(guard.output())).unwrap_err();
    assert!(matches!(err, Error::NonUtf8Output { .. }));
}

#[test]
fn the_manifest_matches_the_driver_wire_contract() {
    let manifest = Manifest::allegro(DEFAULT_OUTPUT);
    let encoded = serde_json::to_value(&manifest).unwrap();
    let object = encoded.as_object().unwrap();

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["cflags", "ffi_lib", "ffi_lib_flags", "headers", "module_name", "output"]
    );

    // Every manifest field must be fetched by the driver script, by name.
    for key in object.keys() {
        assert!(
            FFI_GEN_DRIVER.contains(&format!("fetch(\"{key}\")")),
            "driver script does not fetch manifest key {key:?}"
        );
    }

    assert_eq!(object["module_name"], "Allegro4r::API");
    assert_eq!(object["output"], "lib/allegro4r/api.rb");
    // The default output path is resolved against the working directory.
    assert!(std::path::Path::new(DEFAULT_OUTPUT).is_relative());
    assert_eq!(object["ffi_lib_flags"], serde_json::json!(["now"]));
    assert_eq!(object["ffi_lib"][0], "allegro");
    assert_eq!(object["headers"].as_array().unwrap().len(), 38);
    assert_eq!(object["headers"][0], "allegro5/allegro.h");
    assert_eq!(object["headers"][37], "allegro5/allegro_primitives.h");
}
