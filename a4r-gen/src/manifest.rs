// SPDX-FileCopyrightText: 2026 Contributors to the Allegro4r project.
// SPDX-License-Identifier: Apache-2.0

//! The generation manifest: everything one generator run needs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the generated binding. The path is relative and
/// resolved against the current working directory, so runs must start from
/// the repository root. The generator overwrites the file in place.
pub const DEFAULT_OUTPUT: &str = "lib/allegro4r/api.rb";

/// Native libraries the generated binding loads, in load order.
const ALLEGRO_LIBS: [&str; 5] = [
    "allegro",
    "allegro_font",
    "allegro_image",
    "allegro_dialog",
    "allegro_primitives",
];

/// Allegro 5 headers to introspect, in the order the binding declares
/// them. The addon headers come last so their declarations land after the
/// core API.
const ALLEGRO_HEADERS: [&str; 38] = [
    "allegro5/allegro.h",
    "allegro5/base.h",
    "allegro5/altime.h",
    "allegro5/bitmap.h",
    "allegro5/bitmap_draw.h",
    "allegro5/bitmap_io.h",
    "allegro5/bitmap_lock.h",
    "allegro5/blender.h",
    "allegro5/color.h",
    "allegro5/config.h",
    "allegro5/debug.h",
    "allegro5/display.h",
    "allegro5/drawing.h",
    "allegro5/error.h",
    "allegro5/events.h",
    "allegro5/file.h",
    "allegro5/fixed.h",
    "allegro5/fmaths.h",
    "allegro5/fshook.h",
    "allegro5/fullscreen_mode.h",
    "allegro5/joystick.h",
    "allegro5/keyboard.h",
    "allegro5/memory.h",
    "allegro5/monitor.h",
    "allegro5/mouse.h",
    "allegro5/mouse_cursor.h",
    "allegro5/path.h",
    "allegro5/system.h",
    "allegro5/threads.h",
    "allegro5/timer.h",
    "allegro5/tls.h",
    "allegro5/transformations.h",
    "allegro5/utf8.h",
    "allegro5/keycodes.h",
    "allegro5/allegro_font.h",
    "allegro5/allegro_image.h",
    "allegro5/allegro_dialog.h",
    "allegro5/allegro_primitives.h",
];

/// Inputs for one generator run.
///
/// The manifest is serialized to JSON and handed to the embedded driver
/// script on its standard input, so the field names below are a wire
/// contract: the driver fetches each one by name
/// (see [`FFI_GEN_DRIVER`](crate::FFI_GEN_DRIVER)).
///
/// `cflags` is left empty by [`Manifest::allegro`] and resolved at run
/// time by querying `llvm-config`; the headers cannot be introspected
/// without the compiler's include paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Ruby namespace the binding is generated into.
    pub module_name: String,
    /// Path the generator writes and the cleanup pass rewrites.
    pub output: PathBuf,
    /// Compiler flags for header introspection.
    pub cflags: Vec<String>,
    /// Dynamic-loader flags forwarded to the binding runtime. `now` binds
    /// all symbols at load time, surfacing missing libraries immediately.
    pub ffi_lib_flags: Vec<String>,
    /// Native library search names, in load order.
    pub ffi_lib: Vec<String>,
    /// Header files to introspect, in declaration order.
    pub headers: Vec<String>,
}

impl Manifest {
    /// The standard manifest for the Allegro 5 binding.
    ///
    /// `output` is usually [`DEFAULT_OUTPUT`]; tests point it into a
    /// temporary directory instead.
    pub fn allegro(output: impl Into<PathBuf>) -> Self {
        Self {
            module_name: "Allegro4r::API".to_string(),
            output: output.into(),
            cflags: Vec::new(),
            ffi_lib_flags: vec!["now".to_string()],
            ffi_lib: ALLEGRO_LIBS.iter().map(|lib| lib.to_string()).collect(),
            headers: ALLEGRO_HEADERS
                .iter()
                .map(|header| header.to_string())
                .collect(),
        }
    }
}
