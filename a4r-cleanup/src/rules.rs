// SPDX-FileCopyrightText: 2026 Contributors to the Allegro4r project.
// SPDX-License-Identifier: Apache-2.0

//! Typed corrections for known generator output defects.
//!
//! Each [`Correction`] names its target structurally (a declaration, a
//! class field, a type token) instead of pattern-matching on surrounding
//! text, so applying one either rewrites exactly the intended site or
//! reports a miss. The ordered set in [`allegro_corrections`] is the full
//! defect list for the Allegro 5 headers; order matters, since later
//! corrections see the output of earlier ones.

use crate::Document;

/// A single correction applied to generated binding source.
///
/// Variants are plain data so a correction set can be declared as a flat
/// list. [`Correction::apply`] reports how many times the correction
/// matched; [`Correction::required`] says whether zero matches indicates a
/// broken assumption about the generator's output (see
/// [`MatchPolicy`](crate::MatchPolicy)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correction {
    /// Strip trailing whitespace from every line.
    TrimTrailingWhitespace,
    /// Rewrite the bracketed `ffi_lib [...]` library list into a flat
    /// argument list. The binding runtime takes the search names as
    /// separate arguments, not as one array value.
    FlattenLibraryList,
    /// Replace every occurrence of a type token the generator cannot
    /// express faithfully (fixed-size arrays, pointers "by value").
    ReplaceTypeToken {
        from: &'static str,
        to: &'static str,
    },
    /// Append `.by_ref` to a struct field nested inside the named class.
    /// Embedded structs in the event union must be read through a
    /// reference, or the binding misreads the overlapping memory.
    ByRefField {
        class: &'static str,
        field: &'static str,
        field_type: &'static str,
    },
    /// Append `.by_ref` to a declaration's return type: the entry point
    /// returns a pointer to the named struct, not an inline copy.
    ByRefReturn {
        function: &'static str,
        return_type: &'static str,
    },
    /// Replace a declaration's return type token. The generator defaults
    /// enum returns it cannot resolve to `:int`.
    RetypeReturn {
        function: &'static str,
        from: &'static str,
        to: &'static str,
    },
    /// Append a call option to a declaration that does not already carry
    /// it.
    AppendOption {
        function: &'static str,
        option: &'static str,
    },
}

impl Correction {
    /// Applies the correction to `document`, returning how many times it
    /// matched.
    pub fn apply(&self, document: &mut Document) -> usize {
        match self {
            Correction::TrimTrailingWhitespace => document.trim_trailing_whitespace(),
            Correction::FlattenLibraryList => document.flatten_library_list(),
            Correction::ReplaceTypeToken { from, to } => document.replace_all(from, to),
            Correction::ByRefField {
                class,
                field,
                field_type,
            } => document.append_by_ref_field(class, field, field_type),
            Correction::ByRefReturn {
                function,
                return_type,
            } => document.append_by_ref_return(function, return_type),
            Correction::RetypeReturn { function, from, to } => {
                document.retype_return(function, from, to)
            }
            Correction::AppendOption { function, option } => {
                document.append_option(function, option)
            }
        }
    }

    /// Whether zero matches should be treated as an error under the strict
    /// match policy.
    ///
    /// Whitespace trimming and token replacement are opportunistic; their
    /// targets may legitimately be absent. Every declaration-anchored
    /// correction is required: its target is known to exist in the headers,
    /// so a miss means the generated source no longer has the shape the
    /// correction was written against.
    pub fn required(&self) -> bool {
        !matches!(
            self,
            Correction::TrimTrailingWhitespace | Correction::ReplaceTypeToken { .. }
        )
    }

    /// Human-readable description, used in logs and match reports.
    pub fn label(&self) -> String {
        match self {
            Correction::TrimTrailingWhitespace => "trim trailing whitespace".to_string(),
            Correction::FlattenLibraryList => "flatten the ffi_lib library list".to_string(),
            Correction::ReplaceTypeToken { from, to } => format!("replace {from} with {to}"),
            Correction::ByRefField {
                class,
                field,
                field_type,
            } => format!("mark {class} field :{field} ({field_type}) by_ref"),
            Correction::ByRefReturn {
                function,
                return_type,
            } => format!("mark {function} return ({return_type}) by_ref"),
            Correction::RetypeReturn { function, from, to } => {
                format!("retype {function} return from {from} to {to}")
            }
            Correction::AppendOption { function, option } => {
                format!("append {option} to {function}")
            }
        }
    }
}

/// The ordered correction set for the Allegro 5 binding.
///
/// Each entry repairs a concrete defect in the generator's output for
/// these headers. The order is part of the contract: trimming runs first
/// so later lookups see canonical lines, and the token replacements run
/// before the field corrections so type tokens are in their final shape.
pub fn allegro_corrections() -> Vec<Correction> {
    vec![
        Correction::TrimTrailingWhitespace,
        Correction::FlattenLibraryList,
        // Fixed-size array types the binding runtime cannot declare
        // inline; a pointer is the usable approximation.
        Correction::ReplaceTypeToken {
            from: "[:char, 1]",
            to: ":pointer",
        },
        Correction::ReplaceTypeToken {
            from: "[:float, 8]",
            to: ":pointer",
        },
        // A pointer is never passed by value.
        Correction::ReplaceTypeToken {
            from: ":pointer.by_value",
            to: ":pointer",
        },
        // Struct-typed fields of the event types; the user event carries
        // two of them.
        Correction::ByRefField {
            class: "AllegroAnyEvent",
            field: "source",
            field_type: "AllegroEventSource",
        },
        Correction::ByRefField {
            class: "AllegroJoystickEvent",
            field: "source",
            field_type: "AllegroJoystick",
        },
        Correction::ByRefField {
            class: "AllegroJoystickEvent",
            field: "id",
            field_type: "AllegroJoystick",
        },
        Correction::ByRefField {
            class: "AllegroKeyboardEvent",
            field: "source",
            field_type: "AllegroKeyboard",
        },
        Correction::ByRefField {
            class: "AllegroMouseEvent",
            field: "source",
            field_type: "AllegroMouse",
        },
        Correction::ByRefField {
            class: "AllegroTimerEvent",
            field: "source",
            field_type: "AllegroTimer",
        },
        Correction::ByRefField {
            class: "AllegroUserEvent",
            field: "source",
            field_type: "AllegroEventSource",
        },
        Correction::ByRefField {
            class: "AllegroUserEvent",
            field: "source",
            field_type: "AllegroUserEventDescriptor",
        },
        // Both locking entry points return a pointer to the locked-region
        // descriptor.
        Correction::ByRefReturn {
            function: "al_lock_bitmap",
            return_type: "AllegroLockedRegion",
        },
        Correction::ByRefReturn {
            function: "al_lock_bitmap_region",
            return_type: "AllegroLockedRegion",
        },
        Correction::RetypeReturn {
            function: "al_get_display_format",
            from: ":int",
            to: ":allegro_pixel_format",
        },
        // al_run_main hosts the program's whole main loop; the interpreter
        // lock must be released while it runs.
        Correction::AppendOption {
            function: "al_run_main",
            option: ":blocking => true",
        },
    ]
}
