// SPDX-FileCopyrightText: 2026 Contributors to the Allegro4r project.
// SPDX-License-Identifier: Apache-2.0

//! Line-oriented model of generated binding source.
//!
//! [`Document`] stores the source as owned lines and exposes the small set
//! of structural edits the correction rules need: whitespace trimming,
//! token replacement, and anchored rewrites of `ffi_lib`, `attach_function`
//! and `class` declarations. Locators are keyed on the declared name and
//! match type tokens exactly, so a correction either finds precisely its
//! target or reports a miss; nothing nearby is ever rewritten.

use std::ops::Range;

/// Marker appended to a type token that must be accessed through a
/// reference instead of being copied inline.
const BY_REF_SUFFIX: &str = ".by_ref";

/// A generated binding source document, split into lines.
///
/// Line terminators (`\n` or `\r\n`) are not stored: [`Document::render`]
/// joins lines with a single `\n` and does not append a trailing newline,
/// mirroring how the binding file is post-processed and written.
///
/// # Examples
///
/// ```
/// use a4r_cleanup::Document;
///
/// let document = Document::new("module Allegro4r::API\r\nend\n");
/// assert_eq!(document.render(), "module Allegro4r::API\nend");
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Splits `text` into lines.
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(String::from).collect(),
        }
    }

    /// Joins the lines back into a single buffer.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    /// Strips trailing whitespace from every line, returning the number of
    /// lines that changed.
    pub(crate) fn trim_trailing_whitespace(&mut self) -> usize {
        let mut trimmed = 0;
        for line in &mut self.lines {
            let keep = line.trim_end().len();
            if keep != line.len() {
                line.truncate(keep);
                trimmed += 1;
            }
        }
        trimmed
    }

    /// Replaces every occurrence of `from` with `to`, returning the number
    /// of occurrences rewritten.
    pub(crate) fn replace_all(&mut self, from: &str, to: &str) -> usize {
        let mut total = 0;
        for line in &mut self.lines {
            let occurrences = line.matches(from).count();
            if occurrences > 0 {
                *line = line.replace(from, to);
                total += occurrences;
            }
        }
        total
    }

    /// Rewrites the first `ffi_lib [...]` call to pass its names as a flat
    /// argument list by deleting the two bracket characters.
    ///
    /// The names between the brackets are preserved verbatim, order
    /// included. Returns 1 when a call was rewritten, 0 when no bracketed
    /// call exists.
    pub(crate) fn flatten_library_list(&mut self) -> usize {
        const CALL: &str = "ffi_lib ";
        for line in &mut self.lines {
            let Some(call) = line.find(CALL) else { continue };
            let open = call + CALL.len();
            if line.as_bytes().get(open) != Some(&b'[') {
                continue;
            }
            let Some(close) = line[open + 1..].find(']').map(|rel| open + 1 + rel) else {
                continue;
            };
            if close == open + 1 {
                // An empty list carries no names to flatten.
                continue;
            }
            line.remove(close);
            line.remove(open);
            return 1;
        }
        0
    }

    /// Appends `.by_ref` to the return type of the named declaration when
    /// the return token is exactly `return_type`.
    pub(crate) fn append_by_ref_return(&mut self, function: &str, return_type: &str) -> usize {
        let Some(index) = self.attach_line(function) else {
            return 0;
        };
        let line = &mut self.lines[index];
        let Some((start, end)) = return_token_span(line) else {
            return 0;
        };
        if &line[start..end] != return_type {
            return 0;
        }
        line.insert_str(end, BY_REF_SUFFIX);
        1
    }

    /// Replaces the return type of the named declaration when the return
    /// token is exactly `from`.
    pub(crate) fn retype_return(&mut self, function: &str, from: &str, to: &str) -> usize {
        let Some(index) = self.attach_line(function) else {
            return 0;
        };
        let line = &mut self.lines[index];
        let Some((start, end)) = return_token_span(line) else {
            return 0;
        };
        if &line[start..end] != from {
            return 0;
        }
        line.replace_range(start..end, to);
        1
    }

    /// Appends `, <option>` to the named declaration, unless the option is
    /// already present on it.
    pub(crate) fn append_option(&mut self, function: &str, option: &str) -> usize {
        let Some(index) = self.attach_line(function) else {
            return 0;
        };
        let line = &mut self.lines[index];
        if line.contains(option) {
            return 0;
        }
        line.truncate(line.trim_end().len());
        line.push_str(", ");
        line.push_str(option);
        1
    }

    /// Appends `.by_ref` to the first `:field, Type` layout entry of the
    /// named class whose type token is exactly `field_type`.
    ///
    /// The search is bounded by the class definition block, so a class that
    /// lacks the field is a miss rather than a rewrite of some later class.
    pub(crate) fn append_by_ref_field(
        &mut self,
        class: &str,
        field: &str,
        field_type: &str,
    ) -> usize {
        let Some(block) = self.class_block(class) else {
            return 0;
        };
        let needle = format!(":{field}, {field_type}");
        for line in &mut self.lines[block] {
            let Some(at) = line.find(&needle) else { continue };
            let end = at + needle.len();
            if !ends_type_token(&line[end..]) {
                continue;
            }
            line.insert_str(end, BY_REF_SUFFIX);
            return 1;
        }
        0
    }

    /// Index of the first `attach_function` line whose attached symbol is
    /// exactly `function` (the trailing comma rules out name prefixes).
    fn attach_line(&self, function: &str) -> Option<usize> {
        let needle = format!("attach_function :{function},");
        self.lines.iter().position(|line| line.contains(&needle))
    }

    /// Line range of a class definition block: the `class <name>` line up
    /// to (excluding) its closing `end`.
    fn class_block(&self, class: &str) -> Option<Range<usize>> {
        let needle = format!("class {class} ");
        let start = self
            .lines
            .iter()
            .position(|line| line.trim_start().starts_with(&needle))?;
        let close = self.lines[start + 1..]
            .iter()
            .position(|line| line.trim() == "end")?;
        Some(start..start + 1 + close)
    }
}

/// Byte range of the final `, `-separated token on a declaration line.
fn return_token_span(line: &str) -> Option<(usize, usize)> {
    let start = line.rfind(", ")? + 2;
    let token = line[start..].trim_end();
    if token.is_empty() {
        return None;
    }
    Some((start, start + token.len()))
}

/// True when the text following a type token does not continue the token,
/// so `AllegroJoystick` is not taken for a prefix of `AllegroJoystickState`
/// and a token already suffixed with `.by_ref` does not match again.
fn ends_type_token(rest: &str) -> bool {
    match rest.chars().next() {
        None => true,
        Some(c) => c == ',' || c == ')' || c.is_whitespace(),
    }
}
