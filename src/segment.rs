// SPDX-License-Identifier: MPL-2.0
//! Digit-run segmentation of formatted date strings.
//!
//! A formatted date such as `"2023-01-02"` is treated as a sequence of
//! maximal ASCII digit runs (the segments) separated by arbitrary literal
//! text. Segmentation is purely lexical: it knows nothing about patterns or
//! calendars, so `"02----01+-*/===23"` segments just as well as an ISO date.
//!
//! All offsets are character offsets rather than byte offsets. A multi-byte
//! literal such as `年` occupies exactly one position, which keeps segment
//! spans aligned with what a text widget reports for caret positions.

/// A maximal run of ASCII digits inside a formatted date string.
///
/// `start` and `end` are inclusive character offsets, so a run of width `w`
/// spans `end - start + 1 == w` positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Character offset of the first digit.
    pub start: usize,
    /// Character offset of the last digit.
    pub end: usize,
    /// The digits themselves.
    pub value: String,
}

impl Segment {
    /// Number of digit positions this segment spans.
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }

    /// Whether a caret at `offset` belongs to this segment. The trailing
    /// edge (`end + 1`) counts as inside, matching how native date inputs
    /// treat a caret resting just after a section.
    pub fn grabs(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end + 1
    }

    /// The segment's digits as a number, when they fit.
    pub(crate) fn numeric(&self) -> Option<i64> {
        self.value.parse().ok()
    }
}

/// Scans `formatted` into its digit segments, in text order.
///
/// A single left-to-right pass: a run opens at the first digit after a
/// non-digit (or at the start of the string) and closes at the next
/// non-digit or the end of input. Strings without any digits produce an
/// empty vector.
pub fn segments(formatted: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut run_start = 0;
    let mut run = String::new();
    let mut offset = 0;
    for ch in formatted.chars() {
        if ch.is_ascii_digit() {
            if run.is_empty() {
                run_start = offset;
            }
            run.push(ch);
        } else if !run.is_empty() {
            out.push(Segment {
                start: run_start,
                end: offset - 1,
                value: std::mem::take(&mut run),
            });
        }
        offset += 1;
    }
    if !run.is_empty() {
        out.push(Segment {
            start: run_start,
            end: offset - 1,
            value: run,
        });
    }
    out
}

/// Rebuilds a display string from `base` with each segment's characters
/// replaced by the segment's current `value`. Literal text between segments
/// is carried over untouched.
///
/// `segments` must be the (possibly value-edited) output of [`segments`] for
/// `base`: ordered, non-overlapping, and within bounds.
pub fn splice(base: &str, segments: &[Segment]) -> String {
    let mut out = String::with_capacity(base.len());
    let mut pending = segments.iter().peekable();
    for (offset, ch) in base.chars().enumerate() {
        if let Some(segment) = pending.peek() {
            if offset == segment.start {
                out.push_str(&segment.value);
            }
            if offset >= segment.start && offset <= segment.end {
                if offset == segment.end {
                    pending.next();
                }
                continue;
            }
        }
        out.push(ch);
    }
    out
}
