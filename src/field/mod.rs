// SPDX-License-Identifier: MPL-2.0
//! Segmented date field component.
//!
//! This module follows a "state down, messages up" pattern: the host
//! application owns the date value and a [`State`], forwards user input as
//! [`Message`]s through [`State::update`], and reacts to the returned
//! [`Effect`]. The field never stores the date itself; it manages the
//! display string, which segment has focus, and in-progress digit entry.
//!
//! Segment focus mirrors native date inputs. One segment is focused at a
//! time, rendered as a selection covering exactly that digit run. Arrow keys
//! move focus and step values, digit keys overtype the focused run from the
//! right, and a mouse press focuses the segment under the caret once the
//! caret has settled.

pub mod state;
pub mod view;

mod routing;

use crate::segment::Segment;
use chrono::NaiveDateTime;
use iced::keyboard;
use iced::widget::Id;

/// Display pattern applied when the host does not pick one.
pub const DEFAULT_PATTERN: &str = "YYYY-MM-DD";

/// Messages consumed by the date field.
#[derive(Debug, Clone)]
pub enum Message {
    /// The field gained keyboard focus.
    Focused,
    /// Mouse press inside the field. `caret` carries the character offset
    /// the host resolved for the press, when it knows one; `None` falls
    /// back to the first segment.
    Clicked { caret: Option<usize> },
    /// Internal: the native caret has come to rest after a focus or click.
    /// Scheduled by [`State::update`] itself, never sent by hosts.
    CaretSettled,
    /// The field lost keyboard focus.
    Blurred,
    /// A key was pressed while the field had focus.
    KeyPressed(keyboard::Key),
    /// Plain text was pasted into the field.
    Pasted(String),
}

/// Events propagated to the host application.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// No action needed.
    None,
    /// An edit committed a new date; the host should adopt it as its value.
    DateChanged(NaiveDateTime),
}

/// Which segment has focus, and the index range focus may move within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// First focusable segment index (always 0).
    pub start: usize,
    /// Last focusable segment index.
    pub end: usize,
    /// Index of the focused segment.
    pub current: usize,
}

/// Local state for one date field.
#[derive(Debug, Clone)]
pub struct State {
    /// Display pattern the date is rendered through.
    pattern: String,
    /// Canonical display string; segments are always derived from it.
    value: String,
    /// Digit runs of `value`, in text order.
    segments: Vec<Segment>,
    /// Segment focus bookkeeping.
    placement: Placement,
    /// Digits typed into the focused segment since its entry was last reset.
    keydown_count: usize,
    /// Caret offset reported by the last focus or click, awaiting settling.
    pending_caret: Option<usize>,
    /// Identifier the host can attach to the widget rendering this field.
    input_id: Id,
}
