// SPDX-License-Identifier: MPL-2.0
//! Lifecycle, accessors, and message dispatch for the date field.

use crate::field::{Effect, Message, Placement, State, DEFAULT_PATTERN};
use crate::pattern;
use crate::segment::{self, Segment};
use chrono::NaiveDateTime;
use iced::widget::Id;
use iced::Task;

impl State {
    /// Creates a field showing `date` through the default `YYYY-MM-DD`
    /// pattern.
    pub fn new(date: NaiveDateTime) -> Self {
        Self::with_pattern(date, DEFAULT_PATTERN)
    }

    /// Creates a field showing `date` through `pattern`.
    pub fn with_pattern(date: NaiveDateTime, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let value = pattern::format(date, &pattern);
        let segments = segment::segments(&value);
        let placement = Placement {
            start: 0,
            end: segments.len().saturating_sub(1),
            current: 0,
        };
        Self {
            pattern,
            value,
            segments,
            placement,
            keydown_count: 0,
            pending_caret: None,
            input_id: Id::unique(),
        }
    }

    /// The display string to render.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The active display pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Digit segments of the current display string, in text order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Current focus placement.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Identifier for the widget the host renders this field with.
    pub fn input_id(&self) -> Id {
        self.input_id.clone()
    }

    /// Character range (half-open) the host should keep selected: exactly
    /// the focused segment. `None` when the display has no digit runs.
    ///
    /// Selection is derived state. Hosts re-apply it after every update
    /// instead of tracking selection changes as events.
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.segments
            .get(self.placement.current)
            .map(|segment| (segment.start, segment.end + 1))
    }

    /// Re-renders the field after the host changed its date value.
    pub fn set_date(&mut self, date: NaiveDateTime) {
        let value = pattern::format(date, &self.pattern);
        self.show(value);
    }

    /// Swaps the display pattern. The host passes its current date so the
    /// field can re-render; the field never stores the date itself.
    pub fn set_pattern(&mut self, date: NaiveDateTime, pattern: impl Into<String>) {
        self.pattern = pattern.into();
        self.set_date(date);
    }

    /// Applies `message`, returning the effect for the host plus any
    /// follow-up task to hand to the runtime.
    pub fn update(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::Focused => self.defer_caret(None),
            Message::Clicked { caret } => self.defer_caret(caret),
            Message::CaretSettled => {
                self.settle_caret();
                (Effect::None, Task::none())
            }
            Message::Blurred => {
                self.placement.current = self.placement.start;
                self.keydown_count = 0;
                (Effect::None, Task::none())
            }
            Message::KeyPressed(key) => (self.handle_key(key), Task::none()),
            Message::Pasted(text) => (self.handle_paste(&text), Task::none()),
        }
    }

    /// Records the caret offset reported with a focus or click and schedules
    /// settling. The native caret lands only after the current update has
    /// run, so segment resolution must wait one message round-trip.
    fn defer_caret(&mut self, caret: Option<usize>) -> (Effect, Task<Message>) {
        self.pending_caret = caret;
        (Effect::None, Task::done(Message::CaretSettled))
    }

    /// Installs `value` as the canonical display string and re-derives the
    /// segments, clamping focus if the segment count shrank.
    pub(crate) fn show(&mut self, value: String) {
        self.value = value;
        self.segments = segment::segments(&self.value);
        self.placement.end = self.segments.len().saturating_sub(1);
        if self.placement.current > self.placement.end {
            self.placement.current = self.placement.end;
        }
    }
}
