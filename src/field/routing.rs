// SPDX-License-Identifier: MPL-2.0
//! Input routing for the date field: caret settling, keyboard, and paste.

use crate::field::{Effect, State};
use crate::pattern;
use crate::segment;
use chrono::NaiveDateTime;
use iced::keyboard;

impl State {
    pub(crate) fn handle_key(&mut self, key: keyboard::Key) -> Effect {
        match key {
            keyboard::Key::Named(keyboard::key::Named::ArrowLeft) => {
                self.shift_focus(-1);
                Effect::None
            }
            keyboard::Key::Named(keyboard::key::Named::ArrowRight) => {
                self.shift_focus(1);
                Effect::None
            }
            keyboard::Key::Named(keyboard::key::Named::ArrowUp) => self.step_focused(1),
            keyboard::Key::Named(keyboard::key::Named::ArrowDown) => self.step_focused(-1),
            keyboard::Key::Character(c) => match single_ascii_digit(c.as_str()) {
                Some(digit) => self.enter_digit(digit),
                None => Effect::None,
            },
            _ => Effect::None,
        }
    }

    /// Resolves the caret offset recorded by the last focus or click to a
    /// segment: the segment whose span (trailing edge included) contains the
    /// offset, or the next segment to the right when the caret sits between
    /// two runs, or the last segment as a fallback.
    pub(crate) fn settle_caret(&mut self) {
        let caret = self.pending_caret.take().unwrap_or(0);
        let Some(last) = self.segments.last() else {
            return;
        };
        // The caret may rest past the final digit run; treat anything
        // beyond it as the run's trailing edge.
        let offset = caret.min(last.end + 1);
        self.placement.current = self
            .segments
            .iter()
            .position(|segment| segment.grabs(offset))
            .or_else(|| {
                self.segments
                    .iter()
                    .position(|segment| segment.start > offset)
            })
            .unwrap_or(self.placement.end);
    }

    /// Moves segment focus left or right, stopping at the ends.
    pub(crate) fn shift_focus(&mut self, delta: isize) {
        let target = self.placement.current as isize + delta;
        if target < 0 || target > self.placement.end as isize {
            return;
        }
        self.placement.current = target as usize;
    }

    /// Steps the focused segment's number by `delta`, keeping the edit only
    /// if the whole display string still parses as a date.
    pub(crate) fn step_focused(&mut self, delta: i64) -> Effect {
        let Some(segment) = self.segments.get(self.placement.current) else {
            return Effect::None;
        };
        let Some(number) = segment.numeric() else {
            return Effect::None;
        };
        let width = segment.width();
        let stepped = zero_padded(number + delta, width);
        // The replacement must stay a digit run of the original width, or
        // the segment geometry would shift under the caret.
        if stepped.len() != width || !stepped.bytes().all(|b| b.is_ascii_digit()) {
            return Effect::None;
        }
        let candidate = self.candidate_with(stepped);
        match pattern::parse_strict(&candidate, &self.pattern) {
            Ok(date) => self.commit(date),
            // Steps off the calendar (month 13, day 0) are dropped silently.
            Err(_) => Effect::None,
        }
    }

    /// Feeds one typed digit into the focused segment, overtyping from the
    /// right the way native date inputs do.
    ///
    /// The first keystroke after focusing a segment starts from an all-zero
    /// slate; each keystroke then drops the leftmost digit and appends the
    /// new one, so typing `1`, `9`, `9`, `9` into a year shows `0001`,
    /// `0019`, `0199`, `1999`.
    pub(crate) fn enter_digit(&mut self, digit: char) -> Effect {
        let Some(segment) = self.segments.get(self.placement.current) else {
            return Effect::None;
        };
        let width = segment.width();
        let base = if self.keydown_count == 0 {
            "0".repeat(width)
        } else {
            segment.value.clone()
        };
        let mut entered: String = base.chars().skip(1).collect();
        entered.push(digit);

        let candidate = self.candidate_with(entered);
        self.keydown_count += 1;

        if self.keydown_count == width {
            // The segment has received its full complement of digits; only
            // a string that parses may replace the committed value.
            self.keydown_count = 0;
            return match pattern::parse_strict(&candidate, &self.pattern) {
                Ok(date) => self.commit(date),
                Err(err) => {
                    eprintln!("Discarding date entry {:?}: {}", candidate, err);
                    Effect::None
                }
            };
        }

        // Mid-entry keystrokes show the raw text as feedback, but only
        // report upward when the string already parses.
        match pattern::parse_strict(&candidate, &self.pattern) {
            Ok(date) => self.commit(date),
            Err(_) => {
                self.show(candidate);
                Effect::None
            }
        }
    }

    /// Replaces the whole value from pasted free-form text.
    pub(crate) fn handle_paste(&mut self, text: &str) -> Effect {
        // A pattern with no digit runs renders every date the same way;
        // there is nothing to commit.
        if self.segments.is_empty() {
            return Effect::None;
        }
        match pattern::parse_loose(text) {
            Ok(date) => self.commit(date),
            Err(err) => {
                eprintln!("Ignoring pasted text {:?}: {}", text, err);
                Effect::None
            }
        }
    }

    /// Installs `date` as the committed value and reports it to the host.
    pub(crate) fn commit(&mut self, date: NaiveDateTime) -> Effect {
        self.show(pattern::format(date, &self.pattern));
        Effect::DateChanged(date)
    }

    /// Rebuilds the display string with `value` in place of the focused
    /// segment's text.
    fn candidate_with(&self, value: String) -> String {
        let mut segments = self.segments.clone();
        if let Some(slot) = segments.get_mut(self.placement.current) {
            slot.value = value;
        }
        segment::splice(&self.value, &segments)
    }
}

/// Accepts only single ASCII digit keystrokes.
fn single_ascii_digit(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii_digit() => Some(ch),
        _ => None,
    }
}

/// Formats `number` zero-padded to at least `width` digits.
fn zero_padded(number: i64, width: usize) -> String {
    format!("{:0width$}", number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Message;
    use chrono::{NaiveDate, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .expect("valid test date")
            .and_time(NaiveTime::MIN)
    }

    fn press_named(state: &mut State, key: keyboard::key::Named) -> Effect {
        state.handle_key(keyboard::Key::Named(key))
    }

    fn press_digit(state: &mut State, digit: char) -> Effect {
        state.handle_key(keyboard::Key::Character(digit.to_string().into()))
    }

    #[test]
    fn arrows_move_selection_between_segments() {
        let mut state = State::new(date(2023, 1, 1));
        press_named(&mut state, keyboard::key::Named::ArrowRight);
        assert_eq!(state.selection(), Some((5, 7)));
        press_named(&mut state, keyboard::key::Named::ArrowRight);
        assert_eq!(state.selection(), Some((8, 10)));
        press_named(&mut state, keyboard::key::Named::ArrowLeft);
        assert_eq!(state.selection(), Some((5, 7)));
    }

    #[test]
    fn arrows_stop_at_both_ends() {
        let mut state = State::new(date(2023, 1, 1));
        press_named(&mut state, keyboard::key::Named::ArrowLeft);
        assert_eq!(state.placement().current, 0);
        state.placement.current = 2;
        press_named(&mut state, keyboard::key::Named::ArrowRight);
        assert_eq!(state.placement().current, 2);
    }

    #[test]
    fn arrow_up_steps_focused_segment() {
        let mut state = State::new(date(2023, 1, 1));
        let effect = press_named(&mut state, keyboard::key::Named::ArrowUp);
        assert_eq!(effect, Effect::DateChanged(date(2024, 1, 1)));
        assert_eq!(state.value(), "2024-01-01");
    }

    #[test]
    fn arrow_down_undoes_arrow_up() {
        let mut state = State::new(date(2023, 1, 1));
        press_named(&mut state, keyboard::key::Named::ArrowUp);
        let effect = press_named(&mut state, keyboard::key::Named::ArrowDown);
        assert_eq!(effect, Effect::DateChanged(date(2023, 1, 1)));
        assert_eq!(state.value(), "2023-01-01");
    }

    #[test]
    fn arrow_down_below_month_one_is_rejected() {
        let mut state = State::new(date(2023, 1, 1));
        state.placement.current = 1;
        let effect = press_named(&mut state, keyboard::key::Named::ArrowDown);
        assert_eq!(effect, Effect::None);
        assert_eq!(state.value(), "2023-01-01");
    }

    #[test]
    fn arrow_up_past_day_count_is_rejected() {
        let mut state = State::new(date(2023, 1, 31));
        state.placement.current = 2;
        let effect = press_named(&mut state, keyboard::key::Named::ArrowDown);
        assert_eq!(effect, Effect::DateChanged(date(2023, 1, 30)));
        let effect = press_named(&mut state, keyboard::key::Named::ArrowUp);
        assert_eq!(effect, Effect::DateChanged(date(2023, 1, 31)));
        let effect = press_named(&mut state, keyboard::key::Named::ArrowUp);
        assert_eq!(effect, Effect::None);
        assert_eq!(state.value(), "2023-01-31");
    }

    #[test]
    fn step_that_would_widen_the_segment_is_rejected() {
        let mut state = State::new(date(9999, 6, 15));
        let effect = press_named(&mut state, keyboard::key::Named::ArrowUp);
        assert_eq!(effect, Effect::None);
        assert_eq!(state.value(), "9999-06-15");
    }

    #[test]
    fn step_below_zero_is_rejected() {
        let mut state = State::new(date(0, 6, 15));
        assert_eq!(state.value(), "0000-06-15");
        let effect = press_named(&mut state, keyboard::key::Named::ArrowDown);
        assert_eq!(effect, Effect::None);
        assert_eq!(state.value(), "0000-06-15");
    }

    #[test]
    fn typing_year_digits_slides_from_the_right() {
        let mut state = State::new(date(2023, 1, 1));
        assert_eq!(
            press_digit(&mut state, '1'),
            Effect::DateChanged(date(1, 1, 1))
        );
        assert_eq!(state.value(), "0001-01-01");
        assert_eq!(
            press_digit(&mut state, '9'),
            Effect::DateChanged(date(19, 1, 1))
        );
        assert_eq!(state.value(), "0019-01-01");
        press_digit(&mut state, '9');
        assert_eq!(state.value(), "0199-01-01");
        assert_eq!(
            press_digit(&mut state, '9'),
            Effect::DateChanged(date(1999, 1, 1))
        );
        assert_eq!(state.value(), "1999-01-01");
        // Entry is complete, so the counter starts over.
        assert_eq!(state.keydown_count, 0);
    }

    #[test]
    fn typing_month_blanks_then_completes() {
        let mut state = State::new(date(2023, 1, 1));
        state.placement.current = 1;
        let effect = press_digit(&mut state, '0');
        // "2023-00-01" does not parse, so the raw text shows with no
        // committed date.
        assert_eq!(effect, Effect::None);
        assert_eq!(state.value(), "2023-00-01");
        let effect = press_digit(&mut state, '4');
        assert_eq!(effect, Effect::DateChanged(date(2023, 4, 1)));
        assert_eq!(state.value(), "2023-04-01");
    }

    #[test]
    fn completed_invalid_entry_is_discarded() {
        let mut state = State::new(date(2023, 1, 1));
        state.placement.current = 1;
        let effect = press_digit(&mut state, '3');
        assert_eq!(effect, Effect::DateChanged(date(2023, 3, 1)));
        let effect = press_digit(&mut state, '2');
        // "2023-32-01" completes the segment but fails to parse; the last
        // committed display stays.
        assert_eq!(effect, Effect::None);
        assert_eq!(state.value(), "2023-03-01");
        assert_eq!(state.keydown_count, 0);
    }

    #[test]
    fn refocusing_a_segment_blanks_it_again() {
        let mut state = State::new(date(2023, 1, 1));
        state.placement.current = 1;
        press_digit(&mut state, '2');
        assert_eq!(state.value(), "2023-02-01");
        let _ = state.update(Message::Blurred);
        state.placement.current = 1;
        // With the counter reset, the next digit starts from a blank
        // segment instead of sliding "02" into "23".
        press_digit(&mut state, '3');
        assert_eq!(state.value(), "2023-03-01");
    }

    #[test]
    fn caret_settling_keeps_entry_progress() {
        let mut state = State::new(date(2023, 1, 1));
        press_digit(&mut state, '5');
        assert_eq!(state.value(), "0005-01-01");
        // Clicking over to the month does not reset the counter, so the
        // next digit slides "01" into "12" instead of blanking first.
        state.pending_caret = Some(5);
        state.settle_caret();
        assert_eq!(state.placement().current, 1);
        let effect = press_digit(&mut state, '2');
        assert_eq!(effect, Effect::DateChanged(date(5, 12, 1)));
        assert_eq!(state.value(), "0005-12-01");
    }

    #[test]
    fn non_digit_characters_are_ignored() {
        let mut state = State::new(date(2023, 1, 1));
        let effect = state.handle_key(keyboard::Key::Character("a".into()));
        assert_eq!(effect, Effect::None);
        assert_eq!(state.value(), "2023-01-01");
        assert_eq!(state.keydown_count, 0);
    }

    #[test]
    fn unrelated_named_keys_are_ignored() {
        let mut state = State::new(date(2023, 1, 1));
        assert_eq!(
            press_named(&mut state, keyboard::key::Named::Enter),
            Effect::None
        );
        assert_eq!(
            press_named(&mut state, keyboard::key::Named::Tab),
            Effect::None
        );
        assert_eq!(state.value(), "2023-01-01");
    }

    #[test]
    fn settling_without_a_caret_focuses_first_segment() {
        let mut state = State::new(date(2023, 1, 1));
        state.placement.current = 2;
        state.pending_caret = None;
        state.settle_caret();
        assert_eq!(state.placement().current, 0);
    }

    #[test]
    fn settling_focuses_segment_under_caret() {
        let mut state = State::new(date(2023, 1, 1));
        state.pending_caret = Some(9);
        state.settle_caret();
        assert_eq!(state.placement().current, 2);
        assert_eq!(state.selection(), Some((8, 10)));
    }

    #[test]
    fn caret_on_trailing_edge_stays_in_segment() {
        let mut state = State::new(date(2023, 1, 1));
        // Offset 4 is the separator right after the year, which still
        // belongs to the year's trailing edge.
        state.pending_caret = Some(4);
        state.settle_caret();
        assert_eq!(state.placement().current, 0);
    }

    #[test]
    fn caret_between_runs_prefers_next_segment() {
        let mut state = State::with_pattern(date(2023, 1, 2), "DD----MM+-*/===YY");
        assert_eq!(state.value(), "02----01+-*/===23");
        state.pending_caret = Some(4);
        state.settle_caret();
        assert_eq!(state.placement().current, 1);
        assert_eq!(state.selection(), Some((6, 8)));
    }

    #[test]
    fn caret_past_end_clamps_to_last_segment() {
        let mut state = State::new(date(2023, 1, 1));
        state.pending_caret = Some(40);
        state.settle_caret();
        assert_eq!(state.placement().current, 2);
    }

    #[test]
    fn paste_replaces_the_whole_value() {
        let mut state = State::new(date(2023, 1, 1));
        let effect = state.handle_paste("2024-12-25");
        assert_eq!(effect, Effect::DateChanged(date(2024, 12, 25)));
        assert_eq!(state.value(), "2024-12-25");
    }

    #[test]
    fn paste_is_rerendered_through_the_pattern() {
        let mut state = State::with_pattern(date(2023, 1, 2), "YYYY年MM月DD日");
        let effect = state.handle_paste("12/25/2024");
        assert_eq!(effect, Effect::DateChanged(date(2024, 12, 25)));
        assert_eq!(state.value(), "2024年12月25日");
    }

    #[test]
    fn unparseable_paste_is_ignored() {
        let mut state = State::new(date(2023, 1, 1));
        let effect = state.handle_paste("not a date");
        assert_eq!(effect, Effect::None);
        assert_eq!(state.value(), "2023-01-01");
    }

    #[test]
    fn single_ascii_digit_filters_keystrokes() {
        assert_eq!(single_ascii_digit("1"), Some('1'));
        assert_eq!(single_ascii_digit("0"), Some('0'));
        assert_eq!(single_ascii_digit("12"), None);
        assert_eq!(single_ascii_digit("a"), None);
        assert_eq!(single_ascii_digit(""), None);
    }

    #[test]
    fn zero_padded_pads_to_width() {
        assert_eq!(zero_padded(5, 2), "05");
        assert_eq!(zero_padded(2024, 4), "2024");
        assert_eq!(zero_padded(-1, 4), "-001");
        assert_eq!(zero_padded(10000, 4), "10000");
    }
}
