// SPDX-License-Identifier: MPL-2.0
//! Minimal presentation glue for the date field.
//!
//! Rendering is deliberately left to the host; what lives here is the
//! smallest useful wiring: a plain display the host can drop into its
//! layout, and a mapper from raw runtime events to field messages for use
//! inside an `event::listen_with` subscription.

use crate::field::{Message, State};
use iced::widget::{mouse_area, text};
use iced::{event, keyboard, Element};

/// Renders the display string as a clickable area. Presses arrive as
/// [`Message::Clicked`] without a caret offset; hosts that hit-test their
/// own text layout can send a resolved offset instead.
pub fn display(state: &State) -> Element<'_, Message> {
    mouse_area(text(state.value()))
        .on_press(Message::Clicked { caret: None })
        .into()
}

/// Maps a raw runtime event to a field message, if the event concerns the
/// field at all. Hosts feed this from `event::listen_with` while the field
/// has focus; key presses while it does not must stay with the host.
pub fn map_raw_event(event: &event::Event) -> Option<Message> {
    match event {
        event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
            Some(Message::KeyPressed(key.clone()))
        }
        _ => None,
    }
}
