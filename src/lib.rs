// SPDX-License-Identifier: MPL-2.0
//! `iced_datefield` is a segmented date entry component for the Iced GUI
//! framework.
//!
//! A date field shows a formatted date string and lets the user edit it one
//! digit run at a time, the way native date inputs behave: left/right arrows
//! move between segments, up/down arrows step the focused segment, digit keys
//! overtype it from the right, and every edit is validated by re-parsing the
//! whole string before it is reported to the owning application.
//!
//! The crate follows a "state down, messages up" design. The host application
//! owns the date value and a [`field::State`], feeds user input in as
//! [`field::Message`]s, and reacts to the [`field::Effect`] returned by
//! [`field::State::update`]. The field never owns the date itself.

#![doc(html_root_url = "https://docs.rs/iced_datefield/0.1.0")]

pub mod error;
pub mod field;
pub mod pattern;
pub mod segment;

pub use error::{Error, Result};
pub use field::{Effect, Message, State};
