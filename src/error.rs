// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    /// Text did not match the display pattern it was parsed against.
    Parse(String),
    /// Pasted text matched none of the recognized date layouts.
    UnrecognizedDate(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "Parse Error: {}", e),
            Error::UnrecognizedDate(text) => {
                write!(f, "Unrecognized date text: {}", text)
            }
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
