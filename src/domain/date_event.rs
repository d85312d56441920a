use chrono::NaiveDate;
use std::fmt;

/// Why typed text did not turn into a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    EmptyString,
    Invalid(String),
    Disabled(NaiveDate),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyString => write!(f, "no date entered"),
            InputError::Invalid(text) => write!(f, "'{}' is not a valid date", text),
            InputError::Disabled(date) => write!(f, "{} cannot be picked", date),
        }
    }
}

impl std::error::Error for InputError {}

/// What a single transition did to the host's selected date.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateEvent {
    #[default]
    None,
    Picked(NaiveDate),
    Cleared,
    FailedInput(InputError),
}

impl DateEvent {
    pub fn is_none(&self) -> bool {
        matches!(self, DateEvent::None)
    }
}

impl fmt::Display for DateEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateEvent::None => write!(f, "no change"),
            DateEvent::Picked(date) => write!(f, "picked {}", date),
            DateEvent::Cleared => write!(f, "selection cleared"),
            DateEvent::FailedInput(error) => write!(f, "input rejected: {}", error),
        }
    }
}
