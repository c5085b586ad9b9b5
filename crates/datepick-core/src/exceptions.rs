use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum PickerError {
    /// A display pattern contains a specifier chrono can't render
    InvalidFormat(String),
    /// Typed text that is not a number
    ParseError(String),
    /// Date/time components that don't exist on the calendar
    InvalidDate(String),
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(msg) => write!(f, "InvalidFormat: {msg}"),
            Self::ParseError(msg) => write!(f, "ParseError: {msg}"),
            Self::InvalidDate(msg) => write!(f, "InvalidDate: {msg}"),
        }
    }
}

impl std::error::Error for PickerError {}
