use std::{fmt, str::FromStr};

use thiserror::Error;

/// The closed set of SCORM 1.2 runtime error codes.
///
/// Codes carry no payload; descriptions are owned by the host and fetched
/// through [`LmsApi::error_string`](crate::LmsApi::error_string).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    NoError = 0,
    GeneralException = 101,
    ServerBusy = 102,
    InvalidArgument = 201,
    ElementCannotHaveChildren = 202,
    ElementIsNotAnArray = 203,
    NotInitialized = 301,
    NotImplemented = 401,
    InvalidSetValue = 402,
    ElementIsReadOnly = 403,
    ElementIsWriteOnly = 404,
    IncorrectDataType = 405,
}

impl ErrorCode {
    /// Numeric form of the code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Map a numeric code back to its variant, if it is one SCORM 1.2
    /// defines.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(Self::NoError),
            101 => Some(Self::GeneralException),
            102 => Some(Self::ServerBusy),
            201 => Some(Self::InvalidArgument),
            202 => Some(Self::ElementCannotHaveChildren),
            203 => Some(Self::ElementIsNotAnArray),
            301 => Some(Self::NotInitialized),
            401 => Some(Self::NotImplemented),
            402 => Some(Self::InvalidSetValue),
            403 => Some(Self::ElementIsReadOnly),
            404 => Some(Self::ElementIsWriteOnly),
            405 => Some(Self::IncorrectDataType),
            _ => None,
        }
    }

    /// Whether the code reports an actual failure (anything but `NoError`).
    pub fn is_error(self) -> bool {
        self != Self::NoError
    }
}

/// Renders the decimal wire form the host exchanges, e.g. `"301"`.
impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized SCORM 1.2 error code `{raw}`")]
pub struct ParseErrorCodeError {
    pub raw: String,
}

/// Parses the decimal string form the host returns from `last_error`.
impl FromStr for ErrorCode {
    type Err = ParseErrorCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = || ParseErrorCodeError { raw: s.to_owned() };
        let code: u16 = s.trim().parse().map_err(|_| raw())?;
        Self::from_code(code).ok_or_else(raw)
    }
}
