use lms_api::ErrorCode;
use thiserror::Error;
use tracing::warn;

/// A user-facing failure report.
///
/// The browser-hosted wrapper this crate descends from raised these as
/// alert boxes; here they flow through a [`NoticeSink`] so the embedding
/// application decides how to show them. The `Display` form is the full
/// message text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The locator could not find the runtime API object anywhere in the
    /// window topology; the named operation was abandoned.
    #[error("unable to locate the LMS API implementation; {operation} was not successful")]
    ApiUnavailable { operation: &'static str },

    /// A value read failed; carries the element so the content author can
    /// see which access went wrong.
    #[error("{operation}({element}) failed: {description}")]
    CallFailed {
        operation: &'static str,
        element: String,
        code: ErrorCode,
        description: String,
    },

    /// The host reported a non-zero error code after a call. The
    /// description is the host's own text, possibly with a diagnostic line
    /// appended when the session runs with diagnostics enabled.
    #[error("LMS reported error {code}: {description}")]
    HostError { code: ErrorCode, description: String },
}

impl Notice {
    /// The host error code behind the notice, where one exists.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Notice::ApiUnavailable { .. } => None,
            Notice::CallFailed { code, .. } | Notice::HostError { code, .. } => Some(*code),
        }
    }
}

/// Where a session delivers its notices.
pub trait NoticeSink {
    fn notify(&mut self, notice: Notice);
}

/// Default sink: hand notices to `tracing` as warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NoticeSink for TracingSink {
    fn notify(&mut self, notice: Notice) {
        warn!(%notice, "SCORM wrapper notice");
    }
}
