#![forbid(unsafe_code)]
//! Content-side wrapper around the LMS-provided SCORM 1.2 runtime API.
//!
//! An LMS attaches its runtime API object to some window in the browser tab
//! tree the content runs in; the content never knows which one up front. This
//! crate models that tab tree ([`Window`]), finds the API object in it
//! ([`locate`]), and forwards the fixed SCORM 1.2 call set to it through a
//! session that caches the handle after the first successful search
//! ([`ScormSession`]).
//!
//! Calls never panic and never bubble host failures as Rust errors: each
//! operation returns the safe default the SCORM wrapper contract prescribes
//! (`"false"`, the empty string, or `false`) and reports what went wrong
//! through a pluggable [`NoticeSink`] — the crate's stand-in for the alert
//! box a browser-hosted wrapper would raise.
//!
//! ```
//! use std::rc::Rc;
//! use lms_api::stub::StubLms;
//! use scorm_wrapper::{ScormSession, Window};
//!
//! // LMS shell window framing the lesson content, API attached to the shell.
//! let shell = Window::new("lms-shell");
//! let lesson = shell.new_frame("lesson");
//! shell.attach_api(Rc::new(StubLms::new()));
//!
//! let session = ScormSession::new(lesson);
//! assert_eq!(session.initialize(), "true");
//! session.set_value("cmi.core.lesson_status", "completed");
//! assert_eq!(session.get_value("cmi.core.lesson_status"), "completed");
//! assert_eq!(session.commit(), "true");
//! assert_eq!(session.finish(), "true");
//! ```

mod builder;
mod locator;
mod notice;
mod session;
mod window;

pub use builder::SessionBuilder;
pub use locator::locate;
pub use notice::{Notice, NoticeSink, TracingSink};
pub use session::ScormSession;
pub use window::Window;

pub use lms_api::{ApiHandle, ErrorCode, LmsApi};
