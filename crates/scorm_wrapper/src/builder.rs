use crate::{
    notice::{NoticeSink, TracingSink},
    session::ScormSession,
    window::Window,
};

/// Element probed by `is_initialized`; read-only on every SCORM 1.2 LMS, so
/// reading it is side-effect free.
pub(crate) const DEFAULT_PROBE_ELEMENT: &str = "cmi.core.student_name";

/// Configures a [`ScormSession`]. Obtained via [`ScormSession::builder`].
pub struct SessionBuilder {
    start: Window,
    debug_diagnostics: bool,
    probe_element: String,
    sink: Box<dyn NoticeSink>,
}

impl SessionBuilder {
    pub(crate) fn new(start: Window) -> Self {
        Self {
            start,
            debug_diagnostics: false,
            probe_element: DEFAULT_PROBE_ELEMENT.to_owned(),
            sink: Box::new(TracingSink),
        }
    }

    /// Append the host's vendor diagnostic text to reported error
    /// descriptions. Off by default.
    pub fn debug_diagnostics(mut self, enabled: bool) -> Self {
        self.debug_diagnostics = enabled;
        self
    }

    /// Element `is_initialized` reads to probe session state. Override when
    /// targeting a host with a non-standard data model.
    pub fn probe_element(mut self, element: impl Into<String>) -> Self {
        self.probe_element = element.into();
        self
    }

    /// Where notices go. Defaults to [`TracingSink`].
    pub fn notice_sink(mut self, sink: impl NoticeSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn build(self) -> ScormSession {
        ScormSession::from_builder(self.start, self.debug_diagnostics, self.probe_element, self.sink)
    }
}
