use std::cell::RefCell;

use lms_api::{ApiHandle, ErrorCode, LmsApi};
use tracing::debug;

use crate::{
    builder::SessionBuilder,
    locator,
    notice::{Notice, NoticeSink},
    window::Window,
};

/// A content-side SCORM 1.2 runtime session.
///
/// Owns the state the original browser wrapper kept in page globals: the
/// start window, the cached API handle, and the debug flag. The handle is
/// cached on the first successful locate and reused for every later call;
/// the cache is never revalidated (if the hosting frame navigates away the
/// stale handle keeps being used), with [`ScormSession::reset`] as the
/// explicit escape hatch.
///
/// Every operation follows the same contract: obtain the handle, forward
/// the call, run the shared error check, and on locator failure emit a
/// [`Notice::ApiUnavailable`] and return the operation's safe default
/// instead of panicking.
pub struct ScormSession {
    start: Window,
    cached: RefCell<Option<ApiHandle>>,
    debug_diagnostics: bool,
    probe_element: String,
    sink: RefCell<Box<dyn NoticeSink>>,
}

impl ScormSession {
    /// Session with default settings; see [`ScormSession::builder`] to
    /// configure diagnostics, the probe element, or the notice sink.
    pub fn new(start: Window) -> Self {
        Self::builder(start).build()
    }

    pub fn builder(start: Window) -> SessionBuilder {
        SessionBuilder::new(start)
    }

    pub(crate) fn from_builder(
        start: Window,
        debug_diagnostics: bool,
        probe_element: String,
        sink: Box<dyn NoticeSink>,
    ) -> Self {
        Self {
            start,
            cached: RefCell::new(None),
            debug_diagnostics,
            probe_element,
            sink: RefCell::new(sink),
        }
    }

    /// Drop the cached API handle so the next operation searches again.
    pub fn reset(&self) {
        debug!("dropping cached API handle");
        self.cached.borrow_mut().take();
    }

    /// Start the session with the host. Returns `"true"` on success,
    /// `"false"` otherwise.
    pub fn initialize(&self) -> String {
        self.forward_bool("initialize", |api| api.initialize(""))
    }

    /// End the session with the host.
    pub fn finish(&self) -> String {
        self.forward_bool("finish", |api| api.finish(""))
    }

    /// Ask the host to persist buffered state.
    pub fn commit(&self) -> String {
        self.forward_bool("commit", |api| api.commit(""))
    }

    /// Read a data-model element. On any failure — locator or host — the
    /// result is the empty string and a notice describes what went wrong.
    pub fn get_value(&self, element: &str) -> String {
        let Some(api) = self.api_for("get_value") else {
            return String::new();
        };
        let value = api.get_value(element);
        let raw = api.last_error();
        let code = parse_code(&raw);
        if code.is_error() {
            let description = api.error_string(&raw);
            self.notify(Notice::CallFailed {
                operation: "get_value",
                element: element.to_owned(),
                code,
                description,
            });
            return String::new();
        }
        debug!(element, "get_value succeeded");
        value
    }

    /// Write a data-model element. Fire-and-forget: rejections surface as
    /// notices, never as a return value.
    pub fn set_value(&self, element: &str, value: &str) {
        let Some(api) = self.api_for("set_value") else {
            return;
        };
        if api.set_value(element, value) != "true" {
            self.check_host_error(&api);
        }
    }

    /// Decimal code of the host's last error. Falls back to the general
    /// exception code when the host itself cannot be reached.
    pub fn last_error(&self) -> String {
        match self.api_for("last_error") {
            Some(api) => api.last_error(),
            None => ErrorCode::GeneralException.to_string(),
        }
    }

    /// Host's description for a decimal error code string.
    pub fn error_string(&self, code: &str) -> String {
        match self.api_for("error_string") {
            Some(api) => api.error_string(code),
            None => String::new(),
        }
    }

    /// Host's vendor diagnostic text; `None` asks about the last error.
    pub fn diagnostic(&self, code: Option<&str>) -> String {
        match self.api_for("diagnostic") {
            Some(api) => api.diagnostic(code),
            None => String::new(),
        }
    }

    /// Whether the host considers the session initialized.
    ///
    /// SCORM 1.2 offers no direct query, so this reads the configured probe
    /// element and checks whether the host answers `NotInitialized`. Any
    /// other outcome, including other errors, counts as initialized.
    pub fn is_initialized(&self) -> bool {
        let Some(api) = self.api_for("is_initialized") else {
            return false;
        };
        let _ = api.get_value(&self.probe_element);
        parse_code(&api.last_error()) != ErrorCode::NotInitialized
    }

    /// The cached handle, or a fresh locate. Emits the locator-failure
    /// notice on a miss.
    fn api_for(&self, operation: &'static str) -> Option<ApiHandle> {
        if let Some(api) = self.cached.borrow().as_ref() {
            return Some(api.clone());
        }
        match locator::locate(&self.start) {
            Some(api) => {
                debug!(operation, "API located, caching handle");
                *self.cached.borrow_mut() = Some(api.clone());
                Some(api)
            }
            None => {
                self.notify(Notice::ApiUnavailable { operation });
                None
            }
        }
    }

    /// Boolean-as-string forwarders share this shape: call, then run the
    /// error check when the host did not answer `"true"`.
    fn forward_bool(
        &self,
        operation: &'static str,
        call: impl FnOnce(&ApiHandle) -> String,
    ) -> String {
        let Some(api) = self.api_for(operation) else {
            return "false".to_owned();
        };
        let result = call(&api);
        if result != "true" {
            self.check_host_error(&api);
        }
        result
    }

    /// Shared error check: read the last error and, when non-zero, report
    /// its description (plus the vendor diagnostic when enabled).
    fn check_host_error(&self, api: &ApiHandle) -> ErrorCode {
        let raw = api.last_error();
        let code = parse_code(&raw);
        if code.is_error() {
            let mut description = api.error_string(&raw);
            if self.debug_diagnostics {
                description.push('\n');
                description.push_str(&api.diagnostic(None));
            }
            self.notify(Notice::HostError { code, description });
        }
        code
    }

    fn notify(&self, notice: Notice) {
        self.sink.borrow_mut().notify(notice);
    }
}

/// A host answering with a code outside the SCORM 1.2 set is itself
/// misbehaving; treat that as a general exception.
fn parse_code(raw: &str) -> ErrorCode {
    raw.parse().unwrap_or(ErrorCode::GeneralException)
}
