use std::rc::Rc;

/// Shared handle to a located runtime API object.
///
/// `Rc`, not `Arc`: the wrapper runs single-threaded on the page's event
/// loop, and the handle is cached and cloned per call on that one thread.
pub type ApiHandle = Rc<dyn LmsApi>;

/// Method surface of the LMS runtime API object (SCORM 1.2).
///
/// Implementations are supplied by the hosting environment; this crate only
/// defines the shape a wrapper may rely on. All returns are the coerced
/// string forms SCORM 1.2 mandates: `"true"`/`"false"` for boolean-like
/// results and decimal strings for error codes.
///
/// Methods take `&self` because the host object is shared behind an
/// [`ApiHandle`]; implementations use interior mutability for their own
/// session state.
pub trait LmsApi {
    /// Begin the runtime session. The argument is reserved by the SCORM 1.2
    /// spec and is always the empty string.
    fn initialize(&self, arg: &str) -> String;

    /// End the runtime session. Argument reserved, always empty.
    fn finish(&self, arg: &str) -> String;

    /// Read the value of a dotted data-model element such as
    /// `cmi.core.lesson_status`.
    fn get_value(&self, element: &str) -> String;

    /// Write a data-model element. Returns `"true"` on acceptance.
    fn set_value(&self, element: &str, value: &str) -> String;

    /// Ask the host to persist any buffered state. Argument reserved.
    fn commit(&self, arg: &str) -> String;

    /// Decimal error code set by the most recent call (`"0"` for none).
    fn last_error(&self) -> String;

    /// Human-readable description for a decimal error code string.
    fn error_string(&self, code: &str) -> String;

    /// Vendor-specific diagnostic text; `None` asks about the last error.
    fn diagnostic(&self, code: Option<&str>) -> String;
}
