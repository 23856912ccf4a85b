//! In-memory LMS for tests.
//!
//! [`StubLms`] honors the runtime-session rules a real LMS enforces at the
//! API boundary (calls before `initialize` fail with `NotInitialized`,
//! read-only elements reject writes) while keeping the data model as a plain
//! string map. It makes no attempt at CMI data-type validation; that is host
//! territory the wrapper never sees.
//!
//! ```
//! use std::rc::Rc;
//! use lms_api::{stub::StubLms, ApiHandle, ErrorCode, LmsApi};
//!
//! let lms: ApiHandle = Rc::new(
//!     StubLms::new().with_element("cmi.core.student_name", "Learner, Example"),
//! );
//!
//! assert_eq!(lms.get_value("cmi.core.student_name"), "");
//! assert_eq!(lms.last_error(), ErrorCode::NotInitialized.to_string());
//!
//! assert_eq!(lms.initialize(""), "true");
//! assert_eq!(lms.get_value("cmi.core.student_name"), "Learner, Example");
//! assert_eq!(lms.last_error(), "0");
//! ```

use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, BTreeSet},
};

use crate::{ErrorCode, LmsApi};

/// Standard SCORM 1.2 description for each defined error code.
fn description(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::NoError => "No error",
        ErrorCode::GeneralException => "General exception",
        ErrorCode::ServerBusy => "Server busy",
        ErrorCode::InvalidArgument => "Invalid argument error",
        ErrorCode::ElementCannotHaveChildren => "Element cannot have children",
        ErrorCode::ElementIsNotAnArray => "Element not an array - cannot have count",
        ErrorCode::NotInitialized => "Not initialized",
        ErrorCode::NotImplemented => "Not implemented error",
        ErrorCode::InvalidSetValue => "Invalid set value, element is a keyword",
        ErrorCode::ElementIsReadOnly => "Element is read only",
        ErrorCode::ElementIsWriteOnly => "Element is write only",
        ErrorCode::IncorrectDataType => "Incorrect data type",
    }
}

/// In-memory stand-in for the LMS runtime API object.
///
/// Interior mutability throughout so a stub can sit behind an
/// [`ApiHandle`](crate::ApiHandle) while tests keep their own `Rc` to it.
pub struct StubLms {
    initialized: Cell<bool>,
    data: RefCell<BTreeMap<String, String>>,
    read_only: RefCell<BTreeSet<String>>,
    last_error: Cell<ErrorCode>,
}

impl Default for StubLms {
    fn default() -> Self {
        Self::new()
    }
}

impl StubLms {
    pub fn new() -> Self {
        Self {
            initialized: Cell::new(false),
            data: RefCell::new(BTreeMap::new()),
            read_only: RefCell::new(BTreeSet::new()),
            last_error: Cell::new(ErrorCode::NoError),
        }
    }

    /// Seed a data-model element before handing the stub out.
    pub fn with_element(self, element: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.borrow_mut().insert(element.into(), value.into());
        self
    }

    /// Seed an element and mark it read-only, like `cmi.core.student_name`
    /// on a real LMS.
    pub fn with_read_only_element(
        self,
        element: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let element = element.into();
        self.read_only.borrow_mut().insert(element.clone());
        self.data.borrow_mut().insert(element, value.into());
        self
    }

    /// Element value as the stub currently stores it, bypassing the session
    /// gate. Test inspection only.
    pub fn stored_value(&self, element: &str) -> Option<String> {
        self.data.borrow().get(element).cloned()
    }

    /// The most recent code, typed. Test inspection only.
    pub fn last_error_code(&self) -> ErrorCode {
        self.last_error.get()
    }

    fn fail(&self, code: ErrorCode) -> String {
        self.last_error.set(code);
        "false".to_owned()
    }

    fn ok(&self) -> String {
        self.last_error.set(ErrorCode::NoError);
        "true".to_owned()
    }
}

impl LmsApi for StubLms {
    fn initialize(&self, _arg: &str) -> String {
        if self.initialized.get() {
            return self.fail(ErrorCode::GeneralException);
        }
        self.initialized.set(true);
        self.ok()
    }

    fn finish(&self, _arg: &str) -> String {
        if !self.initialized.get() {
            return self.fail(ErrorCode::NotInitialized);
        }
        self.initialized.set(false);
        self.ok()
    }

    fn get_value(&self, element: &str) -> String {
        if !self.initialized.get() {
            self.last_error.set(ErrorCode::NotInitialized);
            return String::new();
        }
        match self.data.borrow().get(element) {
            Some(value) => {
                self.last_error.set(ErrorCode::NoError);
                value.clone()
            }
            None => {
                self.last_error.set(ErrorCode::InvalidArgument);
                String::new()
            }
        }
    }

    fn set_value(&self, element: &str, value: &str) -> String {
        if !self.initialized.get() {
            return self.fail(ErrorCode::NotInitialized);
        }
        if self.read_only.borrow().contains(element) {
            return self.fail(ErrorCode::ElementIsReadOnly);
        }
        self.data
            .borrow_mut()
            .insert(element.to_owned(), value.to_owned());
        self.ok()
    }

    fn commit(&self, _arg: &str) -> String {
        if !self.initialized.get() {
            return self.fail(ErrorCode::NotInitialized);
        }
        self.ok()
    }

    fn last_error(&self) -> String {
        self.last_error.get().to_string()
    }

    fn error_string(&self, code: &str) -> String {
        match code.parse::<ErrorCode>() {
            Ok(code) => description(code).to_owned(),
            Err(_) => String::new(),
        }
    }

    fn diagnostic(&self, code: Option<&str>) -> String {
        match code {
            Some(code) => format!("stub diagnostic for code {code}"),
            None => format!("stub diagnostic for code {}", self.last_error.get()),
        }
    }
}
