#![forbid(unsafe_code)]
//! Contract for the LMS-provided SCORM 1.2 runtime API object.
//!
//! An LMS injects its runtime API object into some window of the content's
//! frame hierarchy; content-side code talks to it through a small, fixed
//! method surface. This crate pins that surface down as the [`LmsApi`] trait
//! so wrappers can forward calls without caring how the LMS stores or
//! validates anything, plus the closed set of SCORM 1.2 [`ErrorCode`]s the
//! host reports.
//!
//! Everything exchanged with the host is a string: SCORM 1.2 defines all
//! runtime values (including booleans and error codes) in their coerced
//! string form, and this crate keeps that shape rather than inventing a
//! richer one the host cannot honor.
//!
//! ```
//! use lms_api::ErrorCode;
//!
//! let code: ErrorCode = "301".parse()?;
//! assert_eq!(code, ErrorCode::NotInitialized);
//! assert!(code.is_error());
//! assert_eq!(code.to_string(), "301");
//! # Ok::<(), lms_api::ParseErrorCodeError>(())
//! ```
//!
//! The `stub` feature adds an in-memory LMS for tests (the `stub` module).

mod api;
mod error_code;

#[cfg(feature = "stub")]
pub mod stub;

pub use api::{ApiHandle, LmsApi};
pub use error_code::{ErrorCode, ParseErrorCodeError};
