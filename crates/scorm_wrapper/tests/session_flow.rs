use std::{cell::RefCell, rc::Rc};

use lms_api::{stub::StubLms, ErrorCode};
use scorm_wrapper::{Notice, NoticeSink, ScormSession, Window};

/// Sink that keeps a shared log of notices so tests can inspect what the
/// session surfaced.
#[derive(Clone, Default)]
struct CapturingSink {
    notices: Rc<RefCell<Vec<Notice>>>,
}

impl CapturingSink {
    fn take(&self) -> Vec<Notice> {
        self.notices.borrow_mut().drain(..).collect()
    }
}

impl NoticeSink for CapturingSink {
    fn notify(&mut self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

fn framed_session(lms: Rc<StubLms>) -> (ScormSession, CapturingSink, Window) {
    let shell = Window::new("shell");
    let lesson = shell.new_frame("lesson");
    shell.attach_api(lms);

    let sink = CapturingSink::default();
    let session = ScormSession::builder(lesson)
        .notice_sink(sink.clone())
        .build();
    (session, sink, shell)
}

#[test]
fn full_lesson_flow_round_trips() {
    let (session, sink, _shell) = framed_session(Rc::new(StubLms::new()));

    assert_eq!(session.initialize(), "true");
    session.set_value("cmi.core.lesson_status", "completed");
    assert_eq!(session.get_value("cmi.core.lesson_status"), "completed");
    assert_eq!(session.commit(), "true");
    assert_eq!(session.last_error(), "0");
    assert_eq!(session.finish(), "true");

    assert!(sink.take().is_empty(), "clean flow must not raise notices");
}

#[test]
fn every_operation_degrades_safely_without_an_api() {
    let sink = CapturingSink::default();
    let session = ScormSession::builder(Window::new("orphan"))
        .notice_sink(sink.clone())
        .build();

    assert_eq!(session.initialize(), "false");
    assert_eq!(session.get_value("cmi.core.lesson_status"), "");
    session.set_value("cmi.core.lesson_status", "completed");
    assert_eq!(session.commit(), "false");
    assert_eq!(session.finish(), "false");
    assert_eq!(session.last_error(), ErrorCode::GeneralException.to_string());
    assert_eq!(session.error_string("101"), "");
    assert_eq!(session.diagnostic(None), "");
    assert!(!session.is_initialized());

    let notices = sink.take();
    assert_eq!(notices.len(), 9, "one locator notice per operation");
    assert!(notices
        .iter()
        .all(|n| matches!(n, Notice::ApiUnavailable { .. })));
}

#[test]
fn get_value_failure_reports_the_element() {
    let (session, sink, _shell) = framed_session(Rc::new(StubLms::new()));
    session.initialize();
    sink.take();

    assert_eq!(session.get_value("cmi.core.exit"), "");

    let notices = sink.take();
    assert_eq!(notices.len(), 1);
    match &notices[0] {
        Notice::CallFailed {
            operation,
            element,
            code,
            description,
        } => {
            assert_eq!(*operation, "get_value");
            assert_eq!(element, "cmi.core.exit");
            assert_eq!(*code, ErrorCode::InvalidArgument);
            assert_eq!(description, "Invalid argument error");
        }
        other => panic!("expected CallFailed, got {other:?}"),
    }
}

#[test]
fn set_value_rejection_runs_the_shared_error_check() {
    let lms = Rc::new(StubLms::new().with_read_only_element("cmi.core.student_id", "s-001"));
    let (session, sink, _shell) = framed_session(lms.clone());
    session.initialize();
    sink.take();

    session.set_value("cmi.core.student_id", "s-002");

    let notices = sink.take();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].code(), Some(ErrorCode::ElementIsReadOnly));
    assert_eq!(lms.stored_value("cmi.core.student_id").as_deref(), Some("s-001"));
}

#[test]
fn debug_diagnostics_append_vendor_text() {
    let shell = Window::new("shell");
    shell.attach_api(Rc::new(
        StubLms::new().with_read_only_element("cmi.core.student_id", "s-001"),
    ));

    let sink = CapturingSink::default();
    let session = ScormSession::builder(shell)
        .debug_diagnostics(true)
        .notice_sink(sink.clone())
        .build();
    session.initialize();
    sink.take();

    session.set_value("cmi.core.student_id", "s-002");

    let notices = sink.take();
    assert_eq!(notices.len(), 1);
    match &notices[0] {
        Notice::HostError { description, .. } => {
            let (head, tail) = description
                .split_once('\n')
                .expect("diagnostic appended on its own line");
            assert_eq!(head, "Element is read only");
            assert!(tail.contains("stub diagnostic"));
        }
        other => panic!("expected HostError, got {other:?}"),
    }
}

#[test]
fn is_initialized_follows_the_not_initialized_probe() {
    let lms = Rc::new(
        StubLms::new().with_read_only_element("cmi.core.student_name", "Learner, Example"),
    );
    let (session, _sink, _shell) = framed_session(lms);

    assert!(!session.is_initialized());
    assert_eq!(session.initialize(), "true");
    assert!(session.is_initialized());
}

#[test]
fn is_initialized_treats_other_probe_errors_as_initialized() {
    // The stub has no cmi.core.student_name seeded, so the probe answers
    // InvalidArgument after initialize; only NotInitialized means "no".
    let (session, _sink, _shell) = framed_session(Rc::new(StubLms::new()));

    assert!(!session.is_initialized());
    session.initialize();
    assert!(session.is_initialized());
}

#[test]
fn custom_probe_element_is_used() {
    let lms = Rc::new(StubLms::new().with_element("cmi.suspend_data", "bookmark-3"));
    let shell = Window::new("shell");
    shell.attach_api(lms);

    let session = ScormSession::builder(shell)
        .probe_element("cmi.suspend_data")
        .build();
    session.initialize();
    assert!(session.is_initialized());
}

#[test]
fn cached_handle_survives_the_host_window_navigating_away() {
    let (session, sink, shell) = framed_session(Rc::new(StubLms::new()));
    assert_eq!(session.initialize(), "true");

    // First call cached the handle; dropping the window's API reference
    // afterwards goes unnoticed, the documented no-revalidation policy.
    shell.detach_api();
    session.set_value("cmi.core.lesson_status", "completed");
    assert_eq!(session.get_value("cmi.core.lesson_status"), "completed");
    assert!(sink.take().is_empty());

    // reset() is the explicit escape hatch: the next search finds nothing.
    session.reset();
    assert_eq!(session.get_value("cmi.core.lesson_status"), "");
    let notices = sink.take();
    assert_eq!(notices.len(), 1);
    assert!(matches!(notices[0], Notice::ApiUnavailable { .. }));
}

#[test]
fn cache_is_written_once_and_preferred_over_closer_matches() {
    let shell = Window::new("shell");
    let lesson = shell.new_frame("lesson");
    let first = Rc::new(StubLms::new());
    shell.attach_api(first);

    let session = ScormSession::new(lesson.clone());
    assert_eq!(session.initialize(), "true");

    // A new API object appearing closer to the start window is ignored for
    // the rest of the session.
    let second = Rc::new(StubLms::new());
    lesson.attach_api(second.clone());
    session.set_value("cmi.core.lesson_status", "completed");
    assert_eq!(session.get_value("cmi.core.lesson_status"), "completed");
    assert_eq!(second.stored_value("cmi.core.lesson_status"), None);
}
