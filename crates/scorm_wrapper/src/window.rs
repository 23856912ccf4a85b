use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use lms_api::ApiHandle;

/// A window or frame in the browser tab tree.
///
/// `Window` is a cheap-clone handle; clones refer to the same node, and
/// identity is pointer identity (see [`Window::ptr_eq`]), never name
/// equality. Parent and opener links are weak so a frame tree with back
/// links does not leak; the tree is kept alive by whoever holds the root
/// (frames hold their children strongly).
#[derive(Clone)]
pub struct Window {
    inner: Rc<WindowInner>,
}

struct WindowInner {
    name: String,
    parent: RefCell<Weak<WindowInner>>,
    opener: RefCell<Weak<WindowInner>>,
    frames: RefCell<Vec<Rc<WindowInner>>>,
    api: RefCell<Option<ApiHandle>>,
}

impl Window {
    /// A free-standing window with no links and no API attached.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(WindowInner {
                name: name.into(),
                parent: RefCell::new(Weak::new()),
                opener: RefCell::new(Weak::new()),
                frames: RefCell::new(Vec::new()),
                api: RefCell::new(None),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Attach the runtime API object to this window, as an LMS does when it
    /// sets `window.API` on its shell frame.
    pub fn attach_api(&self, api: ApiHandle) {
        *self.inner.api.borrow_mut() = Some(api);
    }

    /// Remove an attached API object, e.g. to simulate the hosting frame
    /// navigating away.
    pub fn detach_api(&self) {
        self.inner.api.borrow_mut().take();
    }

    pub fn api(&self) -> Option<ApiHandle> {
        self.inner.api.borrow().clone()
    }

    /// Make `frame` a child frame of this window and this window its parent.
    pub fn adopt_frame(&self, frame: &Window) {
        *frame.inner.parent.borrow_mut() = Rc::downgrade(&self.inner);
        self.inner.frames.borrow_mut().push(frame.inner.clone());
    }

    /// Create a named child frame in one step.
    pub fn new_frame(&self, name: impl Into<String>) -> Window {
        let frame = Window::new(name);
        self.adopt_frame(&frame);
        frame
    }

    /// Set the parent link without registering a child frame, for modeling
    /// malformed topologies.
    pub fn set_parent(&self, parent: &Window) {
        *self.inner.parent.borrow_mut() = Rc::downgrade(&parent.inner);
    }

    /// Record which window opened this one (popup relationship).
    pub fn set_opener(&self, opener: &Window) {
        *self.inner.opener.borrow_mut() = Rc::downgrade(&opener.inner);
    }

    /// Parent window, if one is linked. A parent link that is dead or that
    /// points back at this very window counts as no parent.
    pub fn parent(&self) -> Option<Window> {
        self.follow(&self.inner.parent)
    }

    /// Opener window, with the same self-reference guard as [`Window::parent`].
    pub fn opener(&self) -> Option<Window> {
        self.follow(&self.inner.opener)
    }

    pub fn frames(&self) -> Vec<Window> {
        self.inner
            .frames
            .borrow()
            .iter()
            .map(|inner| Window {
                inner: inner.clone(),
            })
            .collect()
    }

    pub fn ptr_eq(&self, other: &Window) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Stable identity for visited-set bookkeeping.
    pub(crate) fn id(&self) -> usize {
        Rc::as_ptr(&self.inner) as usize
    }

    fn follow(&self, link: &RefCell<Weak<WindowInner>>) -> Option<Window> {
        let target = link.borrow().upgrade()?;
        if Rc::ptr_eq(&target, &self.inner) {
            return None;
        }
        Some(Window { inner: target })
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("name", &self.inner.name)
            .field("frames", &self.inner.frames.borrow().len())
            .field("has_api", &self.inner.api.borrow().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use lms_api::stub::StubLms;

    use super::*;

    #[test]
    fn self_referential_links_read_as_absent() {
        let lonely = Window::new("lonely");
        lonely.set_parent(&lonely);
        lonely.set_opener(&lonely);

        assert!(lonely.parent().is_none());
        assert!(lonely.opener().is_none());
    }

    #[test]
    fn adopt_frame_links_both_directions() {
        let shell = Window::new("shell");
        let content = shell.new_frame("content");

        assert!(content.parent().expect("parent link").ptr_eq(&shell));
        assert_eq!(shell.frames().len(), 1);
        assert!(shell.frames()[0].ptr_eq(&content));
    }

    #[test]
    fn dead_parent_link_reads_as_absent() {
        let orphan = Window::new("orphan");
        {
            let shell = Window::new("shell");
            orphan.set_parent(&shell);
            assert!(orphan.parent().is_some());
        }
        assert!(orphan.parent().is_none());
    }

    #[test]
    fn api_attaches_and_detaches() {
        let shell = Window::new("shell");
        assert!(shell.api().is_none());

        shell.attach_api(Rc::new(StubLms::new()));
        assert!(shell.api().is_some());

        shell.detach_api();
        assert!(shell.api().is_none());
    }
}
