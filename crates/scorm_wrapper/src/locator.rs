use std::collections::HashSet;

use lms_api::ApiHandle;
use tracing::debug;

use crate::window::Window;

/// Hop bound for the upward fallback walk, from the ADL reference wrapper.
/// Frame nestings deeper than this are treated as malformed.
pub(crate) const MAX_PARENT_HOPS: usize = 7;

/// Search the window topology around `start` for the runtime API object.
///
/// Two strategies run in order. The tree search covers the start window,
/// its full ancestor chain, opener chains, and descendants, preferring
/// matches in exactly that order. If it comes up empty, a simpler fallback
/// walks strictly upward through parent links (at most [`MAX_PARENT_HOPS`]
/// hops), then retries that walk once from the start window's opener.
///
/// Never panics and always terminates: the tree search keeps a visited set,
/// and the upward walk is hop-bounded, so malformed or cyclic frame graphs
/// yield `None` rather than looping.
pub fn locate(start: &Window) -> Option<ApiHandle> {
    if let Some(api) = search_tree(start) {
        return Some(api);
    }
    debug!(start = start.name(), "tree search exhausted, trying upward walk");
    walk_upward(start)
}

/// One pending window in the tree search.
///
/// `Full` probes expand into parent, opener, and child frames; `Downward`
/// probes expand into child frames only, so descendant searches never
/// re-ascend into ancestors already on the stack.
enum Probe {
    Full(Window),
    Downward(Window),
}

fn search_tree(start: &Window) -> Option<ApiHandle> {
    let mut visited: HashSet<usize> = HashSet::new();
    let mut work = vec![Probe::Full(start.clone())];

    while let Some(probe) = work.pop() {
        let (window, downward_only) = match probe {
            Probe::Full(window) => (window, false),
            Probe::Downward(window) => (window, true),
        };

        if !visited.insert(window.id()) {
            continue;
        }

        if let Some(api) = window.api() {
            debug!(window = window.name(), "API object found");
            return Some(api);
        }
        debug!(window = window.name(), downward_only, "no API on this window");

        // Pre-order DFS: push the expansion reversed so the highest-priority
        // link (parent, then opener, then first frame) pops first and its
        // whole subtree is exhausted before the next link is considered.
        let mut expansion = Vec::new();
        if !downward_only {
            if let Some(parent) = window.parent() {
                expansion.push(Probe::Full(parent));
            }
            if let Some(opener) = window.opener() {
                expansion.push(Probe::Full(opener));
            }
        }
        for frame in window.frames() {
            expansion.push(Probe::Downward(frame));
        }
        while let Some(next) = expansion.pop() {
            work.push(next);
        }
    }

    None
}

/// Fallback: the ADL reference walk. Strictly upward, then once more from
/// the opener if the start window has one.
fn walk_upward(start: &Window) -> Option<ApiHandle> {
    if let Some(api) = walk_parent_chain(start) {
        return Some(api);
    }
    let opener = start.opener()?;
    debug!(opener = opener.name(), "retrying upward walk from opener");
    walk_parent_chain(&opener)
}

fn walk_parent_chain(start: &Window) -> Option<ApiHandle> {
    let mut current = start.clone();
    let mut hops = 0usize;
    loop {
        if let Some(api) = current.api() {
            return Some(api);
        }
        let parent = current.parent()?;
        hops += 1;
        if hops > MAX_PARENT_HOPS {
            debug!(
                window = current.name(),
                hops, "window too deeply nested, giving up"
            );
            return None;
        }
        current = parent;
    }
}
