//! Render hosts receiving the panel's resolved tree.

use crate::view::Element;
use std::cell::RefCell;
use std::rc::Rc;

/// Receives the panel's tree once per full render.
///
/// The tree is fully resolved: it contains no slots. Any `FnMut(&Element)`
/// closure is a host.
pub trait RenderHost {
    fn mount(&mut self, tree: &Element);
}

impl<F: FnMut(&Element)> RenderHost for F {
    fn mount(&mut self, tree: &Element) {
        self(tree)
    }
}

#[derive(Debug, Default)]
struct Frames {
    last: Option<Element>,
    count: u64,
}

/// A host that keeps the last mounted frame, for tests and tooling.
///
/// Clones share the same frames, so a test can keep one clone while the
/// panel owns another.
#[derive(Clone, Debug, Default)]
pub struct HeadlessHost {
    frames: Rc<RefCell<Frames>>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently mounted tree.
    pub fn last_frame(&self) -> Option<Element> {
        self.frames.borrow().last.clone()
    }

    /// Text layout of the most recently mounted tree, or an empty string.
    pub fn last_text(&self) -> String {
        self.frames
            .borrow()
            .last
            .as_ref()
            .map(Element::to_string)
            .unwrap_or_default()
    }

    /// Number of frames mounted so far.
    pub fn frame_count(&self) -> u64 {
        self.frames.borrow().count
    }
}

impl RenderHost for HeadlessHost {
    fn mount(&mut self, tree: &Element) {
        let mut frames = self.frames.borrow_mut();
        frames.last = Some(tree.clone());
        frames.count += 1;
    }
}
