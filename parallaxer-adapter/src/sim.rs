use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use parallaxer::{ElementOffset, ScrollPosition, Viewport};

use crate::{FrameId, HostCallback, ListenerId, ScrollHost};

struct SimElementData {
    selector: String,
    offset: ElementOffset,
    attributes: Vec<(String, String)>,
    transform: Option<String>,
}

struct SimState {
    viewport: Viewport,
    scroll: ScrollPosition,
    elements: Vec<SimElementData>,
    scroll_listeners: Vec<(ListenerId, HostCallback)>,
    resize_listeners: Vec<(ListenerId, HostCallback)>,
    frames: Vec<(FrameId, HostCallback)>,
    next_listener: u64,
    next_frame: u64,
}

/// Handle to an element inserted into a [`SimHost`].
///
/// Handles stay valid for the host's lifetime; the sim never removes
/// elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SimElement(usize);

/// An in-memory [`ScrollHost`] for tests and headless integrations.
///
/// The sim models the page surface a controller touches: a flat element
/// list with string attributes and inline transforms, a scroll position, a
/// viewport, listener registries, and a one-shot frame queue. Events are
/// delivered synchronously from [`Self::scroll_to`] / [`Self::resize_to`] /
/// [`Self::run_frame`], in registration order; callbacks are cloned out
/// before dispatch so they may freely call back into the host.
#[derive(Clone)]
pub struct SimHost {
    state: Rc<RefCell<SimState>>,
}

impl SimHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: Rc::new(RefCell::new(SimState {
                viewport,
                scroll: ScrollPosition::ORIGIN,
                elements: Vec::new(),
                scroll_listeners: Vec::new(),
                resize_listeners: Vec::new(),
                frames: Vec::new(),
                next_listener: 0,
                next_frame: 0,
            })),
        }
    }

    pub fn insert_element(&self, selector: &str, offset: ElementOffset) -> SimElement {
        let mut state = self.state.borrow_mut();
        state.elements.push(SimElementData {
            selector: selector.to_string(),
            offset,
            attributes: Vec::new(),
            transform: None,
        });
        SimElement(state.elements.len() - 1)
    }

    pub fn set_element_attribute(&self, element: SimElement, name: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        let attributes = &mut state.elements[element.0].attributes;
        if let Some(entry) = attributes.iter_mut().find(|(n, _)| n == name) {
            entry.1 = value.to_string();
        } else {
            attributes.push((name.to_string(), value.to_string()));
        }
    }

    /// The element's current inline transform, if one has been applied.
    pub fn transform_of(&self, element: SimElement) -> Option<String> {
        self.state.borrow().elements[element.0].transform.clone()
    }

    /// Moves the page and dispatches scroll listeners.
    pub fn scroll_to(&self, scroll: ScrollPosition) {
        let callbacks: Vec<HostCallback> = {
            let mut state = self.state.borrow_mut();
            state.scroll = scroll;
            state
                .scroll_listeners
                .iter()
                .map(|(_, cb)| Rc::clone(cb))
                .collect()
        };
        for callback in callbacks {
            callback();
        }
    }

    /// Moves the page without dispatching scroll listeners.
    ///
    /// Models scroll changes the platform never reported as events; only
    /// the frame loop picks these up.
    pub fn scroll_silently(&self, scroll: ScrollPosition) {
        self.state.borrow_mut().scroll = scroll;
    }

    /// Resizes the viewport and dispatches resize listeners.
    pub fn resize_to(&self, viewport: Viewport) {
        let callbacks: Vec<HostCallback> = {
            let mut state = self.state.borrow_mut();
            state.viewport = viewport;
            state
                .resize_listeners
                .iter()
                .map(|(_, cb)| Rc::clone(cb))
                .collect()
        };
        for callback in callbacks {
            callback();
        }
    }

    /// Fires every pending frame callback once and returns how many ran.
    ///
    /// Frames requested during dispatch land in the next tick, mirroring
    /// one-shot animation-frame semantics.
    pub fn run_frame(&self) -> usize {
        let frames: Vec<HostCallback> = {
            let mut state = self.state.borrow_mut();
            core::mem::take(&mut state.frames)
                .into_iter()
                .map(|(_, cb)| cb)
                .collect()
        };
        let fired = frames.len();
        for callback in frames {
            callback();
        }
        fired
    }

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    pub fn listener_count(&self) -> usize {
        let state = self.state.borrow();
        state.scroll_listeners.len() + state.resize_listeners.len()
    }
}

impl ScrollHost for SimHost {
    type Element = SimElement;

    fn query_elements(&self, selector: &str) -> Vec<SimElement> {
        self.state
            .borrow()
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.selector == selector)
            .map(|(i, _)| SimElement(i))
            .collect()
    }

    fn element_offset(&self, element: &SimElement) -> ElementOffset {
        self.state.borrow().elements[element.0].offset
    }

    fn attribute(&self, element: &SimElement, name: &str) -> Option<String> {
        self.state.borrow().elements[element.0]
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn viewport(&self) -> Viewport {
        self.state.borrow().viewport
    }

    fn scroll_position(&self) -> ScrollPosition {
        self.state.borrow().scroll
    }

    fn add_scroll_listener(&self, callback: HostCallback) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_listener);
        state.next_listener += 1;
        state.scroll_listeners.push((id, callback));
        id
    }

    fn add_resize_listener(&self, callback: HostCallback) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_listener);
        state.next_listener += 1;
        state.resize_listeners.push((id, callback));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        let mut state = self.state.borrow_mut();
        state.scroll_listeners.retain(|(lid, _)| *lid != id);
        state.resize_listeners.retain(|(lid, _)| *lid != id);
    }

    fn request_frame(&self, callback: HostCallback) -> FrameId {
        let mut state = self.state.borrow_mut();
        let id = FrameId(state.next_frame);
        state.next_frame += 1;
        state.frames.push((id, callback));
        id
    }

    fn cancel_frame(&self, id: FrameId) {
        self.state.borrow_mut().frames.retain(|(fid, _)| *fid != id);
    }

    fn set_transform(&self, element: &SimElement, transform: &str) {
        self.state.borrow_mut().elements[element.0].transform = Some(transform.to_string());
    }
}
