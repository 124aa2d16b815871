use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use parallaxer::{ElementDescriptor, Parallax, ParallaxOptions};

use crate::{FrameId, HostCallback, ListenerId, SPEED_ATTRIBUTE, ScrollHost};

struct Shared<E> {
    engine: Parallax,
    elements: Vec<E>,
    scroll_listener: Option<ListenerId>,
    resize_listener: Option<ListenerId>,
    frame: Option<FrameId>,
    stopped: bool,
}

/// Drives a [`Parallax`] engine against a [`ScrollHost`].
///
/// Construction resolves the selector, captures per-element baselines at the
/// host's current scroll position, applies transforms once, registers one
/// scroll and one resize listener, and starts a self-rescheduling frame loop.
/// Scroll events re-apply transforms immediately; resize events only refresh
/// the cached viewport; each frame tick re-reads the host scroll and applies
/// transforms again.
///
/// A selector that matches nothing leaves the controller inert: a diagnostic
/// is logged, no listeners are registered, no frames are requested, and
/// [`Self::destroy`] is a safe no-op.
///
/// The controller participates in the host's single-threaded event loop;
/// callbacks hold only a weak reference to its state, and teardown (explicit
/// [`Self::destroy`] or drop) removes both listeners by token and stops the
/// frame loop deterministically.
pub struct ParallaxController<H: ScrollHost> {
    host: H,
    shared: Rc<RefCell<Shared<H::Element>>>,
}

impl<H> ParallaxController<H>
where
    H: ScrollHost + Clone + 'static,
    H::Element: 'static,
{
    pub fn new(host: H, selector: &str, options: ParallaxOptions) -> Self {
        let elements = host.query_elements(selector);
        if elements.is_empty() {
            pwarn!(selector, "no elements matched selector; controller stays inert");
            return Self {
                host,
                shared: Rc::new(RefCell::new(Shared {
                    engine: Parallax::new(options, []),
                    elements,
                    scroll_listener: None,
                    resize_listener: None,
                    frame: None,
                    stopped: true,
                })),
            };
        }

        let descriptors: Vec<ElementDescriptor> = elements
            .iter()
            .map(|element| {
                ElementDescriptor::new(
                    host.element_offset(element),
                    host.attribute(element, SPEED_ATTRIBUTE),
                )
            })
            .collect();
        // Live host geometry wins over whatever initial values the caller
        // put in the options; baselines must be measured against the scroll
        // position actually in effect now.
        let options = options
            .with_initial_viewport(Some(host.viewport()))
            .with_initial_scroll_value(host.scroll_position());
        pdebug!(selector, elements = elements.len(), "ParallaxController::new");

        let shared = Rc::new(RefCell::new(Shared {
            engine: Parallax::new(options, descriptors),
            elements,
            scroll_listener: None,
            resize_listener: None,
            frame: None,
            stopped: false,
        }));

        // Scroll events recompute and apply transforms immediately,
        // independent of the frame loop.
        let scroll_listener = host.add_scroll_listener(Rc::new({
            let host = host.clone();
            let shared = Rc::downgrade(&shared);
            move || {
                if let Some(shared) = shared.upgrade() {
                    update_positions(&host, &shared);
                }
            }
        }));

        // Resize events refresh the cached viewport only; transforms are
        // left for the next scroll or frame tick.
        let resize_listener = host.add_resize_listener(Rc::new({
            let host = host.clone();
            let shared = Rc::downgrade(&shared);
            move || {
                let Some(shared) = shared.upgrade() else {
                    return;
                };
                let viewport = host.viewport();
                let mut state = shared.borrow_mut();
                if state.stopped {
                    return;
                }
                state.engine.set_viewport(viewport);
            }
        }));

        {
            let mut state = shared.borrow_mut();
            state.scroll_listener = Some(scroll_listener);
            state.resize_listener = Some(resize_listener);
        }

        update_positions(&host, &shared);
        schedule_frame(&host, &shared);

        Self { host, shared }
    }
}

impl<H: ScrollHost> ParallaxController<H> {
    pub fn host(&self) -> &H {
        &self.host
    }

    /// `false` once destroyed, and from birth when the selector matched
    /// nothing.
    pub fn is_active(&self) -> bool {
        !self.shared.borrow().stopped
    }

    pub fn element_count(&self) -> usize {
        self.shared.borrow().engine.element_count()
    }

    /// Runs `f` against the wrapped engine.
    pub fn with_parallax<R>(&self, f: impl FnOnce(&Parallax) -> R) -> R {
        f(&self.shared.borrow().engine)
    }

    /// Recomputes and applies transforms at the host's current scroll
    /// position. Normally driven by the scroll listener and the frame loop;
    /// exposed for hosts that want to force a paint.
    pub fn update_positions(&self) {
        update_positions(&self.host, &self.shared);
    }

    /// Stops the frame loop and removes both listeners.
    ///
    /// Teardown is deterministic: the stop flag is checked before every
    /// frame body and before every reschedule, so no further transforms are
    /// written even if the host already queued a dispatch. Safe to call on
    /// an inert controller and safe to call twice.
    pub fn destroy(&self) {
        let (frame, scroll_listener, resize_listener) = {
            let mut state = self.shared.borrow_mut();
            if state.stopped {
                return;
            }
            state.stopped = true;
            (
                state.frame.take(),
                state.scroll_listener.take(),
                state.resize_listener.take(),
            )
        };
        if let Some(id) = frame {
            self.host.cancel_frame(id);
        }
        if let Some(id) = scroll_listener {
            self.host.remove_listener(id);
        }
        if let Some(id) = resize_listener {
            self.host.remove_listener(id);
        }
        pdebug!("ParallaxController::destroy");
    }
}

impl<H: ScrollHost> Drop for ParallaxController<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<H: ScrollHost> fmt::Debug for ParallaxController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.borrow();
        f.debug_struct("ParallaxController")
            .field("elements", &state.engine.element_count())
            .field("active", &(!state.stopped))
            .finish_non_exhaustive()
    }
}

fn update_positions<H: ScrollHost>(host: &H, shared: &RefCell<Shared<H::Element>>) {
    let scroll = host.scroll_position();
    let mut state = shared.borrow_mut();
    if state.stopped {
        return;
    }
    state.engine.set_scroll_position(scroll);
    ptrace!(x = scroll.x, y = scroll.y, "apply transforms");
    let state = &*state;
    state.engine.for_each_translation(|index, translation| {
        host.set_transform(&state.elements[index], &translation.to_transform_style());
    });
}

fn schedule_frame<H>(host: &H, shared: &Rc<RefCell<Shared<H::Element>>>)
where
    H: ScrollHost + Clone + 'static,
    H::Element: 'static,
{
    if shared.borrow().stopped {
        return;
    }
    let callback: HostCallback = Rc::new({
        let host = host.clone();
        let weak = Rc::downgrade(shared);
        move || {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            {
                let mut state = shared.borrow_mut();
                if state.stopped {
                    return;
                }
                state.frame = None;
            }
            update_positions(&host, &shared);
            schedule_frame(&host, &shared);
        }
    });
    let id = host.request_frame(callback);
    shared.borrow_mut().frame = Some(id);
}
