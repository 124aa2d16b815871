use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use parallaxer::{ElementOffset, ScrollPosition, Viewport};

/// The per-element attribute consulted for speed overrides.
pub const SPEED_ATTRIBUTE: &str = "data-rellax-speed";

/// A callback registered with a host.
///
/// Hosts are single-threaded: callbacks are plain `Rc` closures dispatched
/// from the host's own event loop.
pub type HostCallback = Rc<dyn Fn()>;

/// Identity token for a registered scroll/resize listener.
///
/// Removal goes through the token handed out at registration, so a
/// controller never has to keep (or re-create) the original closure to
/// unregister it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Identity token for a pending frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// The platform capabilities a [`crate::ParallaxController`] consumes.
///
/// A DOM host maps these onto `querySelectorAll`, `getBoundingClientRect`,
/// `getAttribute`, `window.pageX/YOffset`, `addEventListener`,
/// `requestAnimationFrame` and inline-style writes. [`crate::SimHost`] is an
/// in-memory implementation for tests and headless use.
///
/// Contract for implementors:
/// - Hosts are cheap-clone handles; all methods take `&self`.
/// - None of these methods may synchronously invoke a registered callback;
///   dispatch happens later, from the host's event loop.
/// - `remove_listener` and `cancel_frame` are no-ops for unknown, already
///   removed, or already fired tokens.
/// - A frame request fires at most once; a continuous loop re-requests from
///   inside the callback.
pub trait ScrollHost {
    /// Handle to one host-side element.
    type Element: Clone;

    /// Resolves a selector to matching elements, in query order.
    fn query_elements(&self, selector: &str) -> Vec<Self::Element>;

    /// The element's current offset from the viewport origin, before any
    /// transform is applied.
    fn element_offset(&self, element: &Self::Element) -> ElementOffset;

    /// Reads a raw string attribute from the element.
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn viewport(&self) -> Viewport;

    fn scroll_position(&self) -> ScrollPosition;

    fn add_scroll_listener(&self, callback: HostCallback) -> ListenerId;

    fn add_resize_listener(&self, callback: HostCallback) -> ListenerId;

    fn remove_listener(&self, id: ListenerId);

    /// Schedules `callback` to run on the next frame tick.
    fn request_frame(&self, callback: HostCallback) -> FrameId;

    fn cancel_frame(&self, id: FrameId);

    /// Writes the element's visual transform (a CSS `transform` value).
    fn set_transform(&self, element: &Self::Element, transform: &str);
}
