use alloc::string::String;

use crate::{ElementOffset, ScrollPosition};

/// Everything the engine needs to know about one matched element at
/// construction time.
///
/// Adapters build one descriptor per element in query order: the element's
/// current viewport-relative offset plus the raw value of its
/// `data-rellax-speed` attribute, if present.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementDescriptor {
    pub offset: ElementOffset,
    /// Raw per-element speed attribute value, unparsed.
    pub speed_attribute: Option<String>,
}

impl ElementDescriptor {
    pub fn new(offset: ElementOffset, speed_attribute: Option<String>) -> Self {
        Self {
            offset,
            speed_attribute,
        }
    }

    /// A descriptor with no speed attribute.
    pub fn at(left: f64, top: f64) -> Self {
        Self {
            offset: ElementOffset::new(left, top),
            speed_attribute: None,
        }
    }

    pub fn with_speed_attribute(mut self, value: impl Into<String>) -> Self {
        self.speed_attribute = Some(value.into());
        self
    }
}

/// A tracked element's fixed per-instance data.
///
/// `base_x`/`base_y` are the element's document-relative coordinates captured
/// once at construction (measured offset + scroll position at that instant).
/// They are never recomputed, even if the document reflows later; the
/// translation formula treats them as the element's zero point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackedElement {
    pub speed: f64,
    pub base_x: f64,
    pub base_y: f64,
}

impl TrackedElement {
    pub(crate) fn capture(
        descriptor: &ElementDescriptor,
        scroll: ScrollPosition,
        default_speed: f64,
    ) -> Self {
        Self {
            speed: resolve_speed(descriptor.speed_attribute.as_deref(), default_speed),
            base_x: descriptor.offset.left + scroll.x,
            base_y: descriptor.offset.top + scroll.y,
        }
    }
}

/// Parses a per-element speed attribute, falling back to `default` when the
/// attribute is absent or does not parse to a finite float.
///
/// Parsing is strict (`str::parse::<f64>` on the trimmed value): trailing
/// garbage is rejected rather than prefix-parsed, and `NaN`/infinities fall
/// back. An explicit `"0"` is honored.
pub fn resolve_speed(attribute: Option<&str>, default: f64) -> f64 {
    attribute
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|speed| speed.is_finite())
        .unwrap_or(default)
}
