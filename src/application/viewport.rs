// Viewport width capability and the resize-driven axis layout
use crate::domain::layout::{is_narrow, AxisLayout};

/// Width used when a client does not report one.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1024;

/// Anything that can report the current viewport width in logical pixels.
pub trait Viewport: Send + Sync {
    fn width(&self) -> u32;
}

/// A viewport whose width never changes, e.g. one reported with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedViewport(pub u32);

impl Default for FixedViewport {
    fn default() -> Self {
        Self(DEFAULT_VIEWPORT_WIDTH)
    }
}

impl Viewport for FixedViewport {
    fn width(&self) -> u32 {
        self.0
    }
}

/// Axis layout that follows the viewport. Every call re-reads the width,
/// so a resize is picked up by the next layout request.
pub struct ResponsiveAxis<V: Viewport> {
    viewport: V,
}

impl<V: Viewport> ResponsiveAxis<V> {
    pub fn new(viewport: V) -> Self {
        Self { viewport }
    }

    pub fn is_narrow(&self) -> bool {
        is_narrow(self.viewport.width())
    }

    pub fn layout(&self) -> AxisLayout {
        AxisLayout::for_narrow(self.is_narrow())
    }
}
