/// What happens to sprite pixels that would land beyond the edge of the display.
///
/// Either way a sprite's origin is wrapped onto the screen first, so drawing never indexes
/// outside the framebuffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum EdgePolicy {
    /// Pixels past the right or bottom edge reappear on the opposite side.
    #[default]
    Wrap,
    /// Pixels past the right or bottom edge are discarded.
    Clip,
}

/// Behaviour that differs between Chip-8 interpreters and that some ROMs depend on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub edges: EdgePolicy,
}
