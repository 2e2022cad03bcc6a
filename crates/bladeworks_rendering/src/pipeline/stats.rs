//! Rendering statistics.

/// Statistics from one recorded swing frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Number of draw commands (sprites and ribbons).
    pub draw_calls: u32,
    /// Number of sprites recorded.
    pub sprites: u32,
    /// Number of ribbon vertices recorded.
    pub ribbon_vertices: u32,
    /// Number of blend-mode switches.
    pub blend_changes: u32,
    /// Commands dropped because the list was full.
    pub dropped_commands: u32,
    /// Stages the gate let through.
    pub stages_drawn: u32,
}

impl RenderStats {
    /// Returns true if nothing was dropped this frame.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.dropped_commands == 0
    }

    /// Returns true if draw calls are under `budget`.
    #[must_use]
    pub const fn draw_calls_ok(&self, budget: u32) -> bool {
        self.draw_calls < budget
    }
}
