/// OS notifications the host window reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Show { visible: bool },
    DpiChanged { dpi: u32 },
    /// Position or size changed, typically after a user drag.
    PositionChanged,
    SystemCommand { id: u32 },
    Destroy,
}

/// Whether the event was consumed or should reach the default handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Handled,
    PassThrough,
}

pub trait WindowEventSink {
    fn handle_event(&self, event: WindowEvent) -> EventOutcome;
}
