use super::types::{Direction, NavigationMode};

/// Input delivered to a session; applied between ticks, never mid-step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    SetHeading(Direction),
    TogglePause,
    /// Selecting the active mode again switches back to manual control.
    ToggleMode(NavigationMode),
    ToggleSpeed,
    Restart,
}
