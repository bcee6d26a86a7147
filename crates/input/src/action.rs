/// A discrete action produced by a key press.
///
/// The application loop consumes actions, never raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Close the window and leave the render loop.
    Quit,
    /// Wireframe rendering was switched; carries the new state.
    SetWireframe(bool),
    /// Cursor lock was switched; `true` means the cursor is free and the
    /// camera ignores the mouse.
    SetCursorFree(bool),
}

/// Continuous camera movement requested by a held key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_carry_state() {
        assert_ne!(Action::SetWireframe(true), Action::SetWireframe(false));
        assert!(matches!(Action::SetCursorFree(true), Action::SetCursorFree(true)));
    }
}
