use crate::action::{Action, Movement};
use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// Keys that drive camera movement while held.
const MOVEMENT_KEYS: [(KeyCode, Movement); 4] = [
    (KeyCode::KeyW, Movement::Forward),
    (KeyCode::KeyS, Movement::Backward),
    (KeyCode::KeyA, Movement::Left),
    (KeyCode::KeyD, Movement::Right),
];

/// Input state carried between frames: held keys plus the two toggles.
///
/// A set of held keys lets several keys act at once (e.g. W and D for a
/// diagonal) instead of only the most recent one.
#[derive(Debug, Default)]
pub struct InputState {
    keys_held: HashSet<KeyCode>,
    wireframe: bool,
    cursor_free: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition. Returns the action a press triggers, if any.
    ///
    /// Toggles fire on the transition to pressed only, so key repeats are
    /// ignored.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> Option<Action> {
        if !pressed {
            self.keys_held.remove(&key);
            return None;
        }
        let newly_pressed = self.keys_held.insert(key);
        if !newly_pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(Action::Quit),
            KeyCode::KeyL => {
                self.wireframe = !self.wireframe;
                tracing::debug!(wireframe = self.wireframe, "toggled wireframe");
                Some(Action::SetWireframe(self.wireframe))
            }
            KeyCode::AltLeft => {
                self.cursor_free = !self.cursor_free;
                tracing::debug!(cursor_free = self.cursor_free, "toggled cursor lock");
                Some(Action::SetCursorFree(self.cursor_free))
            }
            _ => None,
        }
    }

    /// Record a key transition the GUI may already have handled.
    ///
    /// Releases always update the held set, otherwise a key released while
    /// a widget has focus would stay held. Presses the GUI consumed are
    /// dropped.
    pub fn handle_gui_key(
        &mut self,
        key: KeyCode,
        pressed: bool,
        gui_consumed: bool,
    ) -> Option<Action> {
        if pressed && gui_consumed {
            return None;
        }
        self.handle_key(key, pressed)
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Movements whose keys are currently held, in W, S, A, D order.
    pub fn held_movements(&self) -> impl Iterator<Item = Movement> + '_ {
        MOVEMENT_KEYS
            .iter()
            .filter(|(key, _)| self.keys_held.contains(key))
            .map(|(_, movement)| *movement)
    }

    /// Mouse delta to apply to the camera, or `None` while the cursor is free.
    pub fn look_delta(&self, dx: f64, dy: f64) -> Option<(f32, f32)> {
        if self.cursor_free {
            None
        } else {
            Some((dx as f32, dy as f32))
        }
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn cursor_free(&self) -> bool {
        self.cursor_free
    }

    /// Forget held keys, e.g. when the window loses focus and releases are
    /// never delivered.
    pub fn release_all(&mut self) {
        self.keys_held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn several_keys_held_at_once() {
        let mut input = InputState::new();
        input.handle_key(KeyCode::KeyW, true);
        input.handle_key(KeyCode::KeyD, true);
        let moves: Vec<_> = input.held_movements().collect();
        assert_eq!(moves, vec![Movement::Forward, Movement::Right]);

        input.handle_key(KeyCode::KeyW, false);
        let moves: Vec<_> = input.held_movements().collect();
        assert_eq!(moves, vec![Movement::Right]);
    }

    #[test]
    fn escape_quits() {
        let mut input = InputState::new();
        assert_eq!(input.handle_key(KeyCode::Escape, true), Some(Action::Quit));
        assert_eq!(input.handle_key(KeyCode::Escape, false), None);
    }

    #[test]
    fn wireframe_toggles_on_press_only() {
        let mut input = InputState::new();
        assert_eq!(
            input.handle_key(KeyCode::KeyL, true),
            Some(Action::SetWireframe(true))
        );
        // held: a second press event without a release does nothing
        assert_eq!(input.handle_key(KeyCode::KeyL, true), None);
        assert_eq!(input.handle_key(KeyCode::KeyL, false), None);
        assert!(input.wireframe());
        assert_eq!(
            input.handle_key(KeyCode::KeyL, true),
            Some(Action::SetWireframe(false))
        );
    }

    #[test]
    fn mouse_look_ignored_when_cursor_free() {
        let mut input = InputState::new();
        assert_eq!(input.look_delta(3.0, -2.0), Some((3.0, -2.0)));
        assert_eq!(
            input.handle_key(KeyCode::AltLeft, true),
            Some(Action::SetCursorFree(true))
        );
        assert_eq!(input.look_delta(3.0, -2.0), None);
        input.handle_key(KeyCode::AltLeft, false);
        input.handle_key(KeyCode::AltLeft, true);
        assert!(!input.cursor_free());
        assert!(input.look_delta(1.0, 1.0).is_some());
    }

    #[test]
    fn release_all_clears_movement() {
        let mut input = InputState::new();
        input.handle_key(KeyCode::KeyA, true);
        assert!(input.is_held(KeyCode::KeyA));
        input.release_all();
        assert_eq!(input.held_movements().count(), 0);
    }

    #[test]
    fn release_reaches_held_set_while_gui_has_focus() {
        let mut input = InputState::new();
        input.handle_gui_key(KeyCode::KeyW, true, false);
        assert!(input.is_held(KeyCode::KeyW));

        // a text field took focus before W was let go
        input.handle_gui_key(KeyCode::KeyW, false, true);
        assert!(!input.is_held(KeyCode::KeyW));
        assert_eq!(input.held_movements().count(), 0);
    }

    #[test]
    fn toggles_still_work_after_focused_release() {
        let mut input = InputState::new();
        input.handle_gui_key(KeyCode::KeyL, true, false);
        input.handle_gui_key(KeyCode::KeyL, false, true);
        assert_eq!(
            input.handle_gui_key(KeyCode::KeyL, true, false),
            Some(Action::SetWireframe(false))
        );
    }

    #[test]
    fn consumed_press_is_ignored() {
        let mut input = InputState::new();
        assert_eq!(input.handle_gui_key(KeyCode::KeyL, true, true), None);
        assert!(!input.wireframe());
        assert!(!input.is_held(KeyCode::KeyL));
        assert_eq!(input.handle_gui_key(KeyCode::Escape, true, true), None);
    }
}
