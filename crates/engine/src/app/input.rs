#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Jump,
    Attack,
    Confirm,
    Back,
}

const ACTION_COUNT: usize = 6;

/// Held state plus a one-tick pressed edge per action.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
    pressed: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        let index = action.index();
        if is_down && !self.down[index] {
            self.pressed[index] = true;
        }
        self.down[index] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    pub(crate) fn was_pressed(&self, action: InputAction) -> bool {
        self.pressed[action.index()]
    }

    pub(crate) fn mark_pressed(&mut self, action: InputAction) {
        self.pressed[action.index()] = true;
    }

    pub(crate) fn clear_pressed(&mut self) {
        self.pressed = [false; ACTION_COUNT];
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveLeft => 0,
            InputAction::MoveRight => 1,
            InputAction::Jump => 2,
            InputAction::Attack => 3,
            InputAction::Confirm => 4,
            InputAction::Back => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_edge_fires_only_on_transition_to_down() {
        let mut states = ActionStates::default();
        states.set(InputAction::Jump, true);
        assert!(states.was_pressed(InputAction::Jump));

        states.clear_pressed();
        states.set(InputAction::Jump, true);
        assert!(!states.was_pressed(InputAction::Jump));
        assert!(states.is_down(InputAction::Jump));
    }

    #[test]
    fn release_keeps_pending_edge_until_cleared() {
        let mut states = ActionStates::default();
        states.set(InputAction::Attack, true);
        states.set(InputAction::Attack, false);

        assert!(states.was_pressed(InputAction::Attack));
        assert!(!states.is_down(InputAction::Attack));
    }
}
