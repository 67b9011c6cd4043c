//! Controller button state
//!
//! The host feeds key events in; the simulation only reads edge and level
//! queries. `end_frame` must run once per frame after input is consumed so
//! that "just pressed" lasts exactly one frame.

use bitflags::bitflags;

bitflags! {
    /// Buttons on a virtual controller
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u16 {
        const A = 1 << 0;
        const B = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const UP = 1 << 4;
        const DOWN = 1 << 5;
    }
}

/// Number of controller slots
pub const CONTROLLER_COUNT: usize = 2;

/// Host keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Z,
    X,
}

/// One controller's current and previous-frame button sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controller {
    pub enabled: bool,
    current: Buttons,
    last: Buttons,
}

impl Controller {
    pub fn set_button(&mut self, button: Buttons, down: bool) {
        self.current.set(button, down);
    }

    pub fn is_down(&self, button: Buttons) -> bool {
        self.current.contains(button)
    }

    pub fn is_up(&self, button: Buttons) -> bool {
        !self.current.intersects(button)
    }

    /// Down now, up last frame
    pub fn was_just_pressed(&self, button: Buttons) -> bool {
        self.current.contains(button) && !self.last.intersects(button)
    }

    /// Up now, down last frame
    pub fn was_just_released(&self, button: Buttons) -> bool {
        !self.current.intersects(button) && self.last.contains(button)
    }
}

/// All controller slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub controllers: [Controller; CONTROLLER_COUNT],
}

impl Default for Input {
    fn default() -> Self {
        let mut controllers = [Controller::default(); CONTROLLER_COUNT];
        controllers[0].enabled = true;
        Self { controllers }
    }
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Primary (keyboard) controller
    pub fn primary(&self) -> &Controller {
        &self.controllers[0]
    }

    /// Map a host key event onto the primary controller
    pub fn handle_key(&mut self, key: Key, pressed: bool) {
        let button = match key {
            Key::Up => Buttons::UP,
            Key::Down => Buttons::DOWN,
            Key::Left => Buttons::LEFT,
            Key::Right => Buttons::RIGHT,
            Key::Z => Buttons::A,
            Key::X => Buttons::B,
        };
        self.controllers[0].set_button(button, pressed);
    }

    /// Latch current button state as last frame's
    pub fn end_frame(&mut self) {
        for controller in self.controllers.iter_mut().filter(|c| c.enabled) {
            controller.last = controller.current;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edges_last_one_frame() {
        let mut input = Input::new();
        input.handle_key(Key::Up, true);
        assert!(input.primary().is_down(Buttons::UP));
        assert!(input.primary().was_just_pressed(Buttons::UP));

        input.end_frame();
        assert!(input.primary().is_down(Buttons::UP));
        assert!(!input.primary().was_just_pressed(Buttons::UP));

        input.handle_key(Key::Up, false);
        assert!(input.primary().is_up(Buttons::UP));
        assert!(input.primary().was_just_released(Buttons::UP));

        input.end_frame();
        assert!(!input.primary().was_just_released(Buttons::UP));
    }

    #[test]
    fn test_buttons_are_independent() {
        let mut input = Input::new();
        input.handle_key(Key::Down, true);
        assert!(input.primary().is_up(Buttons::UP));
        assert!(input.primary().is_down(Buttons::DOWN));
        assert!(input.primary().is_up(Buttons::A | Buttons::B));
    }

    #[test]
    fn test_disabled_controller_does_not_latch() {
        let mut input = Input::new();
        assert!(!input.controllers[1].enabled);
        input.controllers[1].set_button(Buttons::A, true);
        input.end_frame();
        // Still reads as a fresh press since the slot never latched
        assert!(input.controllers[1].was_just_pressed(Buttons::A));
    }
}
