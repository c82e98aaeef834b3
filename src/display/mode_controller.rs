/*
 *  display/mode_controller.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display mode controller - tracks visibility and ambient mode and derives
 *  whether the redraw timer should run
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use super::{DisplayState, RenderHints};

/// Result of feeding a lifecycle event to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub from: DisplayState,
    pub to: DisplayState,
}

impl ModeChange {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    /// Left a visible state for Hidden
    pub fn entered_hidden(&self) -> bool {
        self.from.is_visible() && !self.to.is_visible()
    }

    /// Came out of Hidden into either visible state
    pub fn entered_visible(&self) -> bool {
        !self.from.is_visible() && self.to.is_visible()
    }

    pub fn timer_should_run(&self) -> bool {
        self.to.timer_should_run()
    }
}

/// Display mode controller - the raw host flags and the state they imply
#[derive(Debug, Clone, Default)]
pub struct DisplayModeController {
    visible: bool,
    ambient: bool,
    low_bit_ambient: bool,
}

impl DisplayModeController {
    /// Starts hidden and interactive
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current display state
    pub fn state(&self) -> DisplayState {
        match (self.visible, self.ambient) {
            (false, _) => DisplayState::Hidden,
            (true, false) => DisplayState::VisibleInteractive,
            (true, true) => DisplayState::VisibleAmbient,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_ambient(&self) -> bool {
        self.ambient
    }

    pub fn low_bit_ambient(&self) -> bool {
        self.low_bit_ambient
    }

    /// Host reported visibility
    pub fn set_visible(&mut self, visible: bool) -> ModeChange {
        let from = self.state();
        self.visible = visible;
        self.report(from)
    }

    /// Host reported ambient mode. Tracked while hidden too, so the next
    /// "became visible" lands in the right state.
    pub fn set_ambient(&mut self, ambient: bool) -> ModeChange {
        let from = self.state();
        self.ambient = ambient;
        self.report(from)
    }

    /// Device property, fixed once reported by the host
    pub fn set_low_bit_ambient(&mut self, low_bit_ambient: bool) {
        self.low_bit_ambient = low_bit_ambient;
    }

    pub fn timer_should_run(&self) -> bool {
        self.state().timer_should_run()
    }

    pub fn render_hints(&self) -> RenderHints {
        RenderHints {
            anti_alias: !(self.low_bit_ambient && self.ambient),
        }
    }

    fn report(&self, from: DisplayState) -> ModeChange {
        let change = ModeChange { from, to: self.state() };
        if change.changed() {
            log::debug!("Display state changed: {:?} -> {:?}", change.from, change.to);
        }
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_hidden() {
        let controller = DisplayModeController::new();
        assert_eq!(controller.state(), DisplayState::Hidden);
        assert!(!controller.timer_should_run());
    }

    #[test]
    fn test_hidden_to_visible_interactive() {
        let mut controller = DisplayModeController::new();
        let change = controller.set_visible(true);
        assert_eq!(change.to, DisplayState::VisibleInteractive);
        assert!(change.entered_visible());
        assert!(change.timer_should_run());
    }

    #[test]
    fn test_hidden_to_visible_ambient() {
        let mut controller = DisplayModeController::new();
        let change = controller.set_ambient(true);
        assert!(!change.changed());
        let change = controller.set_visible(true);
        assert_eq!(change.to, DisplayState::VisibleAmbient);
        assert!(change.entered_visible());
        assert!(!change.timer_should_run());
    }

    #[test]
    fn test_ambient_toggle_while_visible() {
        let mut controller = DisplayModeController::new();
        controller.set_visible(true);

        let change = controller.set_ambient(true);
        assert_eq!(change.from, DisplayState::VisibleInteractive);
        assert_eq!(change.to, DisplayState::VisibleAmbient);
        assert!(!change.entered_hidden() && !change.entered_visible());

        let change = controller.set_ambient(false);
        assert_eq!(change.to, DisplayState::VisibleInteractive);
    }

    #[test]
    fn test_visible_to_hidden() {
        let mut controller = DisplayModeController::new();
        controller.set_visible(true);
        controller.set_ambient(true);
        let change = controller.set_visible(false);
        assert_eq!(change.from, DisplayState::VisibleAmbient);
        assert_eq!(change.to, DisplayState::Hidden);
        assert!(change.entered_hidden());
    }

    #[test]
    fn test_repeat_event_is_not_a_change() {
        let mut controller = DisplayModeController::new();
        controller.set_visible(true);
        let change = controller.set_visible(true);
        assert!(!change.changed());
        assert!(!change.entered_visible());
    }

    #[test]
    fn test_render_hints_follow_low_bit_ambient() {
        let mut controller = DisplayModeController::new();
        controller.set_visible(true);
        controller.set_ambient(true);
        assert!(controller.render_hints().anti_alias);

        controller.set_low_bit_ambient(true);
        assert!(!controller.render_hints().anti_alias);

        controller.set_ambient(false);
        assert!(controller.render_hints().anti_alias);
    }
}
