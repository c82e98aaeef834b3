/*
 *  display/mod.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem - mode tracking, layout, rendering and surfaces
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

pub mod error;
pub mod mode_controller;
pub mod layout;
pub mod components;
pub mod renderer;
pub mod surface;

// Re-exports for convenience
pub use error::SurfaceError;
pub use mode_controller::{DisplayModeController, ModeChange};
pub use layout::{FaceLayout, ScreenShape};
pub use renderer::{FaceRenderer, FacePalette, Frame};
pub use surface::HeadlessSurface;

/// Display state - controls whether the face redraws and at what detail
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DisplayState {
    Hidden,             // Not on screen, nothing is drawn
    VisibleInteractive, // Full detail, seconds shown, redraw every second
    VisibleAmbient,     // Low power, no seconds, host drives minute ticks
}

impl DisplayState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, DisplayState::Hidden)
    }

    /// The redraw timer runs only here
    pub fn timer_should_run(&self) -> bool {
        matches!(self, DisplayState::VisibleInteractive)
    }
}

/// Hints the render pass applies to every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderHints {
    /// Off in ambient mode on displays with reduced color depth
    pub anti_alias: bool,
}

impl Default for RenderHints {
    fn default() -> Self {
        Self { anti_alias: true }
    }
}
