/*
 *  lib.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Watch face core: condition icons, companion-synced weather, display
 *  modes and the second-aligned redraw timer
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

pub mod clock;
pub mod condition;
pub mod config;
pub mod display;
pub mod face;
pub mod host;
pub mod scheduler;
pub mod sync;
pub mod weather;

// Re-exports for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use condition::{icon_for, WeatherIcon};
pub use display::DisplayState;
pub use face::{TapKind, WatchFace};
pub use scheduler::RedrawScheduler;
pub use sync::{SyncChannel, SyncError, SyncEvent};
pub use weather::{WeatherSnapshot, WeatherState, WeatherUpdate};
