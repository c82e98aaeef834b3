/*
 *  display/error.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Error type for render surfaces
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

use std::error::Error;
use std::fmt;

/// Errors raised by a render surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// Surface has zero width or height
    InvalidSize { width: u32, height: u32 },

    /// Flushing the frame to the panel failed
    FlushFailed(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::InvalidSize { width, height } =>
                write!(f, "Invalid surface size: {}x{}", width, height),
            SurfaceError::FlushFailed(msg) =>
                write!(f, "Flush failed: {}", msg),
        }
    }
}

impl Error for SurfaceError {}

// the headless framebuffer never fails to draw
impl From<core::convert::Infallible> for SurfaceError {
    fn from(err: core::convert::Infallible) -> Self {
        match err {}
    }
}
