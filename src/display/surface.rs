/*
 *  display/surface.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Headless render surface - an in-memory panel for the demo host and tests
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

use core::convert::Infallible;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};

use crate::display::error::SurfaceError;

/// Counters a test or the host can inspect
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SurfaceStats {
    /// Number of frames flushed
    pub flush_count: usize,

    /// Number of full clears
    pub clear_count: usize,

    /// Simulate flush failures (for error testing)
    pub simulate_flush_failure: bool,
}

/// Monochrome framebuffer standing in for the watch panel.
///
/// Draw into it through `DrawTarget`, then `flush()` to count the frame.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    buf: Vec<BinaryColor>,
    width: u32,
    height: u32,
    stats: SurfaceStats,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidSize { width, height });
        }
        Ok(Self {
            buf: vec![BinaryColor::Off; (width * height) as usize],
            width,
            height,
            stats: SurfaceStats::default(),
        })
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(self.width, self.height))
    }

    pub fn stats(&self) -> &SurfaceStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SurfaceStats {
        &mut self.stats
    }

    /// Present the current frame
    pub fn flush(&mut self) -> Result<(), SurfaceError> {
        if self.stats.simulate_flush_failure {
            return Err(SurfaceError::FlushFailed("simulated flush failure".to_string()));
        }
        self.stats.flush_count += 1;
        Ok(())
    }

    /// Get pixel at position
    pub fn pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.buf.get((y * self.width + x) as usize).copied()
    }

    /// Count number of pixels set to On
    pub fn count_on_pixels(&self) -> usize {
        self.buf.iter().filter(|&&p| p == BinaryColor::On).count()
    }

    /// Count On pixels inside a region, clipped to the surface
    pub fn count_on_pixels_in(&self, area: &Rectangle) -> usize {
        area.points()
            .filter(|p| p.x >= 0 && p.y >= 0)
            .filter_map(|p| self.pixel(p.x as u32, p.y as u32))
            .filter(|&c| c == BinaryColor::On)
            .count()
    }

    /// Text dump of the frame, two columns per pixel to keep the aspect
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.width * 2 + 1) * self.height) as usize);
        for row in self.buf.chunks(self.width as usize) {
            for &px in row {
                out.push_str(if px == BinaryColor::On { "##" } else { "  " });
            }
            out.push('\n');
        }
        out
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 {
            let (x, y) = (p.x as u32, p.y as u32);
            if x < self.width && y < self.height {
                return Some((y * self.width + x) as usize);
            }
        }
        None
    }
}

impl OriginDimensions for HeadlessSurface {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for HeadlessSurface {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.stats.clear_count += 1;
        self.buf.fill(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    #[test]
    fn test_surface_creation() {
        let surface = HeadlessSurface::new(64, 32).unwrap();
        assert_eq!(surface.size(), Size::new(64, 32));
        assert_eq!(surface.count_on_pixels(), 0);
        assert!(HeadlessSurface::new(0, 32).is_err());
    }

    #[test]
    fn test_surface_drawing() {
        let mut surface = HeadlessSurface::new(64, 32).unwrap();
        Line::new(Point::new(0, 0), Point::new(10, 10))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut surface)
            .unwrap();
        assert!(surface.count_on_pixels() > 0);
        assert_eq!(surface.pixel(0, 0), Some(BinaryColor::On));
        assert_eq!(surface.pixel(64, 0), None);
    }

    #[test]
    fn test_surface_clear_and_flush() {
        let mut surface = HeadlessSurface::new(8, 8).unwrap();
        surface.clear(BinaryColor::On).unwrap();
        assert_eq!(surface.count_on_pixels(), 64);
        surface.flush().unwrap();
        assert_eq!(surface.stats().clear_count, 1);
        assert_eq!(surface.stats().flush_count, 1);
    }

    #[test]
    fn test_simulated_flush_failure() {
        let mut surface = HeadlessSurface::new(8, 8).unwrap();
        surface.stats_mut().simulate_flush_failure = true;
        assert!(surface.flush().is_err());
        surface.stats_mut().simulate_flush_failure = false;
        assert!(surface.flush().is_ok());
        assert_eq!(surface.stats().flush_count, 1);
    }

    #[test]
    fn test_ascii_dump_shape() {
        let mut surface = HeadlessSurface::new(3, 2).unwrap();
        surface.draw_iter([Pixel(Point::new(1, 0), BinaryColor::On)]).unwrap();
        assert_eq!(surface.to_ascii(), "  ##  \n      \n");
    }
}
