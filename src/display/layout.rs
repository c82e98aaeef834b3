/*
 *  display/layout.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Face layout derived from the surface bounds and the screen shape
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

use embedded_graphics::mono_font::{iso_8859_13, MonoFont};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Physical shape of the watch screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenShape {
    #[default]
    Square,
    Round,
}

impl ScreenShape {
    pub fn from_round(is_round: bool) -> Self {
        if is_round { ScreenShape::Round } else { ScreenShape::Square }
    }
}

/// Text sizes for one screen shape.
///
/// Round screens get the larger set, the same way the text size resources
/// had a `_round` variant.
#[derive(Clone, Copy)]
pub struct FaceFonts {
    pub time: &'static MonoFont<'static>,
    pub date: &'static MonoFont<'static>,
    pub high_temp: &'static MonoFont<'static>,
    pub low_temp: &'static MonoFont<'static>,
}

impl FaceFonts {
    pub fn for_shape(shape: ScreenShape) -> Self {
        match shape {
            ScreenShape::Square => Self {
                time: &iso_8859_13::FONT_9X18,
                date: &iso_8859_13::FONT_6X10,
                high_temp: &iso_8859_13::FONT_8X13_BOLD,
                low_temp: &iso_8859_13::FONT_8X13,
            },
            ScreenShape::Round => Self {
                time: &iso_8859_13::FONT_10X20,
                date: &iso_8859_13::FONT_7X13,
                high_temp: &iso_8859_13::FONT_9X18_BOLD,
                low_temp: &iso_8859_13::FONT_9X18,
            },
        }
    }
}

impl std::fmt::Debug for FaceFonts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceFonts")
            .field("time", &self.time.character_size)
            .field("date", &self.date.character_size)
            .field("high_temp", &self.high_temp.character_size)
            .field("low_temp", &self.low_temp.character_size)
            .finish()
    }
}

/// Where everything goes on a given surface
#[derive(Debug, Clone, Copy)]
pub struct FaceLayout {
    pub bounds: Rectangle,
    pub shape: ScreenShape,
    pub fonts: FaceFonts,

    /// Baseline of the time text
    pub time_y: i32,

    /// Baseline of the date text
    pub date_y: i32,

    /// Divider between date and weather, drawn 20px below the date baseline
    pub divider_y: i32,

    /// Half length of the divider
    pub divider_half_width: i32,

    /// Baseline of the temperature row
    pub weather_y: i32,

    /// Gap between icon, high and low temperatures
    pub weather_gap: i32,

    /// Side of the square weather icon
    pub icon_size: u32,
}

impl FaceLayout {
    pub fn new(bounds: Rectangle, shape: ScreenShape) -> Self {
        let fonts = FaceFonts::for_shape(shape);
        let top = bounds.top_left.y;
        let h = bounds.size.height as i32;

        let time_y = top + h * 40 / 100;
        let date_y = top + h * 55 / 100;
        let divider_y = date_y + 20;
        let weather_y = top + h * 82 / 100;

        // icon scaled to the high temperature text plus a little headroom
        let icon_size = fonts.high_temp.character_size.height + 4;

        Self {
            bounds,
            shape,
            fonts,
            time_y,
            date_y,
            divider_y,
            divider_half_width: 30,
            weather_y,
            weather_gap: 20,
            icon_size,
        }
    }

    pub fn center_x(&self) -> i32 {
        self.bounds.top_left.x + self.bounds.size.width as i32 / 2
    }

    /// Top-left of the icon when its right edge sits `gap` left of `text_left`.
    pub fn icon_origin(&self, text_left: i32) -> Point {
        let x = text_left - self.weather_gap - self.icon_size as i32;
        // bottom of the icon rests just under the temperature baseline
        let y = self.weather_y - self.icon_size as i32 + 5;
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(w: u32, h: u32) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(w, h))
    }

    #[test]
    fn test_rows_are_ordered() {
        for shape in [ScreenShape::Square, ScreenShape::Round] {
            let layout = FaceLayout::new(bounds(240, 240), shape);
            assert!(layout.time_y < layout.date_y);
            assert!(layout.date_y < layout.divider_y);
            assert!(layout.divider_y < layout.weather_y);
            assert!(layout.weather_y < 240);
        }
    }

    #[test]
    fn test_round_uses_larger_text() {
        let square = FaceFonts::for_shape(ScreenShape::Square);
        let round = FaceFonts::for_shape(ScreenShape::Round);
        assert!(round.time.character_size.height > square.time.character_size.height);
        assert!(round.high_temp.character_size.height > square.high_temp.character_size.height);
    }

    #[test]
    fn test_center_follows_bounds_origin() {
        let layout = FaceLayout::new(Rectangle::new(Point::new(10, 20), Size::new(100, 100)), ScreenShape::Square);
        assert_eq!(layout.center_x(), 60);
        assert_eq!(layout.time_y, 60);
    }

    #[test]
    fn test_icon_sits_left_of_text() {
        let layout = FaceLayout::new(bounds(240, 240), ScreenShape::Square);
        let origin = layout.icon_origin(100);
        assert_eq!(origin.x + layout.icon_size as i32 + layout.weather_gap, 100);
        assert!(origin.y < layout.weather_y);
    }
}
