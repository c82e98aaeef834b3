/*
 *  display/components/weather.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Weather display component - divider, icon, high and low temperatures
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

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Baseline, Text};

use crate::display::components::icons::draw_icon;
use crate::display::layout::FaceLayout;
use crate::display::renderer::{FacePalette, Frame};

/// Weather display component
#[derive(Debug, Clone)]
pub struct WeatherDisplay {
    layout: FaceLayout,
}

impl WeatherDisplay {
    pub fn new(layout: FaceLayout) -> Self {
        Self { layout }
    }

    /// Draw the weather row.
    ///
    /// Nothing is drawn in ambient mode or until both temperatures are known.
    /// A missing icon is skipped, the temperatures still draw.
    pub fn render<D, C>(&self, target: &mut D, frame: &Frame<'_>, palette: &FacePalette<C>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
        C: PixelColor,
    {
        if frame.ambient {
            return Ok(());
        }
        let (Some(high), Some(low)) = (&frame.weather.high_temp, &frame.weather.low_temp) else {
            return Ok(());
        };

        let l = &self.layout;
        let cx = l.center_x();

        Line::new(
            Point::new(cx - l.divider_half_width, l.divider_y),
            Point::new(cx + l.divider_half_width, l.divider_y),
        )
        .into_styled(PrimitiveStyle::with_stroke(palette.secondary, 1))
        .draw(target)?;

        let high_style = MonoTextStyle::new(l.fonts.high_temp, palette.primary);
        let low_style = MonoTextStyle::new(l.fonts.low_temp, palette.secondary);

        let high_len = text_width(&high_style, high);
        let high_x = cx - high_len / 2;

        if let Some(icon) = frame.weather.icon {
            draw_icon(target, icon, l.icon_origin(high_x), l.icon_size, palette.primary)?;
        }

        Text::with_baseline(high, Point::new(high_x, l.weather_y), high_style, Baseline::Alphabetic)
            .draw(target)?;
        Text::with_baseline(
            low,
            Point::new(cx + high_len / 2 + l.weather_gap, l.weather_y),
            low_style,
            Baseline::Alphabetic,
        )
        .draw(target)?;

        Ok(())
    }
}

fn text_width<S: TextRenderer>(style: &S, text: &str) -> i32 {
    style
        .measure_string(text, Point::zero(), Baseline::Alphabetic)
        .bounding_box
        .size
        .width as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mono_font::iso_8859_13::FONT_8X13_BOLD;
    use embedded_graphics::pixelcolor::BinaryColor;

    #[test]
    fn test_text_width_scales_with_length() {
        let style = MonoTextStyle::new(&FONT_8X13_BOLD, BinaryColor::On);
        assert_eq!(text_width(&style, ""), 0);
        assert_eq!(text_width(&style, "70"), 16);
        assert_eq!(text_width(&style, "100"), 24);
    }
}
