/*
 *  display/renderer.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Face renderer - one render pass over any embedded-graphics target
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

use chrono::{DateTime, FixedOffset};
use embedded_graphics::pixelcolor::{BinaryColor, Gray4, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::display::components::{ClockDisplay, WeatherDisplay};
use crate::display::layout::{FaceLayout, ScreenShape};
use crate::display::RenderHints;
use crate::weather::WeatherSnapshot;

/// Everything a render pass reads, captured at draw time
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub time: DateTime<FixedOffset>,
    pub ambient: bool,
    pub hints: RenderHints,
    pub weather: &'a WeatherSnapshot,
}

/// Colors used by the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacePalette<C: PixelColor> {
    /// Interactive background
    pub background: C,

    /// Ambient background, always black
    pub ambient_background: C,

    /// Time and high temperature
    pub primary: C,

    /// Date, divider and low temperature
    pub secondary: C,
}

impl<C: PixelColor> FacePalette<C> {
    /// Collapse to pure on/off when anti-aliasing is off.
    ///
    /// Low-bit ambient panels only show full-intensity pixels, so secondary
    /// text is promoted to the primary color.
    pub fn for_hints(&self, hints: RenderHints) -> Self {
        if hints.anti_alias {
            *self
        } else {
            Self { secondary: self.primary, ..*self }
        }
    }

    pub fn background_for(&self, ambient: bool) -> C {
        if ambient { self.ambient_background } else { self.background }
    }
}

impl Default for FacePalette<BinaryColor> {
    fn default() -> Self {
        Self {
            background: BinaryColor::Off,
            ambient_background: BinaryColor::Off,
            primary: BinaryColor::On,
            secondary: BinaryColor::On,
        }
    }
}

impl Default for FacePalette<Gray4> {
    fn default() -> Self {
        Self {
            background: Gray4::new(2),
            ambient_background: Gray4::BLACK,
            primary: Gray4::WHITE,
            secondary: Gray4::new(10),
        }
    }
}

impl Default for FacePalette<Rgb565> {
    fn default() -> Self {
        // sunshine blue background, light blue secondary text
        Self {
            background: Rgb565::new(0x03, 0x29, 0x1A),
            ambient_background: Rgb565::BLACK,
            primary: Rgb565::WHITE,
            secondary: Rgb565::new(0x19, 0x35, 0x1D),
        }
    }
}

/// Face renderer - composes the clock and weather components
#[derive(Debug, Clone)]
pub struct FaceRenderer<C: PixelColor> {
    layout: FaceLayout,
    palette: FacePalette<C>,
    clock: ClockDisplay,
    weather: WeatherDisplay,
}

impl<C: PixelColor> FaceRenderer<C> {
    pub fn new(bounds: Rectangle, shape: ScreenShape, palette: FacePalette<C>) -> Self {
        let layout = FaceLayout::new(bounds, shape);
        Self {
            layout,
            palette,
            clock: ClockDisplay::new(layout),
            weather: WeatherDisplay::new(layout),
        }
    }

    pub fn layout(&self) -> &FaceLayout {
        &self.layout
    }

    /// One full render pass: background, time, date, weather
    pub fn render<D>(&self, target: &mut D, frame: &Frame<'_>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        let palette = self.palette.for_hints(frame.hints);

        self.layout
            .bounds
            .into_styled(PrimitiveStyle::with_fill(palette.background_for(frame.ambient)))
            .draw(target)?;

        self.clock.render(target, frame, &palette)?;
        self.weather.render(target, frame, &palette)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::WeatherIcon;
    use crate::display::surface::HeadlessSurface;
    use chrono::TimeZone;

    fn frame(weather: &WeatherSnapshot, ambient: bool) -> Frame<'_> {
        Frame {
            time: FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2026, 10, 15, 10, 9, 8).unwrap(),
            ambient,
            hints: RenderHints::default(),
            weather,
        }
    }

    fn full_weather() -> WeatherSnapshot {
        WeatherSnapshot {
            high_temp: Some("70".into()),
            low_temp: Some("55".into()),
            icon: Some(WeatherIcon::Rain),
            last_update_ms: 1,
        }
    }

    fn render(weather: &WeatherSnapshot, ambient: bool) -> HeadlessSurface {
        let mut surface = HeadlessSurface::new(200, 200).unwrap();
        let renderer = FaceRenderer::new(surface.bounds(), ScreenShape::Square, FacePalette::default());
        renderer.render(&mut surface, &frame(weather, ambient)).unwrap();
        surface
    }

    fn weather_band(surface: &HeadlessSurface) -> Rectangle {
        let layout = FaceLayout::new(surface.bounds(), ScreenShape::Square);
        let top = layout.divider_y - 2;
        Rectangle::new(Point::new(0, top), Size::new(200, (200 - top) as u32))
    }

    #[test]
    fn test_interactive_draws_weather_row() {
        let surface = render(&full_weather(), false);
        assert!(surface.count_on_pixels_in(&weather_band(&surface)) > 0);
    }

    #[test]
    fn test_ambient_hides_date_and_weather() {
        let interactive = render(&full_weather(), false);
        let ambient = render(&full_weather(), true);
        assert_eq!(ambient.count_on_pixels_in(&weather_band(&ambient)), 0);
        assert!(ambient.count_on_pixels() < interactive.count_on_pixels());
        assert!(ambient.count_on_pixels() > 0);
    }

    #[test]
    fn test_weather_needs_both_temperatures() {
        let mut weather = full_weather();
        weather.low_temp = None;
        let surface = render(&weather, false);
        assert_eq!(surface.count_on_pixels_in(&weather_band(&surface)), 0);
    }

    #[test]
    fn test_missing_icon_still_draws_temperatures() {
        let with_icon = render(&full_weather(), false);
        let mut weather = full_weather();
        weather.icon = None;
        let without_icon = render(&weather, false);

        let band = weather_band(&without_icon);
        let bare = without_icon.count_on_pixels_in(&band);
        assert!(bare > 0);
        assert!(bare < with_icon.count_on_pixels_in(&band));
    }

    #[test]
    fn test_low_bit_palette_promotes_secondary() {
        let palette = FacePalette::<Gray4>::default();
        let low_bit = palette.for_hints(RenderHints { anti_alias: false });
        assert_eq!(low_bit.secondary, Gray4::WHITE);
        assert_eq!(palette.for_hints(RenderHints::default()), palette);
        assert_eq!(palette.background_for(true), Gray4::BLACK);
    }

    #[test]
    fn test_degree_sign_has_its_own_glyph() {
        let mut degree = full_weather();
        degree.high_temp = Some("25°".into());
        let mut question = full_weather();
        question.high_temp = Some("25?".into());

        let with_degree = render(&degree, false);
        let with_question = render(&question, false);
        let band = weather_band(&with_degree);
        assert!(with_degree.count_on_pixels_in(&band) > 0);
        assert_ne!(with_degree.to_ascii(), with_question.to_ascii());
    }

    #[test]
    fn test_round_shape_switches_fonts() {
        let bounds = Rectangle::new(Point::zero(), Size::new(200, 200));
        let square = FaceRenderer::new(bounds, ScreenShape::Square, FacePalette::<BinaryColor>::default());
        let round = FaceRenderer::new(bounds, ScreenShape::Round, FacePalette::<BinaryColor>::default());
        assert_eq!(round.layout().shape, ScreenShape::Round);
        assert!(
            round.layout().fonts.time.character_size.height
                > square.layout().fonts.time.character_size.height
        );
    }
}
