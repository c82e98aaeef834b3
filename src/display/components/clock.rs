/*
 *  display/components/clock.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Clock display component - time and date text
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
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Text};

use crate::display::layout::FaceLayout;
use crate::display::renderer::{FacePalette, Frame};

/// `H:MM` in ambient mode, `H:MM:SS` otherwise
pub fn time_text(time: &DateTime<FixedOffset>, ambient: bool) -> String {
    if ambient {
        time.format("%-H:%M").to_string()
    } else {
        time.format("%-H:%M:%S").to_string()
    }
}

/// e.g. `THU, OCT 15 2026`
pub fn date_text(time: &DateTime<FixedOffset>) -> String {
    time.format("%a, %b %d %Y").to_string().to_uppercase()
}

/// Clock display component
#[derive(Debug, Clone)]
pub struct ClockDisplay {
    layout: FaceLayout,
}

impl ClockDisplay {
    pub fn new(layout: FaceLayout) -> Self {
        Self { layout }
    }

    /// Time always, date only when interactive
    pub fn render<D, C>(&self, target: &mut D, frame: &Frame<'_>, palette: &FacePalette<C>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
        C: PixelColor,
    {
        let cx = self.layout.center_x();

        let time = time_text(&frame.time, frame.ambient);
        let time_style = MonoTextStyle::new(self.layout.fonts.time, palette.primary);
        Text::with_alignment(&time, Point::new(cx, self.layout.time_y), time_style, Alignment::Center)
            .draw(target)?;

        if !frame.ambient {
            let date = date_text(&frame.time);
            let date_style = MonoTextStyle::new(self.layout.fonts.date, palette.secondary);
            Text::with_alignment(&date, Point::new(cx, self.layout.date_y), date_style, Alignment::Center)
                .draw(target)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2026, 10, 15, h, m, s).unwrap()
    }

    #[test]
    fn test_time_text_interactive_has_seconds() {
        assert_eq!(time_text(&at(9, 5, 7), false), "9:05:07");
        assert_eq!(time_text(&at(23, 59, 0), false), "23:59:00");
    }

    #[test]
    fn test_time_text_ambient_drops_seconds() {
        assert_eq!(time_text(&at(9, 5, 7), true), "9:05");
        assert_eq!(time_text(&at(0, 0, 59), true), "0:00");
    }

    #[test]
    fn test_date_text_uppercased() {
        assert_eq!(date_text(&at(12, 0, 0)), "THU, OCT 15 2026");
    }
}
