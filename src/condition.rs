/*
 *  condition.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Weather condition code to display icon lookup
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

use std::fmt;

/// Icons the face knows how to draw.
///
/// Codes follow the OpenWeatherMap condition taxonomy
/// (<http://openweathermap.org/weather-conditions>).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Storm,
    LightRain,
    Rain,
    Snow,
    Fog,
    Clear,
    LightClouds,
    Cloudy,
}

impl WeatherIcon {
    pub const ALL: [WeatherIcon; 8] = [
        WeatherIcon::Storm,
        WeatherIcon::LightRain,
        WeatherIcon::Rain,
        WeatherIcon::Snow,
        WeatherIcon::Fog,
        WeatherIcon::Clear,
        WeatherIcon::LightClouds,
        WeatherIcon::Cloudy,
    ];

    /// Asset name of the icon resource
    pub fn asset_name(&self) -> &'static str {
        match self {
            WeatherIcon::Storm => "ic_storm",
            WeatherIcon::LightRain => "ic_light_rain",
            WeatherIcon::Rain => "ic_rain",
            WeatherIcon::Snow => "ic_snow",
            WeatherIcon::Fog => "ic_fog",
            WeatherIcon::Clear => "ic_clear",
            WeatherIcon::LightClouds => "ic_light_clouds",
            WeatherIcon::Cloudy => "ic_cloudy",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WeatherIcon::Storm => "Storm",
            WeatherIcon::LightRain => "Light Rain",
            WeatherIcon::Rain => "Rain",
            WeatherIcon::Snow => "Snow",
            WeatherIcon::Fog => "Fog",
            WeatherIcon::Clear => "Clear",
            WeatherIcon::LightClouds => "Light Clouds",
            WeatherIcon::Cloudy => "Cloudy",
        }
    }
}

impl fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Map a weather condition code to its icon.
///
/// Total over `i32`; unmapped codes yield `None`. Arms are evaluated in
/// order, so 761 resolves to `Storm` before the fog range can claim it.
#[allow(overlapping_range_endpoints)]
pub fn icon_for(condition_code: i32) -> Option<WeatherIcon> {
    match condition_code {
        200..=232 | 761 | 781 => Some(WeatherIcon::Storm),
        300..=321 => Some(WeatherIcon::LightRain),
        500..=504 | 520..=531 => Some(WeatherIcon::Rain),
        511 | 600..=622 => Some(WeatherIcon::Snow),
        701..=761 => Some(WeatherIcon::Fog),
        800 => Some(WeatherIcon::Clear),
        801 => Some(WeatherIcon::LightClouds),
        802..=804 => Some(WeatherIcon::Cloudy),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Independent restatement of the table as range checks, first match wins.
    fn reference(code: i32) -> Option<WeatherIcon> {
        let table: [(&[(i32, i32)], WeatherIcon); 8] = [
            (&[(200, 232), (761, 761), (781, 781)], WeatherIcon::Storm),
            (&[(300, 321)], WeatherIcon::LightRain),
            (&[(500, 504), (520, 531)], WeatherIcon::Rain),
            (&[(511, 511), (600, 622)], WeatherIcon::Snow),
            (&[(701, 761)], WeatherIcon::Fog),
            (&[(800, 800)], WeatherIcon::Clear),
            (&[(801, 801)], WeatherIcon::LightClouds),
            (&[(802, 804)], WeatherIcon::Cloudy),
        ];
        table
            .iter()
            .find(|(ranges, _)| ranges.iter().any(|&(lo, hi)| code >= lo && code <= hi))
            .map(|(_, icon)| *icon)
    }

    #[test]
    fn test_lookup_matches_table_over_provider_range() {
        for code in 200..=900 {
            assert_eq!(icon_for(code), reference(code), "code {}", code);
        }
    }

    #[test]
    fn test_storm_wins_761() {
        assert_eq!(icon_for(761), Some(WeatherIcon::Storm));
        assert_eq!(icon_for(760), Some(WeatherIcon::Fog));
        assert_eq!(icon_for(762), None);
        assert_eq!(icon_for(781), Some(WeatherIcon::Storm));
    }

    #[test]
    fn test_range_edges() {
        assert_eq!(icon_for(199), None);
        assert_eq!(icon_for(200), Some(WeatherIcon::Storm));
        assert_eq!(icon_for(232), Some(WeatherIcon::Storm));
        assert_eq!(icon_for(233), None);
        assert_eq!(icon_for(321), Some(WeatherIcon::LightRain));
        assert_eq!(icon_for(505), None);
        assert_eq!(icon_for(511), Some(WeatherIcon::Snow));
        assert_eq!(icon_for(519), None);
        assert_eq!(icon_for(520), Some(WeatherIcon::Rain));
        assert_eq!(icon_for(622), Some(WeatherIcon::Snow));
        assert_eq!(icon_for(701), Some(WeatherIcon::Fog));
        assert_eq!(icon_for(800), Some(WeatherIcon::Clear));
        assert_eq!(icon_for(801), Some(WeatherIcon::LightClouds));
        assert_eq!(icon_for(804), Some(WeatherIcon::Cloudy));
        assert_eq!(icon_for(805), None);
    }

    #[test]
    fn test_out_of_taxonomy_codes() {
        assert_eq!(icon_for(0), None);
        assert_eq!(icon_for(-1), None);
        assert_eq!(icon_for(i32::MAX), None);
        assert_eq!(icon_for(i32::MIN), None);
    }

    #[test]
    fn test_asset_names_unique() {
        let mut names: Vec<&str> = WeatherIcon::ALL.iter().map(|i| i.asset_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), WeatherIcon::ALL.len());
    }
}
