/*
 *  weather.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Last-known weather as pushed by the companion device
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

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::condition::{icon_for, WeatherIcon};

/// Payload key carrying the provider condition code
pub const KEY_WEATHER_ID: &str = "weatherId";
/// Payload key carrying the high temperature, preformatted by the companion
pub const KEY_TEMP_HIGH: &str = "high";
/// Payload key carrying the low temperature, preformatted by the companion
pub const KEY_TEMP_LOW: &str = "low";

/// What the render pass reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherSnapshot {
    pub high_temp: Option<String>,
    pub low_temp: Option<String>,
    pub icon: Option<WeatherIcon>,
    /// Epoch ms of the last applied update, 0 when never updated
    pub last_update_ms: i64,
}

impl WeatherSnapshot {
    /// Both temperatures are known, so the weather row can be drawn
    pub fn has_temperatures(&self) -> bool {
        self.high_temp.is_some() && self.low_temp.is_some()
    }
}

/// A partial weather update. Absent fields leave the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherUpdate {
    #[serde(rename = "weatherId", default, skip_serializing_if = "Option::is_none")]
    pub weather_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<String>,
}

impl WeatherUpdate {
    /// Pull the weather keys out of a companion data map.
    ///
    /// A key holding the wrong type is logged and treated as absent so the
    /// remaining keys still apply.
    pub fn from_data_map(map: &Map<String, Value>) -> Self {
        let weather_id = match map.get(KEY_WEATHER_ID) {
            None => None,
            Some(v) => match v.as_i64().and_then(|id| i32::try_from(id).ok()) {
                Some(id) => Some(id),
                None => {
                    warn!("Ignoring {} with unexpected value: {}", KEY_WEATHER_ID, v);
                    None
                }
            },
        };

        Self {
            weather_id,
            high: string_field(map, KEY_TEMP_HIGH),
            low: string_field(map, KEY_TEMP_LOW),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weather_id.is_none() && self.high.is_none() && self.low.is_none()
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            warn!("Ignoring {} with unexpected value: {}", key, other);
            None
        }
    }
}

/// Holder for the last-known weather.
#[derive(Debug, Default)]
pub struct WeatherState {
    snapshot: WeatherSnapshot,
}

impl WeatherState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &WeatherSnapshot {
        &self.snapshot
    }

    /// Apply a partial update; returns true if any stored field changed.
    ///
    /// Temperatures are stored verbatim. A condition code is resolved to its
    /// icon right away and only the icon is kept; an unmapped code clears it.
    pub fn apply_update(&mut self, update: WeatherUpdate, now_ms: i64) -> bool {
        let before = self.snapshot.clone();

        if let Some(code) = update.weather_id {
            let icon = icon_for(code);
            match icon {
                Some(icon) => debug!("Condition {} -> {}", code, icon.asset_name()),
                None => debug!("Condition {} has no icon", code),
            }
            self.snapshot.icon = icon;
        }

        if let Some(high) = update.high {
            debug!("Setting high temperature to: {}", high);
            self.snapshot.high_temp = Some(high);
        }

        if let Some(low) = update.low {
            debug!("Setting low temperature to: {}", low);
            self.snapshot.low_temp = Some(low);
        }

        self.snapshot.last_update_ms = now_ms;

        self.snapshot.high_temp != before.high_temp
            || self.snapshot.low_temp != before.low_temp
            || self.snapshot.icon != before.icon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_starts_empty() {
        let state = WeatherState::new();
        assert_eq!(state.snapshot(), &WeatherSnapshot::default());
        assert!(!state.snapshot().has_temperatures());
    }

    #[test]
    fn test_partial_updates_merge() {
        let mut state = WeatherState::new();
        state.apply_update(WeatherUpdate { high: Some("70".into()), ..Default::default() }, 10);
        state.apply_update(WeatherUpdate { low: Some("55".into()), ..Default::default() }, 20);

        let snap = state.snapshot();
        assert_eq!(snap.high_temp.as_deref(), Some("70"));
        assert_eq!(snap.low_temp.as_deref(), Some("55"));
        assert_eq!(snap.last_update_ms, 20);
        assert!(snap.has_temperatures());
    }

    #[test]
    fn test_condition_code_resolves_icon() {
        let mut state = WeatherState::new();
        assert!(state.apply_update(WeatherUpdate { weather_id: Some(761), ..Default::default() }, 0));
        assert_eq!(state.snapshot().icon, Some(WeatherIcon::Storm));

        // unmapped code drops the cached icon
        assert!(state.apply_update(WeatherUpdate { weather_id: Some(900), ..Default::default() }, 0));
        assert_eq!(state.snapshot().icon, None);
    }

    #[test]
    fn test_temperatures_stored_verbatim() {
        let mut state = WeatherState::new();
        state.apply_update(
            WeatherUpdate { high: Some("21°".into()), low: Some(" -3 C ".into()), ..Default::default() },
            0,
        );
        assert_eq!(state.snapshot().high_temp.as_deref(), Some("21°"));
        assert_eq!(state.snapshot().low_temp.as_deref(), Some(" -3 C "));
    }

    #[test]
    fn test_repeat_update_reports_unchanged() {
        let mut state = WeatherState::new();
        let update = WeatherUpdate { weather_id: Some(800), high: Some("30".into()), low: None };
        assert!(state.apply_update(update.clone(), 1));
        assert!(!state.apply_update(update, 2));
        assert_eq!(state.snapshot().last_update_ms, 2);
    }

    #[test]
    fn test_from_data_map_all_keys() {
        let update = WeatherUpdate::from_data_map(&map(json!({
            "weatherId": 501,
            "high": "18",
            "low": "9",
            "timestamp": 1234
        })));
        assert_eq!(update.weather_id, Some(501));
        assert_eq!(update.high.as_deref(), Some("18"));
        assert_eq!(update.low.as_deref(), Some("9"));
    }

    #[test]
    fn test_from_data_map_wrong_types_are_absent() {
        let update = WeatherUpdate::from_data_map(&map(json!({
            "weatherId": "rainy",
            "high": 18,
            "low": "9"
        })));
        assert_eq!(update.weather_id, None);
        assert_eq!(update.high, None);
        assert_eq!(update.low.as_deref(), Some("9"));

        let too_big = WeatherUpdate::from_data_map(&map(json!({ "weatherId": 1u64 << 40 })));
        assert!(too_big.is_empty());
    }

    #[test]
    fn test_update_serde_keys() {
        let update: WeatherUpdate = serde_json::from_str(r#"{"weatherId":800,"high":"25"}"#).unwrap();
        assert_eq!(update.weather_id, Some(800));
        assert_eq!(update.low, None);
        let s = serde_json::to_string(&update).unwrap();
        assert_eq!(s, r#"{"weatherId":800,"high":"25"}"#);
    }
}
