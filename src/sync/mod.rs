/*
 *  sync/mod.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Companion sync channel - the data link to the paired handheld
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

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub mod mock;
pub mod simulated;

pub use mock::{MockChannel, MockChannelState};
pub use simulated::SimulatedCompanion;

/// Path the face writes weather requests to
pub const WEATHER_PATH: &str = "/weather";
/// Path the companion pushes weather data on
pub const WEATHER_INFO_PATH: &str = "/weather/info";
/// Request key carrying the request time
pub const KEY_TIMESTAMP: &str = "timestamp";

/// Sync channel failures. None of them are fatal to the face.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("companion channel is not connected")]
    NotConnected,
    #[error("connecting to companion failed with code {0}")]
    ConnectionFailed(i32),
    #[error("data item rejected: {0}")]
    Rejected(String),
    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

/// A keyed data item at a logical path
#[derive(Debug, Clone, PartialEq)]
pub struct DataItem {
    pub path: String,
    pub data: Map<String, Value>,
}

impl DataItem {
    pub fn new(path: impl Into<String>, data: Map<String, Value>) -> Self {
        Self { path: path.into(), data }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataEventKind {
    Changed,
    Deleted,
}

/// One entry of an inbound data-changed batch
#[derive(Debug, Clone, PartialEq)]
pub struct DataEvent {
    pub kind: DataEventKind,
    pub item: DataItem,
}

impl DataEvent {
    pub fn changed(item: DataItem) -> Self {
        Self { kind: DataEventKind::Changed, item }
    }
}

/// Everything the channel reports back, delivered on the event thread
#[derive(Debug)]
pub enum SyncEvent {
    /// A connect request completed
    Connected,
    /// The link dropped; the channel reconnects on its own
    ConnectionSuspended(i32),
    /// A connect request failed with a platform error code
    ConnectionFailed(i32),
    /// Batch of data item changes
    DataChanged(Vec<DataEvent>),
    /// Outcome of a `put_data_item`, echoing the stored item on success
    PutResult(Result<DataItem, SyncError>),
}

/// Outbound request asking the companion to push fresh weather
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRequest {
    pub timestamp: i64,
}

impl WeatherRequest {
    pub fn to_data_map(&self) -> Result<Map<String, Value>, SyncError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(SyncError::Rejected(format!("request is not a map: {}", other))),
        }
    }
}

/// Requests the face makes of the companion link.
///
/// Every call is fire-and-forget: results come back later as `SyncEvent`s
/// on the same thread. An `Err` here means the request never left.
pub trait SyncChannel {
    /// Start connecting; completion arrives as `Connected`/`ConnectionFailed`
    fn connect(&mut self) -> Result<(), SyncError>;

    fn disconnect(&mut self);

    fn is_connected(&self) -> bool;

    /// Start delivering `DataChanged` events to the face
    fn add_listener(&mut self) -> Result<(), SyncError>;

    fn remove_listener(&mut self);

    /// Write a data item; the outcome arrives as `PutResult`
    fn put_data_item(&mut self, item: DataItem) -> Result<(), SyncError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_request_payload() {
        let map = WeatherRequest { timestamp: 1_500 }.to_data_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(KEY_TIMESTAMP), Some(&Value::from(1_500)));
    }

    #[test]
    fn test_sync_error_messages() {
        assert_eq!(
            SyncError::ConnectionFailed(7).to_string(),
            "connecting to companion failed with code 7"
        );
        assert_eq!(SyncError::NotConnected.to_string(), "companion channel is not connected");
    }
}
