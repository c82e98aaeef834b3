/*
 *  sync/simulated.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Simulated companion - answers weather requests from canned samples
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

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use serde_json::{Map, Value};
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::time::{self, Duration};

use super::{DataEvent, DataItem, SyncChannel, SyncError, SyncEvent, WEATHER_INFO_PATH, WEATHER_PATH};
use crate::weather::WeatherUpdate;

/// In-process stand-in for the paired handheld.
///
/// Every weather request is answered, after `reply_delay`, with the next
/// sample pushed on the weather info path. Samples cycle. A reply still
/// in flight when the listener goes away is dropped.
#[derive(Debug)]
pub struct SimulatedCompanion {
    evt_tx: Sender<SyncEvent>,
    samples: Vec<WeatherUpdate>,
    next_sample: usize,
    reply_delay: Duration,
    connected: bool,
    listening: Arc<AtomicBool>,
}

impl SimulatedCompanion {
    /// Create the companion and the event receiver the host loop drains
    pub fn new(samples: Vec<WeatherUpdate>, reply_delay: Duration) -> (Self, Receiver<SyncEvent>) {
        let (evt_tx, evt_rx) = mpsc::channel::<SyncEvent>(32);
        let companion = Self {
            evt_tx,
            samples,
            next_sample: 0,
            reply_delay,
            connected: false,
            listening: Arc::new(AtomicBool::new(false)),
        };
        (companion, evt_rx)
    }

    fn emit(&self, event: SyncEvent) {
        if let Err(e) = self.evt_tx.try_send(event) {
            warn!("companion: dropping event: {e}");
        }
    }

    fn next_sample_map(&mut self) -> Option<Map<String, Value>> {
        if self.samples.is_empty() {
            return None;
        }
        let sample = &self.samples[self.next_sample % self.samples.len()];
        self.next_sample = self.next_sample.wrapping_add(1);
        match serde_json::to_value(sample) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) => None,
            Err(e) => {
                warn!("companion: bad sample: {e}");
                None
            }
        }
    }

    /// Push the next sample after the reply delay
    fn schedule_reply(&mut self) {
        if !self.listening.load(Ordering::SeqCst) {
            debug!("companion: no listener, reply skipped");
            return;
        }
        let Some(data) = self.next_sample_map() else {
            debug!("companion: no samples configured");
            return;
        };

        let evt_tx = self.evt_tx.clone();
        let listening = Arc::clone(&self.listening);
        let delay = self.reply_delay;
        tokio::spawn(async move {
            time::sleep(delay).await;
            if !listening.load(Ordering::SeqCst) {
                debug!("companion: listener removed, reply dropped");
                return;
            }
            let batch = vec![DataEvent::changed(DataItem::new(WEATHER_INFO_PATH, data))];
            if evt_tx.send(SyncEvent::DataChanged(batch)).await.is_err() {
                debug!("companion: face gone before reply");
            }
        });
    }
}

impl SyncChannel for SimulatedCompanion {
    fn connect(&mut self) -> Result<(), SyncError> {
        if !self.connected {
            info!("companion: connected");
            self.connected = true;
        }
        self.emit(SyncEvent::Connected);
        Ok(())
    }

    fn disconnect(&mut self) {
        if self.connected {
            info!("companion: disconnected");
        }
        self.connected = false;
        self.listening.store(false, Ordering::SeqCst);
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn add_listener(&mut self) -> Result<(), SyncError> {
        if !self.connected {
            return Err(SyncError::NotConnected);
        }
        self.listening.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn remove_listener(&mut self) {
        self.listening.store(false, Ordering::SeqCst);
    }

    fn put_data_item(&mut self, item: DataItem) -> Result<(), SyncError> {
        if !self.connected {
            return Err(SyncError::NotConnected);
        }
        debug!("companion: put {} ({} keys)", item.path, item.data.len());
        let is_weather_request = item.path == WEATHER_PATH;
        self.emit(SyncEvent::PutResult(Ok(item)));
        if is_weather_request {
            self.schedule_reply();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::KEY_TEMP_HIGH;

    fn sample(high: &str) -> WeatherUpdate {
        WeatherUpdate {
            weather_id: Some(800),
            high: Some(high.to_string()),
            low: Some("10".to_string()),
        }
    }

    #[tokio::test]
    async fn test_connect_emits_connected() {
        let (mut companion, mut rx) = SimulatedCompanion::new(vec![], Duration::ZERO);
        companion.connect().unwrap();
        assert!(companion.is_connected());
        assert!(matches!(rx.recv().await, Some(SyncEvent::Connected)));
    }

    #[tokio::test]
    async fn test_put_requires_connection() {
        let (mut companion, _rx) = SimulatedCompanion::new(vec![sample("20")], Duration::ZERO);
        let result = companion.put_data_item(DataItem::new(WEATHER_PATH, Map::new()));
        assert!(matches!(result, Err(SyncError::NotConnected)));
    }

    #[tokio::test]
    async fn test_weather_request_answered_with_cycling_samples() {
        let (mut companion, mut rx) =
            SimulatedCompanion::new(vec![sample("20"), sample("21")], Duration::from_millis(1));
        companion.connect().unwrap();
        companion.add_listener().unwrap();
        assert!(matches!(rx.recv().await, Some(SyncEvent::Connected)));

        let mut highs = Vec::new();
        for _ in 0..3 {
            companion.put_data_item(DataItem::new(WEATHER_PATH, Map::new())).unwrap();
            assert!(matches!(rx.recv().await, Some(SyncEvent::PutResult(Ok(_)))));
            match rx.recv().await {
                Some(SyncEvent::DataChanged(batch)) => {
                    assert_eq!(batch.len(), 1);
                    assert_eq!(batch[0].item.path, WEATHER_INFO_PATH);
                    highs.push(batch[0].item.data[KEY_TEMP_HIGH].as_str().unwrap().to_string());
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
        assert_eq!(highs, vec!["20", "21", "20"]);
    }

    #[tokio::test]
    async fn test_no_reply_without_listener() {
        let (mut companion, mut rx) = SimulatedCompanion::new(vec![sample("20")], Duration::ZERO);
        companion.connect().unwrap();
        let _ = rx.recv().await;
        companion.put_data_item(DataItem::new(WEATHER_PATH, Map::new())).unwrap();
        assert!(matches!(rx.recv().await, Some(SyncEvent::PutResult(Ok(_)))));

        time::sleep(Duration::from_millis(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_reply_dropped_when_listener_removed() {
        let (mut companion, mut rx) =
            SimulatedCompanion::new(vec![sample("20")], Duration::from_millis(5));
        companion.connect().unwrap();
        companion.add_listener().unwrap();
        let _ = rx.recv().await;
        companion.put_data_item(DataItem::new(WEATHER_PATH, Map::new())).unwrap();
        assert!(matches!(rx.recv().await, Some(SyncEvent::PutResult(Ok(_)))));

        // face goes away while the reply is in flight
        companion.remove_listener();
        time::sleep(Duration::from_millis(20)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_reply_dropped_after_disconnect() {
        let (mut companion, mut rx) =
            SimulatedCompanion::new(vec![sample("20")], Duration::from_millis(5));
        companion.connect().unwrap();
        companion.add_listener().unwrap();
        let _ = rx.recv().await;
        companion.put_data_item(DataItem::new(WEATHER_PATH, Map::new())).unwrap();
        let _ = rx.recv().await;

        companion.disconnect();
        time::sleep(Duration::from_millis(20)).await;
        assert!(rx.try_recv().is_err());
    }
}
