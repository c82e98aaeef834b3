/*
 *  sync/mock.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock sync channel for testing without a companion device
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

use std::sync::{Arc, Mutex, MutexGuard};

use super::{DataItem, SyncChannel, SyncError};

/// Mock sync channel
///
/// Records every request and never delivers events on its own; tests feed
/// `SyncEvent`s to the face directly. Clones share state, so a test keeps one
/// handle while the face owns another.
#[derive(Debug, Clone, Default)]
pub struct MockChannel {
    state: Arc<Mutex<MockChannelState>>,
}

/// Internal state for the mock channel (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockChannelState {
    /// Number of times connect() was called
    pub connect_count: usize,

    /// Number of times disconnect() was called
    pub disconnect_count: usize,

    /// Number of times add_listener() succeeded
    pub add_listener_count: usize,

    /// Number of times remove_listener() was called
    pub remove_listener_count: usize,

    pub connected: bool,
    pub listening: bool,

    /// Every item written, in order
    pub puts: Vec<DataItem>,

    /// Simulate failures (for error testing)
    pub simulate_connect_failure: Option<i32>,
    pub simulate_put_failure: bool,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the shared state for inspection
    pub fn state(&self) -> MutexGuard<'_, MockChannelState> {
        // a panicking test poisons the lock; the counters are still usable
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SyncChannel for MockChannel {
    fn connect(&mut self) -> Result<(), SyncError> {
        let mut state = self.state();
        state.connect_count += 1;
        if let Some(code) = state.simulate_connect_failure {
            return Err(SyncError::ConnectionFailed(code));
        }
        state.connected = true;
        Ok(())
    }

    fn disconnect(&mut self) {
        let mut state = self.state();
        state.disconnect_count += 1;
        state.connected = false;
        state.listening = false;
    }

    fn is_connected(&self) -> bool {
        self.state().connected
    }

    fn add_listener(&mut self) -> Result<(), SyncError> {
        let mut state = self.state();
        if !state.connected {
            return Err(SyncError::NotConnected);
        }
        state.add_listener_count += 1;
        state.listening = true;
        Ok(())
    }

    fn remove_listener(&mut self) {
        let mut state = self.state();
        state.remove_listener_count += 1;
        state.listening = false;
    }

    fn put_data_item(&mut self, item: DataItem) -> Result<(), SyncError> {
        let mut state = self.state();
        if state.simulate_put_failure {
            return Err(SyncError::Rejected("simulated put failure".to_string()));
        }
        if !state.connected {
            return Err(SyncError::NotConnected);
        }
        state.puts.push(item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    #[test]
    fn test_mock_connect_and_listen() {
        let mut channel = MockChannel::new();
        assert!(channel.add_listener().is_err());

        channel.connect().unwrap();
        channel.add_listener().unwrap();
        assert!(channel.is_connected());
        assert!(channel.state().listening);

        channel.disconnect();
        assert!(!channel.is_connected());
        assert!(!channel.state().listening);
        assert_eq!(channel.state().disconnect_count, 1);
    }

    #[test]
    fn test_mock_simulated_failures() {
        let mut channel = MockChannel::new();
        channel.state().simulate_connect_failure = Some(8);
        assert!(matches!(channel.connect(), Err(SyncError::ConnectionFailed(8))));
        assert!(!channel.is_connected());

        channel.state().simulate_connect_failure = None;
        channel.connect().unwrap();
        channel.state().simulate_put_failure = true;
        assert!(channel.put_data_item(DataItem::new("/x", Map::new())).is_err());
        assert!(channel.state().puts.is_empty());
    }

    #[test]
    fn test_mock_clones_share_state() {
        let channel = MockChannel::new();
        let mut other = channel.clone();
        other.connect().unwrap();
        other.put_data_item(DataItem::new("/weather", Map::new())).unwrap();
        assert_eq!(channel.state().puts.len(), 1);
    }
}
