/*
 *  face.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  The watch face engine - lifecycle handlers, redraw timer, companion sync
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

use std::time::Duration;

use chrono::FixedOffset;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, error, info};

use crate::clock::Clock;
use crate::display::{
    DisplayModeController, DisplayState, FacePalette, FaceRenderer, Frame, RenderHints, ScreenShape,
};
use crate::scheduler::RedrawScheduler;
use crate::sync::{
    DataEvent, DataEventKind, DataItem, SyncChannel, SyncError, SyncEvent, WeatherRequest,
    WEATHER_INFO_PATH, WEATHER_PATH,
};
use crate::weather::{WeatherSnapshot, WeatherState, WeatherUpdate};

/// Kind of touch the host reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapKind {
    /// Finger down
    Touch,
    /// Touch turned into a gesture
    TouchCancel,
    /// Completed tap
    Tap,
}

/// Watch face engine.
///
/// One stateful component driven by explicit handler calls on a single event
/// thread. It owns the redraw scheduler and the companion channel; dropping
/// the face cancels the pending tick and disconnects.
pub struct WatchFace<S: SyncChannel, K: Clock> {
    mode: DisplayModeController,
    scheduler: RedrawScheduler,
    weather: WeatherState,
    sync: S,
    clock: K,
    time_zone: FixedOffset,
    time_zone_listener: bool,
    shape: ScreenShape,
    invalidated: bool,
    shut_down: bool,
}

impl<S: SyncChannel, K: Clock> WatchFace<S, K> {
    /// Starts Hidden with no weather and no pending tick
    pub fn new(sync: S, clock: K) -> Self {
        let time_zone = clock.utc_offset();
        Self {
            mode: DisplayModeController::new(),
            scheduler: RedrawScheduler::new(),
            weather: WeatherState::new(),
            sync,
            clock,
            time_zone,
            time_zone_listener: false,
            shape: ScreenShape::default(),
            invalidated: false,
            shut_down: false,
        }
    }

    // -- host lifecycle ---------------------------------------------------

    pub fn on_visibility_changed(&mut self, visible: bool) {
        let change = self.mode.set_visible(visible);

        if change.entered_visible() {
            if !self.sync.is_connected() {
                if let Err(e) = self.sync.connect() {
                    error!("Failed connecting to companion: {}", e);
                }
            }
            self.register_time_zone_listener();
            // the zone may have moved while we were hidden
            self.time_zone = self.clock.utc_offset();
            self.invalidate();
        } else if change.entered_hidden() {
            self.unregister_time_zone_listener();
            self.release_companion();
        }

        if change.changed() {
            debug!("Visibility: {:?}", change.to);
        }
        self.scheduler
            .update_timer(change.timer_should_run(), self.clock.now_ms());
    }

    pub fn on_ambient_mode_changed(&mut self, ambient: bool) {
        if self.mode.is_ambient() != ambient {
            let change = self.mode.set_ambient(ambient);
            debug!(
                "Ambient mode {} ({:?}, anti-alias {})",
                if ambient { "on" } else { "off" },
                change.to,
                self.mode.render_hints().anti_alias
            );
            self.invalidate();
        }
        self.update_timer();
    }

    /// Device properties, reported once before the face is shown
    pub fn on_properties_changed(&mut self, low_bit_ambient: bool) {
        self.mode.set_low_bit_ambient(low_bit_ambient);
        debug!("Low-bit ambient: {}", low_bit_ambient);
    }

    /// Screen shape; picks the round or square text sizes
    pub fn on_apply_window_insets(&mut self, is_round: bool) {
        self.shape = ScreenShape::from_round(is_round);
        debug!("Screen shape: {:?}", self.shape);
    }

    pub fn on_tap(&mut self, kind: TapKind) {
        if kind == TapKind::Tap {
            self.request_weather();
        }
        self.invalidate();
    }

    /// Host minute tick, delivered in ambient mode
    pub fn on_time_tick(&mut self) {
        self.invalidate();
    }

    /// Host time zone broadcast; ignored while the listener is unregistered
    pub fn on_time_zone_changed(&mut self, offset: FixedOffset) {
        if !self.time_zone_listener {
            return;
        }
        debug!("Time zone changed to {}", offset);
        self.time_zone = offset;
        self.invalidate();
    }

    // -- redraw timer ------------------------------------------------------

    /// Cancel the pending tick and schedule an immediate one if the timer
    /// should run. Safe to call repeatedly.
    pub fn update_timer(&mut self) {
        self.scheduler
            .update_timer(self.mode.timer_should_run(), self.clock.now_ms());
    }

    /// Fire the pending tick if it is due. Returns true if a tick ran.
    pub fn poll_timer(&mut self) -> bool {
        let now_ms = self.clock.now_ms();
        if !self.scheduler.take_due(now_ms) {
            return false;
        }
        self.handle_update_time(now_ms);
        true
    }

    fn handle_update_time(&mut self, now_ms: i64) {
        self.invalidate();
        if let Some(delay) = self
            .scheduler
            .reschedule_after_tick(self.mode.timer_should_run(), now_ms)
        {
            log::trace!("Next tick in {}ms", delay);
        }
    }

    /// How long the host may sleep before the next tick is due
    pub fn next_tick_in(&self) -> Option<Duration> {
        self.scheduler.time_until_due(self.clock.now_ms())
    }

    pub fn is_timer_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn scheduler(&self) -> &RedrawScheduler {
        &self.scheduler
    }

    // -- companion sync ----------------------------------------------------

    /// Dispatch one event from the companion channel
    pub fn handle_sync_event(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Connected => self.on_connected(),
            SyncEvent::ConnectionSuspended(cause) => self.on_connection_suspended(cause),
            SyncEvent::ConnectionFailed(code) => self.on_connection_failed(code),
            SyncEvent::DataChanged(events) => self.on_data_changed(&events),
            SyncEvent::PutResult(result) => self.on_request_result(result),
        }
    }

    pub fn on_connected(&mut self) {
        info!("Connected to companion");
        if let Err(e) = self.sync.add_listener() {
            error!("Failed registering data listener: {}", e);
            return;
        }
        self.request_weather();
    }

    pub fn on_connection_suspended(&mut self, cause: i32) {
        info!("Companion connection suspended: {}", cause);
    }

    pub fn on_connection_failed(&mut self, code: i32) {
        error!("Failed connecting to companion: {}", SyncError::ConnectionFailed(code));
    }

    /// Apply every changed item on the weather info path
    pub fn on_data_changed(&mut self, events: &[DataEvent]) {
        for event in events {
            if event.kind != DataEventKind::Changed || event.item.path != WEATHER_INFO_PATH {
                continue;
            }
            let update = WeatherUpdate::from_data_map(&event.item.data);
            self.weather.apply_update(update, self.clock.now_ms());
            self.invalidate();
        }
    }

    pub fn on_request_result(&mut self, result: Result<DataItem, SyncError>) {
        match result {
            Err(e) => error!("Querying companion failed ({}). Weather data won't be available.", e),
            Ok(item) if item.data.len() > 2 => debug!("Received weather data from the companion"),
            Ok(item) => debug!("Weather request stored at {}", item.path),
        }
    }

    /// Ask the companion to push fresh weather
    pub fn request_weather(&mut self) {
        let request = WeatherRequest { timestamp: self.clock.now_ms() };
        let sent = request
            .to_data_map()
            .and_then(|data| self.sync.put_data_item(DataItem::new(WEATHER_PATH, data)));
        if let Err(e) = sent {
            error!("Weather request not sent: {}", e);
        }
    }

    fn release_companion(&mut self) {
        if self.sync.is_connected() {
            self.sync.remove_listener();
            self.sync.disconnect();
        }
    }

    fn register_time_zone_listener(&mut self) {
        self.time_zone_listener = true;
    }

    fn unregister_time_zone_listener(&mut self) {
        self.time_zone_listener = false;
    }

    // -- render surface ----------------------------------------------------

    /// Ask the render surface for a redraw
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Consume a pending redraw request
    pub fn take_invalidation(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }

    /// What the next render pass would draw; `None` while Hidden
    pub fn frame(&self) -> Option<Frame<'_>> {
        if !self.mode.is_visible() {
            return None;
        }
        Some(Frame {
            time: self.clock.now_in(self.time_zone),
            ambient: self.mode.is_ambient(),
            hints: self.mode.render_hints(),
            weather: self.weather.snapshot(),
        })
    }

    /// Draw one frame into `bounds` with the default palette.
    ///
    /// Returns false without touching the target while Hidden.
    pub fn draw<D>(&self, target: &mut D, bounds: Rectangle) -> Result<bool, D::Error>
    where
        D: DrawTarget,
        FacePalette<D::Color>: Default,
    {
        self.draw_with(target, bounds, FacePalette::default())
    }

    pub fn draw_with<D>(
        &self,
        target: &mut D,
        bounds: Rectangle,
        palette: FacePalette<D::Color>,
    ) -> Result<bool, D::Error>
    where
        D: DrawTarget,
    {
        let Some(frame) = self.frame() else {
            return Ok(false);
        };
        FaceRenderer::new(bounds, self.shape, palette).render(target, &frame)?;
        Ok(true)
    }

    // -- accessors ---------------------------------------------------------

    pub fn state(&self) -> DisplayState {
        self.mode.state()
    }

    pub fn render_hints(&self) -> RenderHints {
        self.mode.render_hints()
    }

    pub fn weather(&self) -> &WeatherSnapshot {
        self.weather.snapshot()
    }

    pub fn time_zone(&self) -> FixedOffset {
        self.time_zone
    }

    pub fn shape(&self) -> ScreenShape {
        self.shape
    }

    pub fn sync(&self) -> &S {
        &self.sync
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// Cancel the timer and let go of the companion. Runs once.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.scheduler.cancel();
        self.unregister_time_zone_listener();
        self.release_companion();
        debug!("Watch face shut down");
    }
}

impl<S: SyncChannel, K: Clock> Drop for WatchFace<S, K> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
