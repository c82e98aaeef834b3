/*
 *  host.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Headless host - drives the face from stdin, the redraw timer and the
 *  simulated companion on one event loop
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

use std::str::FromStr;

use chrono::FixedOffset;
use log::{debug, error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, Receiver};
use tokio::time::{self, Duration};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use crate::clock::Clock;
use crate::config::Config;
use crate::display::{DisplayState, HeadlessSurface, SurfaceError};
use crate::face::{TapKind, WatchFace};
use crate::sync::{SimulatedCompanion, SyncEvent};

/// Host minute tick period, ambient mode only
const MINUTE_MS: i64 = 60_000;

/// Sleep when nothing is scheduled
const IDLE_WAIT: Duration = Duration::from_secs(3600);

/// Commands typed on stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Show,
    Hide,
    Ambient(bool),
    LowBit(bool),
    Round(bool),
    Tap,
    TimeZone(FixedOffset),
    Quit,
}

pub const HELP: &str = "commands: show | hide | ambient on|off | tap | lowbit on|off | round on|off | tz +HH:MM | quit";

impl FromStr for HostCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let cmd = words.next().unwrap_or("").to_ascii_lowercase();
        let arg = words.next();

        let on_off = |arg: Option<&str>| match arg.map(str::to_ascii_lowercase).as_deref() {
            Some("on") | Some("true") | Some("1") => Ok(true),
            Some("off") | Some("false") | Some("0") => Ok(false),
            _ => Err(format!("'{}' needs on|off", cmd)),
        };

        match cmd.as_str() {
            "show" => Ok(HostCommand::Show),
            "hide" => Ok(HostCommand::Hide),
            "ambient" => on_off(arg).map(HostCommand::Ambient),
            "lowbit" => on_off(arg).map(HostCommand::LowBit),
            "round" => on_off(arg).map(HostCommand::Round),
            "tap" => Ok(HostCommand::Tap),
            "tz" => arg
                .and_then(parse_offset)
                .map(HostCommand::TimeZone)
                .ok_or_else(|| "'tz' needs an offset like +02:00".to_string()),
            "quit" | "exit" | "q" => Ok(HostCommand::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command '{}'", other)),
        }
    }
}

/// `+HH:MM`, `-HH:MM` or `+HH`
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// What woke the event loop
#[derive(Debug)]
enum Wake {
    Timer,
    MinuteTick,
    Idle,
    Sync(SyncEvent),
    Command(Option<HostCommand>),
    Signal,
}

#[derive(Debug, Clone, Copy)]
enum Deadline {
    Timer,
    MinuteTick,
    Idle,
}

/// Owns the face, its companion event queue and the render surface
pub struct FaceHost<K: Clock> {
    face: WatchFace<SimulatedCompanion, K>,
    events: Receiver<SyncEvent>,
    surface: HeadlessSurface,
    ascii: bool,
}

impl<K: Clock> FaceHost<K> {
    pub fn new(cfg: &Config, clock: K) -> Result<Self, SurfaceError> {
        let (width, height) = cfg.display_size();
        let surface = HeadlessSurface::new(width, height)?;
        let (companion, events) = SimulatedCompanion::new(cfg.samples(), cfg.reply_delay());

        let mut face = WatchFace::new(companion, clock);
        face.on_properties_changed(cfg.low_bit_ambient());
        face.on_apply_window_insets(cfg.is_round());

        Ok(Self { face, events, surface, ascii: cfg.ascii() })
    }

    pub fn face(&self) -> &WatchFace<SimulatedCompanion, K> {
        &self.face
    }

    pub fn surface(&self) -> &HeadlessSurface {
        &self.surface
    }

    /// Apply one command. Returns false on quit.
    pub fn apply(&mut self, cmd: HostCommand) -> bool {
        debug!("command: {:?}", cmd);
        match cmd {
            HostCommand::Show => self.face.on_visibility_changed(true),
            HostCommand::Hide => self.face.on_visibility_changed(false),
            HostCommand::Ambient(on) => self.face.on_ambient_mode_changed(on),
            HostCommand::LowBit(on) => {
                self.face.on_properties_changed(on);
                self.face.invalidate();
            }
            HostCommand::Round(on) => {
                self.face.on_apply_window_insets(on);
                self.face.invalidate();
            }
            HostCommand::Tap => self.face.on_tap(TapKind::Tap),
            HostCommand::TimeZone(offset) => self.face.on_time_zone_changed(offset),
            HostCommand::Quit => return false,
        }
        true
    }

    /// Drain companion events already queued
    pub fn pump_sync_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.face.handle_sync_event(event);
        }
    }

    /// Render and flush if the face asked for a redraw.
    ///
    /// Returns true if a frame was presented.
    pub fn render_if_invalidated(&mut self) -> Result<bool, SurfaceError> {
        if !self.face.take_invalidation() {
            return Ok(false);
        }
        let bounds = self.surface.bounds();
        if !self.face.draw(&mut self.surface, bounds)? {
            return Ok(false);
        }
        self.surface.flush()?;
        if self.ascii {
            println!("{}", self.surface.to_ascii());
        }
        Ok(true)
    }

    fn next_deadline(&self) -> (Duration, Deadline) {
        if let Some(due) = self.face.next_tick_in() {
            return (due, Deadline::Timer);
        }
        if self.face.state() == DisplayState::VisibleAmbient {
            let now_ms = self.face.clock().now_ms();
            let wait = MINUTE_MS - now_ms.rem_euclid(MINUTE_MS);
            return (Duration::from_millis(wait as u64), Deadline::MinuteTick);
        }
        (IDLE_WAIT, Deadline::Idle)
    }

    /// Event loop: timer, companion, stdin commands and signals, strictly
    /// one at a time.
    pub async fn run(mut self, mut commands: Receiver<HostCommand>) -> anyhow::Result<()> {
        let shutdown = signal_handler();
        tokio::pin!(shutdown);
        let mut commands_open = true;

        self.face.on_visibility_changed(true);

        loop {
            if let Err(e) = self.render_if_invalidated() {
                error!("Failed to render face: {}", e);
            }

            let (wait, deadline) = self.next_deadline();
            let wake = tokio::select! {
                _ = time::sleep(wait) => match deadline {
                    Deadline::Timer => Wake::Timer,
                    Deadline::MinuteTick => Wake::MinuteTick,
                    Deadline::Idle => Wake::Idle,
                },
                Some(event) = self.events.recv() => Wake::Sync(event),
                cmd = commands.recv(), if commands_open => Wake::Command(cmd),
                res = &mut shutdown => {
                    if let Err(e) = res {
                        warn!("Signal handler failed: {}", e);
                    }
                    Wake::Signal
                }
            };

            match wake {
                Wake::Timer => {
                    self.face.poll_timer();
                }
                Wake::MinuteTick => self.face.on_time_tick(),
                Wake::Idle => {}
                Wake::Sync(event) => self.face.handle_sync_event(event),
                Wake::Command(Some(cmd)) => {
                    if !self.apply(cmd) {
                        info!("Quit requested");
                        break;
                    }
                }
                Wake::Command(None) => {
                    debug!("stdin closed");
                    commands_open = false;
                }
                Wake::Signal => break,
            }
        }

        self.face.shutdown();
        info!(
            "Face host stopped after {} frames",
            self.surface.stats().flush_count
        );
        Ok(())
    }
}

/// Read stdin lines into host commands
pub fn spawn_stdin_reader() -> Receiver<HostCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<HostCommand>(16);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match line.parse::<HostCommand>() {
                    Ok(cmd) => {
                        if cmd_tx.send(cmd).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!("{} ({})", e, HELP),
                },
                Ok(None) => break,
                Err(e) => {
                    error!("stdin read failed: {}", e);
                    break;
                }
            }
        }
    });
    cmd_rx
}

#[cfg(unix)]
async fn signal_handler() -> std::io::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

#[cfg(not(unix))]
async fn signal_handler() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received. Initiating graceful shutdown.");
    Ok(())
}
