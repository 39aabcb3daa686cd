//! Timer state machine that advances a game once per tick.
//!
//! The loop owns no clock. The host calls [`GameLoop::poll`] with the current
//! instant, typically after waiting up to [`GameLoop::time_until_tick`] for
//! input, so ticks and key presses are handled on the same thread.

use std::fmt;
use std::time::{Duration, Instant};

use log::debug;

use crate::speed::SpeedLevel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Play is over (collision or a full board).
    Finished,
}

/// Something the loop drives forward one step per tick.
pub trait Tick {
    fn tick(&mut self) -> TickOutcome;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopStatus {
    Stopped,
    Running,
    Paused,
}

type StatusListener = Box<dyn FnMut(LoopStatus, bool)>;

pub struct GameLoop {
    status: LoopStatus,
    speed: SpeedLevel,
    playable: bool,
    next_tick: Option<Instant>,
    listeners: Vec<StatusListener>,
}

impl GameLoop {
    pub fn new(speed: SpeedLevel) -> Self {
        GameLoop {
            status: LoopStatus::Stopped,
            speed,
            playable: true,
            next_tick: None,
            listeners: Vec::new(),
        }
    }

    pub fn status(&self) -> LoopStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == LoopStatus::Running
    }

    /// Whether [`GameLoop::play`] would start the loop. False after play
    /// finished until the next [`GameLoop::init`].
    pub fn is_playable(&self) -> bool {
        self.playable
    }

    pub fn speed(&self) -> SpeedLevel {
        self.speed
    }

    /// Listeners get the new status and the playable flag on every change.
    pub fn add_status_listener(&mut self, listener: impl FnMut(LoopStatus, bool) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn init(&mut self) {
        self.playable = true;
        self.next_tick = None;
        self.set_status(LoopStatus::Stopped);
    }

    pub fn play(&mut self) {
        if !self.playable || self.status == LoopStatus::Running {
            return;
        }
        // Scheduled on the first poll.
        self.next_tick = None;
        self.set_status(LoopStatus::Running);
    }

    pub fn pause(&mut self) {
        if self.status == LoopStatus::Paused {
            return;
        }
        self.next_tick = None;
        self.set_status(LoopStatus::Paused);
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Takes effect from the tick after the one already scheduled.
    pub fn set_speed(&mut self, speed: SpeedLevel) {
        if speed != self.speed {
            debug!("Speed changed from {} to {}", self.speed, speed);
            self.speed = speed;
        }
    }

    /// How long the host may wait before the next [`GameLoop::poll`]. `None`
    /// while nothing is scheduled to tick.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        if !self.is_running() {
            return None;
        }
        Some(
            self.next_tick
                .map(|deadline| deadline.saturating_duration_since(now))
                .unwrap_or(Duration::ZERO),
        )
    }

    /// Ticks `target` once if the deadline has passed. Returns whether it
    /// ticked. Deadlines missed while the host was busy are not made up.
    pub fn poll(&mut self, now: Instant, target: &mut impl Tick) -> bool {
        if !self.is_running() {
            return false;
        }
        match self.next_tick {
            Some(deadline) if now >= deadline => {}
            Some(_) => return false,
            None => {
                self.next_tick = Some(now + self.speed.interval());
                return false;
            }
        }

        self.next_tick = Some(now + self.speed.interval());
        if target.tick() == TickOutcome::Finished {
            debug!("Play finished, pausing the loop");
            self.playable = false;
            self.pause();
        }
        true
    }

    fn set_status(&mut self, status: LoopStatus) {
        self.status = status;
        for listener in &mut self.listeners {
            listener(status, self.playable);
        }
    }
}

impl fmt::Debug for GameLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameLoop")
            .field("status", &self.status)
            .field("speed", &self.speed)
            .field("playable", &self.playable)
            .field("next_tick", &self.next_tick)
            .finish_non_exhaustive()
    }
}
