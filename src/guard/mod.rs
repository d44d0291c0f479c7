//! Guard device logic - lock state, connection state and alarm policy.
//!
//! The main loop owns a single `GuardState`.  BLE callbacks never touch
//! it directly: they post `GuardEvent`s into a queue which the loop
//! drains once per tick, so all state changes happen on one thread.
//!
//! ## Tick
//!
//! ```text
//! sample ─► drain events ─► (display) ─► frame if connected ─► pulses
//!                │                                              ▲
//!                └── Lock / Unlock: acknowledgment pulse ───────┤
//!                        locked && motion: tamper pulse ────────┤
//!                        temperature > limit: over-temp pulse ──┘
//! ```
//!
//! Pulses are sounded by the caller, one after another, each blocking
//! the loop for the pulse duration.

pub mod command;
pub mod frame;
pub mod policy;
pub mod sample;


use crate::config::{COMMAND_MAX_LEN, EVENT_QUEUE_DEPTH};
use command::Command;
use frame::SensorFrame;
use heapless::Vec;
use sample::SensorSample;

/// Most pulses one tick can ask for: one acknowledgment per drained
/// event, plus tamper and over-temperature.
pub const MAX_PULSES_PER_TICK: usize = EVENT_QUEUE_DEPTH + 2;

/// Pulses requested by one tick, in the order they must sound.
pub type AlarmQueue = Vec<AlarmCause, MAX_PULSES_PER_TICK>;

/// Raw value written to the command characteristic.
pub type CommandValue = Vec<u8, COMMAND_MAX_LEN>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockState {
    #[default]
    Unlocked,
    Locked,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

/// Events the BLE task posts for the main loop.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GuardEvent {
    /// A central connected.
    Connected,
    /// The central disconnected.
    Disconnected,
    /// A central wrote the command characteristic.
    CommandWritten(CommandValue),
}

/// Why the buzzer sounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmCause {
    /// Chime confirming a Lock / Unlock command.
    Acknowledge(Command),
    /// Motion while locked.
    Tamper,
    /// Temperature above the limit.
    OverTemperature,
}

/// Work the caller must carry out for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickPlan {
    /// Frame to notify, present only while connected.
    pub frame: Option<SensorFrame>,
    /// Pulses to sound, in order.
    pub alarms: AlarmQueue,
}

/// Application state owned by the guard main loop.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GuardState {
    lock: LockState,
    connection: ConnectionState,
    sample: SensorSample,
}

impl GuardState {
    /// Unlocked, disconnected, zeroed sample.
    pub const fn new() -> Self {
        Self {
            lock: LockState::Unlocked,
            connection: ConnectionState::Disconnected,
            sample: SensorSample {
                accel_magnitude: 0.0,
                gyro_magnitude: 0.0,
                temperature: 0.0,
            },
        }
    }

    pub fn lock(&self) -> LockState {
        self.lock
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn sample(&self) -> &SensorSample {
        &self.sample
    }

    pub fn is_locked(&self) -> bool {
        self.lock == LockState::Locked
    }

    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionState::Connected
    }

    /// Apply one BLE event.
    ///
    /// Returns the acknowledgment pulse for a recognised command received
    /// while connected.  Unrecognised text, or a write racing a
    /// disconnection, leaves the state untouched.
    pub fn apply_event(&mut self, event: &GuardEvent) -> Option<AlarmCause> {
        match event {
            GuardEvent::Connected => {
                self.connection = ConnectionState::Connected;
                None
            }
            GuardEvent::Disconnected => {
                self.connection = ConnectionState::Disconnected;
                None
            }
            GuardEvent::CommandWritten(value) => {
                if !self.is_connected() {
                    return None;
                }
                let command = Command::parse(value)?;
                self.lock = match command {
                    Command::Lock => LockState::Locked,
                    Command::Unlock => LockState::Unlocked,
                };
                Some(AlarmCause::Acknowledge(command))
            }
        }
    }

    /// Threshold alarms for the current sample: tamper first, then
    /// over-temperature.  Both may fire in the same tick.
    pub fn threshold_alarms(&self) -> impl Iterator<Item = AlarmCause> {
        let tamper = self.is_locked() && policy::tamper_detected(&self.sample);
        let hot = policy::over_temperature(&self.sample);
        tamper
            .then_some(AlarmCause::Tamper)
            .into_iter()
            .chain(hot.then_some(AlarmCause::OverTemperature))
    }

    /// Frame to notify for the current sample, if a central is connected.
    pub fn notification(&self) -> Option<SensorFrame> {
        self.is_connected()
            .then(|| SensorFrame::from_sample(&self.sample))
    }

    /// Run one tick: store `sample`, apply up to `EVENT_QUEUE_DEPTH`
    /// pending events in order, and plan the notification and pulses.
    pub fn tick<I>(&mut self, sample: SensorSample, events: I) -> TickPlan
    where
        I: IntoIterator<Item = GuardEvent>,
    {
        self.sample = sample;

        let mut alarms = AlarmQueue::new();
        for event in events.into_iter().take(EVENT_QUEUE_DEPTH) {
            if let Some(ack) = self.apply_event(&event) {
                let _ = alarms.push(ack);
            }
        }

        let frame = self.notification();

        for cause in self.threshold_alarms() {
            let _ = alarms.push(cause);
        }

        TickPlan { frame, alarms }
    }
}
