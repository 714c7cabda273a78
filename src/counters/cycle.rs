//! Five-phase repetition cycle shared by every exercise counter.
//!
//! The cycle works on a signed copy of the drive signal so that one set of
//! comparisons serves both polarities: for [`Polarity::Falling`] exercises the
//! angle is negated on the way in and the peak negated on the way out, which
//! turns "bends down to the bottom" into "rises up to the extreme".

use crate::config::CounterConfig;
use crate::Result;
use log::debug;
use std::time::Duration;

/// Direction the drive signal travels when leaving the rest position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Rest is the low-angle end (lateral raise)
    Rising,
    /// Rest is the high-angle end (squat)
    Falling,
}

/// Generic phases, mapped onto each exercise's own phase enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CyclePhase {
    /// Not yet settled in the rest position
    Waiting,
    /// Resting, ready to start a repetition
    Ready,
    /// Travelling from rest towards the extreme
    Moving,
    /// Holding at the extreme
    Extreme,
    /// Travelling back towards rest
    Returning,
}

/// Output of one cycle step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleEvent {
    Started,
    PhaseChanged(CyclePhase),
    RepCompleted {
        total_reps: u32,
        rep_duration: Duration,
        peak_angle: f64,
    },
}

/// Repetition state machine with hysteresis, hold-time and duration checks
#[derive(Debug, Clone)]
pub struct RepCycle {
    polarity: Polarity,
    rest: f64,
    extreme: f64,
    hysteresis: f64,
    ready_hold: Duration,
    min_rep: Duration,
    max_rep: Duration,
    debounce: Duration,

    phase: CyclePhase,
    rep_count: u32,
    /// Set on the first Waiting -> Ready transition, cleared only by `reset`
    started: bool,
    stable_since: Option<Duration>,
    last_transition: Option<Duration>,
    rep_started: Option<Duration>,
    peak: Option<f64>,
}

impl RepCycle {
    /// Build a cycle from validated thresholds
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is inconsistent
    pub fn new(config: &CounterConfig, polarity: Polarity) -> Result<Self> {
        config.validate()?;

        let (rest, extreme) = match polarity {
            Polarity::Rising => (config.bottom_threshold, config.top_threshold),
            Polarity::Falling => (-config.top_threshold, -config.bottom_threshold),
        };

        Ok(Self {
            polarity,
            rest,
            extreme,
            hysteresis: config.hysteresis,
            ready_hold: config.ready_hold(),
            min_rep: config.min_rep_duration(),
            max_rep: config.max_rep_duration(),
            debounce: config.debounce(),
            phase: CyclePhase::Waiting,
            rep_count: 0,
            started: false,
            stable_since: None,
            last_transition: None,
            rep_started: None,
            peak: None,
        })
    }

    #[must_use]
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    #[must_use]
    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    /// Clear all progress, including the repetition count
    pub fn reset(&mut self) {
        self.phase = CyclePhase::Waiting;
        self.rep_count = 0;
        self.started = false;
        self.stable_since = None;
        self.last_transition = None;
        self.rep_started = None;
        self.peak = None;
    }

    /// Advance the cycle with one smoothed sample taken at `now`
    pub fn advance(&mut self, angle: f64, now: Duration) -> Option<CycleEvent> {
        let signal = self.signed(angle);

        match self.phase {
            CyclePhase::Waiting => {
                if signal > self.rest {
                    self.stable_since = None;
                    return None;
                }
                let since = *self.stable_since.get_or_insert(now);
                if now.saturating_sub(since) < self.ready_hold || !self.can_change_state(now) {
                    return None;
                }
                self.stable_since = None;
                self.enter(CyclePhase::Ready, now);
                if !self.started {
                    self.started = true;
                    Some(CycleEvent::Started)
                } else {
                    Some(CycleEvent::PhaseChanged(CyclePhase::Ready))
                }
            }
            CyclePhase::Ready => {
                if signal > self.rest + self.hysteresis && self.can_change_state(now) {
                    self.rep_started = Some(now);
                    self.peak = Some(signal);
                    self.enter(CyclePhase::Moving, now);
                    return Some(CycleEvent::PhaseChanged(CyclePhase::Moving));
                }
                None
            }
            CyclePhase::Moving => {
                self.track_peak(signal);
                if signal >= self.extreme {
                    if self.can_change_state(now) {
                        self.enter(CyclePhase::Extreme, now);
                        return Some(CycleEvent::PhaseChanged(CyclePhase::Extreme));
                    }
                } else if signal <= self.rest && self.can_change_state(now) {
                    debug!("Repetition aborted before reaching the extreme");
                    self.rep_started = None;
                    self.peak = None;
                    self.enter(CyclePhase::Ready, now);
                }
                None
            }
            CyclePhase::Extreme => {
                self.track_peak(signal);
                if signal < self.extreme - self.hysteresis && self.can_change_state(now) {
                    self.enter(CyclePhase::Returning, now);
                    return Some(CycleEvent::PhaseChanged(CyclePhase::Returning));
                }
                None
            }
            CyclePhase::Returning => {
                self.track_peak(signal);
                if signal <= self.rest {
                    return self.complete(signal, now);
                }
                None
            }
        }
    }

    fn complete(&mut self, signal: f64, now: Duration) -> Option<CycleEvent> {
        let elapsed = self
            .rep_started
            .take()
            .map_or(Duration::ZERO, |start| now.saturating_sub(start));
        let raw_peak = self.peak.take().unwrap_or(signal);
        let peak = self.signed(raw_peak);
        self.last_transition = Some(now);

        if elapsed < self.min_rep {
            debug!("Repetition rejected: {elapsed:?} is shorter than {:?}", self.min_rep);
            self.phase = CyclePhase::Ready;
            return None;
        }
        if elapsed > self.max_rep {
            debug!("Repetition rejected: {elapsed:?} exceeds {:?}, waiting for rest", self.max_rep);
            self.phase = CyclePhase::Waiting;
            self.stable_since = None;
            return None;
        }

        self.rep_count += 1;
        self.phase = CyclePhase::Ready;
        Some(CycleEvent::RepCompleted {
            total_reps: self.rep_count,
            rep_duration: elapsed,
            peak_angle: peak,
        })
    }

    fn enter(&mut self, phase: CyclePhase, now: Duration) {
        debug!("Cycle phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.last_transition = Some(now);
    }

    fn can_change_state(&self, now: Duration) -> bool {
        self.last_transition
            .map_or(true, |last| now.saturating_sub(last) >= self.debounce)
    }

    fn track_peak(&mut self, signal: f64) {
        self.peak = Some(self.peak.map_or(signal, |peak| peak.max(signal)));
    }

    /// Maps between real angles and the internal signed signal; self-inverse
    fn signed(&self, value: f64) -> f64 {
        match self.polarity {
            Polarity::Rising => value,
            Polarity::Falling => -value,
        }
    }
}
