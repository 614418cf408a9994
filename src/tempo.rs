//! # Tempo Curve
//!
//! Turns the ordered tempo list into a piecewise-constant curve of
//! `(tick, seconds_per_tick)` breakpoints, plus the tick position of every
//! tempo entry.
//!
//! ## Algorithm
//! - An implicit 120 qpm tempo is active at tick 0
//! - Each tempo after the first starts `round(elapsed * previous_qpm / 60 * ppq)`
//!   ticks after its predecessor
//! - A tempo landing on tick 0 replaces the breakpoint at tick 0
//! - Any other tempo adds a breakpoint only when its rate differs from the
//!   last recorded rate
//!
//! Rounding is half-to-even throughout so that tick positions agree with
//! existing consumers bit for bit.

use log::{debug, warn};

use crate::sequence::Tempo;

/// Tempo assumed when the sequence declares none
pub const DEFAULT_QPM: f64 = 120.0;

/// Convert an elapsed time at a constant tempo into whole ticks
pub fn seconds_to_ticks(seconds: f64, qpm: f64, ppq: u32) -> u64 {
    let ticks = ((seconds * qpm) / 60.0 * ppq as f64).round_ties_even();
    if ticks <= 0.0 {
        0
    } else {
        ticks as u64
    }
}

/// Duration of one tick at the given tempo
pub fn seconds_per_tick(qpm: f64, ppq: u32) -> f64 {
    60.0 / (qpm * ppq as f64)
}

/// One breakpoint of the tempo curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickScale {
    pub tick: u64,
    pub seconds_per_tick: f64,
}

/// Breakpoints derived from a tempo list
///
/// Built once per conversion and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TempoCurve {
    ppq: u32,
    scales: Vec<TickScale>,
    tempo_ticks: Vec<u64>,
    /// (time, qpm, tick) of the last tempo entry
    last_tempo: Option<(f64, f64, u64)>,
}

impl TempoCurve {
    /// Build the curve. An empty tempo list yields the 120 qpm default.
    pub fn build(tempos: &[Tempo], ppq: u32) -> Self {
        let mut scales = vec![TickScale {
            tick: 0,
            seconds_per_tick: seconds_per_tick(DEFAULT_QPM, ppq),
        }];
        let mut tempo_ticks = Vec::with_capacity(tempos.len());
        let mut current_ticks = 0u64;

        if let Some(first) = tempos.first() {
            if first.time > 0.0 {
                warn!(
                    "first tempo starts at {}s, treating it as active from tick 0",
                    first.time
                );
            }
        }

        for (i, tempo) in tempos.iter().enumerate() {
            if i > 0 {
                let previous = &tempos[i - 1];
                current_ticks = current_ticks.saturating_add(seconds_to_ticks(
                    tempo.time - previous.time,
                    previous.qpm,
                    ppq,
                ));
            }
            tempo_ticks.push(current_ticks);

            let scale = seconds_per_tick(tempo.qpm, ppq);
            if current_ticks == 0 {
                scales = vec![TickScale {
                    tick: 0,
                    seconds_per_tick: scale,
                }];
            } else if scales.last().map(|s| s.seconds_per_tick) != Some(scale) {
                scales.push(TickScale {
                    tick: current_ticks,
                    seconds_per_tick: scale,
                });
            }
        }

        let last_tempo = tempos
            .last()
            .map(|t| (t.time, t.qpm, current_ticks));

        debug!(
            "tempo curve: {} tempos -> {} breakpoints at ppq {}",
            tempos.len(),
            scales.len(),
            ppq
        );

        Self {
            ppq,
            scales,
            tempo_ticks,
            last_tempo,
        }
    }

    pub fn scales(&self) -> &[TickScale] {
        &self.scales
    }

    /// Tick position of each input tempo, in input order
    pub fn tempo_ticks(&self) -> &[u64] {
        &self.tempo_ticks
    }

    /// Rate used to extrapolate past the last breakpoint
    pub fn final_scale(&self) -> f64 {
        self.scales
            .last()
            .map(|s| s.seconds_per_tick)
            .unwrap_or_else(|| seconds_per_tick(DEFAULT_QPM, self.ppq))
    }

    /// Number of ticks needed to reach `end_time`, counted from the last
    /// tempo entry at that entry's rate. Saturates at `u64::MAX`.
    pub fn horizon(&self, end_time: f64) -> u64 {
        let (time, qpm, ticks) = self.last_tempo.unwrap_or((0.0, DEFAULT_QPM, 0));
        let elapsed = (end_time - time).max(0.0);
        seconds_to_ticks(elapsed, qpm, self.ppq).saturating_add(ticks)
    }
}
