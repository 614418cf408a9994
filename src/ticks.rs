//! # Tick / Time Mapping
//!
//! Maps ticks to wall-clock seconds and back for a given [`TempoCurve`].
//!
//! Conceptually this is a dense table `time[tick]` for every tick in
//! `0..=horizon`, built by integrating each breakpoint's rate over its span
//! and chaining the end time of one span into the start of the next. Rather
//! than materialising that table, each span keeps its start tick and start
//! time and the table value is computed on demand with the same arithmetic,
//! so memory stays proportional to the number of tempo changes.
//!
//! ## Inverse lookup
//! [`TickTimeMap::time_to_tick`] finds the leftmost tick whose time is
//! `>= time`, then steps back one tick if the previous tick is strictly
//! closer. Ties go to the later tick. Times past the horizon are
//! extrapolated with the final rate.

use log::debug;

use crate::tempo::TempoCurve;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    start_tick: u64,
    start_time: f64,
    seconds_per_tick: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickTimeMap {
    spans: Vec<Span>,
    horizon: u64,
    final_scale: f64,
}

impl TickTimeMap {
    /// Build the mapping for ticks `0..=horizon`.
    pub fn build(curve: &TempoCurve, horizon: u64) -> Self {
        let scales = curve.scales();
        let mut spans = Vec::with_capacity(scales.len());
        let mut last_end_time = 0.0;

        for (i, scale) in scales.iter().enumerate() {
            spans.push(Span {
                start_tick: scale.tick,
                start_time: last_end_time,
                seconds_per_tick: scale.seconds_per_tick,
            });
            if let Some(next) = scales.get(i + 1) {
                last_end_time += scale.seconds_per_tick * (next.tick - scale.tick) as f64;
            }
        }

        let map = Self {
            spans,
            horizon,
            final_scale: curve.final_scale(),
        };
        debug!(
            "tick map: {} spans, horizon {} ticks ({:.3}s)",
            map.spans.len(),
            horizon,
            map.time_at(horizon)
        );
        map
    }

    /// Last tick covered by the table
    pub fn horizon(&self) -> u64 {
        self.horizon
    }

    pub fn final_scale(&self) -> f64 {
        self.final_scale
    }

    /// Wall-clock time of a tick.
    ///
    /// Defined for every tick; values past the horizon continue the last span.
    pub fn time_at(&self, tick: u64) -> f64 {
        let idx = self.spans.partition_point(|s| s.start_tick <= tick);
        match idx.checked_sub(1).and_then(|i| self.spans.get(i)) {
            Some(span) => {
                span.start_time + span.seconds_per_tick * (tick - span.start_tick) as f64
            }
            None => 0.0,
        }
    }

    /// The table as a dense sequence, tick 0 first
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=self.horizon).map(move |tick| self.time_at(tick))
    }

    /// Leftmost tick in `0..=horizon + 1` whose time is `>= time`.
    /// `horizon + 1` means the time lies past the table; a table reaching
    /// `u64::MAX` has no such position and the search stops at its end.
    fn insertion_point(&self, time: f64) -> u64 {
        let mut lo = 0u64;
        let mut hi = self.horizon.saturating_add(1);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.time_at(mid) < time {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }

    /// Nearest tick to a time in seconds.
    pub fn time_to_tick(&self, time: f64) -> u64 {
        let tick = self.insertion_point(time);

        if tick > self.horizon {
            let last = self.horizon;
            let extra = (time - self.time_at(last)) / self.final_scale;
            let ticks = (last as f64 + extra).round_ties_even();
            return if ticks <= 0.0 { 0 } else { ticks as u64 };
        }

        if tick > 0 && (time - self.time_at(tick - 1)).abs() < (time - self.time_at(tick)).abs() {
            tick - 1
        } else {
            tick
        }
    }
}
