//! Fixed timestep frame driver
//!
//! Host frames arrive with variable durations. Time is accumulated and
//! drained in fixed steps against the authoritative `Game`; whatever is left
//! over is simulated on a throwaway copy that only the renderer sees.

use crate::config::GameConfig;
use crate::consts::SIM_DT;
use crate::input::Input;
use crate::present::{DrawError, RenderSink, draw};
use crate::sim::{Contacts, FramebufferSize, Game, apply_input, tick};

/// Accumulator residue below this is floating point noise, not time
const DRIFT_EPSILON: f64 = 1e-9;

/// Timing for one host frame, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Clock {
    /// Wall time since the previous frame
    pub frame_duration: f64,
    /// Wall time since startup
    pub total_time: f64,
}

/// What a frame did
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    /// Fixed ticks applied to the authoritative state
    pub ticks: u32,
    /// Sub-step time simulated on the draw snapshot only
    pub leftover: f64,
    /// Union of contacts from the authoritative ticks
    pub contacts: Contacts,
}

#[derive(Debug, Clone)]
pub struct FrameScheduler {
    step: f64,
    accumulator: f64,
    max_ticks_per_frame: Option<u32>,
    total_ticks: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FrameScheduler {
    pub fn new(step: f64) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_ticks_per_frame: None,
            total_ticks: 0,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.sim_dt()).with_max_ticks(config.max_ticks_per_frame)
    }

    /// Cap ticks per frame; time past the cap is dropped
    pub fn with_max_ticks(mut self, max_ticks_per_frame: Option<u32>) -> Self {
        self.max_ticks_per_frame = max_ticks_per_frame;
        self
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Bank `frame_duration` and drain whole steps from the accumulator
    ///
    /// `run_tick` is called once per drained step. Returns the step count.
    pub fn advance(&mut self, frame_duration: f64, mut run_tick: impl FnMut(f64)) -> u32 {
        // Negative or non-finite durations count as no time
        if frame_duration.is_finite() && frame_duration > 0.0 {
            self.accumulator += frame_duration;
        }

        let mut ticks = 0;
        while self.accumulator + DRIFT_EPSILON >= self.step {
            if self.max_ticks_per_frame.is_some_and(|max| ticks >= max) {
                let dropped = self.accumulator - self.accumulator % self.step;
                log::warn!(
                    "Frame needed more than {} ticks, dropping {:.4}s of simulation time",
                    ticks,
                    dropped
                );
                self.accumulator %= self.step;
                break;
            }
            run_tick(self.step);
            self.accumulator -= self.step;
            ticks += 1;
        }
        if self.accumulator.abs() < DRIFT_EPSILON {
            self.accumulator = 0.0;
        }

        self.total_ticks += u64::from(ticks);
        ticks
    }

    /// Deep copy of `game` advanced by the leftover sub-step time
    pub fn speculate(&self, game: &Game, clock: Clock, framebuffer: FramebufferSize) -> Game {
        let mut snapshot = game.clone();
        tick(
            &mut snapshot,
            framebuffer,
            clock.total_time,
            self.accumulator as f32,
        );
        snapshot
    }

    /// Run one host frame: input, fixed ticks, snapshot, draw, input latch
    pub fn frame(
        &mut self,
        game: &mut Game,
        input: &mut Input,
        clock: Clock,
        framebuffer: FramebufferSize,
        sink: &mut dyn RenderSink,
    ) -> Result<FrameReport, DrawError> {
        apply_input(game, input);

        let mut contacts = Contacts::empty();
        let ticks = self.advance(clock.frame_duration, |dt| {
            contacts |= tick(game, framebuffer, clock.total_time, dt as f32);
        });

        let snapshot = self.speculate(game, clock, framebuffer);
        let drawn = draw(&snapshot, sink);
        input.end_frame();
        drawn?;

        Ok(FrameReport {
            ticks,
            leftover: self.accumulator,
            contacts,
        })
    }
}
