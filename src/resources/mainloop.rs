//! Host-driven main loop.
//!
//! The host calls [`MainLoop::tick`] from its frame callback with a
//! millisecond timestamp. The loop turns the real time since the previous
//! tick into a [`TickPlan`]: a list of physics sub-steps, none longer than
//! `max_step`, whose total never exceeds `1 / min_fps` seconds. Capping the
//! total keeps a stalled tab or a debugger pause from queueing an unbounded
//! catch-up.
//!
//! Stopping forgets the last timestamp, so the first tick after a restart
//! simulates nothing instead of the whole pause.

use bevy_ecs::prelude::Resource;
use log::info;
use smallvec::SmallVec;

/// Work for one host frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TickPlan {
    /// Real milliseconds since the previous tick, for timer-driven animation.
    pub elapsed_ms: f64,
    /// Physics sub-steps in seconds, in order.
    pub steps: SmallVec<[f32; 8]>,
}

impl TickPlan {
    /// Simulated seconds covered by the plan.
    pub fn simulated(&self) -> f32 {
        self.steps.iter().sum()
    }
}

/// Real time seen by the animation schedule, in milliseconds.
///
/// Only advances while the main loop runs.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct RealTime {
    /// Loop clock at the current host frame.
    pub now_ms: f64,
    /// Milliseconds since the previous host frame.
    pub elapsed_ms: f64,
}

#[derive(Resource, Debug, Clone)]
pub struct MainLoop {
    /// Longest physics sub-step, in seconds.
    pub max_step: f32,
    /// Lowest frame rate simulated in real time; slower frames lose time.
    pub min_fps: f32,
    running: bool,
    last_ms: Option<f64>,
    clock_ms: f64,
}

impl Default for MainLoop {
    fn default() -> Self {
        Self::new(1.0 / 60.0, 10.0)
    }
}

impl MainLoop {
    pub fn new(max_step: f32, min_fps: f32) -> Self {
        debug_assert!(max_step > 0.0, "max_step must be positive");
        debug_assert!(min_fps > 0.0, "min_fps must be positive");
        Self {
            max_step,
            min_fps,
            running: false,
            last_ms: None,
            clock_ms: 0.0,
        }
    }

    pub fn start(&mut self, now_ms: f64) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_ms = Some(now_ms);
        info!("Main loop started");
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.last_ms = None;
        info!("Main loop stopped at {:.0} ms", self.clock_ms);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Real milliseconds accumulated while running.
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Plan the work for a host frame at `now_ms`. `None` while stopped.
    pub fn tick(&mut self, now_ms: f64) -> Option<TickPlan> {
        if !self.running {
            return None;
        }
        let last = self.last_ms.replace(now_ms).unwrap_or(now_ms);
        let elapsed_ms = (now_ms - last).max(0.0);
        self.clock_ms += elapsed_ms;

        let budget = ((elapsed_ms / 1000.0) as f32).min(1.0 / self.min_fps);
        Some(TickPlan {
            elapsed_ms,
            steps: split_steps(budget, self.max_step),
        })
    }
}

/// Split `total` seconds into steps of `max_step`, the last one carrying the remainder.
pub fn split_steps(total: f32, max_step: f32) -> SmallVec<[f32; 8]> {
    let mut steps = SmallVec::new();
    if total <= 0.0 {
        return steps;
    }
    let full = (total / max_step).floor() as usize;
    for _ in 0..full {
        steps.push(max_step);
    }
    let remainder = total - full as f32 * max_step;
    if remainder > f32::EPSILON {
        steps.push(remainder);
    }
    steps
}
