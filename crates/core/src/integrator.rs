//! Bounce integrator for metaball sources.
//!
//! Each step moves every source along its velocity and reflects the velocity
//! component on any axis where the source has reached the domain bound. The
//! position is not clamped, so a source may sit slightly past the bound for a
//! frame before it heads back.

use crate::source::Metaball;
use std::time::Instant;
use tracing::trace;

/// Advances source positions and owns the timestamp of the last update.
///
/// The clock is never read internally: callers pass `now` into
/// [`Integrator::elapsed_until`] (or [`Integrator::advance`]), which keeps
/// stepping deterministic under test.
#[derive(Debug, Clone)]
pub struct Integrator {
    scaling: f32,
    bound: f32,
    last_update: Instant,
}

impl Integrator {
    /// Creates an integrator whose first step measures time from `start`.
    pub fn new(scaling: f32, bound: f32, start: Instant) -> Self {
        Self {
            scaling,
            bound,
            last_update: start,
        }
    }

    /// Velocity multiplier applied on top of elapsed seconds.
    pub fn scaling(&self) -> f32 {
        self.scaling
    }

    /// Half-width of the square domain sources bounce inside.
    pub fn bound(&self) -> f32 {
        self.bound
    }

    /// Timestamp of the most recent update.
    pub fn last_update(&self) -> Instant {
        self.last_update
    }

    /// Seconds between the last update and `now`, then records `now`.
    ///
    /// A `now` earlier than the stored timestamp counts as zero elapsed time.
    pub fn elapsed_until(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last_update);
        self.last_update = now;
        elapsed.as_secs_f32()
    }

    /// Moves every source by `velocity * elapsed * scaling` and reflects
    /// velocity components that have reached `±bound`.
    pub fn integrate(&self, sources: &mut [Metaball], elapsed: f32) {
        let step = elapsed * self.scaling;
        for (index, ball) in sources.iter_mut().enumerate() {
            ball.position += ball.velocity * step;

            let vx = reflect(ball.position.x, ball.velocity.x, self.bound);
            let vy = reflect(ball.position.y, ball.velocity.y, self.bound);
            if vx != ball.velocity.x || vy != ball.velocity.y {
                trace!(
                    index,
                    x = ball.position.x,
                    y = ball.position.y,
                    "metaball bounced"
                );
            }
            ball.velocity.x = vx;
            ball.velocity.y = vy;
        }
    }

    /// Integrates over the time since the last update, ending at `now`.
    pub fn advance(&mut self, sources: &mut [Metaball], now: Instant) {
        let elapsed = self.elapsed_until(now);
        self.integrate(sources, elapsed);
    }
}

/// Velocity component after checking `position` against `±bound`.
fn reflect(position: f32, velocity: f32, bound: f32) -> f32 {
    if position >= bound || position <= -bound {
        -velocity
    } else {
        velocity
    }
}
