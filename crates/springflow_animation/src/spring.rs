//! Damped spring physics
//!
//! A one-dimensional mass-spring-damper integrated with fourth-order
//! Runge-Kutta. Frame deltas are split into sub-steps so the integration
//! stays stable for stiff configurations, and clamped so a long stall
//! (e.g. after a suspend) costs at most one short frame.

use std::f32::consts::TAU;

/// Largest single integration step, in seconds
const MAX_STEP: f32 = 1.0 / 120.0;

/// Longest frame simulated by a single `step`, in seconds
const MAX_FRAME: f32 = 1.0 / 15.0;

/// Distance from target below which a spring counts as resting
const REST_DISTANCE: f32 = 0.01;

/// Speed below which a spring counts as resting
const REST_VELOCITY: f32 = 0.01;

/// Physical parameters of a spring
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Build a unit-mass spring from an oscillation frequency (Hz) and a
    /// damping ratio, where `1.0` is critically damped.
    pub fn from_frequency(frequency: f32, damping_ratio: f32) -> Self {
        let omega = TAU * frequency;
        Self {
            stiffness: omega * omega,
            damping: 2.0 * damping_ratio * omega,
            mass: 1.0,
        }
    }

    /// Stiff spring with little overshoot
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Quick spring with a small bounce
    pub fn snappy() -> Self {
        Self::new(300.0, 20.0, 1.0)
    }

    /// Soft, slow spring
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Bouncy spring
    pub fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Damping ratio (`1.0` = critical)
    pub fn damping_ratio(&self) -> f32 {
        let critical = 2.0 * (self.stiffness * self.mass).sqrt();
        if critical > 0.0 {
            self.damping / critical
        } else {
            0.0
        }
    }

    /// Whether integrating this config can make progress without blowing up
    pub fn is_stable(&self) -> bool {
        self.stiffness.is_finite()
            && self.damping.is_finite()
            && self.mass.is_finite()
            && self.stiffness >= 0.0
            && self.damping >= 0.0
            && self.mass > 0.0
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::from_frequency(1.0, 1.0)
    }
}

/// A damped spring pulling `value` towards `target`
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring at rest at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Move the spring to `value` without touching its velocity.
    ///
    /// The next step derives the spring force from the new position.
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
    }

    /// Move the spring to `value` and stop it
    pub fn reset_to(&mut self, value: f32) {
        self.value = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DISTANCE && self.velocity.abs() < REST_VELOCITY
    }

    /// Advance the simulation by `dt` seconds, clamped to 1/15 s
    pub fn step(&mut self, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) || !self.config.is_stable() {
            return;
        }

        let dt = dt.min(MAX_FRAME);
        let steps = (dt / MAX_STEP).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        for _ in 0..steps {
            self.rk4(h);
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    fn acceleration(&self, value: f32, velocity: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        (-stiffness * (value - self.target) - damping * velocity) / mass
    }

    fn rk4(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1_x = v;
        let k1_v = self.acceleration(x, v);

        let k2_x = v + 0.5 * h * k1_v;
        let k2_v = self.acceleration(x + 0.5 * h * k1_x, k2_x);

        let k3_x = v + 0.5 * h * k2_v;
        let k3_v = self.acceleration(x + 0.5 * h * k2_x, k3_x);

        let k4_x = v + h * k3_v;
        let k4_v = self.acceleration(x + h * k3_x, k4_x);

        self.value = x + h / 6.0 * (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x);
        self.velocity = v + h / 6.0 * (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v);
    }
}
