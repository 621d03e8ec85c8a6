/// Mass, stiffness and damping of a damped harmonic oscillator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub mass: f32,
    pub stiffness: f32,
    pub damping: f32,
}

impl SpringConfig {
    /// Tight cursor following. Exactly critically damped: 40 = 2 * sqrt(800 * 0.5).
    pub const CURSOR: Self = Self {
        mass: 0.5,
        stiffness: 800.0,
        damping: 40.0,
    };

    /// Hover ring growth, slightly underdamped
    pub const RING: Self = Self {
        mass: 1.0,
        stiffness: 300.0,
        damping: 25.0,
    };

    /// Press feedback on the cursor
    pub const CLICK: Self = Self {
        mass: 1.0,
        stiffness: 400.0,
        damping: 30.0,
    };

    /// Magnetic pull, bouncy on release
    pub const MAGNETIC: Self = Self {
        mass: 0.5,
        stiffness: 350.0,
        damping: 15.0,
    };

    /// A critically damped spring with the given stiffness and mass.
    pub fn critical(stiffness: f32, mass: f32) -> Self {
        Self {
            mass,
            stiffness,
            damping: 2.0 * (stiffness * mass).sqrt(),
        }
    }

    /// `damping / (2 * sqrt(stiffness * mass))`; 1.0 is critical.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    pub fn is_critically_damped(&self) -> bool {
        (self.damping_ratio() - 1.0).abs() < 1e-3
    }

    fn angular_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::CURSOR
    }
}

/// Largest integration step for non-critical springs.
const SUBSTEP_SECS: f32 = 1.0 / 240.0;

/// Largest frame delta accepted in one step; longer gaps (a backgrounded
/// tab) are treated as this much time.
const MAX_FRAME_SECS: f32 = 0.1;

/// One-dimensional spring chasing a movable target.
#[derive(Clone, Debug)]
pub struct Spring {
    pub position: f32,
    pub velocity: f32,
    pub target: f32,
    config: SpringConfig,
}

impl Spring {
    pub fn new(initial: f32, config: SpringConfig) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target: initial,
            config,
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` with no motion.
    pub fn snap(&mut self, value: f32) {
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Advance the simulation by `dt_secs` and return the new position.
    pub fn step(&mut self, dt_secs: f32) -> f32 {
        let dt = dt_secs.clamp(0.0, MAX_FRAME_SECS);
        if dt < 1e-6 {
            return self.position;
        }

        if self.config.is_critically_damped() {
            self.step_critical(dt);
        } else {
            let mut remaining = dt;
            while remaining > 0.0 {
                let h = remaining.min(SUBSTEP_SECS);
                self.step_euler(h);
                remaining -= h;
            }
        }

        self.position
    }

    /// Closed-form critically damped motion; monotone from rest, so it
    /// cannot overshoot the way an explicit integrator would.
    fn step_critical(&mut self, dt: f32) {
        let omega = self.config.angular_frequency();
        let x0 = self.position - self.target;
        let v0 = self.velocity;
        let c = v0 + omega * x0;
        let decay = (-omega * dt).exp();

        self.position = self.target + (x0 + c * dt) * decay;
        self.velocity = (v0 - omega * c * dt) * decay;
    }

    fn step_euler(&mut self, h: f32) {
        // Spring force: F = -k * x, damping force: F = -c * v
        let displacement = self.position - self.target;
        let force = -self.config.stiffness * displacement - self.config.damping * self.velocity;
        let acceleration = force / self.config.mass;

        // semi-implicit Euler
        self.velocity += acceleration * h;
        self.position += self.velocity * h;
    }

    /// Check if the spring has settled (position near target, velocity near zero)
    pub fn is_settled(&self, threshold: f32) -> bool {
        (self.position - self.target).abs() < threshold && self.velocity.abs() < threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_preset_is_critical() {
        assert!(SpringConfig::CURSOR.is_critically_damped());
        assert!(!SpringConfig::MAGNETIC.is_critically_damped());
        assert!(SpringConfig::critical(300.0, 1.0).is_critically_damped());
    }

    #[test]
    fn test_critical_spring_never_overshoots() {
        let mut spring = Spring::new(0.0, SpringConfig::CURSOR);
        spring.set_target(100.0);

        let mut max_position: f32 = 0.0;
        for _ in 0..120 {
            max_position = max_position.max(spring.step(1.0 / 60.0));
        }

        assert!(max_position <= 100.0, "overshot to {}", max_position);
        assert!((spring.position - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_spring_reaches_target() {
        let mut spring = Spring::new(0.0, SpringConfig::RING);
        spring.set_target(1.0);

        // Simulate spring over 2 seconds with 60fps
        for _ in 0..120 {
            spring.step(1.0 / 60.0);
        }

        assert!(
            (spring.position - 1.0).abs() < 0.01,
            "Spring should settle near target, got {}",
            spring.position
        );
    }

    #[test]
    fn test_underdamped_spring_overshoots() {
        let mut spring = Spring::new(0.0, SpringConfig::MAGNETIC);
        spring.set_target(1.0);

        let mut max_position: f32 = 0.0;
        for _ in 0..120 {
            max_position = max_position.max(spring.step(1.0 / 60.0));
        }

        assert!(
            max_position > 1.0,
            "Magnetic spring should overshoot, max was {}",
            max_position
        );
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut spring = Spring::new(5.0, SpringConfig::CURSOR);
        spring.set_target(10.0);
        assert_eq!(spring.step(0.0), 5.0);
    }
}
