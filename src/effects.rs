//! Confetti particle system
//!
//! Fire-and-forget celebration for perfect placements. Purely visual: the
//! simulation emits a [`ConfettiSpec`] event and never hears back.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::ConfettiSpec;

/// Maximum live particles; bursts past the cap are truncated
pub const MAX_PARTICLES: usize = 256;

/// Downward pull per frame
const GRAVITY: f32 = 0.12;
/// Velocity damping per frame
const DRAG: f32 = 0.98;
/// Life drained per frame (1.0 -> 0 in ~60 frames)
const LIFE_DECAY: f32 = 0.016;

/// A single confetti particle
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// Position in viewport units
    pub pos: Vec2,
    /// Velocity in viewport units per frame
    pub vel: Vec2,
    pub color: &'static str,
    /// 1.0 at spawn, fades to 0
    pub life: f32,
    pub size: f32,
}

/// Owns and animates the live particles
pub struct ConfettiSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
}

impl ConfettiSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Spawn one burst, sampling count and spread from the spec's ranges
    ///
    /// Particles fan upward around the vertical through the spread angle,
    /// starting at the spec's origin (viewport fractions).
    pub fn burst(&mut self, spec: &ConfettiSpec, viewport: Vec2) {
        let count = self.rng.random_range(spec.particle_count.0..spec.particle_count.1);
        let spread = self
            .rng
            .random_range(spec.spread_degrees.0..spec.spread_degrees.1)
            .to_radians();
        let origin = spec.origin * viewport;

        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let theta = -std::f32::consts::FRAC_PI_2
                + self.rng.random_range(-0.5f32..0.5) * spread;
            let speed = self.rng.random_range(2.0f32..6.0);
            let color = spec.palette[self.rng.random_range(0..spec.palette.len())];

            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(theta.cos(), theta.sin()) * speed,
                color,
                life: 1.0,
                size: self.rng.random_range(3.0f32..6.0),
            });
        }
    }

    /// Advance all particles one frame and drop the expired ones
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += GRAVITY;
            p.vel *= DRAG;
            p.life -= LIFE_DECAY;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PALETTE;

    fn spec() -> ConfettiSpec {
        ConfettiSpec {
            particle_count: (40, 60),
            spread_degrees: (90.0, 120.0),
            origin: Vec2::new(0.5, 0.8),
            palette: &PALETTE,
        }
    }

    #[test]
    fn test_burst_count_within_range() {
        let mut system = ConfettiSystem::new(1);
        system.burst(&spec(), Vec2::new(360.0, 540.0));

        let n = system.particles().len();
        assert!((40..60).contains(&n), "burst spawned {n}");
    }

    #[test]
    fn test_burst_starts_at_origin() {
        let mut system = ConfettiSystem::new(1);
        system.burst(&spec(), Vec2::new(360.0, 540.0));

        for p in system.particles() {
            assert_eq!(p.pos, Vec2::new(180.0, 432.0));
            assert!(PALETTE.contains(&p.color));
        }
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut system = ConfettiSystem::new(1);
        for _ in 0..10 {
            system.burst(&spec(), Vec2::new(360.0, 540.0));
        }
        assert_eq!(system.particles().len(), MAX_PARTICLES);
    }

    #[test]
    fn test_step_expires_particles() {
        let mut system = ConfettiSystem::new(1);
        system.burst(&spec(), Vec2::new(360.0, 540.0));

        // One full life's worth of frames clears the burst
        for _ in 0..100 {
            system.step();
        }
        assert!(system.is_empty());
    }

    #[test]
    fn test_step_applies_gravity() {
        let mut system = ConfettiSystem::new(1);
        system.burst(&spec(), Vec2::new(360.0, 540.0));

        let before: Vec<f32> = system.particles().iter().map(|p| p.vel.y).collect();
        system.step();
        for (p, vy) in system.particles().iter().zip(before) {
            assert!(p.vel.y > vy * DRAG - 1e-6);
        }
    }
}
