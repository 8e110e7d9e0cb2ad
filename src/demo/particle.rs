//! Point particles drawn as small plus-shaped sprites

use super::Vec2;
use crate::paint::{Canvas, Color};
use crate::util::Rng;

/// Speed given to freshly spawned particles
pub const DEFAULT_SPEED: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub speed: Vec2,
    pub position: Vec2,
    pub color: Color,
}

impl Particle {
    pub fn new(speed: Vec2, position: Vec2, color: Color) -> Self {
        Self {
            speed,
            position,
            color,
        }
    }

    #[inline]
    pub fn heartbeat(&mut self) {
        self.position += self.speed;
    }

    /// Reflect off the walls of the box `[0, limit]`, mirroring both the
    /// overshoot and the velocity component
    pub fn bound(&mut self, limit: Vec2) {
        if self.position.x < 0.0 {
            self.position.x = -self.position.x;
            self.speed.x = -self.speed.x;
        }
        if self.position.y < 0.0 {
            self.position.y = -self.position.y;
            self.speed.y = -self.speed.y;
        }
        if self.position.x > limit.x {
            self.position.x = limit.x - (self.position.x - limit.x);
            self.speed.x = -self.speed.x;
        }
        if self.position.y > limit.y {
            self.position.y = limit.y - (self.position.y - limit.y);
            self.speed.y = -self.speed.y;
        }
    }

    /// Plus-shaped 5 pixel sprite at half intensity. Leaves the canvas
    /// selected color set to the sprite color.
    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.set_selected(self.color * 0.5);
        let x = self.position.x.round() as i32;
        let y = self.position.y.round() as i32;
        canvas.draw(x, y);
        canvas.draw(x + 1, y);
        canvas.draw(x - 1, y);
        canvas.draw(x, y + 1);
        canvas.draw(x, y - 1);
    }
}

/// Particles confined to the box `[0, limit]`
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSet {
    pub particles: Vec<Particle>,
    pub limit: Vec2,
}

impl ParticleSet {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            particles: Vec::new(),
            limit: Vec2::new(width, height),
        }
    }

    pub fn create_particle(&mut self, speed: Vec2, position: Vec2, color: Color) {
        self.particles.push(Particle::new(speed, position, color));
    }

    /// Spawn a particle at (x, y) heading in a random direction
    pub fn create_random_particle_at(&mut self, x: f64, y: f64, color: Color, rng: &mut Rng) {
        let speed = Vec2::random_unit(rng) * DEFAULT_SPEED;
        self.create_particle(speed, Vec2::new(x, y), color);
    }

    pub fn heartbeat(&mut self) {
        let limit = self.limit;
        for p in &mut self.particles {
            p.heartbeat();
            p.bound(limit);
        }
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        for p in &self.particles {
            p.draw(canvas);
        }
    }

    /// Every existing particle spawns a sibling at its position with a fresh
    /// random direction
    pub fn split_particles(&mut self, rng: &mut Rng) {
        let count = self.particles.len();
        for i in 0..count {
            let Particle {
                position, color, ..
            } = self.particles[i];
            let speed = Vec2::random_unit(rng) * DEFAULT_SPEED;
            self.create_particle(speed, position, color);
        }
        log::debug!("split {} particles into {}", count, self.particles.len());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }
}
