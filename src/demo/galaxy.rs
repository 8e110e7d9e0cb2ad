//! Asteroids falling toward a sun, leaving fading trails

use std::f64::consts::PI;

use super::particle::DEFAULT_SPEED;
use super::{Particle, Vec2};
use crate::paint::{Canvas, Color};
use crate::util::Rng;

/// Asteroids farther than this from the sun are dropped
pub const ESCAPE_DISTANCE: f64 = 300.0;

pub struct Galaxy {
    sun: Particle,
    asteroids: Vec<Particle>,
    canvas: Canvas,
    fade: f64,
}

impl Galaxy {
    pub fn new(width: u32, height: u32, asteroids: usize, fade: f64, rng: &mut Rng) -> Self {
        let (w, h) = (width as f64, height as f64);
        let sun = Particle::new(Vec2::default(), Vec2::new(w / 2.0, h / 2.0), Color::YELLOW);
        let asteroids = (0..asteroids)
            .map(|_| {
                let speed = Vec2::random_unit(rng) * DEFAULT_SPEED * rng.next_f64();
                let position = Vec2::new(w * rng.next_f64(), h * rng.next_f64());
                let color = Color::from_hue((rng.next_f64() * 360.0) as i32);
                Particle::new(speed, position, color)
            })
            .collect::<Vec<_>>();
        log::debug!("galaxy spawned {} asteroids", asteroids.len());

        Self {
            sun,
            asteroids,
            canvas: Canvas::new(width + 1, height + 1, Color::BLACK),
            fade,
        }
    }

    /// Drop escaped asteroids, then move the rest and pull each one toward
    /// the sun by a unit step
    pub fn heartbeat(&mut self) {
        let sun = self.sun.position;
        let before = self.asteroids.len();
        self.asteroids
            .retain(|p| (p.position - sun).magnitude() <= ESCAPE_DISTANCE);
        if self.asteroids.len() != before {
            log::debug!("{} asteroids escaped", before - self.asteroids.len());
        }

        for p in &mut self.asteroids {
            p.heartbeat();
            let angle = (p.position - sun).angle() + PI;
            p.speed += Vec2::polar(angle, 1.0);
        }
    }

    /// Fade the previous frame, then draw asteroids and the sun on top
    pub fn draw(&mut self) {
        self.canvas.fade(self.fade);
        for p in &self.asteroids {
            p.draw(&mut self.canvas);
        }
        self.sun.draw(&mut self.canvas);
    }

    pub fn sun(&self) -> &Particle {
        &self.sun
    }

    pub fn asteroids(&self) -> &[Particle] {
        &self.asteroids
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }
}
