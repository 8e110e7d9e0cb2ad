//! Animated scenes built on the raster core
//!
//! Each scene owns its canvas and advances one step per `heartbeat`.

mod board;
mod galaxy;
mod grid;
mod particle;
mod vector;

pub use board::{Board, PALETTE};
pub use galaxy::{Galaxy, ESCAPE_DISTANCE};
pub use grid::Grid;
pub use particle::{Particle, ParticleSet, DEFAULT_SPEED};
pub use vector::Vec2;

use crate::config::{Config, DemoMode};
use crate::paint::{Canvas, PixelBuffer};
use crate::util::Rng;

/// The scene the binary is currently animating
pub enum Scene {
    Board(Board),
    Galaxy(Galaxy),
}

impl Scene {
    /// Build the configured scene. The drawable area is one pixel smaller
    /// than the configured canvas on each axis.
    pub fn from_config(config: &Config) -> Self {
        let width = config.canvas.width.saturating_sub(1);
        let height = config.canvas.height.saturating_sub(1);
        let mut rng = if config.demo.seed == 0 {
            Rng::from_time()
        } else {
            Rng::new(config.demo.seed)
        };

        match config.demo.mode {
            DemoMode::Board => Scene::Board(Board::new(width, height, config.demo.grid_cells, rng)),
            DemoMode::Galaxy => Scene::Galaxy(Galaxy::new(
                width,
                height,
                config.demo.asteroids,
                config.demo.fade,
                &mut rng,
            )),
        }
    }

    /// Advance one step and redraw the canvas
    pub fn heartbeat(&mut self) {
        match self {
            Scene::Board(board) => {
                board.heartbeat();
                board.render();
            },
            Scene::Galaxy(galaxy) => {
                galaxy.heartbeat();
                galaxy.draw();
            },
        }
    }

    /// Mouse click at canvas position (x, y)
    pub fn click(&mut self, x: i32, y: i32) {
        match self {
            Scene::Board(board) => {
                board.split();
                log::debug!("click at ({}, {}): {} particles", x, y, board.particles().len());
            },
            Scene::Galaxy(_) => {},
        }
    }

    pub fn canvas(&self) -> &Canvas {
        match self {
            Scene::Board(board) => board.canvas(),
            Scene::Galaxy(galaxy) => galaxy.canvas(),
        }
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        match self {
            Scene::Board(board) => board.canvas_mut(),
            Scene::Galaxy(galaxy) => galaxy.canvas_mut(),
        }
    }
}

/// Filter applied to the canvas on its way to the screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostFilter {
    #[default]
    None,
    Gaussian,
    Blur,
    Sharpen,
    Laplace,
    Edges,
    Grayscale,
    Erode,
    Dilate,
}

impl PostFilter {
    pub const ALL: [PostFilter; 9] = [
        PostFilter::None,
        PostFilter::Gaussian,
        PostFilter::Blur,
        PostFilter::Sharpen,
        PostFilter::Laplace,
        PostFilter::Edges,
        PostFilter::Grayscale,
        PostFilter::Erode,
        PostFilter::Dilate,
    ];

    /// Next filter in the cycle, wrapping back to `None`
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            PostFilter::None => "none",
            PostFilter::Gaussian => "gaussian",
            PostFilter::Blur => "blur",
            PostFilter::Sharpen => "sharpen",
            PostFilter::Laplace => "laplace",
            PostFilter::Edges => "edges",
            PostFilter::Grayscale => "grayscale",
            PostFilter::Erode => "erode",
            PostFilter::Dilate => "dilate",
        }
    }

    pub fn apply(self, buffer: &PixelBuffer) -> PixelBuffer {
        match self {
            PostFilter::None => buffer.clone(),
            PostFilter::Gaussian => buffer.gaussian_filter(),
            PostFilter::Blur => buffer.blur_filter(),
            PostFilter::Sharpen => buffer.sharpen_filter(),
            PostFilter::Laplace => buffer.laplace(),
            PostFilter::Edges => buffer.derivative(),
            PostFilter::Grayscale => buffer.grayscale(),
            PostFilter::Erode => buffer.erode(),
            PostFilter::Dilate => buffer.dilate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    fn small_config(mode: DemoMode) -> Config {
        let mut config = Config::default();
        config.canvas.width = 41;
        config.canvas.height = 31;
        config.demo.mode = mode;
        config.demo.grid_cells = 4;
        config.demo.asteroids = 10;
        config
    }

    #[test]
    fn test_scene_from_config() {
        let board = Scene::from_config(&small_config(DemoMode::Board));
        assert!(matches!(board, Scene::Board(_)));
        assert_eq!((board.canvas().width(), board.canvas().height()), (41, 31));

        let galaxy = Scene::from_config(&small_config(DemoMode::Galaxy));
        match &galaxy {
            Scene::Galaxy(g) => assert_eq!(g.asteroids().len(), 10),
            Scene::Board(_) => panic!("expected galaxy"),
        }
    }

    #[test]
    fn test_board_click_splits() {
        let mut scene = Scene::from_config(&small_config(DemoMode::Board));
        scene.click(5, 5);
        match &scene {
            Scene::Board(b) => assert_eq!(b.particles().len(), 8),
            Scene::Galaxy(_) => panic!("expected board"),
        }
    }

    #[test]
    fn test_same_seed_same_frames() {
        let config = small_config(DemoMode::Galaxy);
        let mut a = Scene::from_config(&config);
        let mut b = Scene::from_config(&config);
        for _ in 0..10 {
            a.heartbeat();
            b.heartbeat();
        }
        assert_eq!(a.canvas(), b.canvas());
    }

    #[test]
    fn test_filter_cycle_wraps() {
        let mut f = PostFilter::None;
        for _ in 0..PostFilter::ALL.len() {
            f = f.next();
        }
        assert_eq!(f, PostFilter::None);
        assert_eq!(PostFilter::Laplace.next(), PostFilter::Edges);
    }

    #[test]
    fn test_filters_keep_size() {
        let mut canvas = Canvas::new(6, 4, Color::WHITE);
        canvas.set_selected(Color::RED);
        canvas.line(0, 0, 5, 3);
        for f in PostFilter::ALL {
            let out = f.apply(canvas.buffer());
            assert_eq!((out.width(), out.height()), (6, 4), "{}", f.name());
        }
        assert_eq!(PostFilter::None.apply(canvas.buffer()), *canvas.buffer());
    }
}
