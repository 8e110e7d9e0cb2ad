//! Particles bouncing through a grid, recoloring the cells they hit

use super::{Grid, ParticleSet, Vec2};
use crate::paint::{Canvas, Color};
use crate::util::Rng;

pub const PALETTE: [Color; 5] = [Color::BLACK, Color::RED, Color::BLUE, Color::GREEN, Color::YELLOW];

pub struct Board {
    palette: [Color; 5],
    grid: Grid,
    particles: ParticleSet,
    canvas: Canvas,
    rng: Rng,
}

impl Board {
    /// Board over a `width` by `height` area split into `cells` per side.
    /// The canvas is one pixel larger so the far edge is drawable.
    pub fn new(width: u32, height: u32, cells: u32, mut rng: Rng) -> Self {
        let mut particles = ParticleSet::new(width as f64, height as f64);
        for &color in PALETTE[1..].iter().rev() {
            let x = width as f64 * rng.next_f64();
            let y = height as f64 * rng.next_f64();
            particles.create_random_particle_at(x, y, color, &mut rng);
        }

        Self {
            palette: PALETTE,
            grid: Grid::new(cells, cells, width, height),
            particles,
            canvas: Canvas::new(width + 1, height + 1, Color::WHITE),
            rng,
        }
    }

    /// Palette slot of `color`, or one past the end when it has none
    fn color_index(&self, color: Color) -> usize {
        self.palette
            .iter()
            .position(|&c| c == color)
            .unwrap_or(self.palette.len())
    }

    /// Advance the particles one step. A particle that recolors a cell
    /// bounces back along each axis on which it just crossed into that cell.
    pub fn heartbeat(&mut self) {
        self.particles.heartbeat();

        let indices: Vec<usize> = self
            .particles
            .iter()
            .map(|p| self.color_index(p.color))
            .collect();
        for (p, index) in self.particles.particles.iter_mut().zip(indices) {
            if !self.grid.set_color(p.position.x, p.position.y, index) {
                continue;
            }
            let prev: Vec2 = p.position - p.speed;
            if self.grid.cell_of_x(prev.x) != self.grid.cell_of_x(p.position.x) {
                p.speed.x = -p.speed.x;
            }
            if self.grid.cell_of_y(prev.y) != self.grid.cell_of_y(p.position.y) {
                p.speed.y = -p.speed.y;
            }
        }
    }

    pub fn render(&mut self) {
        self.canvas.reset(Color::WHITE);
        self.grid.draw(&self.palette, &mut self.canvas);
        self.particles.draw(&mut self.canvas);
    }

    /// Double the particle count
    pub fn split(&mut self) {
        self.particles.split_particles(&mut self.rng);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = Board::new(80, 60, 8, Rng::new(9));
        assert_eq!(board.canvas().width(), 81);
        assert_eq!(board.canvas().height(), 61);
        assert_eq!(board.particles().len(), 4);
        let colors: Vec<Color> = board.particles().iter().map(|p| p.color).collect();
        assert_eq!(colors, vec![Color::YELLOW, Color::GREEN, Color::BLUE, Color::RED]);
        assert!(board
            .particles()
            .iter()
            .all(|p| p.position.x < 80.0 && p.position.y < 60.0));
    }

    #[test]
    fn test_color_index() {
        let board = Board::new(10, 10, 1, Rng::new(1));
        assert_eq!(board.color_index(Color::BLACK), 0);
        assert_eq!(board.color_index(Color::YELLOW), 4);
        assert_eq!(board.color_index(Color::WHITE), 5);
    }

    #[test]
    fn test_heartbeat_colors_cells() {
        let mut board = Board::new(100, 100, 10, Rng::new(21));
        for _ in 0..50 {
            board.heartbeat();
        }
        let colored = (0..10)
            .flat_map(|i| (0..10).map(move |j| (i, j)))
            .filter(|&(i, j)| board.grid().get(i, j) != Some(0))
            .count();
        assert!(colored > 0);
        assert!(board
            .particles()
            .iter()
            .all(|p| (0.0..=100.0).contains(&p.position.x) && (0.0..=100.0).contains(&p.position.y)));
    }

    #[test]
    fn test_bounce_on_recolor() {
        let mut board = Board::new(100, 100, 10, Rng::new(2));
        board.particles.particles.truncate(1);
        let p = &mut board.particles.particles[0];
        p.position = Vec2::new(18.0, 55.0);
        p.speed = Vec2::new(3.0, 0.0);
        board.heartbeat();
        // crossed from cell 1 into cell 2 and painted it, so x reverses
        let p = &board.particles().particles[0];
        assert_eq!(p.position, Vec2::new(21.0, 55.0));
        assert_eq!(p.speed, Vec2::new(-3.0, 0.0));
        assert_eq!(board.grid().get(2, 5), Some(4));
    }

    #[test]
    fn test_render_and_split() {
        let mut board = Board::new(20, 20, 2, Rng::new(4));
        board.render();
        // cell interiors start black, gaps stay white
        let pixels = board.canvas().buffer().pixels();
        assert!(pixels.iter().filter(|&&c| c == Color::BLACK).count() > 100);
        assert!(pixels.iter().filter(|&&c| c == Color::WHITE).count() > 40);
        board.split();
        assert_eq!(board.particles().len(), 8);
    }
}
