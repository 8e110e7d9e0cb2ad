//! Board of colored cells laid over the canvas

use crate::paint::{Canvas, Color};

/// Gap in pixels left between neighbouring cells
const CELL_GAP: i32 = 2;

/// `cells_x` by `cells_y` palette indices covering a `width` by `height`
/// pixel area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells_x: u32,
    cells_y: u32,
    width: u32,
    height: u32,
    board: Vec<usize>,
}

impl Grid {
    /// Every cell starts at palette index 0
    pub fn new(cells_x: u32, cells_y: u32, width: u32, height: u32) -> Self {
        Self {
            cells_x,
            cells_y,
            width,
            height,
            board: vec![0; (cells_x * cells_y) as usize],
        }
    }

    pub fn starting_x(&self, i: i32) -> i32 {
        (i as i64 * self.width as i64 / self.cells_x.max(1) as i64) as i32 + CELL_GAP
    }

    pub fn starting_y(&self, j: i32) -> i32 {
        (j as i64 * self.height as i64 / self.cells_y.max(1) as i64) as i32 + CELL_GAP
    }

    pub fn ending_x(&self, i: i32) -> i32 {
        self.starting_x(i + 1) - CELL_GAP
    }

    pub fn ending_y(&self, j: i32) -> i32 {
        self.starting_y(j + 1) - CELL_GAP
    }

    /// Column of the cell containing pixel x
    pub fn cell_of_x(&self, x: f64) -> i32 {
        (x * self.cells_x as f64 / self.width.max(1) as f64).floor() as i32
    }

    /// Row of the cell containing pixel y
    pub fn cell_of_y(&self, y: f64) -> i32 {
        (y * self.cells_y as f64 / self.height.max(1) as f64).floor() as i32
    }

    fn index(&self, i: i32, j: i32) -> Option<usize> {
        if i < 0 || j < 0 || i >= self.cells_x as i32 || j >= self.cells_y as i32 {
            return None;
        }
        Some(j as usize * self.cells_x as usize + i as usize)
    }

    /// Palette index of cell (i, j)
    pub fn get(&self, i: i32, j: i32) -> Option<usize> {
        self.index(i, j).map(|idx| self.board[idx])
    }

    /// Store `color` in the cell containing pixel (x, y). Returns true when
    /// the cell held a different index; points outside the grid return false.
    pub fn set_color(&mut self, x: f64, y: f64, color: usize) -> bool {
        let Some(idx) = self.index(self.cell_of_x(x), self.cell_of_y(y)) else {
            return false;
        };
        if self.board[idx] == color {
            return false;
        }
        self.board[idx] = color;
        true
    }

    /// One filled rectangle per cell in its palette color. Indices past the
    /// end of the palette are skipped.
    pub fn draw(&self, palette: &[Color], canvas: &mut Canvas) {
        for j in 0..self.cells_y as i32 {
            for i in 0..self.cells_x as i32 {
                let Some(&color) = self.get(i, j).and_then(|c| palette.get(c)) else {
                    continue;
                };
                canvas.set_selected(color);
                canvas.filled_rectangle(
                    self.starting_x(i),
                    self.starting_y(j),
                    self.ending_x(i),
                    self.ending_y(j),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_geometry() {
        let grid = Grid::new(100, 100, 800, 800);
        assert_eq!(grid.starting_x(0), 2);
        assert_eq!(grid.ending_x(0), 8);
        assert_eq!(grid.starting_y(99), 794);
        assert_eq!(grid.ending_y(99), 800);
        assert_eq!(grid.cell_of_x(7.9), 0);
        assert_eq!(grid.cell_of_x(8.0), 1);
        assert_eq!(grid.cell_of_y(799.5), 99);
        assert_eq!(grid.cell_of_y(-0.1), -1);
    }

    #[test]
    fn test_set_color_reports_changes() {
        let mut grid = Grid::new(10, 10, 100, 100);
        assert!(!grid.set_color(15.0, 25.0, 0));
        assert!(grid.set_color(15.0, 25.0, 3));
        assert!(!grid.set_color(19.0, 29.0, 3));
        assert_eq!(grid.get(1, 2), Some(3));
        assert_eq!(grid.get(2, 1), Some(0));
    }

    #[test]
    fn test_set_color_outside_grid() {
        let mut grid = Grid::new(10, 10, 100, 100);
        assert!(!grid.set_color(100.0, 50.0, 2));
        assert!(!grid.set_color(-1.0, 50.0, 2));
        assert_eq!(grid.get(10, 5), None);
    }

    #[test]
    fn test_draw_cells_with_gaps() {
        let mut grid = Grid::new(2, 2, 10, 10);
        grid.set_color(7.0, 2.0, 1);
        let mut canvas = Canvas::new(11, 11, Color::WHITE);
        grid.draw(&[Color::BLACK, Color::RED], &mut canvas);

        let at = |x, y| canvas.buffer().get(y, x).unwrap();
        // cell (0, 0) spans 2..=5
        assert_eq!(at(2, 2), Color::BLACK);
        assert_eq!(at(5, 5), Color::BLACK);
        assert_eq!(at(6, 6), Color::WHITE);
        assert_eq!(at(1, 3), Color::WHITE);
        // cell (1, 0) spans x 7..=10
        assert_eq!(at(7, 2), Color::RED);
        assert_eq!(at(10, 5), Color::RED);
        assert_eq!(at(7, 7), Color::BLACK);
    }
}
