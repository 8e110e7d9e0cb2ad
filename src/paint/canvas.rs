//! Drawing surface and scan-conversion primitives
//!
//! Primitives address pixels as (x = column, y = row). Every shape is built
//! from single-pixel actions, so each one has a `*_with` form taking the
//! action as a closure: `Canvas::draw` paints `selected`, `Canvas::erase`
//! paints `background`, and callers can pass anything with the same shape.
//! Pixels that land outside the buffer are dropped silently.

use std::f64::consts::PI;
use std::path::Path;

use super::{Color, PixelBuffer};
use crate::config::CanvasConfig;
use crate::error::Result;

pub const DEFAULT_ERASER_SIZE: i32 = 10;

/// Segments used to approximate `heart`
const HEART_STEPS: u32 = 100;
/// Segments used to approximate `spline_curve`
const SPLINE_STEPS: u32 = 45;

/// Inclusive pixel ranges a line may touch, as (min, max) per axis
#[derive(Debug, Clone, Copy)]
struct ClipWindow {
    x: (i64, i64),
    y: (i64, i64),
}

/// Order two (driver, minor) points by driver coordinate
fn ordered(a: (i64, i64), b: (i64, i64)) -> ((i64, i64), (i64, i64)) {
    if a.0 > b.0 {
        (b, a)
    } else {
        (a, b)
    }
}

/// A pixel buffer plus the drawing state the primitives consult
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    buffer: PixelBuffer,
    selected: Color,
    background: Color,
    eraser_size: i32,
}

impl Canvas {
    /// New canvas filled with `fill`; draws blue and erases to white
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self::from_buffer(PixelBuffer::new(width, height, fill))
    }

    /// Wrap an existing buffer
    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            buffer,
            selected: Color::BLUE,
            background: Color::WHITE,
            eraser_size: DEFAULT_ERASER_SIZE,
        }
    }

    pub fn from_config(config: &CanvasConfig) -> Self {
        Self {
            buffer: PixelBuffer::new(config.width, config.height, config.fill),
            selected: config.selected,
            background: config.background,
            eraser_size: config.eraser_size.max(0),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    pub fn selected(&self) -> Color {
        self.selected
    }

    pub fn set_selected(&mut self, color: Color) {
        self.selected = color;
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn eraser_size(&self) -> i32 {
        self.eraser_size
    }

    pub fn set_eraser_size(&mut self, size: i32) {
        self.eraser_size = size.max(0);
    }

    /// Paint every pixel with `color`
    pub fn reset(&mut self, color: Color) {
        self.buffer.reset(color);
    }

    pub fn fade(&mut self, factor: f64) {
        self.buffer.fade(factor);
    }

    // ========================================================================
    // Pixel Actions
    // ========================================================================

    /// Paint (x, y) with the selected color
    #[inline]
    pub fn draw(&mut self, x: i32, y: i32) {
        let _ = self.buffer.set(y, x, self.selected);
    }

    /// Paint (x, y) with the background color
    #[inline]
    pub fn single_erase(&mut self, x: i32, y: i32) {
        let _ = self.buffer.set(y, x, self.background);
    }

    /// Paint the square of half-width `eraser_size` around (x, y) with the
    /// background color
    pub fn erase(&mut self, x: i32, y: i32) {
        let s = self.eraser_size.max(0) as i64;
        let (x, y) = (x as i64, y as i64);
        // only the part of the square that overlaps the buffer
        let left = (x - s).max(0);
        let right = (x + s).min(self.width() as i64 - 1);
        let top = (y - s).max(0);
        let bottom = (y + s).min(self.height() as i64 - 1);
        for row in top..=bottom {
            for col in left..=right {
                self.single_erase(col as i32, row as i32);
            }
        }
    }

    // ========================================================================
    // Lines and Rectangles
    // ========================================================================

    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.line_with(x1, y1, x2, y2, Self::draw);
    }

    /// Bresenham line from (x1, y1) to (x2, y2). Every pixel on the line,
    /// both endpoints included, is passed to `action` exactly once.
    ///
    /// Pixels more than `eraser_size` outside the buffer are skipped, since
    /// neither `draw` nor `erase` can reach the buffer from there. The walk
    /// starts at the first pixel inside that window, so far off-canvas
    /// segments cost nothing.
    pub fn line_with<F>(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mut action: F)
    where
        F: FnMut(&mut Self, i32, i32),
    {
        let (x1, y1, x2, y2) = (x1 as i64, y1 as i64, x2 as i64, y2 as i64);
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let window = self.clip_window();

        if dx >= dy {
            // x drives; covers horizontal and 45 degree lines too
            let ((d1, m1), (d2, m2)) = ordered((x1, y1), (x2, y2));
            self.walk(d1, m1, d2, m2, true, window, &mut |c: &mut Self, d: i32, m: i32| {
                action(c, d, m)
            });
        } else {
            let ((d1, m1), (d2, m2)) = ordered((y1, x1), (y2, x2));
            self.walk(d1, m1, d2, m2, false, window, &mut |c: &mut Self, d: i32, m: i32| {
                action(c, m, d)
            });
        }
    }

    /// Inclusive (min, max) bounds on x and y outside which `line_with`
    /// skips pixels
    fn clip_window(&self) -> ClipWindow {
        let margin = self.eraser_size.max(0) as i64;
        ClipWindow {
            x: (-margin, self.width() as i64 - 1 + margin),
            y: (-margin, self.height() as i64 - 1 + margin),
        }
    }

    /// Incremental Bresenham along a driver axis `d` (one pixel per step,
    /// `d1 <= d2`) with minor axis `m`. The minor axis advances when the
    /// error term is `>= 0` for x-driven lines and `> 0` for y-driven ones.
    /// `action` receives (driver, minor).
    fn walk<F>(
        &mut self,
        d1: i64,
        m1: i64,
        d2: i64,
        m2: i64,
        x_drives: bool,
        window: ClipWindow,
        action: &mut F,
    ) where
        F: FnMut(&mut Self, i32, i32),
    {
        let (d_range, m_range) = if x_drives {
            (window.x, window.y)
        } else {
            (window.y, window.x)
        };
        let dd = d2 - d1;
        let dm = (m2 - m1).abs();
        let step = if m1 < m2 { 1 } else { -1 };

        let first = (d_range.0 - d1).max(0);
        let last = (d_range.1 - d1).min(dd);
        if first > last {
            return;
        }
        if dd == 0 {
            if (m_range.0..=m_range.1).contains(&m1) {
                action(self, d1 as i32, m1 as i32);
            }
            return;
        }

        // Error state after `first` steps, in closed form. i128 because
        // 2 * dm * first can exceed i64 for lines spanning the i32 range.
        let (dd_w, dm_w, n_w) = (dd as i128, dm as i128, first as i128);
        let bias = if x_drives { dd_w } else { dd_w - 1 };
        let mut k = ((2 * dm_w * n_w + bias) / (2 * dd_w)) as i64;
        let mut p = (2 * dm_w * (n_w + 1) - dd_w - 2 * dd_w * k as i128) as i64;

        for n in first..=last {
            let m = m1 + step * k;
            if (step > 0 && m > m_range.1) || (step < 0 && m < m_range.0) {
                // the minor axis only moves away from the window from here
                break;
            }
            if (m_range.0..=m_range.1).contains(&m) {
                action(self, (d1 + n) as i32, m as i32);
            }
            let advance = if x_drives { p >= 0 } else { p > 0 };
            if advance {
                k += 1;
                p += 2 * dm - 2 * dd;
            } else {
                p += 2 * dm;
            }
        }
    }

    pub fn rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.rectangle_with(x1, y1, x2, y2, Self::draw);
    }

    /// Outline of the axis-aligned rectangle with corners (x1, y1), (x2, y2)
    pub fn rectangle_with<F>(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mut action: F)
    where
        F: FnMut(&mut Self, i32, i32),
    {
        self.line_with(x1, y1, x1, y2, &mut action);
        self.line_with(x1, y1, x2, y1, &mut action);
        self.line_with(x1, y2, x2, y2, &mut action);
        self.line_with(x2, y1, x2, y2, &mut action);
    }

    pub fn filled_rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.filled_rectangle_with(x1, y1, x2, y2, Self::draw);
    }

    /// Solid rectangle, one vertical line per column
    pub fn filled_rectangle_with<F>(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mut action: F)
    where
        F: FnMut(&mut Self, i32, i32),
    {
        let (left, right) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        for x in left..=right {
            self.line_with(x, y1, x, y2, &mut action);
        }
    }

    // ========================================================================
    // Flood Fill
    // ========================================================================

    /// 4-connected flood fill with the selected color, seeded at (x, y).
    /// Returns how many pixels were recolored.
    pub fn fill(&mut self, x: i32, y: i32) -> usize {
        let Ok(target) = self.buffer.get(y, x) else {
            return 0;
        };
        if target == self.selected {
            return 0;
        }

        // Recolor on push so nothing is queued twice
        self.draw(x, y);
        let mut painted = 1;
        let mut stack = vec![(x, y)];
        while let Some((cx, cy)) = stack.pop() {
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let (nx, ny) = (cx + dx, cy + dy);
                if matches!(self.buffer.get(ny, nx), Ok(c) if c == target) {
                    self.draw(nx, ny);
                    painted += 1;
                    stack.push((nx, ny));
                }
            }
        }

        log::debug!("flood fill at ({}, {}) recolored {} pixels", x, y, painted);
        painted
    }

    // ========================================================================
    // Conics
    // ========================================================================

    pub fn circle(&mut self, h: i32, k: i32, r: i32) {
        self.circle_with(h, k, r, Self::draw);
    }

    /// Midpoint circle centred on (h, k)
    pub fn circle_with<F>(&mut self, h: i32, k: i32, r: i32, mut action: F)
    where
        F: FnMut(&mut Self, i32, i32),
    {
        let mut x = 0;
        let mut y = r;
        let mut p = 1 - r;

        self.circle_points(h, k, x, y, &mut action);
        while x < y {
            x += 1;
            if p < 0 {
                p += 2 * x + 1;
            } else {
                y -= 1;
                p += 2 * (x - y) + 1;
            }
            self.circle_points(h, k, x, y, &mut action);
        }
    }

    fn circle_points<F>(&mut self, h: i32, k: i32, x: i32, y: i32, action: &mut F)
    where
        F: FnMut(&mut Self, i32, i32),
    {
        action(self, h + x, k + y);
        action(self, h - x, k + y);
        action(self, h + x, k - y);
        action(self, h - x, k - y);
        action(self, h + y, k + x);
        action(self, h - y, k + x);
        action(self, h + y, k - x);
        action(self, h - y, k - x);
    }

    pub fn ellipse(&mut self, h: i32, k: i32, a: i32, b: i32) {
        self.ellipse_with(h, k, a, b, Self::draw);
    }

    /// Midpoint ellipse centred on (h, k) with semi-axes `a` (x) and `b` (y)
    pub fn ellipse_with<F>(&mut self, h: i32, k: i32, a: i32, b: i32, mut action: F)
    where
        F: FnMut(&mut Self, i32, i32),
    {
        let (a, b) = (a.abs(), b.abs());
        if a == 0 || b == 0 {
            // degenerate ellipse is a segment along the other axis
            self.line_with(h - a, k - b, h + a, k + b, action);
            return;
        }

        let a2 = a as f64 * a as f64;
        let b2 = b as f64 * b as f64;
        let mut x = 0;
        let mut y = b;

        let mut plot = |canvas: &mut Self, x: i32, y: i32| {
            action(canvas, h + x, k + y);
            action(canvas, h - x, k + y);
            action(canvas, h + x, k - y);
            action(canvas, h - x, k - y);
        };

        // Region 1: |slope| < 1, step x
        let mut p = b2 - a2 * b as f64 + 0.25 * a2;
        plot(self, x, y);
        while b2 * (x as f64) < a2 * (y as f64) {
            x += 1;
            if p < 0.0 {
                p += 2.0 * b2 * x as f64 + b2;
            } else {
                y -= 1;
                p += 2.0 * b2 * x as f64 - 2.0 * a2 * y as f64 + b2;
            }
            plot(self, x, y);
        }

        // Region 2: |slope| >= 1, step y
        let xf = x as f64 + 0.5;
        let yf = (y - 1) as f64;
        p = b2 * xf * xf + a2 * yf * yf - a2 * b2;
        while y > 0 {
            y -= 1;
            if p > 0.0 {
                p += a2 - 2.0 * a2 * y as f64;
            } else {
                x += 1;
                p += 2.0 * b2 * x as f64 - 2.0 * a2 * y as f64 + a2;
            }
            plot(self, x, y);
        }
    }

    // ========================================================================
    // Polygons and Curves
    // ========================================================================

    pub fn polygon(&mut self, x: i32, y: i32, r: i32, angle: f64, sides: u32) {
        self.polygon_with(x, y, r, angle, sides, Self::draw);
    }

    /// Regular polygon inscribed in the circle of radius `r` around (x, y);
    /// the first vertex sits at `angle` radians
    pub fn polygon_with<F>(&mut self, x: i32, y: i32, r: i32, angle: f64, sides: u32, mut action: F)
    where
        F: FnMut(&mut Self, i32, i32),
    {
        if sides == 0 {
            return;
        }
        let r = r as f64;
        let vertex = |i: u32| {
            let theta = i as f64 * (2.0 * PI / sides as f64) + angle;
            ((r * theta.cos()).floor() as i32, (r * theta.sin()).floor() as i32)
        };

        let (mut h, mut k) = vertex(0);
        for i in 1..=sides {
            let (p, q) = vertex(i);
            self.line_with(h + x, k + y, p + x, q + y, &mut action);
            h = p;
            k = q;
        }
    }

    pub fn star(&mut self, x: i32, y: i32, r: i32, angle: f64, points: u32, inner_ratio: f64) {
        self.star_with(x, y, r, angle, points, inner_ratio, Self::draw);
    }

    /// Star with `points` outer vertices at radius `r` and inner vertices at
    /// `r * inner_ratio` halfway between them (0.5 gives the classic shape)
    pub fn star_with<F>(
        &mut self,
        x: i32,
        y: i32,
        r: i32,
        angle: f64,
        points: u32,
        inner_ratio: f64,
        mut action: F,
    ) where
        F: FnMut(&mut Self, i32, i32),
    {
        if points == 0 {
            return;
        }
        let r = r as f64;
        let n = points as f64;
        let inner = |step: f64| {
            let theta = step * PI / n + angle;
            (
                (r * theta.cos() * inner_ratio).round() as i32,
                (r * theta.sin() * inner_ratio).round() as i32,
            )
        };

        let (mut s, mut t) = inner(1.0);
        for i in 1..=points {
            let theta = i as f64 * (2.0 * PI / n) + angle;
            let p = (r * theta.cos()).round() as i32;
            let q = (r * theta.sin()).round() as i32;
            self.line_with(s + x, t + y, p + x, q + y, &mut action);
            (s, t) = inner(2.0 * i as f64 + 1.0);
            self.line_with(s + x, t + y, p + x, q + y, &mut action);
        }
    }

    pub fn heart(&mut self, x: i32, y: i32, a: i32, b: i32) {
        self.heart_with(x, y, a, b, Self::draw);
    }

    /// Heart curve of half-width `a` and height `b` with its origin at (x, y),
    /// as a polyline through evenly spaced samples
    pub fn heart_with<F>(&mut self, x: i32, y: i32, a: i32, b: i32, mut action: F)
    where
        F: FnMut(&mut Self, i32, i32),
    {
        let sample = |t: f64| {
            let px = (a as f64 * t.sin().powi(3)).round() as i32;
            let lobes = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
            let py = (((lobes + 2.5) / 29.0 + 0.5) * b as f64).round() as i32;
            (px, py)
        };

        let (mut h, mut k) = sample(0.0);
        for i in 1..=HEART_STEPS {
            let t = i as f64 * 2.0 * PI / HEART_STEPS as f64;
            let (p, q) = sample(t);
            self.line_with(x + h, y + k, x + p, y + q, &mut action);
            h = p;
            k = q;
        }
    }

    pub fn spline_curve(&mut self, p1: (f64, f64), p2: (f64, f64), p3: (f64, f64), p4: (f64, f64)) {
        self.spline_curve_with(p1, p2, p3, p4, Self::draw);
    }

    /// Cubic Bezier from `p1` to `p2` pulled toward control points `p3`
    /// (near `p1`) and `p4` (near `p2`)
    pub fn spline_curve_with<F>(
        &mut self,
        p1: (f64, f64),
        p2: (f64, f64),
        p3: (f64, f64),
        p4: (f64, f64),
        mut action: F,
    ) where
        F: FnMut(&mut Self, i32, i32),
    {
        let bezier = |t: f64, a: f64, b: f64, c1: f64, c2: f64| {
            let u = 1.0 - t;
            u * u * u * a + 3.0 * t * u * u * c1 + 3.0 * t * t * u * c2 + t * t * t * b
        };

        let mut p = p1.0.round() as i32;
        let mut q = p1.1.round() as i32;
        for i in 0..=SPLINE_STEPS {
            let t = i as f64 / SPLINE_STEPS as f64;
            let x = bezier(t, p1.0, p2.0, p3.0, p4.0).round() as i32;
            let y = bezier(t, p1.1, p2.1, p3.1, p4.1).round() as i32;
            self.line_with(p, q, x, y, &mut action);
            p = x;
            q = y;
        }
    }

    // ========================================================================
    // Files
    // ========================================================================

    pub fn save_bmp(&self, path: impl AsRef<Path>) -> Result<()> {
        self.buffer.save_bmp(path)
    }

    /// Paste a bitmap file onto the canvas at the origin. The canvas keeps
    /// its size; parts of the image outside it are dropped.
    pub fn load_bmp(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let image = PixelBuffer::load_bmp(path)?;
        self.buffer.composite_at(&image, 0, 0);
        Ok(())
    }
}
