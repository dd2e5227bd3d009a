use crate::grid::Grid;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::ops::Range;

/// An axis-aligned rectangle of cells painted in one color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rect {
    pub xs: Range<usize>,
    pub ys: Range<usize>,
    pub color: u8,
}

impl Rect {
    pub fn new(xs: Range<usize>, ys: Range<usize>, color: u8) -> Self {
        Rect { xs, ys, color }
    }

    pub fn draw(&self, grid: &mut Grid) {
        grid.fill_rect(self.xs.clone(), self.ys.clone(), self.color);
    }
}

/// Parameters for scattering random rectangles over a canvas
#[derive(Debug, Clone)]
pub struct ScatterParameters {
    /// Number of rectangles to draw
    pub count: usize,
    /// Longest side of a rectangle, as a fraction of the matching grid side
    pub max_side_fraction: f32,
    /// Colors to pick from
    pub palette: Vec<u8>,
    /// RNG seed, so a scatter can be reproduced
    pub seed: u64,
}

impl Default for ScatterParameters {
    fn default() -> Self {
        ScatterParameters {
            count: 0,
            max_side_fraction: 0.25,
            palette: b"#*+o".to_vec(),
            seed: 42,
        }
    }
}

/// The three blocks of the reference demo canvas (100 x 120)
pub fn demo_shapes() -> Vec<Rect> {
    vec![
        Rect::new(1..7, 8..50, b'/'),
        Rect::new(80..90, 80..99, b'-'),
        Rect::new(30..70, 25..65, b'\\'),
    ]
}

/// Generate random rectangles that fit a `width` x `height` grid
pub fn scatter_rects(width: usize, height: usize, params: &ScatterParameters) -> Vec<Rect> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let max_w = ((width as f32 * params.max_side_fraction) as usize).max(1);
    let max_h = ((height as f32 * params.max_side_fraction) as usize).max(1);

    let mut rects = Vec::with_capacity(params.count);
    for _ in 0..params.count {
        let Some(&color) = params.palette.choose(&mut rng) else {
            break;
        };
        let x0 = rng.gen_range(0..width.max(1));
        let y0 = rng.gen_range(0..height.max(1));
        let w = rng.gen_range(1..=max_w);
        let h = rng.gen_range(1..=max_h);
        rects.push(Rect::new(x0..x0 + w, y0..y0 + h, color));
    }

    rects
}

/// Paint every rectangle onto the grid, later ones on top
pub fn draw_all(grid: &mut Grid, rects: &[Rect]) {
    for rect in rects {
        rect.draw(grid);
    }
}
