use crate::error::{FloodError, Result};
use glam::IVec2;
use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicU8, Ordering};

/// Axis-aligned neighbor offsets, in the order neighbors are reported: +x, -x, +y, -y
const NEIGHBOR_OFFSETS: [IVec2; 4] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, 1),
    IVec2::new(0, -1),
];

/// A cell coordinate in the grid. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPoint {
    pub x: usize,
    pub y: usize,
}

impl GridPoint {
    pub fn new(x: usize, y: usize) -> Self {
        GridPoint { x, y }
    }

    pub fn to_ivec2(&self) -> IVec2 {
        IVec2::new(self.x as i32, self.y as i32)
    }

    /// Convert back from an `IVec2`, rejecting negative components
    pub fn from_ivec2(v: IVec2) -> Option<Self> {
        if v.x < 0 || v.y < 0 {
            return None;
        }
        Some(GridPoint::new(v.x as usize, v.y as usize))
    }
}

impl From<(usize, usize)> for GridPoint {
    fn from((x, y): (usize, usize)) -> Self {
        GridPoint::new(x, y)
    }
}

/// An adjacent cell together with the color observed there when it was looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub point: GridPoint,
    pub color: u8,
}

/// A fixed-size 2D grid of one-byte color codes.
///
/// Cells are stored row-major as atomics so that exploration tasks can
/// recolor distinct cells concurrently through a shared reference.
/// Relaxed ordering is enough: every hand-off between the coordinator and
/// its workers goes through a channel, which orders the writes.
#[derive(Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Box<[AtomicU8]>,
}

impl Grid {
    /// Create a `width` x `height` grid with every cell set to `fill_color`
    pub fn new(width: usize, height: usize, fill_color: u8) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        let cells = (0..len).map(|_| AtomicU8::new(fill_color)).collect();

        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    /// Build a grid from text rows, one byte per cell. All rows must have the same length.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        Self::checked_len(width, height)?;

        if rows.iter().any(|row| row.len() != width) {
            return Err(FloodError::InvalidDimensions { width, height });
        }

        let cells = rows
            .iter()
            .flat_map(|row| row.bytes())
            .map(AtomicU8::new)
            .collect();

        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    fn checked_len(width: usize, height: usize) -> Result<usize> {
        let invalid = FloodError::InvalidDimensions { width, height };
        // Offsets are computed in i32 space, so each axis has to fit there.
        if width == 0 || height == 0 || width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(invalid);
        }
        width.checked_mul(height).ok_or(invalid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if !self.contains(x, y) {
            return Err(FloodError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    /// Color at (x, y), or `None` when the coordinate is off the grid
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.index(x, y)
            .ok()
            .map(|i| self.cells[i].load(Ordering::Relaxed))
    }

    pub fn color_at(&self, x: usize, y: usize) -> Result<u8> {
        let i = self.index(x, y)?;
        Ok(self.cells[i].load(Ordering::Relaxed))
    }

    pub fn set_color(&mut self, x: usize, y: usize, color: u8) -> Result<()> {
        let i = self.index(x, y)?;
        *self.cells[i].get_mut() = color;
        Ok(())
    }

    /// Write a cell through a shared reference. Only exploration tasks use
    /// this, and the fill coordinator guarantees they never share a cell.
    pub(crate) fn paint(&self, point: GridPoint, color: u8) -> Result<()> {
        let i = self.index(point.x, point.y)?;
        self.cells[i].store(color, Ordering::Relaxed);
        Ok(())
    }

    /// The in-bounds axis-aligned neighbors of (x, y), in +x, -x, +y, -y order
    pub fn neighbors(&self, x: usize, y: usize) -> Result<Vec<Neighbor>> {
        self.index(x, y)?;
        let origin = GridPoint::new(x, y).to_ivec2();

        let neighbors = NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|offset| GridPoint::from_ivec2(origin + *offset))
            .filter(|p| self.contains(p.x, p.y))
            .map(|point| Neighbor {
                point,
                color: self.cells[point.y * self.width + point.x].load(Ordering::Relaxed),
            })
            .collect();

        Ok(neighbors)
    }

    /// Paint the rectangle spanned by `xs` x `ys`, clipped to the grid
    pub fn fill_rect(&mut self, xs: Range<usize>, ys: Range<usize>, color: u8) {
        let xs = xs.start.min(self.width)..xs.end.min(self.width);
        let ys = ys.start.min(self.height)..ys.end.min(self.height);

        for y in ys {
            for x in xs.clone() {
                *self.cells[y * self.width + x].get_mut() = color;
            }
        }
    }

    /// Number of cells holding `color`
    pub fn count(&self, color: u8) -> usize {
        self.cells
            .iter()
            .filter(|c| c.load(Ordering::Relaxed) == color)
            .count()
    }

    /// Copy of the row-major cell storage
    pub fn snapshot(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.load(Ordering::Relaxed)).collect()
    }

    /// One line per row, one character per cell
    pub fn render(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| {
                row.iter()
                    .map(|c| c.load(Ordering::Relaxed) as char)
                    .collect::<String>()
            })
            .collect()
    }

    /// Run a default-configured flood fill from (x, y)
    pub fn fill(&mut self, x: usize, y: usize, color: u8) -> Result<crate::fill::FillStats> {
        crate::fill::fill(self, x, y, color)
    }
}

impl Clone for Grid {
    fn clone(&self) -> Self {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.snapshot().into_iter().map(AtomicU8::new).collect(),
        }
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.snapshot() == other.snapshot()
    }
}

impl Eq for Grid {}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render().join("\n"))
    }
}
