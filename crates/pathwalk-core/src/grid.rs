//! The tile grid that walkers carve into.
//!
//! [`Grid`] is the single authority over cell state during a run: walkers
//! and the finalizer change cells only through its operations, which keep
//! the floor counter in step and report each change to a [`Sink`].
//!
//! Unlike a free-form cell buffer, an empty cell is `None` and a non-empty
//! cell is a tagged [`Tile`], so "is this a floor?" is a plain match.

use crate::error::{Error, Result};
use crate::geom::{Point, Range, Vec2};
use crate::sink::Sink;
use crate::tile::{Collectible, Tile, TileKind};

/// Row-major offset of an in-bounds cell, computed in `usize`.
#[inline]
fn cell_index(width: i32, p: Point) -> usize {
    p.y as usize * width as usize + p.x as usize
}

/// A `width x height` grid of optional [`Tile`]s plus the floor counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Option<Tile>>,
    bounds: Range,
    scale: f64,
    floor_count: usize,
}

impl Grid {
    /// Create an all-empty grid. `scale` is the world size of one cell.
    pub fn new(width: i32, height: i32, scale: f64) -> Result<Self> {
        let mut grid = Self {
            cells: Vec::new(),
            bounds: Range::default(),
            scale,
            floor_count: 0,
        };
        grid.reset(width, height)?;
        Ok(grid)
    }

    /// Discard every tile and resize. The floor count goes back to zero.
    pub fn reset(&mut self, width: i32, height: i32) -> Result<()> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidSize { width, height });
        }
        self.cells.clear();
        self.cells.resize((width as usize) * (height as usize), None);
        self.bounds = Range::new(0, 0, width, height);
        self.floor_count = 0;
        Ok(())
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if self.bounds.contains(p) {
            Some(cell_index(self.bounds.width(), p))
        } else {
            None
        }
    }

    fn checked_index(&self, p: Point) -> Result<usize> {
        self.index(p).ok_or(Error::OutOfBounds {
            pos: p,
            width: self.width(),
            height: self.height(),
        })
    }

    /// The tile at `p`, or `None` if the cell is empty or out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Tile> {
        self.index(p).and_then(|i| self.cells[i])
    }

    #[inline]
    pub fn is_floor(&self, p: Point) -> bool {
        self.at(p).is_some_and(Tile::is_floor)
    }

    #[inline]
    pub fn is_wall(&self, p: Point) -> bool {
        self.at(p).is_some_and(Tile::is_wall)
    }

    /// Number of floor tiles carved since the last reset.
    #[inline]
    pub fn floor_count(&self) -> usize {
        self.floor_count
    }

    /// Turn the cell at `p` into floor.
    ///
    /// Returns `Ok(true)` if the cell was empty or a wall, `Ok(false)` if it
    /// was already floor (the count is untouched). Converting a wall drops
    /// nothing: walls never carry collectibles.
    pub fn carve_floor(&mut self, p: Point, sink: &mut dyn Sink) -> Result<bool> {
        let i = self.checked_index(p)?;
        match self.cells[i] {
            Some(t) if t.is_floor() => Ok(false),
            _ => {
                self.cells[i] = Some(Tile::FLOOR);
                self.floor_count += 1;
                sink.on_floor_carved(p);
                Ok(true)
            }
        }
    }

    /// Put a collectible on the floor tile at `p`, replacing any previous
    /// tag. Empty cells and walls are left alone and yield `Ok(false)`.
    pub fn place_collectible(
        &mut self,
        p: Point,
        kind: Collectible,
        sink: &mut dyn Sink,
    ) -> Result<bool> {
        let i = self.checked_index(p)?;
        match &mut self.cells[i] {
            Some(t) if t.is_floor() => {
                t.collectible = Some(kind);
                sink.on_collectible_placed(p, kind);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Remove the collectible tag at `p`, returning it.
    pub fn clear_collectible(&mut self, p: Point) -> Option<Collectible> {
        let i = self.index(p)?;
        self.cells[i].as_mut().and_then(|t| t.collectible.take())
    }

    /// Surround the floor with walls.
    ///
    /// Floor cells are visited in row-major order, and for each of them the
    /// 3x3 neighbourhood (clamped to the grid) in row-major order. Every
    /// empty neighbour becomes a wall; floors and existing walls are kept.
    /// Returns the number of walls created.
    pub fn enclose(&mut self, sink: &mut dyn Sink) -> usize {
        let bounds = self.bounds;
        let mut placed = 0;
        for p in bounds {
            if !self.is_floor(p) {
                continue;
            }
            for q in p.neighborhood().intersect(bounds) {
                let i = cell_index(bounds.width(), q);
                if self.cells[i].is_none() {
                    self.cells[i] = Some(Tile::WALL);
                    sink.on_wall_placed(q);
                    placed += 1;
                }
            }
        }
        log::debug!("enclosed {} floor tiles with {placed} walls", self.floor_count);
        placed
    }

    /// Count the tiles of a given kind.
    pub fn count(&self, kind: TileKind) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|t| t.kind == kind)
            .count()
    }

    /// Iterate over the non-empty cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        self.bounds
            .iter()
            .filter_map(move |p| self.at(p).map(|t| (p, t)))
    }

    /// Iterate over the floor cells that carry a collectible.
    pub fn collectibles(&self) -> impl Iterator<Item = (Point, Collectible)> + '_ {
        self.iter()
            .filter_map(|(p, t)| t.collectible.map(|c| (p, c)))
    }

    /// World position of cell `p`.
    #[inline]
    pub fn world(&self, p: Point) -> Vec2 {
        Vec2::from_cell(p, self.scale)
    }

    /// World-space reference point: the centre of the map.
    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(
            self.width() as f64 * self.scale / 2.0,
            self.height() as f64 * self.scale / 2.0,
        )
    }

    /// Plain-text picture of the grid, highest row first.
    ///
    /// `#` wall, `.` floor, `w` weapon chest, `a` ammo chest, space empty.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height() as usize);
        for y in (0..self.height()).rev() {
            for x in 0..self.width() {
                out.push(self.at(Point::new(x, y)).map_or(' ', Tile::glyph));
            }
            out.push('\n');
        }
        out
    }
}
