//! Tile grid collider with traced island outlines
//!
//! Solid cells are merged into closed outlines by walking the boundary edges
//! of the grid. Every edge is oriented with solid on its left, so outer
//! boundaries come out counter-clockwise and holes clockwise. Where two solid
//! cells only touch at a corner the walk turns left, keeping them as separate
//! islands.

use std::collections::HashMap;

use super::{BodyType, CollisionSource};
use crate::foundation::math::Vec2;

/// Lattice corner in cell units
type Corner = (i32, i32);

/// Directed boundary edge, solid on the left
type Edge = (Corner, Corner);

fn delta(from: Corner, to: Corner) -> Corner {
    (to.0 - from.0, to.1 - from.1)
}

fn cross(a: Corner, b: Corner) -> i32 {
    a.0 * b.1 - a.1 * b.0
}

/// Left turns first, then straight, then right
fn turn_rank(incoming: Corner, outgoing: Corner) -> i32 {
    cross(incoming, outgoing).signum()
}

/// Tile grid collider
///
/// Cells are addressed `(x, y)` with `y` pointing up; cell `(0, 0)` covers
/// `origin .. origin + cell_size`. Outlines are regenerated lazily: edits mark
/// the geometry stale and the next composite request rebuilds it.
#[derive(Debug, Clone)]
pub struct TilemapCollider {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    cell_size: Vec2,
    origin: Vec2,
    used_by_composite: bool,
    body_type: BodyType,
    paths: Vec<Vec<Vec2>>,
    dirty: bool,
}

impl TilemapCollider {
    /// Create an empty grid of unit cells at the origin
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
            cell_size: Vec2::new(1.0, 1.0),
            origin: Vec2::zeros(),
            used_by_composite: false,
            body_type: BodyType::default(),
            paths: Vec::new(),
            dirty: true,
        }
    }

    /// Build a grid from text rows, `#` marking solid cells
    ///
    /// The first row is the top of the grid. Short rows are padded with empty
    /// cells.
    pub fn from_ascii(rows: &str) -> Self {
        let lines: Vec<&str> = rows.lines().filter(|line| !line.trim().is_empty()).collect();
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        let mut collider = Self::new(width, lines.len());

        for (row, line) in lines.iter().enumerate() {
            let y = lines.len() - 1 - row;
            for (x, c) in line.chars().enumerate() {
                if c == '#' {
                    collider.cells[y * width + x] = true;
                }
            }
        }
        collider
    }

    /// Set the world size of one cell
    pub fn with_cell_size(mut self, cell_size: Vec2) -> Self {
        self.cell_size = cell_size;
        self.dirty = true;
        self
    }

    /// Set the world position of the grid's lower-left corner
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self.dirty = true;
        self
    }

    /// Set the attached body's simulation mode
    pub fn with_body_type(mut self, body_type: BodyType) -> Self {
        self.body_type = body_type;
        self
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether consumers asked for composite paths
    pub fn is_used_by_composite(&self) -> bool {
        self.used_by_composite
    }

    /// Whether an edit has not been traced yet
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Whether a cell is solid; out-of-range cells are empty
    pub fn is_solid(&self, x: usize, y: usize) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    fn is_solid_at(&self, x: i32, y: i32) -> bool {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) => self.is_solid(x, y),
            _ => false,
        }
    }

    /// Change one cell, returning whether it lies inside the grid
    pub fn set_solid(&mut self, x: usize, y: usize, solid: bool) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        if self.cells[i] != solid {
            self.cells[i] = solid;
            self.dirty = true;
        }
        true
    }

    /// Change a rectangle of cells, clipped to the grid
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, solid: bool) {
        for cy in y..(y + height).min(self.height) {
            for cx in x..(x + width).min(self.width) {
                self.set_solid(cx, cy, solid);
            }
        }
    }

    /// Number of solid cells
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|&&solid| solid).count()
    }

    /// Retrace every outline from the current cells
    pub fn generate_geometry(&mut self) {
        let loops = self.trace_outlines();
        self.paths = loops
            .into_iter()
            .map(|corners| corners.into_iter().map(|c| self.corner_position(c)).collect::<Vec<_>>())
            .collect();
        self.dirty = false;
        log::trace!("Traced {} outline(s) from {} solid cell(s)", self.paths.len(), self.solid_count());
    }

    #[allow(clippy::cast_precision_loss)]
    fn corner_position(&self, corner: Corner) -> Vec2 {
        self.origin + Vec2::new(corner.0 as f32 * self.cell_size.x, corner.1 as f32 * self.cell_size.y)
    }

    /// Boundary edges in row-major cell order
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn boundary_edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if !self.is_solid_at(x, y) {
                    continue;
                }
                let (x0, y0, x1, y1) = (x, y, x + 1, y + 1);
                if !self.is_solid_at(x, y - 1) {
                    edges.push(((x0, y0), (x1, y0)));
                }
                if !self.is_solid_at(x + 1, y) {
                    edges.push(((x1, y0), (x1, y1)));
                }
                if !self.is_solid_at(x, y + 1) {
                    edges.push(((x1, y1), (x0, y1)));
                }
                if !self.is_solid_at(x - 1, y) {
                    edges.push(((x0, y1), (x0, y0)));
                }
            }
        }
        edges
    }

    fn trace_outlines(&self) -> Vec<Vec<Corner>> {
        let edges = self.boundary_edges();
        let mut outgoing: HashMap<Corner, Vec<usize>> = HashMap::new();
        for (i, (start, _)) in edges.iter().enumerate() {
            outgoing.entry(*start).or_default().push(i);
        }

        let mut used = vec![false; edges.len()];
        let mut loops = Vec::new();

        for first in 0..edges.len() {
            if used[first] {
                continue;
            }

            // The left-turn rule pairs every incoming edge with exactly one
            // outgoing edge at each corner, so the walk always closes on `first`.
            let mut corners = Vec::new();
            let mut current = first;
            loop {
                used[current] = true;
                let (start, end) = edges[current];
                corners.push(start);

                let incoming = delta(start, end);
                let next = outgoing.get(&end).and_then(|candidates| {
                    candidates
                        .iter()
                        .copied()
                        .max_by_key(|&i| turn_rank(incoming, delta(edges[i].0, edges[i].1)))
                });
                match next {
                    Some(next) if next != first => current = next,
                    _ => break,
                }
            }

            loops.push(remove_collinear(&corners));
        }

        loops
    }
}

fn remove_collinear(corners: &[Corner]) -> Vec<Corner> {
    let n = corners.len();
    (0..n)
        .filter(|&i| {
            let prev = corners[(i + n - 1) % n];
            let next = corners[(i + 1) % n];
            cross(delta(prev, corners[i]), delta(corners[i], next)) != 0
        })
        .map(|i| corners[i])
        .collect()
}

impl CollisionSource for TilemapCollider {
    fn set_composite_consumption(&mut self, enabled: bool) {
        self.used_by_composite = enabled;
        if enabled && self.dirty {
            self.generate_geometry();
        }
    }

    fn island_count(&self) -> usize {
        if self.used_by_composite {
            self.paths.len()
        } else {
            0
        }
    }

    fn get_path(&self, index: usize, out: &mut Vec<Vec2>) -> usize {
        out.clear();
        if self.used_by_composite {
            if let Some(path) = self.paths.get(index) {
                out.extend_from_slice(path);
            }
        }
        out.len()
    }

    fn body_type(&self) -> BodyType {
        self.body_type
    }

    fn set_body_type(&mut self, body_type: BodyType) {
        self.body_type = body_type;
    }
}
