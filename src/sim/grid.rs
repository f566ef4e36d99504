//! Grid geometry for the playfield
//!
//! Positions are pixel coordinates of a cell's top-left corner. Movement is
//! always one full cell; leaving the playfield wraps to the opposite edge.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// Unit vector in screen space (y grows downward)
    #[inline]
    pub fn vector(self) -> IVec2 {
        match self {
            Heading::Up => IVec2::new(0, -1),
            Heading::Down => IVec2::new(0, 1),
            Heading::Left => IVec2::new(-1, 0),
            Heading::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    /// True if turning from `current` to `self` would be an instant 180°
    #[inline]
    pub fn reverses(self, current: Heading) -> bool {
        self == current.opposite()
    }
}

/// Wrap a position back onto the playfield, one axis at a time
///
/// A coordinate at or past the far bound becomes 0; a negative coordinate
/// becomes the last cell (`bound - cell_size`).
pub fn wrap(pos: IVec2, cell_size: i32, width: i32, height: i32) -> IVec2 {
    IVec2::new(
        wrap_axis(pos.x, cell_size, width),
        wrap_axis(pos.y, cell_size, height),
    )
}

#[inline]
fn wrap_axis(value: i32, cell_size: i32, bound: i32) -> i32 {
    if value >= bound {
        0
    } else if value < 0 {
        bound - cell_size
    } else {
        value
    }
}

/// Whether two cell-sized squares overlap (touching edges do not count)
#[inline]
pub fn cells_overlap(a: IVec2, b: IVec2, cell_size: i32) -> bool {
    (a.x - b.x).abs() < cell_size && (a.y - b.y).abs() < cell_size
}

/// Lattice cells (multiples of `cell_size`) covered by a square at `pos`
///
/// An aligned square covers exactly one cell; an unaligned one covers two or four.
pub fn lattice_cells_covered(pos: IVec2, cell_size: i32) -> Vec<IVec2> {
    let axis = |v: i32| {
        let base = v.div_euclid(cell_size) * cell_size;
        if v.rem_euclid(cell_size) == 0 {
            vec![base]
        } else {
            vec![base, base + cell_size]
        }
    };

    let xs = axis(pos.x);
    let ys = axis(pos.y);
    let mut cells = Vec::with_capacity(xs.len() * ys.len());
    for &y in &ys {
        for &x in &xs {
            cells.push(IVec2::new(x, y));
        }
    }
    cells
}

/// Playfield geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Arena {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Number of whole lattice columns
    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    /// Number of whole lattice rows
    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    /// Centre of the playfield, where a new snake's head is placed
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.width / 2, self.height / 2)
    }

    /// One cell step from `pos` in `heading`, wrapped
    pub fn step(&self, pos: IVec2, heading: Heading) -> IVec2 {
        self.wrap(pos + heading.vector() * self.cell_size)
    }

    #[inline]
    pub fn wrap(&self, pos: IVec2) -> IVec2 {
        wrap(pos, self.cell_size, self.width, self.height)
    }

    /// Lattice cell containing the top-left corner of `pos`
    pub fn cell_index(&self, pos: IVec2) -> IVec2 {
        IVec2::new(
            pos.x.div_euclid(self.cell_size),
            pos.y.div_euclid(self.cell_size),
        )
    }

    /// Shortest wrapped Manhattan distance between two positions, in cells
    pub fn wrapped_distance(&self, a: IVec2, b: IVec2) -> i32 {
        let (ca, cb) = (self.cell_index(a), self.cell_index(b));
        let dx = (ca.x - cb.x).abs();
        let dy = (ca.y - cb.y).abs();
        let (cols, rows) = (self.columns().max(1), self.rows().max(1));
        dx.min((cols - dx).abs()) + dy.min((rows - dy).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_far_edges_to_zero() {
        assert_eq!(wrap(IVec2::new(800, 225), 20, 800, 450), IVec2::new(0, 225));
        assert_eq!(wrap(IVec2::new(400, 460), 20, 800, 450), IVec2::new(400, 0));
    }

    #[test]
    fn test_wrap_negative_to_last_cell() {
        assert_eq!(wrap(IVec2::new(-20, 225), 20, 800, 450), IVec2::new(780, 225));
        assert_eq!(wrap(IVec2::new(40, -20), 20, 800, 450), IVec2::new(40, 430));
    }

    #[test]
    fn test_wrap_both_axes_independently() {
        assert_eq!(wrap(IVec2::new(820, -5), 20, 800, 450), IVec2::new(0, 430));
        assert_eq!(wrap(IVec2::new(100, 100), 20, 800, 450), IVec2::new(100, 100));
    }

    #[test]
    fn test_heading_reversal() {
        for h in Heading::ALL {
            assert!(h.opposite().reverses(h));
            assert!(!h.reverses(h));
            assert_eq!(h.vector() + h.opposite().vector(), IVec2::ZERO);
        }
        assert!(!Heading::Up.reverses(Heading::Left));
    }

    #[test]
    fn test_cells_overlap() {
        assert!(cells_overlap(IVec2::new(400, 225), IVec2::new(400, 220), 20));
        assert!(cells_overlap(IVec2::new(400, 225), IVec2::new(400, 240), 20));
        assert!(!cells_overlap(IVec2::new(400, 225), IVec2::new(420, 225), 20));
        assert!(!cells_overlap(IVec2::new(0, 0), IVec2::new(0, 20), 20));
    }

    #[test]
    fn test_lattice_cells_covered() {
        assert_eq!(lattice_cells_covered(IVec2::new(40, 60), 20), vec![IVec2::new(40, 60)]);
        assert_eq!(
            lattice_cells_covered(IVec2::new(40, 225), 20),
            vec![IVec2::new(40, 220), IVec2::new(40, 240)]
        );
        assert_eq!(lattice_cells_covered(IVec2::new(5, 5), 20).len(), 4);
    }

    #[test]
    fn test_arena_step_wraps() {
        let arena = Arena::new(800, 450, 20);
        assert_eq!(arena.step(IVec2::new(780, 225), Heading::Right), IVec2::new(0, 225));
        assert_eq!(arena.step(IVec2::new(0, 225), Heading::Left), IVec2::new(780, 225));
        assert_eq!(arena.columns(), 40);
        assert_eq!(arena.rows(), 22);
        assert_eq!(arena.center(), IVec2::new(400, 225));
    }

    #[test]
    fn test_wrapped_distance() {
        let arena = Arena::new(200, 200, 20);
        assert_eq!(arena.wrapped_distance(IVec2::new(0, 0), IVec2::new(40, 0)), 2);
        // Across the seam is shorter
        assert_eq!(arena.wrapped_distance(IVec2::new(0, 0), IVec2::new(180, 0)), 1);
    }

    proptest! {
        #[test]
        fn prop_wrap_stays_in_bounds(
            x in -10_000i32..10_000,
            y in -10_000i32..10_000,
            cell in 1i32..64,
            cols in 1i32..100,
            rows in 1i32..100,
        ) {
            let (w, h) = (cell * cols, cell * rows);
            let p = wrap(IVec2::new(x, y), cell, w, h);
            prop_assert!(p.x >= 0 && p.x < w);
            prop_assert!(p.y >= 0 && p.y < h);
        }
    }
}
