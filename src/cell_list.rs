// Copyright (c) 2026 Kliment Olechnovic and Mikael Lund
// Part of the mcsasa project, licensed under the MIT License.
// SPDX-License-Identifier: MIT

//! Uniform periodic cell list over the simulation container.
//!
//! The container is split into cells at least as wide as the largest
//! interaction diameter, so every overlapping pair lies in the same or in an
//! adjacent cell and a neighbour query only visits the surrounding 3x3x3 block.

use log::debug;

use crate::types::Point;

/// Integer cell coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellCoord {
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The 27 offsets spanning the 3x3x3 block around a cell, centre included
    #[must_use]
    pub fn neighbourhood_offsets() -> Vec<Self> {
        let mut offsets = Vec::with_capacity(27);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    offsets.push(Self::new(dx, dy, dz));
                }
            }
        }
        offsets
    }
}

impl std::ops::Add for CellCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Grid geometry: number of cells per axis and their width
#[derive(Debug, Clone, PartialEq)]
pub struct CellGrid {
    length: Point,
    cells_per_axis: CellCoord,
    cell_width: Point,
}

impl CellGrid {
    /// Partition a box of side lengths `length` into cells no narrower than `min_cell_width`.
    ///
    /// # Panics
    /// Panics unless `min_cell_width` is positive and the box sides are positive.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(length: Point, min_cell_width: f64) -> Self {
        assert!(
            min_cell_width > 0.0 && min_cell_width.is_finite(),
            "cell width must be positive, got {min_cell_width}"
        );
        assert!(
            length.iter().all(|l| *l > 0.0 && l.is_finite()),
            "box lengths must be positive, got {length:?}"
        );
        let count = |l: f64| ((l / min_cell_width).floor() as i32).max(1);
        let cells_per_axis = CellCoord::new(count(length.x), count(length.y), count(length.z));
        let cell_width = Point::new(
            length.x / f64::from(cells_per_axis.x),
            length.y / f64::from(cells_per_axis.y),
            length.z / f64::from(cells_per_axis.z),
        );
        Self {
            length,
            cells_per_axis,
            cell_width,
        }
    }

    #[must_use]
    pub const fn cells_per_axis(&self) -> CellCoord {
        self.cells_per_axis
    }

    #[must_use]
    pub const fn cell_width(&self) -> Point {
        self.cell_width
    }

    #[must_use]
    pub const fn length(&self) -> Point {
        self.length
    }

    #[allow(clippy::cast_sign_loss)]
    #[must_use]
    pub const fn total_cells(&self) -> usize {
        (self.cells_per_axis.x * self.cells_per_axis.y * self.cells_per_axis.z) as usize
    }

    /// Cell owning a position in the origin-centred box.
    ///
    /// Coordinates are taken modulo the grid extent, so points slightly
    /// outside the box land in the periodic image cell.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn coordinates_of(&self, pos: &Point) -> CellCoord {
        let shifted = pos + self.length * 0.5;
        let axis = |i: usize| (shifted[i] / self.cell_width[i]).floor() as i32;
        self.wrap(CellCoord::new(axis(0), axis(1), axis(2)))
    }

    /// Periodic image of a coordinate inside the grid
    #[must_use]
    pub const fn wrap(&self, coord: CellCoord) -> CellCoord {
        CellCoord::new(
            coord.x.rem_euclid(self.cells_per_axis.x),
            coord.y.rem_euclid(self.cells_per_axis.y),
            coord.z.rem_euclid(self.cells_per_axis.z),
        )
    }

    /// Flat index of a (possibly unwrapped) coordinate
    #[allow(clippy::cast_sign_loss)]
    #[must_use]
    pub const fn index(&self, coord: CellCoord) -> usize {
        let c = self.wrap(coord);
        let n = self.cells_per_axis;
        ((c.z * n.y + c.y) * n.x + c.x) as usize
    }
}

/// Cell list with incremental membership updates.
///
/// Each member index is recorded in exactly one cell; the owning cell is
/// remembered per member so moves and removals are O(cell occupancy).
#[derive(Debug, Clone)]
pub struct CellList {
    grid: CellGrid,
    /// Member indices per cell
    cells: Vec<Vec<usize>>,
    /// Owning cell per particle index (`None` = not a member)
    owners: Vec<Option<usize>>,
    len: usize,
}

impl CellList {
    #[must_use]
    pub fn new(length: Point, min_cell_width: f64) -> Self {
        let grid = CellGrid::new(length, min_cell_width);
        debug!(
            "cell list: {}x{}x{} cells of width {:.3}x{:.3}x{:.3}",
            grid.cells_per_axis.x,
            grid.cells_per_axis.y,
            grid.cells_per_axis.z,
            grid.cell_width.x,
            grid.cell_width.y,
            grid.cell_width.z
        );
        Self {
            cells: vec![Vec::new(); grid.total_cells()],
            grid,
            owners: Vec::new(),
            len: 0,
        }
    }

    #[must_use]
    pub const fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Number of members
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn coordinates_of(&self, pos: &Point) -> CellCoord {
        self.grid.coordinates_of(pos)
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.owner(index).is_some()
    }

    fn owner(&self, index: usize) -> Option<usize> {
        self.owners.get(index).copied().flatten()
    }

    /// Cell coordinates currently recorded for a member
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn cell_of(&self, index: usize) -> Option<CellCoord> {
        let flat = self.owner(index)? as i32;
        let n = self.grid.cells_per_axis;
        Some(CellCoord::new(flat % n.x, (flat / n.x) % n.y, flat / (n.x * n.y)))
    }

    /// Add a member at `pos`. Inserting an existing member relocates it.
    pub fn insert(&mut self, index: usize, pos: &Point) {
        if self.contains(index) {
            self.update_position(index, pos);
            return;
        }
        let cell = self.grid.index(self.grid.coordinates_of(pos));
        if index >= self.owners.len() {
            self.owners.resize(index + 1, None);
        }
        self.owners[index] = Some(cell);
        self.cells[cell].push(index);
        self.len += 1;
    }

    /// Remove a member; returns `false` if `index` was not a member
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(cell) = self.owner(index) else {
            return false;
        };
        let members = &mut self.cells[cell];
        if let Some(slot) = members.iter().position(|&id| id == index) {
            members.swap_remove(slot);
        }
        self.owners[index] = None;
        self.len -= 1;
        true
    }

    /// Move a member to the cell owning `pos`; returns `true` if the cell changed.
    ///
    /// # Panics
    /// Panics if `index` is not a member.
    pub fn update_position(&mut self, index: usize, pos: &Point) -> bool {
        let Some(old_cell) = self.owner(index) else {
            panic!("particle {index} is not a cell list member");
        };
        let new_cell = self.grid.index(self.grid.coordinates_of(pos));
        if new_cell == old_cell {
            return false;
        }
        let members = &mut self.cells[old_cell];
        if let Some(slot) = members.iter().position(|&id| id == index) {
            members.swap_remove(slot);
        }
        self.cells[new_cell].push(index);
        self.owners[index] = Some(new_cell);
        true
    }

    /// Members of the cell at `center + offset`, wrapped periodically
    #[must_use]
    pub fn neighbors_at(&self, center: CellCoord, offset: CellCoord) -> &[usize] {
        &self.cells[self.grid.index(center + offset)]
    }

    /// Flat indices of the distinct cells in the 3x3x3 block around `center`.
    ///
    /// Grids with fewer than three cells along an axis would otherwise visit
    /// the same cell more than once.
    #[must_use]
    pub fn neighbourhood(&self, center: CellCoord) -> Vec<usize> {
        let mut cells: Vec<usize> = CellCoord::neighbourhood_offsets()
            .into_iter()
            .map(|offset| self.grid.index(center + offset))
            .collect();
        cells.sort_unstable();
        cells.dedup();
        cells
    }

    /// All members of the 3x3x3 block around `center`, each listed once
    pub fn members_around(&self, center: CellCoord) -> impl Iterator<Item = usize> + '_ {
        self.neighbourhood(center)
            .into_iter()
            .flat_map(move |cell| self.cells[cell].iter().copied())
    }

    /// All members in ascending index order
    #[must_use]
    pub fn members(&self) -> Vec<usize> {
        self.owners
            .iter()
            .enumerate()
            .filter_map(|(index, owner)| owner.map(|_| index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(side: f64) -> Point {
        Point::new(side, side, side)
    }

    #[test]
    fn grid_dimensions() {
        let grid = CellGrid::new(Point::new(10.0, 25.0, 3.0), 4.0);
        assert_eq!(grid.cells_per_axis(), CellCoord::new(2, 6, 1));
        assert!((grid.cell_width().x - 5.0).abs() < 1e-12);
        assert!((grid.cell_width().z - 3.0).abs() < 1e-12);
        assert_eq!(grid.total_cells(), 12);
    }

    #[test]
    fn coordinates_wrap_periodically() {
        let grid = CellGrid::new(cube(10.0), 2.5);
        assert_eq!(grid.coordinates_of(&Point::new(-5.0, -5.0, -5.0)), CellCoord::new(0, 0, 0));
        assert_eq!(grid.coordinates_of(&Point::new(4.9, 0.1, -0.1)), CellCoord::new(3, 2, 1));
        // exactly on the upper face belongs to the first cell
        assert_eq!(grid.coordinates_of(&Point::new(5.0, 0.0, 0.0)).x, 0);
        assert_eq!(grid.wrap(CellCoord::new(-1, 4, 5)), CellCoord::new(3, 0, 1));
    }

    #[test]
    fn insert_update_remove() {
        let mut cells = CellList::new(cube(10.0), 2.5);
        cells.insert(3, &Point::new(0.1, 0.1, 0.1));
        cells.insert(8, &Point::new(-4.0, 0.1, 0.1));
        assert_eq!(cells.len(), 2);
        assert_eq!(cells.cell_of(3), Some(CellCoord::new(2, 2, 2)));
        assert!(!cells.contains(4));

        // small move inside the same cell
        assert!(!cells.update_position(3, &Point::new(0.2, 0.1, 0.1)));
        // crossing into the neighbouring cell
        assert!(cells.update_position(3, &Point::new(2.6, 0.1, 0.1)));
        assert_eq!(cells.cell_of(3), Some(CellCoord::new(3, 2, 2)));
        assert_eq!(cells.neighbors_at(CellCoord::new(2, 2, 2), CellCoord::new(1, 0, 0)), &[3]);

        assert!(cells.remove(3));
        assert!(!cells.remove(3));
        assert_eq!(cells.members(), vec![8]);
        assert_eq!(cells.len(), 1);
    }

    #[test]
    fn neighbourhood_wraps_around_the_box() {
        let mut cells = CellList::new(cube(10.0), 2.5);
        cells.insert(0, &Point::new(-4.9, 0.0, 0.0));
        cells.insert(1, &Point::new(4.9, 0.0, 0.0));
        cells.insert(2, &Point::new(0.0, 0.0, 0.0));

        let center = cells.coordinates_of(&Point::new(-4.9, 0.0, 0.0));
        let mut around: Vec<usize> = cells.members_around(center).collect();
        around.sort_unstable();
        assert_eq!(around, vec![0, 1]);
    }

    #[test]
    fn small_grids_visit_each_cell_once() {
        let mut cells = CellList::new(cube(10.0), 6.0);
        assert_eq!(cells.grid().total_cells(), 1);
        cells.insert(0, &Point::zeros());
        cells.insert(1, &Point::new(3.0, 3.0, 3.0));

        assert_eq!(cells.neighbourhood(CellCoord::default()), vec![0]);
        assert_eq!(cells.members_around(CellCoord::default()).count(), 2);
    }

    #[test]
    #[should_panic(expected = "not a cell list member")]
    fn updating_a_non_member_panics() {
        let mut cells = CellList::new(cube(10.0), 2.5);
        cells.update_position(0, &Point::zeros());
    }
}
