// Copyright (c) 2026 Kliment Olechnovic and Mikael Lund
// Part of the mcsasa project, licensed under the MIT License.
// SPDX-License-Identifier: MIT

//! Strategies for finding the overlapping neighbours of a particle.

use log::{debug, trace};

use crate::cell_list::CellList;
use crate::space::Space;
use crate::types::Neighbours;

/// How overlapping neighbours are found.
///
/// All strategies return the same neighbour set; they differ only in cost and
/// in the spatial index they keep in sync with the container.
pub trait NeighbourSearch: std::fmt::Debug {
    /// Discard any spatial index and rebuild it from the active particles
    fn rebuild(&mut self, space: &Space, cell_length: f64);

    /// Follow a particle that moved
    fn relocate(&mut self, space: &Space, index: usize);

    /// Start tracking a particle that became active (no-op if already tracked)
    fn insert(&mut self, space: &Space, index: usize);

    /// Stop tracking a particle that became inactive (no-op if not tracked)
    fn remove(&mut self, index: usize);

    /// Overlapping neighbours of `index`, where `radii` holds the SASA radius
    /// of every particle in the array
    fn neighbours_of(&self, space: &Space, radii: &[f64], index: usize) -> Neighbours;

    /// Underlying cell list, if the strategy keeps one
    fn cell_list(&self) -> Option<&CellList> {
        None
    }
}

/// Build the neighbour record of `index` from a set of candidate particles.
///
/// A candidate `j` is a neighbour iff its minimum-image squared distance is at
/// most `(r_i + r_j)²`. Output is in ascending index order.
fn collect_neighbours(
    space: &Space,
    radii: &[f64],
    index: usize,
    candidates: impl Iterator<Item = usize>,
) -> Neighbours {
    let particles = space.particles();
    let target = &particles[index];
    let radius = radii[index];

    let mut found: Vec<usize> = candidates
        .filter(|&j| j != index)
        .filter(|&j| {
            let cutoff = radius + radii[j];
            space.geometry.sqdist(&target.pos, &particles[j].pos) <= cutoff * cutoff
        })
        .collect();
    found.sort_unstable();

    let mut neighbours = Neighbours::new(index);
    for j in found {
        let displacement = space.geometry.vdist(&particles[j].pos, &target.pos);
        neighbours.push(j, displacement);
    }
    neighbours
}

/// All-pairs search over the active particles, O(N) per query
#[derive(Debug, Clone, Default)]
pub struct DirectSearch;

impl NeighbourSearch for DirectSearch {
    fn rebuild(&mut self, _space: &Space, _cell_length: f64) {}

    fn relocate(&mut self, _space: &Space, _index: usize) {}

    fn insert(&mut self, _space: &Space, _index: usize) {}

    fn remove(&mut self, _index: usize) {}

    fn neighbours_of(&self, space: &Space, radii: &[f64], index: usize) -> Neighbours {
        collect_neighbours(
            space,
            radii,
            index,
            space.active_particles().map(|particle| particle.index),
        )
    }
}

/// Search restricted to the 3x3x3 cell block around the target
#[derive(Debug, Clone, Default)]
pub struct CellListSearch {
    cell_list: Option<CellList>,
}

impl CellListSearch {
    fn cells(&self) -> &CellList {
        let Some(cell_list) = &self.cell_list else {
            panic!("cell list used before initialisation");
        };
        cell_list
    }

    fn cells_mut(&mut self) -> &mut CellList {
        let Some(cell_list) = &mut self.cell_list else {
            panic!("cell list used before initialisation");
        };
        cell_list
    }
}

impl NeighbourSearch for CellListSearch {
    fn rebuild(&mut self, space: &Space, cell_length: f64) {
        let mut cell_list = CellList::new(space.geometry.length(), cell_length);
        for particle in space.active_particles() {
            cell_list.insert(particle.index, &particle.pos);
        }
        debug!("cell list holds {} active particles", cell_list.len());
        self.cell_list = Some(cell_list);
    }

    fn relocate(&mut self, space: &Space, index: usize) {
        let pos = &space.particles()[index].pos;
        if self.cells_mut().update_position(index, pos) {
            trace!("particle {index} changed cell");
        }
    }

    fn insert(&mut self, space: &Space, index: usize) {
        let pos = &space.particles()[index].pos;
        self.cells_mut().insert(index, pos);
    }

    fn remove(&mut self, index: usize) {
        self.cells_mut().remove(index);
    }

    fn neighbours_of(&self, space: &Space, radii: &[f64], index: usize) -> Neighbours {
        let cells = self.cells();
        let center = cells.coordinates_of(&space.particles()[index].pos);
        collect_neighbours(space, radii, index, cells.members_around(center))
    }

    fn cell_list(&self) -> Option<&CellList> {
        self.cell_list.as_ref()
    }
}
