// Copyright (c) 2026 Kliment Olechnovic and Mikael Lund
// Part of the mcsasa project, licensed under the MIT License.
// SPDX-License-Identifier: MIT

//! SASA engine: area buffer, radii buffer and incremental update policy.
//!
//! The engine keeps its spatial index consistent with the container after
//! every [`Change`], but never recomputes areas on its own after `init`. The
//! caller decides which particles are dirty and feeds them through
//! [`Sasa::recompute`] or [`Sasa::update_sasa`].

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::cell_list::CellList;
use crate::change::{Change, ChangeKind, GroupChange};
use crate::error::SasaError;
use crate::exposure::exposed_area;
use crate::neighbours::{CellListSearch, DirectSearch, NeighbourSearch};
use crate::space::Space;
use crate::types::{Neighbours, Point};

/// Neighbour search strategy, chosen at construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Examine all active particles
    Direct,
    /// Examine the 3x3x3 cell block around the target
    #[default]
    CellList,
}

/// Construction-time settings of the SASA engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SasaConfig {
    /// Probe (solvent) radius added to every particle radius
    #[serde(rename = "radius", alias = "probe_radius")]
    pub probe_radius: f64,
    /// Number of bands each sphere is cut into
    #[serde(rename = "slices", alias = "slices_per_atom")]
    pub slices_per_atom: usize,
    pub search: SearchStrategy,
}

impl Default for SasaConfig {
    fn default() -> Self {
        Self {
            probe_radius: 1.4,
            slices_per_atom: 20,
            search: SearchStrategy::default(),
        }
    }
}

impl SasaConfig {
    /// Parse a JSON object such as `{"radius": 1.4, "slices": 20}`.
    ///
    /// # Errors
    /// Returns [`SasaError::Config`] for malformed JSON or unknown keys, and the
    /// validation errors of [`SasaConfig::validated`].
    pub fn from_json(json: &str) -> Result<Self, SasaError> {
        serde_json::from_str::<Self>(json)?.validated()
    }

    /// # Errors
    /// Returns [`SasaError::InvalidProbeRadius`] unless the probe radius is
    /// positive and finite, and [`SasaError::InvalidSlices`] for zero slices.
    pub fn validated(self) -> Result<Self, SasaError> {
        if !(self.probe_radius.is_finite() && self.probe_radius > 0.0) {
            return Err(SasaError::InvalidProbeRadius(self.probe_radius));
        }
        if self.slices_per_atom == 0 {
            return Err(SasaError::InvalidSlices(self.slices_per_atom));
        }
        Ok(self)
    }
}

/// Solvent-accessible surface areas of all particles in a [`Space`].
///
/// # Example
///
/// ```
/// use mcsasa::{AtomKind, Cuboid, Particle, Point, Sasa, SasaConfig, Space};
///
/// let mut space = Space::new(Cuboid::cube(50.0)?, vec![AtomKind::new("A", 2.0)]);
/// space.add_group(vec![
///     Particle::new(0, Point::new(0.0, 0.0, 0.0)),
///     Particle::new(0, Point::new(5.0, 0.0, 0.0)),
/// ])?;
///
/// let mut sasa = Sasa::new(SasaConfig::default())?;
/// sasa.init(&space);
///
/// let full = 4.0 * std::f64::consts::PI * 3.4 * 3.4;
/// assert!(sasa.areas()[0] < full);
/// # Ok::<(), mcsasa::SasaError>(())
/// ```
#[derive(Debug)]
pub struct Sasa {
    config: SasaConfig,
    /// Exposed area per particle in the particle array
    areas: Vec<f64>,
    /// Particle radius plus probe radius, per particle in the particle array
    radii: Vec<f64>,
    cell_length: f64,
    search: Box<dyn NeighbourSearch>,
    initialized: bool,
}

impl Sasa {
    /// # Errors
    /// Returns the validation errors of [`SasaConfig::validated`].
    pub fn new(config: SasaConfig) -> Result<Self, SasaError> {
        let config = config.validated()?;
        let search: Box<dyn NeighbourSearch> = match config.search {
            SearchStrategy::Direct => Box::new(DirectSearch),
            SearchStrategy::CellList => Box::new(CellListSearch::default()),
        };
        Ok(Self {
            config,
            areas: Vec::new(),
            radii: Vec::new(),
            cell_length: 0.0,
            search,
            initialized: false,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &SasaConfig {
        &self.config
    }

    #[must_use]
    pub const fn probe_radius(&self) -> f64 {
        self.config.probe_radius
    }

    #[must_use]
    pub const fn slices_per_atom(&self) -> usize {
        self.config.slices_per_atom
    }

    /// Exposed area per particle index; entries of inactive particles are stale
    #[must_use]
    pub fn areas(&self) -> &[f64] {
        &self.areas
    }

    /// SASA radius (particle radius + probe) per particle index
    #[must_use]
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Edge length requested for the cell grid: twice the largest SASA radius
    #[must_use]
    pub const fn cell_length(&self) -> f64 {
        self.cell_length
    }

    /// Cell list kept by the search strategy, if any
    #[must_use]
    pub fn cell_list(&self) -> Option<&CellList> {
        self.search.cell_list()
    }

    /// Full (re)build: radii, spatial index and the area of every active particle.
    pub fn init(&mut self, space: &Space) {
        self.rebuild_radii(space);
        self.areas.clear();
        self.areas.resize(space.particles().len(), 0.0);
        self.search.rebuild(space, self.cell_length);
        self.initialized = true;

        let targets: Vec<usize> = space.active_particles().map(|p| p.index).collect();
        self.recompute(space, &targets);
        debug!(
            "initialised SASA of {} active particles, cell length {:.3}",
            targets.len(),
            self.cell_length
        );
    }

    fn rebuild_radii(&mut self, space: &Space) {
        let probe = self.config.probe_radius;
        self.radii = (0..space.particles().len())
            .map(|index| space.radius_of(index) + probe)
            .collect();
        let max_radius = self.radii.iter().copied().fold(probe, f64::max);
        self.cell_length = 2.0 * max_radius;
    }

    /// Bring the spatial index in line with the container after a change.
    ///
    /// Areas are not recomputed here.
    ///
    /// # Panics
    /// Panics if called before [`Sasa::init`], if the change refers to
    /// groups or particles outside the container, or if a displacement names
    /// an inactive particle.
    pub fn update(&mut self, space: &Space, change: &Change) {
        self.assert_initialized();
        match change.kind() {
            ChangeKind::Nothing => {}
            ChangeKind::Rebuild { everything } => {
                if everything {
                    self.rebuild_radii(space);
                    self.areas.resize(space.particles().len(), 0.0);
                }
                debug!("rebuilding spatial index (everything: {everything})");
                self.search.rebuild(space, self.cell_length);
            }
            ChangeKind::Displacement(groups) => {
                for group_change in groups {
                    self.follow_displacement(space, group_change);
                }
            }
            ChangeKind::Matter(groups) => {
                if space.particles().len() != self.radii.len() {
                    self.follow_particle_count(space);
                }
                for group_change in groups {
                    self.follow_matter(space, group_change);
                }
            }
        }
    }

    fn follow_displacement(&mut self, space: &Space, group_change: &GroupChange) {
        let group = space.groups()[group_change.group_index];
        for i in group_change.relative_indices(group.size) {
            assert!(
                group.contains(i),
                "displaced particle {i} of group {} is not active (size {})",
                group_change.group_index,
                group.size
            );
            self.search.relocate(space, group.offset + i);
        }
    }

    /// Groups were appended after `init`: extend the buffers and, if a larger
    /// radius arrived, rebuild the grid so one cell still spans a full cutoff.
    fn follow_particle_count(&mut self, space: &Space) {
        let old_cell_length = self.cell_length;
        self.rebuild_radii(space);
        self.areas.resize(space.particles().len(), 0.0);
        debug!(
            "particle array now holds {} particles, cell length {:.3}",
            self.radii.len(),
            self.cell_length
        );
        if self.cell_length > old_cell_length {
            self.search.rebuild(space, self.cell_length);
        }
    }

    /// A relative index is live iff it lies below the group's active size; an
    /// inactive group has size zero, so all its touched members are dropped.
    fn follow_matter(&mut self, space: &Space, group_change: &GroupChange) {
        let group = space.groups()[group_change.group_index];
        for i in group_change.relative_indices(group.capacity) {
            let index = group.offset + i;
            if group.contains(i) {
                trace!("particle {index} is active");
                self.search.insert(space, index);
            } else {
                trace!("particle {index} is inactive");
                self.search.remove(index);
            }
        }
    }

    /// Overlapping neighbours of one particle.
    ///
    /// # Panics
    /// Panics if called before [`Sasa::init`] or if `index` is out of range.
    #[must_use]
    pub fn neighbour_data_of_particle(&self, space: &Space, index: usize) -> Neighbours {
        self.assert_initialized();
        assert!(
            index < self.radii.len(),
            "particle index {index} out of range ({} particles)",
            self.radii.len()
        );
        self.search.neighbours_of(space, &self.radii, index)
    }

    /// Overlapping neighbours of each target, in target order.
    ///
    /// # Panics
    /// See [`Sasa::neighbour_data_of_particle`].
    #[must_use]
    pub fn neighbour_data(&self, space: &Space, targets: &[usize]) -> Vec<Neighbours> {
        targets
            .iter()
            .map(|&index| self.neighbour_data_of_particle(space, index))
            .collect()
    }

    /// Exposed area of one particle from its neighbour data
    #[must_use]
    pub fn area_of(&self, neighbours: &Neighbours) -> f64 {
        let spheres: Vec<(Point, f64)> = neighbours
            .iter()
            .map(|(j, displacement)| (*displacement, self.radii[j]))
            .collect();
        exposed_area(
            self.radii[neighbours.index],
            &spheres,
            self.config.slices_per_atom,
        )
    }

    /// Overwrite the area of each neighbour record's target
    pub fn update_sasa(&mut self, neighbours: &[Neighbours]) {
        for record in neighbours {
            self.areas[record.index] = self.area_of(record);
        }
    }

    /// Recompute the areas of the given particles
    ///
    /// # Panics
    /// See [`Sasa::neighbour_data_of_particle`].
    pub fn recompute(&mut self, space: &Space, targets: &[usize]) {
        let neighbours = self.neighbour_data(space, targets);
        self.update_sasa(&neighbours);
    }

    /// The touched particles together with their current neighbours, sorted.
    ///
    /// Taking the union of this set before and after a move gives every
    /// particle whose area the move can have changed.
    ///
    /// # Panics
    /// See [`Sasa::neighbour_data_of_particle`].
    #[must_use]
    pub fn affected_indices(&self, space: &Space, touched: &[usize]) -> Vec<usize> {
        let mut affected: Vec<usize> = touched.to_vec();
        for &index in touched {
            if space.is_active(index) {
                affected.extend(self.neighbour_data_of_particle(space, index).indices);
            }
        }
        affected.sort_unstable();
        affected.dedup();
        affected
    }

    /// Sum of the areas of all active particles
    #[must_use]
    pub fn total_area(&self, space: &Space) -> f64 {
        space.active_particles().map(|p| self.areas[p.index]).sum()
    }

    fn assert_initialized(&self) {
        assert!(self.initialized, "SASA engine used before init");
    }
}
