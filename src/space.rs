// Copyright (c) 2026 Kliment Olechnovic and Mikael Lund
// Part of the mcsasa project, licensed under the MIT License.
// SPDX-License-Identifier: MIT

//! Particle container: atom kinds, one contiguous particle array, and groups.
//!
//! Particles keep their array index for their whole lifetime. Groups own a
//! contiguous slice of the array; only the first `size` members of a group are
//! active, the remaining `capacity - size` are parked until matter is inserted.

use std::ops::Range;

use log::trace;

use crate::error::SasaError;
use crate::geometry::Geometry;
use crate::types::{AtomKind, Particle, Point};

/// Contiguous range of particles, e.g. a molecule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    /// Index of the first particle in the particle array
    pub offset: usize,
    /// Total number of particles reserved for the group
    pub capacity: usize,
    /// Number of active particles, counted from the start
    pub size: usize,
}

impl Group {
    /// A group is active while at least one of its particles is active
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.size > 0
    }

    /// Whether the relative index refers to a live member
    #[must_use]
    pub const fn contains(&self, relative_index: usize) -> bool {
        relative_index < self.size
    }

    /// Absolute indices of the active members
    #[must_use]
    pub const fn active_range(&self) -> Range<usize> {
        self.offset..self.offset + self.size
    }

    /// Absolute indices of all reserved members, active or not
    #[must_use]
    pub const fn full_range(&self) -> Range<usize> {
        self.offset..self.offset + self.capacity
    }
}

/// Simulation container holding geometry, species, particles and groups.
#[derive(Debug)]
pub struct Space {
    pub geometry: Box<dyn Geometry>,
    atoms: Vec<AtomKind>,
    particles: Vec<Particle>,
    groups: Vec<Group>,
}

impl Space {
    pub fn new(geometry: impl Geometry + 'static, atoms: Vec<AtomKind>) -> Self {
        Self {
            geometry: Box::new(geometry),
            atoms,
            particles: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Append a fully active group and return its index.
    ///
    /// Particle indices are assigned here and positions are wrapped into the
    /// primary cell.
    ///
    /// # Errors
    /// Returns [`SasaError::UnknownAtomKind`] if a particle refers to an undefined kind.
    pub fn add_group(&mut self, particles: Vec<Particle>) -> Result<usize, SasaError> {
        if let Some(particle) = particles.iter().find(|p| p.atom_id >= self.atoms.len()) {
            return Err(SasaError::UnknownAtomKind {
                atom_id: particle.atom_id,
                defined: self.atoms.len(),
            });
        }
        let offset = self.particles.len();
        let capacity = particles.len();
        for (i, mut particle) in particles.into_iter().enumerate() {
            particle.index = offset + i;
            self.geometry.boundary(&mut particle.pos);
            self.particles.push(particle);
        }
        self.groups.push(Group {
            offset,
            capacity,
            size: capacity,
        });
        Ok(self.groups.len() - 1)
    }

    /// Change the number of active particles in a group.
    ///
    /// Shrinking deactivates members from the end; growing reactivates them.
    ///
    /// # Errors
    /// Returns [`SasaError::GroupCapacity`] if `size` exceeds the group capacity.
    ///
    /// # Panics
    /// Panics if `group_index` is out of range.
    pub fn resize_group(&mut self, group_index: usize, size: usize) -> Result<(), SasaError> {
        let group = &mut self.groups[group_index];
        if size > group.capacity {
            return Err(SasaError::GroupCapacity {
                group_index,
                capacity: group.capacity,
                requested: size,
            });
        }
        trace!("group {group_index}: {} -> {size} active", group.size);
        group.size = size;
        Ok(())
    }

    #[must_use]
    pub fn atoms(&self) -> &[AtomKind] {
        &self.atoms
    }

    /// The whole particle array, including inactive particles
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Active particles, in ascending index order
    pub fn active_particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.groups
            .iter()
            .flat_map(move |group| self.particles[group.active_range()].iter())
    }

    /// # Panics
    /// Panics if `index` is outside the particle array.
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        assert!(index < self.particles.len(), "particle index {index} out of range");
        self.groups
            .iter()
            .find(|group| group.full_range().contains(&index))
            .is_some_and(|group| group.active_range().contains(&index))
    }

    /// Absolute index of the first particle in a group
    ///
    /// # Panics
    /// Panics if `group_index` is out of range.
    #[must_use]
    pub fn first_particle_index(&self, group_index: usize) -> usize {
        self.groups[group_index].offset
    }

    /// Radius of the particle's atom kind, without probe
    ///
    /// # Panics
    /// Panics if `index` is outside the particle array.
    #[must_use]
    pub fn radius_of(&self, index: usize) -> f64 {
        self.atoms[self.particles[index].atom_id].radius
    }

    /// Place a particle, applying boundary conditions
    ///
    /// # Panics
    /// Panics if `index` is outside the particle array.
    pub fn set_position(&mut self, index: usize, mut pos: Point) {
        self.geometry.boundary(&mut pos);
        self.particles[index].pos = pos;
    }

    /// Displace a particle, applying boundary conditions
    ///
    /// # Panics
    /// Panics if `index` is outside the particle array.
    pub fn translate(&mut self, index: usize, displacement: &Point) {
        let pos = self.particles[index].pos + displacement;
        self.set_position(index, pos);
    }

    /// Resize the container and scale all particle positions with it.
    ///
    /// # Errors
    /// Returns [`SasaError::InvalidBoxLength`] for invalid side lengths; the
    /// container is left untouched in that case.
    pub fn scale_volume(&mut self, length: Point) -> Result<(), SasaError> {
        let old_length = self.geometry.length();
        self.geometry.set_length(length)?;
        let factor = length.component_div(&old_length);
        for particle in &mut self.particles {
            particle.pos.component_mul_assign(&factor);
            self.geometry.boundary(&mut particle.pos);
        }
        Ok(())
    }
}
