// Copyright (c) 2026 Kliment Olechnovic and Mikael Lund
// Part of the mcsasa project, licensed under the MIT License.
// SPDX-License-Identifier: MIT

use nalgebra::Vector3;

/// Cartesian position or displacement
pub type Point = Vector3<f64>;

/// Static per-species traits shared by all particles of one kind
#[derive(Debug, Clone, PartialEq)]
pub struct AtomKind {
    pub name: String,
    /// Van der Waals-like radius, without the probe
    pub radius: f64,
}

impl AtomKind {
    #[must_use]
    pub fn new(name: impl Into<String>, radius: f64) -> Self {
        Self {
            name: name.into(),
            radius,
        }
    }
}

/// Point particle stored in the main particle array of a `Space`
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Index of the atom kind in `Space::atoms`
    pub atom_id: usize,
    /// Index in the main particle array (immutable once placed)
    pub index: usize,
    pub pos: Point,
}

impl Particle {
    /// Create a particle that is not yet placed in a container.
    ///
    /// The index is assigned when the particle is added to a `Space`.
    #[must_use]
    pub const fn new(atom_id: usize, pos: Point) -> Self {
        Self {
            atom_id,
            index: 0,
            pos,
        }
    }
}

/// Overlapping neighbours of one target particle.
///
/// `indices` and `points` are parallel: `points[k]` is the minimum-image
/// displacement from the target to particle `indices[k]`. The target itself
/// never appears in `indices`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Neighbours {
    pub index: usize,
    pub indices: Vec<usize>,
    pub points: Vec<Point>,
}

impl Neighbours {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            indices: Vec::new(),
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, index: usize, displacement: Point) {
        debug_assert_ne!(index, self.index, "a particle is never its own neighbour");
        self.indices.push(index);
        self.points.push(displacement);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over `(neighbour index, displacement)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Point)> + '_ {
        self.indices.iter().copied().zip(self.points.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_keep_parallel_lists() {
        let mut neighbours = Neighbours::new(3);
        assert!(neighbours.is_empty());

        neighbours.push(1, Point::new(1.0, 0.0, 0.0));
        neighbours.push(7, Point::new(0.0, -2.0, 0.0));

        assert_eq!(neighbours.len(), 2);
        assert_eq!(neighbours.indices.len(), neighbours.points.len());
        let collected: Vec<_> = neighbours.iter().map(|(i, p)| (i, p.y)).collect();
        assert_eq!(collected, vec![(1, 0.0), (7, -2.0)]);
    }
}
