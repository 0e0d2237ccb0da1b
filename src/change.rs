// Copyright (c) 2026 Kliment Olechnovic and Mikael Lund
// Part of the mcsasa project, licensed under the MIT License.
// SPDX-License-Identifier: MIT

//! Description of what a proposed Monte Carlo move touched.

use crate::space::Space;

/// Particles touched within one group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupChange {
    pub group_index: usize,
    /// Indices relative to the group's first particle. Empty means the whole group.
    pub relative_atom_indices: Vec<usize>,
}

impl GroupChange {
    /// Whole-group change
    #[must_use]
    pub const fn group(group_index: usize) -> Self {
        Self {
            group_index,
            relative_atom_indices: Vec::new(),
        }
    }

    #[must_use]
    pub const fn atoms(group_index: usize, relative_atom_indices: Vec<usize>) -> Self {
        Self {
            group_index,
            relative_atom_indices,
        }
    }

    /// Relative indices touched, expanding an empty list to `0..whole`
    #[must_use]
    pub fn relative_indices(&self, whole: usize) -> Vec<usize> {
        if self.relative_atom_indices.is_empty() {
            (0..whole).collect()
        } else {
            self.relative_atom_indices.clone()
        }
    }
}

/// Change descriptor produced by a move proposal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Change {
    /// Everything may have changed; rebuild all state
    pub everything: bool,
    /// The container was resized
    pub volume_change: bool,
    /// Particles were activated or deactivated
    pub matter_change: bool,
    pub groups: Vec<GroupChange>,
}

/// How an incremental consumer must react to a [`Change`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind<'a> {
    /// Nothing was touched
    Nothing,
    /// Spatial state is invalid; `everything` also invalidates per-particle state
    Rebuild { everything: bool },
    /// Active particles moved; the active set is unchanged
    Displacement(&'a [GroupChange]),
    /// Particles in these groups were inserted or removed
    Matter(&'a [GroupChange]),
}

impl Change {
    #[must_use]
    pub fn everything() -> Self {
        Self {
            everything: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn volume() -> Self {
        Self {
            volume_change: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn displacement(groups: Vec<GroupChange>) -> Self {
        Self {
            groups,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn matter(groups: Vec<GroupChange>) -> Self {
        Self {
            matter_change: true,
            groups,
            ..Default::default()
        }
    }

    /// Classify the change, in priority order `everything`, `volume_change`, `matter_change`
    #[must_use]
    pub fn kind(&self) -> ChangeKind<'_> {
        match (self.everything, self.volume_change, self.matter_change) {
            (true, _, _) => ChangeKind::Rebuild { everything: true },
            (false, true, _) => ChangeKind::Rebuild { everything: false },
            (false, false, true) => ChangeKind::Matter(&self.groups),
            (false, false, false) if self.groups.is_empty() => ChangeKind::Nothing,
            (false, false, false) => ChangeKind::Displacement(&self.groups),
        }
    }

    /// Absolute particle indices named by the change, sorted and deduplicated.
    ///
    /// A group record without atom indices stands for the group's full capacity.
    ///
    /// # Panics
    /// Panics if a record refers to a group that does not exist.
    #[must_use]
    pub fn touched_indices(&self, space: &Space) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .groups
            .iter()
            .flat_map(|group_change| {
                let group = &space.groups()[group_change.group_index];
                group_change
                    .relative_indices(group.capacity)
                    .into_iter()
                    .map(move |i| group.offset + i)
            })
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Cuboid;
    use crate::types::{AtomKind, Particle, Point};

    #[test]
    fn decision_table() {
        assert_eq!(Change::default().kind(), ChangeKind::Nothing);
        assert_eq!(
            Change::everything().kind(),
            ChangeKind::Rebuild { everything: true }
        );
        assert_eq!(
            Change::volume().kind(),
            ChangeKind::Rebuild { everything: false }
        );

        let moved = Change::displacement(vec![GroupChange::group(0)]);
        assert!(matches!(moved.kind(), ChangeKind::Displacement(groups) if groups.len() == 1));

        let inserted = Change::matter(vec![GroupChange::atoms(1, vec![2])]);
        assert!(matches!(inserted.kind(), ChangeKind::Matter(_)));

        // `everything` wins over all other flags
        let all = Change {
            everything: true,
            volume_change: true,
            matter_change: true,
            groups: vec![GroupChange::group(0)],
        };
        assert_eq!(all.kind(), ChangeKind::Rebuild { everything: true });

        // volume wins over matter
        let resized = Change {
            volume_change: true,
            matter_change: true,
            ..Default::default()
        };
        assert_eq!(resized.kind(), ChangeKind::Rebuild { everything: false });
    }

    #[test]
    fn touched_indices_are_absolute() {
        let mut space = Space::new(Cuboid::cube(10.0).unwrap(), vec![AtomKind::new("A", 1.0)]);
        let atoms = |n: usize| (0..n).map(|_| Particle::new(0, Point::zeros())).collect();
        space.add_group(atoms(2)).unwrap();
        space.add_group(atoms(3)).unwrap();

        let change = Change::displacement(vec![
            GroupChange::atoms(1, vec![2, 0]),
            GroupChange::group(0),
            GroupChange::atoms(1, vec![0]),
        ]);
        assert_eq!(change.touched_indices(&space), vec![0, 1, 2, 4]);
    }
}
